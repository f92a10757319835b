// Single-shot fetch of the call report array.
//
// No retry, no timeout and no caching: one GET per run. The status is
// checked before the body is touched, so a failing server always surfaces
// as `FetchError::Network` with its status code even if the body is
// truncated or unreadable.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

/// Where the controller gets its raw records from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_data(&self) -> Result<Vec<Value>, FetchError>;
}

/// Anything outside 2xx is a network error carrying the status code.
pub fn check_status(status: u16) -> Result<(), FetchError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(FetchError::Network { status })
    }
}

/// Decode a response body as a JSON array. Objects, scalars and invalid
/// JSON are all parse errors.
pub fn decode_body(body: &str) -> Result<Vec<Value>, FetchError> {
    Ok(serde_json::from_str::<Vec<Value>>(body)?)
}

pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    async fn fetch_data(&self) -> Result<Vec<Value>, FetchError> {
        log::debug!("GET {}", self.url);
        let resp = self.client.get(&self.url).send().await?;
        check_status(resp.status().as_u16())?;
        // Only read the body once we know the server answered 2xx.
        let body = resp.text().await?;
        decode_body(&body)
    }
}

/// In-memory source replaying a canned HTTP response.
#[cfg(test)]
pub struct CannedSource {
    pub status: u16,
    pub body: String,
}

#[cfg(test)]
#[async_trait]
impl RecordSource for CannedSource {
    async fn fetch_data(&self) -> Result<Vec<Value>, FetchError> {
        check_status(self.status)?;
        decode_body(&self.body)
    }
}
