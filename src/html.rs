// HTML rendering of the dashboard page.
//
// The page is a document with one container element located by id. A
// `Container` is the handle the controller writes into; nothing looks the
// element up globally. Everything outside the container is kept byte for
// byte, so a user template only needs one element carrying the id.

use std::fmt::Write;

use regex::Regex;
use v_htmlescape::escape;

use crate::error::RenderError;
use crate::types::ProjectTable;

const SPINNER: &str = "<div class=\"spinner\"></div>";

const DEFAULT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Call Report</title>
  <style>
    body { font-family: system-ui, sans-serif; margin: 2rem; color: #1f2933; }
    .project-section { margin-bottom: 2.5rem; }
    .project-title { font-size: 1.25rem; margin: 0 0 .75rem; }
    table { width: 100%; border-collapse: collapse; table-layout: fixed; }
    th, td { padding: .5rem; border-bottom: 1px solid #e4e7eb; text-align: left; }
    th { background: #f5f7fa; }
    .error { color: #b91c1c; font-weight: 600; }
    .spinner { width: 2rem; height: 2rem; border: 4px solid #e4e7eb; border-top-color: #3b82f6; border-radius: 50%; animation: spin 1s linear infinite; }
    @keyframes spin { to { transform: rotate(360deg); } }
    @media (max-width: 640px) {
      thead { display: none; }
      tr, td { display: block; }
      td::before { content: attr(data-title); font-weight: 600; display: block; }
    }
  </style>
</head>
<body>
  <h1>Call Report</h1>
  <div id="tables-container"></div>
</body>
</html>
"#;

/// A page document that holds a render target.
#[derive(Debug, Clone)]
pub struct Page {
    template: String,
}

impl Page {
    /// The built-in page. Its container id is `tables-container`.
    pub fn builtin() -> Self {
        Self {
            template: DEFAULT_PAGE.to_string(),
        }
    }

    pub fn from_template(template: String) -> Self {
        Self { template }
    }

    /// Locate the element whose `id` attribute equals `id` and split the
    /// document around its inner HTML. Whatever the template already holds
    /// inside the element (a "Loading..." placeholder, say) becomes the
    /// initial content and is replaced by the first `show_*` call.
    pub fn mount(&self, id: &str) -> Result<Container, RenderError> {
        let unavailable = || RenderError::DomUnavailable { id: id.to_string() };

        // The attribute name must be exactly `id`: it has to follow
        // whitespace, so `data-id="..."` never matches. Either quote style
        // is accepted.
        let open = Regex::new(&format!(
            r#"<([A-Za-z][A-Za-z0-9-]*)\b[^>]*?\sid\s*=\s*(?:"{0}"|'{0}')[^>]*>"#,
            regex::escape(id)
        ))
        .map_err(|_| unavailable())?;
        let caps = open.captures(&self.template).ok_or_else(unavailable)?;
        let opening = caps.get(0).ok_or_else(unavailable)?;
        if opening.as_str().ends_with("/>") {
            return Err(unavailable());
        }
        let tag = caps.get(1).ok_or_else(unavailable)?.as_str().to_ascii_lowercase();
        let inner_start = opening.end();

        // Walk same-named tags after the opening one to find its matching
        // close tag; nested elements of the same name bump the depth.
        let same_tag = Regex::new(&format!(r"(?i)<(/?){}(?:[\s/][^>]*)?>", regex::escape(&tag)))
            .map_err(|_| unavailable())?;
        let mut depth = 1usize;
        let mut inner_end = None;
        for m in same_tag.captures_iter(&self.template[inner_start..]) {
            let (Some(whole), Some(slash)) = (m.get(0), m.get(1)) else {
                continue;
            };
            if !slash.as_str().is_empty() {
                depth -= 1;
                if depth == 0 {
                    inner_end = Some(inner_start + whole.start());
                    break;
                }
            } else if !whole.as_str().ends_with("/>") {
                depth += 1;
            }
        }
        let inner_end = inner_end.ok_or_else(unavailable)?;

        Ok(Container {
            id: id.to_string(),
            before: self.template[..inner_start].to_string(),
            after: self.template[inner_end..].to_string(),
            content: self.template[inner_start..inner_end].to_string(),
        })
    }
}

/// Render target handle: the container's current inner HTML plus the
/// surrounding document.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    id: String,
    before: String,
    after: String,
    content: String,
}

impl Container {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn show_loading(&mut self) {
        self.content = SPINNER.to_string();
    }

    pub fn show_error(&mut self, message: &str) {
        self.content = format!("<p class=\"error\">{}</p>", escape(message));
    }

    pub fn show_sections(&mut self, sections: &[String]) {
        self.content = sections.concat();
    }

    /// The complete page with the current container content.
    pub fn document(&self) -> String {
        format!("{}{}{}", self.before, self.content, self.after)
    }
}

/// One project section: title, then a table with a cell per column tagged
/// with its header.
pub fn render_project_table(table: &ProjectTable) -> String {
    let headers = table.rows.headers();
    let width = if headers.is_empty() {
        100.0
    } else {
        100.0 / headers.len() as f64
    };

    let mut out = String::new();
    let _ = writeln!(out, "<div class=\"project-section\">");
    let _ = writeln!(out, "<h2 class=\"project-title\">{}</h2>", escape(&table.project));
    let _ = writeln!(out, "<table>");
    out.push_str("<colgroup>");
    for _ in &headers {
        let _ = write!(out, "<col style=\"width: {}%\">", width);
    }
    let _ = writeln!(out, "</colgroup>");

    out.push_str("<thead><tr>");
    for h in &headers {
        let _ = write!(out, "<th>{}</th>", escape(h));
    }
    let _ = writeln!(out, "</tr></thead>");

    let _ = writeln!(out, "<tbody>");
    for row in table.rows.cells() {
        out.push_str("<tr>");
        for (header, cell) in headers.iter().zip(row.iter()) {
            let _ = write!(
                out,
                "<td data-title=\"{}\">{}</td>",
                escape(header),
                escape(cell)
            );
        }
        let _ = writeln!(out, "</tr>");
    }
    let _ = writeln!(out, "</tbody>");
    let _ = writeln!(out, "</table>");
    let _ = writeln!(out, "</div>");
    out
}

pub fn render_sections(tables: &[ProjectTable]) -> Vec<String> {
    tables.iter().map(render_project_table).collect()
}
