//! Output format rendering
//!
//! Renders the full field set as plain text, JSON, CSV, XML, HTML, or
//! Markdown. Values are interpolated verbatim; no format escapes them, so
//! output is only as well-formed as the trusted metadata itself.

use crate::error::HandlerError;
use crate::lookup::ConnectionInfo;

/// Supported renderings of the full field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
    Xml,
    Html,
    Markdown,
}

impl OutputFormat {
    /// Map a `format` query value to a format.
    ///
    /// Matching is case-sensitive; unknown or absent values fall back to
    /// plain text.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            Some("xml") => Self::Xml,
            Some("html") => Self::Html,
            Some("md") => Self::Markdown,
            _ => Self::Text,
        }
    }

    /// Content-Type header value for this format.
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Json => "application/json",
            Self::Csv => "text/csv",
            Self::Xml => "application/xml",
            Self::Html => "text/html",
            Self::Markdown => "text/markdown",
        }
    }
}

/// Render the full field set in the requested format.
pub fn render(info: &ConnectionInfo, format: OutputFormat) -> Result<String, HandlerError> {
    match format {
        OutputFormat::Text => Ok(render_text(info)),
        OutputFormat::Json => serde_json::to_string_pretty(info).map_err(HandlerError::Serialize),
        OutputFormat::Csv => Ok(render_csv(info)),
        OutputFormat::Xml => Ok(render_xml(info)),
        OutputFormat::Html => Ok(render_html(info)),
        OutputFormat::Markdown => Ok(render_markdown(info)),
    }
}

/// One value per line, field order, no labels.
fn render_text(info: &ConnectionInfo) -> String {
    let fields = info.fields();
    let lines: Vec<&str> = fields.iter().map(|(_, _, value)| value.as_str()).collect();
    lines.join("\n")
}

/// One `"name","value"` record per line. Values are not CSV-escaped.
fn render_csv(info: &ConnectionInfo) -> String {
    let fields = info.fields();
    let lines: Vec<String> = fields
        .iter()
        .map(|(name, _, value)| format!("\"{name}\",\"{value}\""))
        .collect();
    lines.join("\n")
}

/// XML document with an `<ip>` root and one element per field.
fn render_xml(info: &ConnectionInfo) -> String {
    let mut doc = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<ip>\n");
    for (name, _, value) in info.fields() {
        doc.push_str(&format!("  <{name}>{value}</{name}>\n"));
    }
    doc.push_str("</ip>");
    doc
}

/// Minimal HTML page with one table row per field.
fn render_html(info: &ConnectionInfo) -> String {
    let mut rows = String::new();
    for (_, label, value) in info.fields() {
        rows.push_str(&format!(
            "      <tr>\n        <th>{label}</th>\n        <td>{value}</td>\n      </tr>\n"
        ));
    }
    format!(
        "<!DOCTYPE html>
<html>
  <head>
    <title>IP Lookup</title>
  </head>
  <body>
    <h1>IP Lookup</h1>
    <table>
{rows}    </table>
  </body>
</html>"
    )
}

/// `# IP Lookup` heading followed by one bold-labeled line per field.
fn render_markdown(info: &ConnectionInfo) -> String {
    let fields = info.fields();
    let lines: Vec<String> = fields
        .iter()
        .map(|(_, label, value)| format!("**{label}:** {value}"))
        .collect();
    format!("# IP Lookup\n{}", lines.join("\n"))
}
