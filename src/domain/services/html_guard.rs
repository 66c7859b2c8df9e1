use serde_json::Value;

/// Markers of an HTML document served where API data was expected.
/// Matched as case-sensitive substrings.
pub const HTML_MARKERS: [&str; 3] = ["<!doctype html>", "<html", "</html>"];

/// True when a text body is an HTML page, typically a reverse proxy's login
/// or error page answering in place of the API.
pub fn is_html_masquerade(body: &Value) -> bool {
    body.as_str()
        .is_some_and(|text| HTML_MARKERS.iter().any(|marker| text.contains(marker)))
}

/// True when extracted answer text is itself an HTML page, as happens when an
/// upstream wraps a login page inside an otherwise valid JSON reply.
pub fn is_html_content(content: &str) -> bool {
    let trimmed = content.trim();
    trimmed.starts_with("<!DOCTYPE") || trimmed.starts_with("<html") || trimmed.contains("</html>")
}
