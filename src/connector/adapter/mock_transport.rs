use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::application::{HttpRequest, HttpResponse, HttpTransport, TransportError};

type Reply = Result<HttpResponse, TransportError>;

/// Scripted [`HttpTransport`] keyed by URL path. Records every request it
/// receives; unscripted paths answer 404.
pub struct MockTransport {
    replies: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(&self, path: &str, response: HttpResponse) {
        self.script(path, Ok(response));
    }

    pub fn respond_json(&self, path: &str, status: u16, body: Value) {
        self.respond(path, HttpResponse::json(status, &body));
    }

    pub fn fail(&self, path: &str, error: TransportError) {
        self.script(path, Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| path_of(&r.url) == path)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.requests().len()
    }

    fn script(&self, path: &str, reply: Reply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.insert(path.to_string(), reply);
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let path = path_of(&request.url).to_string();
        debug!("Mock transport received {} {}", request.method.as_str(), path);

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        self.replies
            .lock()
            .ok()
            .and_then(|replies| replies.get(&path).cloned())
            .unwrap_or_else(|| Ok(HttpResponse::new(404, "Not Found")))
    }
}

/// Path component of an absolute URL, without query string.
fn path_of(url: &str) -> &str {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = without_scheme
        .find('/')
        .map_or("/", |idx| &without_scheme[idx..]);
    path.split('?').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_path_of() {
        assert_eq!(path_of("http://host:3000/api/models"), "/api/models");
        assert_eq!(path_of("https://host/api/health?x=1"), "/api/health");
        assert_eq!(path_of("http://host"), "/");
    }

    #[tokio::test]
    async fn test_unscripted_path_is_not_found() {
        let mock = MockTransport::new();
        let request = HttpRequest::get("http://host/nowhere", Duration::from_secs(1));

        let response = mock.execute(request).await.unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(mock.call_count("/nowhere"), 1);
    }
}
