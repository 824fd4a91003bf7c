//! JSON-over-HTTP requests
//!
//! Every call runs inside an `Http` segment on the request's context. Only
//! `200` and `201` count as success; any other status becomes an application
//! error whose code follows the status and whose message is the response body.

use metrics_system::{start_store_segment, Context, Platform, Segment};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::errors::{DaoError, ErrorCode};

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

/// Request headers; `Content-Type: application/json` unless overwritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headers {
    headers: BTreeMap<String, String>,
}

impl Default for Headers {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
        Self { headers }
    }
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status_code: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A configured request, sent with [`get`](Request::get),
/// [`post`](Request::post) or [`put`](Request::put)
#[derive(Debug, Clone)]
pub struct Request {
    client: Client,
    ctx: Context,
    body: Option<Vec<u8>>,
    headers: Headers,
    resource: String,
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            ctx: Context::new_background(),
            body: None,
            headers: Headers::default(),
            resource: String::new(),
        }
    }

    /// Reuse a client and its connection pool
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    /// Replace every header, the default `Content-Type` included
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Resource name reported on the segment
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    /// Raw body, sent as-is
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Body serialized as JSON
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, DaoError> {
        let body = serde_json::to_vec(body)
            .map_err(|e| DaoError::errorf(ErrorCode::Internal, e.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }

    pub async fn get(&self, endpoint: &str) -> Result<Response, DaoError> {
        self.execute(Method::GET, endpoint).await
    }

    pub async fn post(&self, endpoint: &str) -> Result<Response, DaoError> {
        self.execute(Method::POST, endpoint).await
    }

    pub async fn put(&self, endpoint: &str) -> Result<Response, DaoError> {
        self.execute(Method::PUT, endpoint).await
    }

    async fn execute(&self, method: Method, endpoint: &str) -> Result<Response, DaoError> {
        let segment = Segment::new()
            .with_action(method.as_str())
            .with_resource(&self.resource)
            .with_platform(Platform::Http);

        start_store_segment(&self.ctx, segment, self.send(method, endpoint)).await
    }

    async fn send(&self, method: Method, endpoint: &str) -> Result<Response, DaoError> {
        let mut request = self.client.request(method, endpoint);
        for (key, value) in self.headers.iter() {
            request = request.header(key, value);
        }
        if let Some(body) = &self.body {
            request = request.body(body.clone());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                DaoError::errorf(ErrorCode::Internal, "error building request")
            } else {
                DaoError::errorf(
                    ErrorCode::Network,
                    format!("[execute] [endpoint: {}] [error: {}]", endpoint, e),
                )
            }
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|_| DaoError::errorf(ErrorCode::Internal, "error reading response"))?;

        match status {
            StatusCode::OK | StatusCode::CREATED => Ok(Response {
                status_code: status.as_u16(),
                body: body.to_vec(),
            }),
            _ => Err(DaoError::errorf(
                ErrorCode::from_status(status.as_u16()),
                String::from_utf8_lossy(&body).into_owned(),
            )),
        }
    }
}

/// Decode a JSON response body, passing request errors through
pub fn bind_response<T: DeserializeOwned>(
    response: Result<Response, DaoError>,
) -> Result<T, DaoError> {
    let response = response?;
    serde_json::from_slice(&response.body)
        .map_err(|e| DaoError::errorf(ErrorCode::Internal, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use metrics_system::{MetricEvent, MetricsCollector, SegmentEvent};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn recording_context() -> (Context, Arc<Mutex<Vec<SegmentEvent>>>) {
        let collector = Arc::new(MetricsCollector::new("", "test"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        collector.add_callback(move |event| {
            if let MetricEvent::Segment(segment) = event {
                sink.lock().unwrap().push(segment.clone());
            }
        });
        (Context::with_collector(collector, "test.service"), seen)
    }

    #[test]
    fn test_default_headers_are_json() {
        let mut headers = Headers::new();
        assert_eq!(headers.get("Content-Type"), Some("application/json"));

        headers.add("Authorization", "Bearer token");
        assert_eq!(headers.iter().count(), 2);
    }

    #[tokio::test]
    async fn test_get_binds_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/1"))
            .and(header("Content-Type", "application/json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"id":1,"name":"Leonardo","age":38}"#),
            )
            .mount(&server)
            .await;

        let (ctx, seen) = recording_context();
        let response = Request::new()
            .with_context(ctx)
            .with_resource("users")
            .get(&format!("{}/users/1", server.uri()))
            .await;

        let user: User = bind_response(response).unwrap();
        assert_eq!(user, User::new(1, "Leonardo", 38));

        let segments = seen.lock().unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].platform, Platform::Http);
        assert_eq!(segments[0].action, "GET");
        assert_eq!(segments[0].resource, "users");
        assert!(!segments[0].is_error());
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_json(json!({"id": 2, "name": "Ana", "age": 41})))
            .respond_with(ResponseTemplate::new(201).set_body_string("created"))
            .mount(&server)
            .await;

        let response = Request::new()
            .with_json(&User::new(2, "Ana", 41))
            .unwrap()
            .post(&format!("{}/users", server.uri()))
            .await
            .unwrap();

        assert_eq!(response.status_code, 201);
        assert_eq!(response.body_text(), "created");
    }

    #[tokio::test]
    async fn test_put_not_found_carries_body_as_message() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/users/9"))
            .respond_with(ResponseTemplate::new(404).set_body_string("user 9 not found"))
            .mount(&server)
            .await;

        let (ctx, seen) = recording_context();
        let err = Request::new()
            .with_context(ctx)
            .with_body("{}")
            .put(&format!("{}/users/9", server.uri()))
            .await
            .unwrap_err();

        assert!(err.is(ErrorCode::NotFound));
        assert_eq!(err.to_string(), "error: code=not_found message=user 9 not found");
        assert_eq!(
            seen.lock().unwrap()[0].error.as_deref(),
            Some("error: code=not_found message=user 9 not found")
        );
    }

    #[tokio::test]
    async fn test_status_codes_map_to_error_codes() {
        let server = MockServer::start().await;
        let cases: [(u16, ErrorCode); 8] = [
            (400, ErrorCode::ClientSide),
            (401, ErrorCode::Unauthorized),
            (404, ErrorCode::NotFound),
            (422, ErrorCode::Unprocessable),
            (503, ErrorCode::ServiceUnavailable),
            (500, ErrorCode::Internal),
            (418, ErrorCode::Internal),
            (202, ErrorCode::Internal),
        ];
        for (status, _) in cases {
            Mock::given(method("GET"))
                .and(path(format!("/status/{}", status)))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;
        }

        let request = Request::new();
        for (status, code) in cases {
            let err = request
                .get(&format!("{}/status/{}", server.uri(), status))
                .await
                .unwrap_err();
            assert_eq!(err.code(), code, "status {}", status);
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let err = Request::new()
            .get("http://127.0.0.1:1/users")
            .await
            .unwrap_err();

        assert!(err.is(ErrorCode::Network));
        assert_eq!(err.status(), None);
        assert!(err.message().starts_with("[execute] [endpoint: http://127.0.0.1:1/users]"));
    }

    #[test]
    fn test_bind_response_errors() {
        let invalid = Ok(Response {
            status_code: 200,
            body: b"success".to_vec(),
        });
        let err = bind_response::<serde_json::Value>(invalid).unwrap_err();
        assert!(err.is(ErrorCode::Internal));
        assert!(err.message().starts_with("expected value"));

        let failed = Err(DaoError::errorf(ErrorCode::Internal, "error internal"));
        let err = bind_response::<serde_json::Value>(failed).unwrap_err();
        assert_eq!(err.to_string(), "error: code=internal message=error internal");
    }
}
