//! Canvas API client.
//!
//! One authenticated HTTP round-trip per call: the client builds a request
//! from a (method, path, query, body) descriptor, executes it with a
//! bounded timeout, and normalizes the response into a JSON value. It
//! keeps no state between calls and does no logging of its own; rendering
//! and logging are tool-layer concerns.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::{Value, json};

use super::error::CanvasError;
use super::request::{Method, Query};
use crate::core::config::CanvasConfig;

/// Timeout applied to every Canvas round-trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable Canvas credentials, resolved once at startup.
#[derive(Clone)]
pub struct Credentials {
    base_url: String,
    token: String,
}

impl Credentials {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Whether a non-empty API token is configured.
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Custom Debug implementation to redact the token from logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field(
                "token",
                if self.token.is_empty() {
                    &"[UNSET]"
                } else {
                    &"[REDACTED]"
                },
            )
            .finish()
    }
}

/// Stateless Canvas API client.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections and
/// is shared across clones.
#[derive(Debug, Clone)]
pub struct CanvasClient {
    http: reqwest::Client,
    credentials: Credentials,
}

impl CanvasClient {
    pub fn new(credentials: Credentials) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { http, credentials }
    }

    pub fn from_config(config: &CanvasConfig) -> Self {
        Self::new(Credentials::new(
            config.base_url.clone(),
            config.api_token.clone(),
        ))
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Perform one authenticated request against the Canvas API.
    ///
    /// `path` is relative and joined to the base URL with a single slash;
    /// no further validation is applied, so a malformed base URL or path
    /// surfaces as a transport error. Every request carries the bearer
    /// token and a JSON content type. The `body` is transmitted only for
    /// POST and PUT.
    ///
    /// Outcomes: a 204 maps to the sentinel `{"success": true}`; any
    /// other 2xx body is decoded as JSON and returned verbatim; a non-2xx
    /// status fails with the status code and response body. Failed calls
    /// are not retried.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Option<&Query>,
        body: Option<&Value>,
    ) -> Result<Value, CanvasError> {
        if !self.credentials.has_token() {
            return Err(CanvasError::MissingToken);
        }

        let url = format!("{}/{}", self.credentials.base_url, path);

        let mut request = match method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        }
        .header(AUTHORIZATION, format!("Bearer {}", self.credentials.token))
        .header(CONTENT_TYPE, "application/json");

        if let Some(query) = query
            && !query.is_empty()
        {
            request = request.query(&query.pairs());
        }

        if method.sends_body()
            && let Some(body) = body
        {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(json!({ "success": true }));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CanvasError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method as verb, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CanvasClient {
        CanvasClient::new(Credentials::new(server.uri(), "test-token"))
    }

    #[tokio::test]
    async fn test_auth_headers_attached_for_every_verb() {
        let server = MockServer::start().await;

        for m in ["GET", "POST", "PUT", "DELETE"] {
            Mock::given(verb(m))
                .and(path("/courses"))
                .and(wiremock::matchers::header(
                    "authorization",
                    "Bearer test-token",
                ))
                .and(wiremock::matchers::header(
                    "content-type",
                    "application/json",
                ))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = client_for(&server);
        for m in [Method::Get, Method::Post, Method::Put, Method::Delete] {
            client.execute(m, "courses", None, None).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_get_ignores_body() {
        let server = MockServer::start().await;
        Mock::given(verb("GET"))
            .and(path("/courses/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body = json!({"must": "not be sent"});
        client
            .execute(Method::Get, "courses/1", None, Some(&body))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_post_transmits_json_body() {
        let server = MockServer::start().await;
        let body = json!({"submission": {"submission_type": "online_text_entry"}});
        Mock::given(verb("POST"))
            .and(path("/courses/1/assignments/2/submissions"))
            .and(wiremock::matchers::body_json(body.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 9})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .execute(
                Method::Post,
                "courses/1/assignments/2/submissions",
                None,
                Some(&body),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_no_content_yields_success_sentinel() {
        let server = MockServer::start().await;
        Mock::given(verb("PUT"))
            .and(path("/courses/1/modules/2/items/3/done"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client
            .execute(Method::Put, "courses/1/modules/2/items/3/done", None, None)
            .await
            .unwrap();

        assert_eq!(result, json!({"success": true}));
    }

    #[tokio::test]
    async fn test_success_body_round_trips_verbatim() {
        let server = MockServer::start().await;
        let payload = json!({"id": 7, "name": "Intro"});
        Mock::given(verb("GET"))
            .and(path("/courses/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client
            .execute(Method::Get, "courses/7", None, None)
            .await
            .unwrap();

        assert_eq!(result, payload);
    }

    #[tokio::test]
    async fn test_list_query_value_encodes_repeated_keys() {
        let server = MockServer::start().await;
        Mock::given(verb("GET"))
            .and(path("/courses/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut query = Query::new();
        query.push(
            "include[]",
            vec!["syllabus_body".to_string(), "term".to_string()],
        );
        client
            .execute(Method::Get, "courses/1", Some(&query), None)
            .await
            .unwrap();

        let request = &server.received_requests().await.unwrap()[0];
        let pairs: Vec<(String, String)> = request
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("include[]".to_string(), "syllabus_body".to_string()),
                ("include[]".to_string(), "term".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_any_request() {
        let server = MockServer::start().await;
        Mock::given(verb("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let client = CanvasClient::new(Credentials::new(server.uri(), ""));
        let err = client
            .execute(Method::Get, "courses", None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, CanvasError::MissingToken));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_error_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(verb("GET"))
            .and(path("/courses/404"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"errors": "not found"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .execute(Method::Get, "courses/404", None, None)
            .await
            .unwrap_err();

        match err {
            CanvasError::Status { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("not found"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_concurrent_calls_complete_independently() {
        let server = MockServer::start().await;
        Mock::given(verb("GET"))
            .and(path("/users/self/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"which": "profile"})))
            .mount(&server)
            .await;
        Mock::given(verb("GET"))
            .and(path("/users/self/todo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"which": "todo"})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let (profile, todo) = tokio::join!(
            client.execute(Method::Get, "users/self/profile", None, None),
            client.execute(Method::Get, "users/self/todo", None, None),
        );

        assert_eq!(profile.unwrap(), json!({"which": "profile"}));
        assert_eq!(todo.unwrap(), json!({"which": "todo"}));
    }

    #[test]
    fn test_credentials_debug_redacts_token() {
        let creds = Credentials::new("https://canvas.example.com/api/v1", "super-secret");
        let debug = format!("{creds:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("super-secret"));

        let unset = Credentials::new("https://canvas.example.com/api/v1", "");
        assert!(format!("{unset:?}").contains("UNSET"));
    }
}
