//! Tests for `TemplateSender`.

use super::sender::{ApiConfig, SendOutcome, TemplateSender};
use super::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::message::{TemplateMessageRequest, ValidationError};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const NO_VARIABLES: [&str; 0] = [];

/// Mock HTTP client that returns one scripted result and records requests.
#[derive(Debug)]
struct MockClient {
    responses: std::sync::Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: std::sync::Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    fn new(response: Result<HttpResponse, HttpError>) -> Self {
        Self {
            responses: std::sync::Mutex::new(vec![response]),
            requests: std::sync::Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    fn responding(status: http::StatusCode, body: &str) -> Self {
        Self::new(Ok(HttpResponse::new(status, body.as_bytes().to_vec())))
    }

    fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

fn test_config() -> ApiConfig {
    ApiConfig::new(
        url::Url::parse("https://graph.example.com/v21.0/123/messages").unwrap(),
        "test-token",
    )
    .unwrap()
}

fn sender(client: &Arc<MockClient>) -> TemplateSender<Arc<MockClient>> {
    TemplateSender::new(Arc::clone(client), test_config())
}

fn ok_client() -> Arc<MockClient> {
    Arc::new(MockClient::responding(
        http::StatusCode::OK,
        r#"{"messages":[{"id":"wamid.X"}]}"#,
    ))
}

mod api_config {
    use super::*;

    #[test]
    fn keeps_endpoint() {
        let config = test_config();

        assert_eq!(
            config.endpoint().as_str(),
            "https://graph.example.com/v21.0/123/messages"
        );
    }

    #[test]
    fn debug_output_hides_token() {
        let debug = format!("{:?}", test_config());

        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn rejects_token_with_newline() {
        let url = url::Url::parse("https://graph.example.com/").unwrap();

        assert!(ApiConfig::new(url, "bad\ntoken").is_err());
    }
}

mod request_shape {
    use super::*;

    #[tokio::test]
    async fn posts_once_to_configured_endpoint() {
        let client = ok_client();

        let _ = sender(&client)
            .send_template("15551234567", "hello_world", NO_VARIABLES, None)
            .await
            .unwrap();

        let requests = client.captured_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, http::Method::POST);
        assert_eq!(
            requests[0].url.as_str(),
            "https://graph.example.com/v21.0/123/messages"
        );
        assert!(requests[0].url.query().is_none());
    }

    #[tokio::test]
    async fn sends_bearer_and_json_headers() {
        let client = ok_client();

        let _ = sender(&client)
            .send_template("1", "t", NO_VARIABLES, None)
            .await
            .unwrap();

        let request = &client.captured_requests()[0];
        assert_eq!(
            request.headers.get(http::header::AUTHORIZATION).unwrap(),
            "Bearer test-token"
        );
        assert_eq!(
            request.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn body_is_the_wire_payload() {
        let client = ok_client();

        let _ = sender(&client)
            .send_template("15551234567", "jeeva", ["Swetha", "zukacin"], Some("en"))
            .await
            .unwrap();

        let request = &client.captured_requests()[0];
        let body: serde_json::Value =
            serde_json::from_slice(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "messaging_product": "whatsapp",
                "to": "15551234567",
                "type": "template",
                "template": {
                    "name": "jeeva",
                    "language": { "code": "en" },
                    "components": [{
                        "type": "body",
                        "parameters": [
                            { "type": "text", "text": "Swetha" },
                            { "type": "text", "text": "zukacin" }
                        ]
                    }]
                }
            })
        );
    }

    #[tokio::test]
    async fn send_uses_prebuilt_request() {
        let client = ok_client();
        let request = TemplateMessageRequest::new("1", "t")
            .unwrap()
            .with_language("de")
            .with_variables([7]);

        let outcome = sender(&client).send(&request).await;

        assert!(outcome.is_sent());
        let body: serde_json::Value =
            serde_json::from_slice(client.captured_requests()[0].body.as_deref().unwrap())
                .unwrap();
        assert_eq!(body["template"]["language"]["code"], "de");
        assert_eq!(
            body["template"]["components"][0]["parameters"][0]["text"],
            "7"
        );
    }
}

mod validation {
    use super::*;

    #[tokio::test]
    async fn empty_recipient_fails_without_request() {
        let client = ok_client();

        let result = sender(&client)
            .send_template("", "hello_world", NO_VARIABLES, None)
            .await;

        assert!(matches!(result, Err(ValidationError::MissingRecipient)));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn empty_template_fails_without_request() {
        let client = ok_client();

        let result = sender(&client)
            .send_template("15551234567", "", NO_VARIABLES, None)
            .await;

        assert!(matches!(result, Err(ValidationError::MissingTemplateName)));
        assert_eq!(client.calls(), 0);
    }
}

mod outcomes {
    use super::*;

    #[tokio::test]
    async fn success_returns_parsed_body() {
        let client = ok_client();

        let outcome = sender(&client)
            .send_template("1", "t", NO_VARIABLES, None)
            .await
            .unwrap();

        let response = outcome.response().unwrap();
        assert_eq!(response.status(), http::StatusCode::OK);
        assert_eq!(response.body(), &json!({"messages": [{"id": "wamid.X"}]}));
        assert_eq!(response.message_ids(), ["wamid.X"]);
    }

    #[tokio::test]
    async fn non_json_success_body_is_kept_as_text() {
        let client = Arc::new(MockClient::responding(http::StatusCode::OK, "accepted"));

        let outcome = sender(&client)
            .send_template("1", "t", NO_VARIABLES, None)
            .await
            .unwrap();

        let body = outcome.into_response().unwrap().into_body();
        assert_eq!(body, json!("accepted"));
    }

    #[tokio::test]
    async fn empty_success_body_is_null() {
        let client = Arc::new(MockClient::responding(http::StatusCode::NO_CONTENT, ""));

        let outcome = sender(&client)
            .send_template("1", "t", NO_VARIABLES, None)
            .await
            .unwrap();

        let response = outcome.into_response().unwrap();
        assert!(response.body().is_null());
        assert!(response.message_ids().is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_rejected_with_body() {
        let client = Arc::new(MockClient::responding(
            http::StatusCode::UNAUTHORIZED,
            r#"{"error":"invalid token"}"#,
        ));

        let outcome = sender(&client)
            .send_template("1", "t", NO_VARIABLES, None)
            .await
            .unwrap();

        match &outcome {
            SendOutcome::Rejected { status, body } => {
                assert_eq!(*status, http::StatusCode::UNAUTHORIZED);
                assert_eq!(body.as_deref(), Some(r#"{"error":"invalid token"}"#));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert!(!outcome.is_sent());
        assert!(outcome.into_response().is_none());
    }

    #[tokio::test]
    async fn server_error_is_not_retried() {
        let client = Arc::new(MockClient::responding(
            http::StatusCode::SERVICE_UNAVAILABLE,
            "",
        ));

        let outcome = sender(&client)
            .send_template("1", "t", NO_VARIABLES, None)
            .await
            .unwrap();

        assert!(matches!(outcome, SendOutcome::Rejected { .. }));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn transport_failure_is_no_response() {
        let client = Arc::new(MockClient::new(Err(HttpError::Timeout)));

        let outcome = sender(&client)
            .send_template("1", "t", NO_VARIABLES, None)
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            SendOutcome::NoResponse(HttpError::Timeout)
        ));
        assert_eq!(client.calls(), 1);
    }

    #[test]
    fn display_describes_each_outcome() {
        let rejected = SendOutcome::Rejected {
            status: http::StatusCode::UNAUTHORIZED,
            body: Some("nope".to_string()),
        };
        let no_response = SendOutcome::NoResponse(HttpError::Timeout);

        assert_eq!(rejected.to_string(), "rejected with 401 Unauthorized: nope");
        assert_eq!(no_response.to_string(), "no response: Request timed out");
    }
}

mod logging {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    /// Collects formatted log output for the current thread's subscriber.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (buffer, guard)
    }

    #[tokio::test]
    async fn rejection_logs_status_and_body() {
        let (logs, _guard) = capture();
        let client = Arc::new(MockClient::responding(
            http::StatusCode::UNAUTHORIZED,
            r#"{"error":"invalid token"}"#,
        ));

        let outcome = sender(&client)
            .send_template("1", "t", NO_VARIABLES, None)
            .await
            .unwrap();

        assert!(matches!(outcome, SendOutcome::Rejected { .. }));
        let output = logs.contents();
        let line = output
            .lines()
            .find(|line| line.contains("Error response from WhatsApp API"))
            .unwrap_or_else(|| panic!("no rejection record in:\n{output}"));
        assert!(line.contains("ERROR"), "{line}");
        assert!(line.contains("status=401"), "{line}");
        assert!(line.contains("invalid token"), "{line}");
    }

    #[tokio::test]
    async fn timeout_logs_no_response() {
        let (logs, _guard) = capture();
        let client = Arc::new(MockClient::new(Err(HttpError::Timeout)));

        let outcome = sender(&client)
            .send_template("1", "t", NO_VARIABLES, None)
            .await
            .unwrap();

        assert!(matches!(outcome, SendOutcome::NoResponse(_)));
        let output = logs.contents();
        let line = output
            .lines()
            .find(|line| line.contains("No response from WhatsApp API"))
            .unwrap_or_else(|| panic!("no transport record in:\n{output}"));
        assert!(line.contains("ERROR"), "{line}");
        assert!(line.contains("Request timed out"), "{line}");
        assert!(!output.contains("Error response from WhatsApp API"));
    }

    #[tokio::test]
    async fn success_logs_at_info_only() {
        let (logs, _guard) = capture();
        let client = ok_client();

        sender(&client)
            .send_template("15551234567", "hello_world", NO_VARIABLES, None)
            .await
            .unwrap();

        let output = logs.contents();
        assert!(output.contains("Sending message..."), "{output}");
        assert!(output.contains("Message sent successfully"), "{output}");
        assert!(output.contains("Request payload"), "{output}");
        assert!(!output.contains("ERROR"), "{output}");
    }
}

mod concurrency {
    use super::*;

    #[test]
    fn sender_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TemplateSender<super::super::ReqwestClient>>();
    }
}
