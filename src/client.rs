//! HTTP client for the remote analysis service.
//!
//! One call per audit: the combined document text and the comma-joined
//! filenames go to `POST <base>/analyze`, and the structured result comes
//! back as JSON. The client trusts the server's response shape; it performs
//! no validation beyond deserialization. No timeout, no retry.

use crate::error::AuditError;
use crate::models::AnalysisResult;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    filenames: &'a str,
    text: &'a str,
}

pub struct AnalysisClient {
    base_url: String,
    http: reqwest::Client,
}

impl AnalysisClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/analyze", self.base_url)
    }

    /// Submit extracted text for analysis.
    ///
    /// Failure mapping:
    /// - request could not be sent → `Transport`
    /// - non-2xx with a JSON `{"detail": ...}` body → `Server` carrying the
    ///   detail verbatim; without one → generic `Server error: <status>`
    /// - 2xx body that does not parse as an `AnalysisResult` → `Transport`
    pub async fn analyze(
        &self,
        filenames: &str,
        text: &str,
    ) -> Result<AnalysisResult, AuditError> {
        let request = AnalyzeRequest { filenames, text };

        println!(
            "[Analysis] POST {} ({} chars) files: {}",
            self.endpoint(),
            text.len(),
            crate::utils::safe_truncate(filenames, 200)
        );

        let response = self
            .http
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| AuditError::Transport {
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("detail")
                        .and_then(|d| d.as_str())
                        .map(String::from)
                });
            return Err(AuditError::Server { status, detail });
        }

        response
            .json::<AnalysisResult>()
            .await
            .map_err(|e| AuditError::Transport {
                detail: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_result_json;
    use std::sync::mpsc;

    /// One-shot mock analysis server; returns its base URL and a channel
    /// delivering the request body it received.
    fn spawn_server(status: u16, body: String) -> (String, mpsc::Receiver<String>) {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            if let Ok(mut request) = server.recv() {
                let mut received = String::new();
                let _ = request.as_reader().read_to_string(&mut received);
                let _ = tx.send(received);
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes(
                            &b"Content-Type"[..],
                            &b"application/json"[..],
                        )
                        .unwrap(),
                    );
                let _ = request.respond(response);
            }
        });

        (format!("http://{}", addr), rx)
    }

    #[tokio::test]
    async fn test_success_parses_result_and_sends_expected_body() {
        let (url, rx) = spawn_server(200, sample_result_json().to_string());
        let client = AnalysisClient::new(&url);

        let result = client
            .analyze("edital.pdf, tr.pdf", "combined tender text")
            .await
            .unwrap();
        assert_eq!(result.metadata.number, "90012/2025");

        let sent: serde_json::Value = serde_json::from_str(&rx.recv().unwrap()).unwrap();
        assert_eq!(sent["filenames"], "edital.pdf, tr.pdf");
        assert_eq!(sent["text"], "combined tender text");
    }

    #[tokio::test]
    async fn test_error_detail_surfaced_verbatim() {
        let (url, _rx) = spawn_server(500, r#"{"detail":"bad text"}"#.to_string());
        let client = AnalysisClient::new(&url);

        let err = client.analyze("a.pdf", "text").await.unwrap_err();
        assert_eq!(err.to_string(), "bad text");
    }

    #[tokio::test]
    async fn test_error_without_detail_is_generic() {
        let (url, _rx) = spawn_server(502, "upstream exploded".to_string());
        let client = AnalysisClient::new(&url);

        let err = client.analyze("a.pdf", "text").await.unwrap_err();
        assert_eq!(err.to_string(), "Server error: 502");
    }

    #[tokio::test]
    async fn test_garbled_success_body_is_a_transport_error() {
        let (url, _rx) = spawn_server(200, "<html>not json</html>".to_string());
        let client = AnalysisClient::new(&url);

        let err = client.analyze("a.pdf", "text").await.unwrap_err();
        assert!(matches!(err, AuditError::Transport { .. }));
        assert!(err.to_string().contains("Failed to reach the analysis server"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_transport_error() {
        // Reserved port with nothing listening
        let client = AnalysisClient::new("http://127.0.0.1:9");
        let err = client.analyze("a.pdf", "text").await.unwrap_err();
        assert!(matches!(err, AuditError::Transport { .. }));
    }

    #[test]
    fn test_trailing_slash_normalized() {
        let client = AnalysisClient::new("http://localhost:8000/");
        assert_eq!(client.endpoint(), "http://localhost:8000/analyze");
    }
}
