use reqwest::header::CONTENT_TYPE;

/// Delivers a serialized provisioning response to the pre-signed URL the
/// provisioning system supplied with the request.
pub trait CallbackSender {
    fn send_response(&self, response_url: &str, body: &[u8]) -> Result<(), String>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpCallbackSender {
    http_client: reqwest::Client,
}

impl HttpCallbackSender {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

impl CallbackSender for HttpCallbackSender {
    fn send_response(&self, response_url: &str, body: &[u8]) -> Result<(), String> {
        let client = self.http_client.clone();
        let url = response_url.to_string();
        let body_bytes = body.to_vec();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                // The pre-signed URL is signed without a content type.
                client
                    .put(url)
                    .header(CONTENT_TYPE, "")
                    .body(body_bytes)
                    .send()
                    .await
                    .and_then(|response| response.error_for_status())
                    .map(|_| ())
                    .map_err(|error| format!("failed to deliver provisioning response: {error}"))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    struct CapturedRequest {
        request_line: String,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    }

    impl CapturedRequest {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        }
    }

    async fn serve_once(status_line: &'static str) -> (String, JoinHandle<CapturedRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let address = listener.local_addr().expect("listener should have an address");

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("connection should arrive");
            let mut buffer = Vec::new();
            let mut chunk = [0u8; 4096];

            let captured = loop {
                let read = stream.read(&mut chunk).await.expect("read should succeed");
                assert!(read > 0, "connection closed before the request completed");
                buffer.extend_from_slice(&chunk[..read]);

                let Some(header_end) = buffer.windows(4).position(|window| window == b"\r\n\r\n")
                else {
                    continue;
                };
                let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
                let mut lines = head.split("\r\n");
                let request_line = lines.next().unwrap_or_default().to_string();
                let headers: Vec<(String, String)> = lines
                    .filter_map(|line| line.split_once(':'))
                    .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
                    .collect();
                let content_length = headers
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.parse::<usize>().ok())
                    .unwrap_or(0);

                let body_start = header_end + 4;
                if buffer.len() >= body_start + content_length {
                    break CapturedRequest {
                        request_line,
                        headers,
                        body: buffer[body_start..body_start + content_length].to_vec(),
                    };
                }
            };

            let response =
                format!("{status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
            stream
                .write_all(response.as_bytes())
                .await
                .expect("response should be written");
            captured
        });

        (format!("http://{address}"), handle)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn puts_body_to_presigned_url_with_empty_content_type() {
        let (base_url, server) = serve_once("HTTP/1.1 200 OK").await;
        let response_url = format!("{base_url}/stack/resource?X-Amz-Signature=abc123");
        let body = br#"{"Status":"SUCCESS","Data":{"ID":"k2f9lmn0"}}"#;

        HttpCallbackSender::default()
            .send_response(&response_url, body)
            .expect("delivery should succeed");

        let captured = server.await.expect("server task should finish");
        assert_eq!(
            captured.request_line,
            "PUT /stack/resource?X-Amz-Signature=abc123 HTTP/1.1"
        );
        assert_eq!(captured.header("content-type"), Some(""));
        assert_eq!(
            captured.header("content-length"),
            Some(body.len().to_string().as_str())
        );
        assert_eq!(captured.body, body.to_vec());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn non_success_status_is_an_error() {
        let (base_url, server) = serve_once("HTTP/1.1 500 Internal Server Error").await;

        let error = HttpCallbackSender::default()
            .send_response(&format!("{base_url}/presigned"), b"{}")
            .expect_err("server error should fail delivery");

        assert!(error.contains("failed to deliver provisioning response"));
        server.await.expect("server task should finish");
    }
}
