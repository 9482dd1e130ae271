use anyhow::{Context, Result};
use reqwest::{Client, ClientBuilder, Url};
use serde_json::Value;

/// One page request, fully described by the source adapter.
#[derive(Debug, Clone)]
pub struct PageRequest<'a> {
    pub endpoint: &'a str,
    pub query: Vec<(&'static str, String)>,
    pub headers: Vec<(&'static str, String)>,
}

/// Fetches a page and returns the decoded JSON body.
///
/// CONTRACT:
/// - Any transport failure, non-2xx status or undecodable body is
///   an error
/// - No retries; the caller aborts the run
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, request: &PageRequest<'_>) -> Result<Value>;
}

/// reqwest-backed fetcher used at runtime.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = client_builder(user_agent)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client })
    }
}

fn client_builder(user_agent: &str) -> ClientBuilder {
    Client::builder().user_agent(user_agent)
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, request: &PageRequest<'_>) -> Result<Value> {
        let url = Url::parse_with_params(request.endpoint, &request.query)
            .with_context(|| format!("invalid endpoint {}", request.endpoint))?;

        let mut builder = self.client.get(url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("GET {} returned an error status", url))?;

        response
            .json::<Value>()
            .await
            .with_context(|| format!("GET {} returned a body that is not JSON", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const USER_AGENT: &str = "salary-test/1.0";

    fn response(status: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            content_type,
            body.len(),
            body
        )
    }

    /// Answers a single connection with `response` and returns the raw
    /// request head it received.
    async fn serve_once(response: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/vacancies/", listener.local_addr().unwrap());

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }

            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8_lossy(&head).into_owned()
        });

        (endpoint, server)
    }

    fn fetcher() -> HttpFetcher {
        // local listener only, keep any ambient proxy settings out of it
        let client = client_builder(USER_AGENT).no_proxy().build().unwrap();
        HttpFetcher { client }
    }

    fn request(endpoint: &str) -> PageRequest<'_> {
        PageRequest {
            endpoint,
            query: vec![("page", "0".to_string())],
            headers: Vec::new(),
        }
    }

    #[tokio::test]
    async fn error_status_names_the_url() {
        let (endpoint, server) =
            serve_once(response("503 Service Unavailable", "text/plain", "")).await;

        let err = fetcher().fetch(&request(&endpoint)).await.unwrap_err();
        server.await.unwrap();

        let message = format!("{:#}", err);
        assert!(message.contains(&format!("{}?page=0", endpoint)));
        assert!(message.contains("error status"));
        assert!(message.contains("503"));
    }

    #[tokio::test]
    async fn non_json_body_is_an_error() {
        let (endpoint, server) =
            serve_once(response("200 OK", "text/html", "<html>maintenance</html>")).await;

        let err = fetcher().fetch(&request(&endpoint)).await.unwrap_err();
        server.await.unwrap();

        assert!(format!("{:#}", err).contains("not JSON"));
    }

    #[tokio::test]
    async fn query_and_headers_reach_the_server_encoded() {
        let body = r#"{"objects":[],"total":0,"more":false}"#;
        let (endpoint, server) = serve_once(response("200 OK", "application/json", body)).await;

        let request = PageRequest {
            endpoint: &endpoint,
            query: vec![
                ("keyword", "Программист C#".to_string()),
                ("text", "программист C++".to_string()),
                ("page", "0".to_string()),
            ],
            headers: vec![("X-Api-App-Id", "k".to_string())],
        };

        let value = fetcher().fetch(&request).await.unwrap();
        assert_eq!(value, json!({ "objects": [], "total": 0, "more": false }));

        let head = server.await.unwrap().to_lowercase();
        let request_line = head.lines().next().unwrap();

        assert!(request_line.starts_with("get /vacancies/?keyword="));
        // `#` would start a fragment and cut the keyword off
        assert!(!request_line.contains('#'));
        assert!(request_line.contains("+c%23&text="));
        assert!(request_line.contains("+c%2b%2b&page=0"));
        assert!(head.contains("x-api-app-id: k\r\n"));
        assert!(head.contains(&format!("user-agent: {}\r\n", USER_AGENT)));
    }
}
