// Figma API HTTP client.
// Handles token authentication and request/response processing.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, RETRY_AFTER, USER_AGENT},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{FigmaError, Result};

pub const FIGMA_API_BASE: &str = "https://api.figma.com/v1";

/// Figma REST API client authenticated with a personal access token.
#[derive(Debug, Clone)]
pub struct FigmaClient {
    client: Client,
    base_url: String,
}

impl FigmaClient {
    /// Create a new Figma client with the given token.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, FIGMA_API_BASE)
    }

    /// Create a client talking to a different API root.
    pub fn with_base_url(token: &str, base_url: impl Into<String>) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(FigmaError::MissingToken);
        }

        let mut headers = HeaderMap::new();

        let mut token_value =
            HeaderValue::from_str(token.trim()).map_err(|e| FigmaError::Other(e.to_string()))?;
        token_value.set_sensitive(true);
        headers.insert("x-figma-token", token_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("figma-files-tui"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(FigmaError::Api)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request to the Figma API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await.map_err(FigmaError::Api)?;

        check_response(response).await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(FigmaError::Api)?;

        check_response(response).await
    }

    /// Decode a JSON body, keeping parse failures apart from transport ones.
    pub async fn json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Check response status and convert errors.
async fn check_response(response: Response) -> Result<Response> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(FigmaError::Unauthorized),
        StatusCode::NOT_FOUND => {
            let url = response.url().to_string();
            Err(FigmaError::NotFound(url))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(|v| format!("{}s", v))
                .unwrap_or_else(|| "unknown".to_string());
            Err(FigmaError::RateLimited { retry_after })
        }
        status => Err(FigmaError::Other(format!(
            "HTTP {}: {}",
            status,
            response.text().await.unwrap_or_default()
        ))),
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response on a local port.
    ///
    /// Returns the API base URL and a handle yielding the raw request head.
    /// `headers` are extra response header lines, each ending in `\r\n`.
    pub async fn serve_once(
        status: &'static str,
        headers: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n{}",
                status,
                body.len(),
                headers,
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (base_url, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::stub::serve_once;
    use super::*;

    async fn status_error(
        status: &'static str,
        headers: &'static str,
        body: &'static str,
    ) -> FigmaError {
        let (base_url, server) = serve_once(status, headers, body).await;
        let client = FigmaClient::with_base_url("token", base_url).unwrap();
        let err = client.get("/missing").await.unwrap_err();
        server.await.unwrap();
        err
    }

    #[test]
    fn test_empty_token_is_configuration_error() {
        let err = FigmaClient::new("   ").unwrap_err();
        assert!(matches!(err, FigmaError::MissingToken));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_invalid_token_characters() {
        let err = FigmaClient::new("bad\ntoken").unwrap_err();
        assert!(matches!(err, FigmaError::Other(_)));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = FigmaClient::with_base_url("token", "http://localhost:9000/v1/").unwrap();
        assert_eq!(client.base_url, "http://localhost:9000/v1");
    }

    #[tokio::test]
    async fn test_sends_token_header() {
        let (base_url, server) = serve_once("200 OK", "", "{}").await;
        let client = FigmaClient::with_base_url(" secret-token ", base_url).unwrap();

        client.get("/me").await.unwrap();

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /v1/me http/1.1"));
        assert!(request.contains("x-figma-token: secret-token\r\n"));
        assert!(request.contains("accept: application/json"));
    }

    #[tokio::test]
    async fn test_auth_statuses_are_unauthorized() {
        let err = status_error("401 Unauthorized", "", "").await;
        assert!(matches!(err, FigmaError::Unauthorized));

        let err = status_error("403 Forbidden", "", "").await;
        assert!(matches!(err, FigmaError::Unauthorized));
    }

    #[tokio::test]
    async fn test_not_found_carries_url() {
        let err = status_error("404 Not Found", "", "").await;
        assert!(matches!(&err, FigmaError::NotFound(url) if url.ends_with("/v1/missing")));
    }

    #[tokio::test]
    async fn test_rate_limited_reads_retry_after() {
        let err = status_error("429 Too Many Requests", "Retry-After: 30\r\n", "").await;
        assert!(matches!(&err, FigmaError::RateLimited { retry_after } if retry_after == "30s"));

        let err = status_error("429 Too Many Requests", "", "").await;
        assert!(matches!(&err, FigmaError::RateLimited { retry_after } if retry_after == "unknown"));
    }

    #[tokio::test]
    async fn test_other_status_keeps_body() {
        let err = status_error("500 Internal Server Error", "", "{\"err\":\"boom\"}").await;
        match err {
            FigmaError::Other(message) => {
                assert!(message.contains("500"));
                assert!(message.contains("boom"));
            }
            other => panic!("expected Other, got {:?}", other),
        }
    }
}
