use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::error::TransportError;

/// A single GET round-trip returning the raw body.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Fetch `url`. Anything but `200 OK` is an error.
    async fn get(&self, url: &Url) -> Result<Vec<u8>, TransportError>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            // reqwest errors embed the url, which carries the api key
            .map_err(|e| TransportError::Request(e.without_url()))?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(TransportError::Status(status.to_string()));
        }

        let body = res.bytes().await.map_err(|e| TransportError::Body(e.without_url()))?;
        tracing::trace!(bytes = body.len(), "response body read");

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    /// Serve exactly one raw HTTP response on a local port and return its URL.
    async fn serve_once(response: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0_u8; 1024];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Url::parse(&format!("http://{addr}/data")).expect("valid url")
    }

    #[tokio::test]
    async fn returns_body_on_200() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\n[]",
        )
        .await;

        let body = HttpTransport::new().get(&url).await.expect("200 response");
        assert_eq!(body, b"[]");
    }

    #[tokio::test]
    async fn non_200_is_a_status_error() {
        let url = serve_once(
            "HTTP/1.1 401 Unauthorized\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let err = HttpTransport::new().get(&url).await.unwrap_err();
        assert!(matches!(err, TransportError::Status(_)));
        assert_eq!(
            err.to_string(),
            "Response was not 200 OK, got: 401 Unauthorized"
        );
    }

    #[tokio::test]
    async fn other_2xx_is_still_an_error() {
        let url = serve_once(
            "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n",
        )
        .await;

        let err = HttpTransport::new().get(&url).await.unwrap_err();
        assert_eq!(err.to_string(), "Response was not 200 OK, got: 204 No Content");
    }

    #[tokio::test]
    async fn connection_failure_is_a_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/")).expect("valid url");
        let err = HttpTransport::new().get(&url).await.unwrap_err();

        assert!(matches!(err, TransportError::Request(_)));
        assert!(err.to_string().starts_with("Error while making request: "));
    }

    #[tokio::test]
    async fn request_error_does_not_expose_api_key() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/geo?q=x&appid=SUPERSECRET")).expect("valid url");
        let err = HttpTransport::new().get(&url).await.unwrap_err();

        let mut text = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        assert!(!text.contains("SUPERSECRET"), "api key leaked: {text}");
    }
}
