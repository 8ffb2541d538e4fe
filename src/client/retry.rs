//! Bounded retry for server-side failures

use std::time::Duration;

/// Re-send a request only when the server answers 5xx.
///
/// Transport errors and every other status are handed back on the first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub max_retries: u32,
    /// Fixed pause between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::ZERO,
        }
    }

    /// Send the request built by `build`, rebuilding it for every attempt.
    pub async fn send<F>(&self, mut build: F) -> Result<reqwest::Response, reqwest::Error>
    where
        F: FnMut() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            let response = build().send().await?;
            let status = response.status();
            if !status.is_server_error() || attempt >= self.max_retries {
                return Ok(response);
            }
            attempt += 1;
            tracing::warn!(
                %status,
                url = %response.url(),
                attempt,
                max_retries = self.max_retries,
                "Server error, retrying in {:?}",
                self.delay
            );
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, routing::get};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::net::TcpListener;

    /// Loopback server whose `/flaky` fails with `status` for the first `failures` calls
    async fn flaky_server(failures: u32, status: StatusCode) -> (String, Arc<AtomicU32>) {
        let hits = Arc::new(AtomicU32::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/flaky",
            get(move || {
                let counter = counter.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    if n < failures { status } else { StatusCode::OK }
                }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}/flaky", addr), hits)
    }

    fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    fn fast(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            delay: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_default_policy() {
        let p = RetryPolicy::default();
        assert_eq!(p.max_retries, 3);
        assert_eq!(p.delay, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_recovers_after_server_errors() {
        let (url, hits) = flaky_server(2, StatusCode::INTERNAL_SERVER_ERROR).await;
        let http = client();
        let resp = fast(3).send(|| http.get(&url)).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_bound() {
        let (url, hits) = flaky_server(10, StatusCode::SERVICE_UNAVAILABLE).await;
        let http = client();
        let resp = fast(3).send(|| http.get(&url)).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(hits.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let (url, hits) = flaky_server(10, StatusCode::BAD_REQUEST).await;
        let http = client();
        let resp = fast(3).send(|| http.get(&url)).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
