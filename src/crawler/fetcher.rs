//! HTTP client construction and the shared retry contract
//!
//! Both phases issue requests through the helpers here: attempt up to
//! `retries + 1` times, sleeping a fixed delay between attempts, and retry
//! only transport-level failures (connect, timeout, body read). HTTP error
//! statuses are returned to the caller, which is responsible for classifying
//! them.

use reqwest::{Client, Method, Response};
use std::time::Duration;
use tokio::time::sleep;

/// Fixed inter-attempt delay for transient failures
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// A fully-read page response
#[derive(Debug)]
pub struct PageResponse {
    /// HTTP status code
    pub status: u16,

    /// Content-Type header value, empty when absent
    pub content_type: String,

    /// Response body text
    pub body: String,
}

/// Builds the HTTP client shared across all requests of a phase
///
/// The client is reused purely for connection pooling; requests are issued
/// one at a time. Redirects are followed with reqwest's default policy.
pub fn build_http_client(user_agent: &str, timeout_sec: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_sec))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues a request with bounded retries on transport failure
///
/// Returns the response as soon as one arrives, whatever its status. After
/// exhausting retries the last transport error is propagated to the caller.
pub async fn request_with_retries(
    client: &Client,
    method: Method,
    url: &str,
    retries: u32,
) -> Result<Response, reqwest::Error> {
    let mut attempt = 0;
    loop {
        match client.request(method.clone(), url).send().await {
            Ok(resp) => return Ok(resp),
            Err(err) if attempt < retries => {
                attempt += 1;
                tracing::debug!(
                    "Transient failure for {} (attempt {}/{}): {}",
                    url,
                    attempt,
                    retries + 1,
                    err
                );
                sleep(RETRY_DELAY).await;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Fetches a page body with bounded retries
///
/// The whole attempt — request plus body read — is retried as a unit, so a
/// connection dropped mid-body counts as a transient failure like any other.
pub async fn fetch_page_with_retries(
    client: &Client,
    url: &str,
    retries: u32,
) -> Result<PageResponse, reqwest::Error> {
    let mut attempt = 0;
    loop {
        match try_fetch_page(client, url).await {
            Ok(page) => return Ok(page),
            Err(err) if attempt < retries => {
                attempt += 1;
                tracing::debug!(
                    "Transient failure for {} (attempt {}/{}): {}",
                    url,
                    attempt,
                    retries + 1,
                    err
                );
                sleep(RETRY_DELAY).await;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn try_fetch_page(client: &Client, url: &str) -> Result<PageResponse, reqwest::Error> {
    let resp = client.get(url).send().await?;
    let status = resp.status().as_u16();
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let body = resp.text().await?;
    Ok(PageResponse {
        status,
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client("test/1.0", 20).is_ok());
    }

    #[tokio::test]
    async fn test_response_returned_regardless_of_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client("test/1.0", 5).unwrap();
        let resp = request_with_retries(
            &client,
            Method::GET,
            &format!("{}/missing", server.uri()),
            2,
        )
        .await
        .unwrap();
        assert_eq!(resp.status().as_u16(), 404);
    }

    #[tokio::test]
    async fn test_retries_recover_from_timeouts() {
        let server = MockServer::start().await;
        // First two attempts stall past the client timeout, the third succeeds.
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(5)),
            )
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let client = build_http_client("test/1.0", 1).unwrap();
        let page = fetch_page_with_retries(&client, &format!("{}/slow", server.uri()), 2)
            .await
            .unwrap();
        assert_eq!(page.status, 200);
        assert_eq!(page.body, "ok");
    }

    #[tokio::test]
    async fn test_exhausted_retries_propagate_the_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let client = build_http_client("test/1.0", 1).unwrap();
        let result =
            fetch_page_with_retries(&client, &format!("{}/slow", server.uri()), 1).await;
        assert!(result.is_err());
    }
}
