//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made during discovery, including:
//! - Building the shared HTTP client with a proper user agent string
//! - Single-shot GETs for sitemaps, robots.txt and homepage lookups
//! - The polite retry/backoff protocol used by the crawler
//! - Error classification

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::FetchError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{redirect::Policy, Client, Response, StatusCode};
use std::time::Duration;

/// Accept header sent with every request
pub const ACCEPT_HEADER: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Timeout for sitemap documents
pub const SITEMAP_TIMEOUT: Duration = Duration::from_secs(15);

/// Timeout for robots.txt and homepage lookups
pub const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// A successfully fetched (2xx) response body
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Content-Type header value, empty when absent
    pub content_type: String,
    /// Response body
    pub body: String,
}

impl FetchedPage {
    /// True when the response should be treated as an HTML page
    pub fn is_html_like(&self) -> bool {
        is_html_content_type(&self.content_type)
    }
}

/// HTML-like means `text/html`, `application/xhtml+xml`, or no content type at all
pub fn is_html_content_type(content_type: &str) -> bool {
    let content_type = content_type.trim().to_ascii_lowercase();
    content_type.is_empty()
        || content_type.contains("text/html")
        || content_type.contains("application/xhtml+xml")
}

/// Builds an HTTP client with proper configuration
///
/// One client is built per run and shared by every fetch so the connection
/// pool is reused. Timeouts are set per request.
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use llms_sitemap::config::UserAgentConfig;
/// use llms_sitemap::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));

    Client::builder()
        .user_agent(config.header_value())
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(20)
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once and requires a 2xx response
///
/// Used for sitemaps, robots.txt and homepage lookups, which are never
/// retried.
pub async fn fetch_text(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    read_page(url, response).await
}

async fn read_page(url: &str, response: Response) -> Result<FetchedPage, FetchError> {
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;

    Ok(FetchedPage {
        content_type,
        body,
    })
}

/// How a single non-successful attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// HTTP 404, never retried
    NotFound,
    /// HTTP 429, optionally with a parsed `Retry-After`
    RateLimited { retry_after: Option<Duration> },
    /// HTTP 500/502/503/504/520
    ServerError(u16),
    /// Transport failure or any other non-2xx status
    Failed,
}

impl AttemptOutcome {
    /// Classifies a non-2xx response
    pub fn from_response(status: StatusCode, headers: &HeaderMap) -> Self {
        match status.as_u16() {
            404 => Self::NotFound,
            429 => Self::RateLimited {
                retry_after: headers
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(parse_retry_after),
            },
            code @ (500 | 502 | 503 | 504 | 520) => Self::ServerError(code),
            _ => Self::Failed,
        }
    }
}

/// Parses a `Retry-After` header given in (possibly fractional) seconds
///
/// HTTP-date values are not supported and yield `None`.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(Duration::from_secs_f64)
}

/// Backoff to sleep before retrying after `outcome` on zero-based `attempt`
///
/// | Outcome | Delay |
/// |---------|-------|
/// | 404 | none, give up |
/// | 429 | `2.0 × 2^attempt` s, `Retry-After` as a floor |
/// | 500/502/503/504/520 | `1.5 × 2^attempt` s |
/// | anything else | `1.0 × 2^attempt` s |
pub fn backoff_delay(outcome: &AttemptOutcome, attempt: u32) -> Option<Duration> {
    let factor = 2f64.powi(attempt.min(30) as i32);
    match outcome {
        AttemptOutcome::NotFound => None,
        AttemptOutcome::RateLimited { retry_after } => {
            let computed = Duration::from_secs_f64(2.0 * factor);
            Some(retry_after.map_or(computed, |floor| computed.max(floor)))
        }
        AttemptOutcome::ServerError(_) => Some(Duration::from_secs_f64(1.5 * factor)),
        AttemptOutcome::Failed => Some(Duration::from_secs_f64(factor)),
    }
}

/// Retry and politeness settings for page fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Sleep `request_delay` before every attempt
    pub polite: bool,
    pub request_delay: Duration,
    /// Per-attempt timeout
    pub timeout: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            polite: config.polite,
            request_delay: Duration::from_millis(config.request_delay_ms),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&CrawlerConfig::default())
    }
}

/// Fetches a URL with full error handling and retry logic
///
/// # Retry Logic
///
/// Up to `max_retries + 1` attempts, each preceded by the politeness delay
/// when enabled. Backoff between attempts follows [`backoff_delay`]. A 404
/// ends the loop at once, and the final attempt never sleeps.
///
/// # Returns
///
/// * `Ok(FetchedPage)` - A 2xx response of any content type
/// * `Err(FetchError)` - The error from the last attempt
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    policy: &RetryPolicy,
) -> Result<FetchedPage, FetchError> {
    let attempts = policy.max_retries + 1;
    let mut attempt = 0;

    loop {
        if policy.polite && !policy.request_delay.is_zero() {
            tokio::time::sleep(policy.request_delay).await;
        }

        let (outcome, error) = match client.get(url).timeout(policy.timeout).send().await {
            Ok(response) if response.status().is_success() => {
                match read_page(url, response).await {
                    Ok(page) => return Ok(page),
                    Err(e) => (AttemptOutcome::Failed, e),
                }
            }
            Ok(response) => {
                let status = response.status();
                (
                    AttemptOutcome::from_response(status, response.headers()),
                    FetchError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    },
                )
            }
            Err(e) => (AttemptOutcome::Failed, FetchError::from_reqwest(url, e)),
        };

        let Some(delay) = backoff_delay(&outcome, attempt) else {
            tracing::warn!(
                "404 Not Found for {}; skipping retries (attempt {}/{})",
                url,
                attempt + 1,
                attempts
            );
            return Err(error);
        };

        if attempt >= policy.max_retries {
            return Err(error);
        }

        tracing::warn!(
            "{}; retrying in {:.1}s (attempt {}/{})",
            error,
            delay.as_secs_f64(),
            attempt + 1,
            attempts
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
