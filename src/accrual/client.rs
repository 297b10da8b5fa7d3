//! HTTP client for the external accrual service.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::RETRY_AFTER;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(5);

/// Reply of the accrual service for one order.
///
/// The documented status set is REGISTERED, PROCESSING, INVALID and
/// PROCESSED, but the field stays a plain string: unknown values must be
/// ignored by the caller, not fail decoding.
#[derive(Debug, Clone, Deserialize)]
pub struct AccrualReply {
    pub order: String,
    pub status: String,
    #[serde(default)]
    pub accrual: Option<Decimal>,
}

#[derive(Debug, Error)]
pub enum AccrualError {
    /// 204: the order is not known to the accrual service yet.
    #[error("order not known to accrual service")]
    NotFound,
    /// 429 with the pause the service recommends.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },
    /// 500: transient server-side failure.
    #[error("accrual service error 500")]
    ServerError,
    #[error("unexpected accrual status: {0}")]
    UnexpectedStatus(u16),
    #[error("decode accrual response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("accrual request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Fetch accrual state for an order number.
#[async_trait]
pub trait AccrualApi: Send + Sync {
    async fn fetch(&self, order_number: &str) -> Result<AccrualReply, AccrualError>;
}

/// Stateless reqwest-based client; safe for concurrent use.
pub struct HttpAccrualClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpAccrualClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let timeout = if timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            timeout
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }
}

#[async_trait]
impl AccrualApi for HttpAccrualClient {
    async fn fetch(&self, order_number: &str) -> Result<AccrualReply, AccrualError> {
        let url = format!("{}/api/orders/{}", self.base_url, order_number);
        let response = self.http.get(&url).send().await?;

        match response.status().as_u16() {
            200 => response
                .json::<AccrualReply>()
                .await
                .map_err(AccrualError::Decode),
            204 => Err(AccrualError::NotFound),
            429 => {
                let retry_after = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .map(parse_retry_after)
                    .unwrap_or(DEFAULT_RETRY_AFTER);
                Err(AccrualError::RateLimited { retry_after })
            }
            500 => Err(AccrualError::ServerError),
            code => Err(AccrualError::UnexpectedStatus(code)),
        }
    }
}

/// Parse a `Retry-After` value as integer seconds or an HTTP-date,
/// falling back to 5 s. Negative seconds and dates in the past both
/// yield a zero pause.
fn parse_retry_after(value: &str) -> Duration {
    let value = value.trim();
    if value.is_empty() {
        return DEFAULT_RETRY_AFTER;
    }

    if let Ok(secs) = value.parse::<i64>() {
        return Duration::from_secs(secs.max(0) as u64);
    }

    if let Ok(at) = chrono::DateTime::parse_from_rfc2822(value) {
        let until = at.with_timezone(&Utc) - Utc::now();
        return until.to_std().unwrap_or(Duration::ZERO);
    }

    DEFAULT_RETRY_AFTER
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2", Duration::from_secs(2))]
    #[case("0", Duration::ZERO)]
    #[case(" 30 ", Duration::from_secs(30))]
    #[case("", DEFAULT_RETRY_AFTER)]
    #[case("soon", DEFAULT_RETRY_AFTER)]
    #[case("-1", Duration::ZERO)]
    fn retry_after_values(#[case] input: &str, #[case] expected: Duration) {
        assert_eq!(parse_retry_after(input), expected, "input: {input:?}");
    }

    #[test]
    fn retry_after_http_date_in_future() {
        let at = Utc::now() + chrono::Duration::seconds(30);
        let parsed = parse_retry_after(&at.to_rfc2822());
        assert!(parsed <= Duration::from_secs(30));
        assert!(parsed >= Duration::from_secs(25));
    }

    #[test]
    fn retry_after_http_date_in_past_is_zero() {
        let at = Utc::now() - chrono::Duration::seconds(30);
        assert_eq!(parse_retry_after(&at.to_rfc2822()), Duration::ZERO);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = HttpAccrualClient::new("http://localhost:8081/", DEFAULT_TIMEOUT)
            .expect("client");
        assert_eq!(client.base_url, "http://localhost:8081");
    }

    #[test]
    fn reply_decodes_without_accrual_field() {
        let reply: AccrualReply =
            serde_json::from_str(r#"{"order":"79927398713","status":"PROCESSING"}"#)
                .expect("decode");
        assert_eq!(reply.status, "PROCESSING");
        assert!(reply.accrual.is_none());
    }

    #[test]
    fn reply_decodes_decimal_accrual() {
        let reply: AccrualReply =
            serde_json::from_str(r#"{"order":"79927398713","status":"PROCESSED","accrual":729.98}"#)
                .expect("decode");
        assert_eq!(reply.accrual, Some(Decimal::new(729_98, 2)));
    }
}
