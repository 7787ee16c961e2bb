use serde::Serialize;

use crate::config::Config;
use crate::models::ReportEnvelope;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("TDX API key could not be retrieved: status {status}: {reason}")]
    AuthFailed { status: u16, reason: String },

    #[error("TDX report could not be retrieved: status {status}: {reason}")]
    ReportFailed { status: u16, reason: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct AdminLoginRequest<'a> {
    #[serde(rename = "BEID")]
    beid: &'a str,
    #[serde(rename = "WebServicesKey")]
    web_services_key: &'a str,
}

/// Thin client over the TDX web API: one login call, one report call.
pub struct TdxClient {
    http: reqwest::Client,
    base_url: String,
}

impl TdxClient {
    pub fn new(cfg: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("tdx-asset-export/", env!("CARGO_PKG_VERSION")))
            .timeout(cfg.http_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Exchanges the key-based administrative credentials for a bearer token.
    pub async fn login_admin(&self, beid: &str, web_services_key: &str) -> Result<String, ApiError> {
        let url = format!("{}/auth/loginadmin", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&AdminLoginRequest {
                beid,
                web_services_key,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::AuthFailed {
                status: status.as_u16(),
                reason: failure_reason(status, resp.text().await.unwrap_or_default()),
            });
        }

        let body = resp.text().await?;
        Ok(strip_token_quotes(&body).to_string())
    }

    /// Retrieves the report with its data rows inlined.
    pub async fn fetch_report(
        &self,
        token: &str,
        report_id: &str,
    ) -> Result<ReportEnvelope, ApiError> {
        let url = format!("{}/reports/{}?withData=True", self.base_url, report_id);
        let resp = self.http.get(&url).bearer_auth(token).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::ReportFailed {
                status: status.as_u16(),
                reason: failure_reason(status, resp.text().await.unwrap_or_default()),
            });
        }

        Ok(resp.json::<ReportEnvelope>().await?)
    }
}

/// The login endpoint returns the token as a bare JSON string literal; strip the
/// wrapping quotes and any surrounding whitespace.
pub fn strip_token_quotes(body: &str) -> &str {
    body.trim().trim_matches('"')
}

// reqwest exposes no reason phrase, so the canonical reason for the status code is
// used, with the response body appended when the server sent one.
fn failure_reason(status: reqwest::StatusCode, body: String) -> String {
    let canonical = status.canonical_reason().unwrap_or("unknown");
    let body = body.trim();
    if body.is_empty() {
        canonical.to_string()
    } else {
        format!("{} ({})", canonical, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_wrapping_quotes_from_token() {
        assert_eq!(strip_token_quotes("\"eyJhbGciOi.token\""), "eyJhbGciOi.token");
        assert_eq!(strip_token_quotes("\"abc\"\n"), "abc");
        assert_eq!(strip_token_quotes("already-bare"), "already-bare");
        assert_eq!(strip_token_quotes(""), "");
    }

    #[test]
    fn failure_reason_includes_body_when_present() {
        let status = reqwest::StatusCode::UNAUTHORIZED;
        assert_eq!(failure_reason(status, String::new()), "Unauthorized");
        assert_eq!(
            failure_reason(status, "Invalid BEID\n".to_string()),
            "Unauthorized (Invalid BEID)"
        );
    }

    #[test]
    fn auth_failure_displays_status_and_reason() {
        let err = ApiError::AuthFailed {
            status: 401,
            reason: "Unauthorized".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "TDX API key could not be retrieved: status 401: Unauthorized"
        );
    }
}
