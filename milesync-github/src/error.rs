//! Error types for milesync-github.

use thiserror::Error;

/// Every failure the hosting API can surface. None of them is retried.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// No access token was available when the client was built.
    #[error("no access token; set {0}")]
    MissingToken(&'static str),

    /// Token is invalid or expired (401 Unauthorized).
    #[error("invalid or expired token: GitHub returned 401 Unauthorized")]
    Unauthorized,

    /// Token lacks the required permissions (403 Forbidden).
    #[error("token lacks required permissions: {0}")]
    Forbidden(String),

    /// The API quota is exhausted (403 with no remaining calls, or 429).
    #[error("GitHub rate limit exceeded")]
    RateLimited,

    /// The repository or entity does not exist, or is not visible to the token.
    #[error("not found: {url}")]
    NotFound { url: String },

    /// Any other non-success status.
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },

    /// Network, TLS or DNS failure before a status was received.
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("failed to parse GitHub response: {0}")]
    Decode(String),
}

impl From<ureq::Error> for ForgeError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(401, _) => ForgeError::Unauthorized,
            ureq::Error::Status(403, resp) => {
                if resp.header("x-ratelimit-remaining") == Some("0") {
                    return ForgeError::RateLimited;
                }
                ForgeError::Forbidden(resp.into_string().unwrap_or_default())
            }
            ureq::Error::Status(404, resp) => ForgeError::NotFound {
                url: resp.get_url().to_string(),
            },
            ureq::Error::Status(429, _) => ForgeError::RateLimited,
            ureq::Error::Status(code, resp) => ForgeError::Status {
                code,
                body: resp.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(t) => ForgeError::Transport(t.to_string()),
        }
    }
}
