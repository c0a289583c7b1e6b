/// Errors that can occur while resolving client configuration or routing OAuth state
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("Malformed host URL: {0}")]
    HostUrlMalformed(String),
    #[error("IDE resource path has no ide/<id> segment: {0}")]
    MissingIdeSegment(String),
    #[error("Callback URL has no port: {0}")]
    MissingPort(String),
    #[error("State token is not valid URL-safe base64: {0}")]
    InvalidStateEncoding(#[from] base64::DecodeError),
    #[error("State token payload is invalid: {0}")]
    InvalidStatePayload(String),
    #[error("OAuth client configuration is incomplete: missing {0}")]
    IncompleteConfig(&'static str),
    #[error(
        "Authorization denied by provider: {error}{}",
        .description.as_deref().map(|d| format!(" ({})", d)).unwrap_or_default()
    )]
    AuthorizationDenied {
        error: String,
        description: Option<String>,
    },
    #[error("Callback is missing the '{0}' parameter")]
    MissingCallbackParameter(&'static str),
    #[error("git config value for {0} is not valid UTF-8")]
    NonUtf8ConfigValue(String),
    #[error("git config exited with status {status}: {stderr}")]
    GitConfig { status: i32, stderr: String },
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),
}
