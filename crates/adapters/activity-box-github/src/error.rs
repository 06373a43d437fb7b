/// Failure talking to the GitHub REST API.
#[derive(Debug)]
pub enum GitHubError {
    /// The HTTP client could not be constructed.
    Client(String),
    /// The request never produced a response.
    Request { url: String, message: String },
    /// The API answered with a non-success status.
    Status { url: String, status: u16, body: String },
    /// The response body was not the expected JSON.
    Decode { url: String, message: String },
}

impl std::fmt::Display for GitHubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client(m) => write!(f, "failed to build HTTP client: {m}"),
            Self::Request { url, message } => write!(f, "request to {url} failed: {message}"),
            Self::Status { url, status, body } => {
                write!(f, "GitHub API returned {status} for {url}")?;
                if !body.is_empty() {
                    write!(f, ": {body}")?;
                }
                Ok(())
            },
            Self::Decode { url, message } => {
                write!(f, "invalid response from {url}: {message}")
            },
        }
    }
}

impl std::error::Error for GitHubError {}
