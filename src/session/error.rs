use std::fmt;

#[derive(Debug)]
pub enum SessionError {
    /// Redirect URL has no fragment at all.
    EmptyFragment,
    /// No access token was found in the redirect fragment.
    MissingToken,
    /// Network error, non-2xx status or unreadable body.
    RequestFailure(String),
    /// Submitted query was empty or whitespace.
    EmptyQuery,
    /// Selection index does not point at a shown result.
    NoSuchItem(usize),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptyFragment => write!(f, "URL hash is empty"),
            SessionError::MissingToken => write!(f, "Access token is missing"),
            SessionError::RequestFailure(e) => write!(f, "Request failed: {}", e),
            SessionError::EmptyQuery => write!(f, "Please enter a search query."),
            SessionError::NoSuchItem(n) => write!(f, "No result number {}", n),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<reqwest::Error> for SessionError {
    fn from(err: reqwest::Error) -> Self {
        SessionError::RequestFailure(err.to_string())
    }
}
