/// Errors from the session client and conversation flow.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote call failed ({status}): {message}")]
    Api { status: u16, message: String },
    /// The endpoint answered but did not hand back a session id.
    #[error("no session id in response")]
    MissingSessionId,
    /// The endpoint answered but did not hand back a reply.
    #[error("no response text in reply")]
    MissingResponse,
    #[error("record store error: {0}")]
    Records(#[from] claimline_db::DbError),
}

pub type SessionResult<T> = Result<T, SessionError>;
