//! Domain errors for the static `AuthN` plugin.

#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("user '{0}' is defined more than once")]
    DuplicateUser(String),

    #[error("user entry with an empty username")]
    EmptyUsername,

    #[error("malformed password digest for user '{username}': {reason}")]
    MalformedPassword { username: String, reason: String },

    #[error("token mapping for user '{0}' has an empty token")]
    EmptyToken(String),
}
