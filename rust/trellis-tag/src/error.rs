use thiserror::Error;

/// Errors that may occur when validating tag strings
#[derive(Error, Debug, PartialEq)]
pub enum TrellisTagError {
    /// A string did not conform to the tag grammar
    #[error("Invalid tag: {0}")]
    InvalidTag(String),
}
