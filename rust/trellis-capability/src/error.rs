use thiserror::Error;

/// Errors that may occur when validating selector strings
#[derive(Error, Debug, PartialEq)]
pub enum TrellisCapabilityError {
    /// A string did not conform to the selector grammar
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}
