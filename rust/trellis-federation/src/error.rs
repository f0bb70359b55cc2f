use thiserror::Error;

/// Errors that may occur when translating mailbox addresses
#[derive(Error, Debug, PartialEq)]
pub enum TrellisFederationError {
    /// A tag handed to the translator was not a routable mailbox address
    #[error("Invalid mailbox format: {0}")]
    InvalidMailboxFormat(String),
}
