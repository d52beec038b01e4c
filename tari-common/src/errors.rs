use thiserror::Error;

/// Errors related to principal formatting and encoding.
#[derive(Debug, Error)]
pub enum PrincipalError {
    /// The string is not valid bech32m or carries an unknown prefix.
    #[error("Invalid principal encoding: {0}")]
    InvalidEncoding(String),

    /// The embedded key is not a valid Ed25519 public key.
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Public key length is not 32 bytes.
    #[error("Invalid public key length: {0}")]
    InvalidPublicKeyLength(usize),

    /// Failed to encode the key as a bech32m string.
    #[error("Failed to encode principal to bech32m: {0}")]
    EncodingFailed(#[from] bech32::Error),
}
