use thiserror::Error;

/// Errors surfaced by key generation, key parsing, encapsulation and decapsulation.
///
/// A ciphertext that decodes to the wrong message is not an error: decapsulation returns a
/// different shared secret instead.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The `(n, k, t)` parameter set is unusable.
    #[error("invalid parameters: {0}")]
    InvalidParameters(&'static str),

    /// A serialized key does not match its declared kind, version or dimensions.
    #[error("malformed key: {0}")]
    MalformedKey(&'static str),

    /// A key's matrices are inconsistent with its parameters or with each other.
    #[error("invalid key: {0}")]
    InvalidKey(&'static str),

    /// A ciphertext has the wrong length for the key's code length.
    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
