use cbor_decoder::{DecodeError, ErrorKind};

/// A rendering that stopped on a decode error.
///
/// `partial` is whatever text had been produced before the failure. It
/// is kept for diagnostics only and is not a valid rendering of any
/// prefix of the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error} (partial output: {partial:?})")]
pub struct DiagFailure {
    #[source]
    pub error: DecodeError,
    pub partial: String,
}

impl DiagFailure {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}
