use thiserror::Error;

/// Reasons a charge payload cannot be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PixError {
    #[error("invalid amount {0}: must be finite and non-negative")]
    InvalidAmount(f64),

    #[error("field {tag} would hold {len} characters, at most 99 fit")]
    FieldTooLong { tag: &'static str, len: usize },

    #[error("destination key is empty")]
    EmptyDestinationKey,
}
