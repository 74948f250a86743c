use thiserror::Error;

/// Errors raised while constructing a structure.
///
/// Lookups and removals never fail; they report absence through `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DsaError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
