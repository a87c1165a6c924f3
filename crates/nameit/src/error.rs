//! The top-level error type.

use nameit_rules::RuleError;
use nameit_store::StoreError;

/// Anything a [`GameService`](crate::GameService) operation can fail
/// with: a game rule said no, or the store did.
///
/// Rule errors are expected gameplay conditions and safe to show to the
/// player verbatim. Store errors are resource conditions; transient
/// ones are the caller's to retry — the service never retries.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
