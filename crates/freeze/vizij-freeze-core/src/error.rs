//! Error types for the freeze session.

use thiserror::Error;

/// Errors surfaced to the hosting integration.
///
/// Runtime conditions (missing target, absent metadata, clipboard failure)
/// degrade gracefully and never produce one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// An overlay is already installed on this host.
    #[error("an overlay is already mounted on this host")]
    AlreadyMounted,
    /// The host could not install its overlay marker.
    #[error("overlay mount failed: {0}")]
    MountFailed(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
