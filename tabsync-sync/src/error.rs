//! Error types for the sync layer.

use tabsync_types::FeatureKind;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur in sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The channel handle was closed.
    #[error("channel closed")]
    ChannelClosed,

    /// The multicast backend could not be reached.
    #[error("multicast unavailable: {0}")]
    Unavailable(String),

    /// The feature already has a live sync handle in this tab.
    #[error("feature already mounted: {0}")]
    AlreadyMounted(FeatureKind),
}
