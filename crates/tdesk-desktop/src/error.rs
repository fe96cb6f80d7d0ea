//! Error types for the desktop core
//!
//! Most desktop mutations treat a missing panel, tab or child as a silent
//! no-op; these errors cover the operations that genuinely fail: import
//! validation, closing the last tab, collaborator calls and persistence.

use tdesk_store::StoreError;

use crate::types::{ChildId, PanelId, PremadeId, TabId};

/// Errors that can occur in desktop operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopError {
    /// Tab with the given ID was not found
    TabNotFound(TabId),

    /// Panel with the given ID was not found
    PanelNotFound(PanelId),

    /// Layout child was not found inside the given layout panel
    ChildNotFound {
        /// The layout panel searched
        layout: PanelId,
        /// The missing child
        child: ChildId,
    },

    /// No premade definition is registered under this ID
    PremadeNotFound(PremadeId),

    /// Fetching premade content failed
    FetchFailed(String),

    /// An operation was attempted that is not valid in the current state
    InvalidOperation {
        /// The operation that was attempted
        op: &'static str,
        /// Why the operation failed
        reason: &'static str,
    },

    /// JSON serialization or deserialization failed
    SerializationError(String),

    /// An imported state blob was rejected; current state is unchanged
    ImportRejected(String),

    /// Persistence operation failed
    PersistenceError(String),
}

impl std::fmt::Display for DesktopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TabNotFound(id) => write!(f, "tab not found: {}", id),
            Self::PanelNotFound(id) => write!(f, "panel not found: {}", id),
            Self::ChildNotFound { layout, child } => {
                write!(f, "layout child {} not found in {}", child, layout)
            }
            Self::PremadeNotFound(id) => write!(f, "unknown premade panel: {}", id),
            Self::FetchFailed(msg) => write!(f, "failed to fetch panel content: {}", msg),
            Self::InvalidOperation { op, reason } => {
                write!(f, "invalid operation '{}': {}", op, reason)
            }
            Self::SerializationError(msg) => write!(f, "serialization error: {}", msg),
            Self::ImportRejected(msg) => write!(f, "failed to import JSON: {}", msg),
            Self::PersistenceError(msg) => write!(f, "persistence error: {}", msg),
        }
    }
}

impl std::error::Error for DesktopError {}

impl From<StoreError> for DesktopError {
    fn from(e: StoreError) -> Self {
        Self::PersistenceError(e.to_string())
    }
}

impl From<serde_json::Error> for DesktopError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Result type alias for desktop operations
pub type DesktopResult<T> = Result<T, DesktopError>;
