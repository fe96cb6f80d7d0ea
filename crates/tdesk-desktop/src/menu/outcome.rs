//! Results of menu actions

use crate::types::RequestId;

/// MIME type of downloaded custom content
pub const MARKDOWN_MIME: &str = "text/markdown;charset=utf-8";

/// A file the host should offer for download
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime: &'static str,
    pub text: String,
}

impl Download {
    /// Markdown download named after a panel title
    pub fn markdown(title: &str, text: &str) -> Self {
        let stem = if title.is_empty() { "custom-panel" } else { title };
        Self {
            file_name: format!("{}.md", stem),
            mime: MARKDOWN_MIME,
            text: text.to_string(),
        }
    }
}

/// What the host should do after a menu action
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Nothing applied: target missing or action not valid for it
    Unchanged,
    /// State changed and was committed
    Changed,
    /// State changed and premade content was requested
    Fetching(RequestId),
    /// Open this URL in a new browser tab
    OpenUrl(String),
    /// Save this file
    Download(Download),
}

impl MenuOutcome {
    /// Whether the state was modified
    pub fn changed(&self) -> bool {
        matches!(self, Self::Changed | Self::Fetching(_))
    }
}
