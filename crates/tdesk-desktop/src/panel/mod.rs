//! Panel entity model
//!
//! A [`Panel`] is a floating window on a tab. Its `body` holds the
//! type-specific fields; layout panels nest [`LayoutChild`] entries that are
//! typed independently of their parent.

mod child;
mod dice;
mod layout;
#[allow(clippy::module_inception)]
mod panel;

pub use child::{ChildKind, LayoutChild, CHILD_CUSTOM_PLACEHOLDER};
pub use dice::{build_notation, DiceBody, DiceCounts, DiceRoller, DieKind};
pub use layout::{LayoutBody, LayoutMode};
pub use panel::{
    CustomBody, ExternalBody, Panel, PanelBody, PanelKind, PremadeBody, CUSTOM_PLACEHOLDER,
    FETCH_FAILED_MARKER,
};
