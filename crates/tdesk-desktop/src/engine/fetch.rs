//! Pending premade content fetches
//!
//! A fetch is recorded with the generation its target had when the fetch
//! was issued. Any later content change bumps the target's generation, so a
//! completion that arrives after the user moved on no longer matches and is
//! dropped instead of overwriting newer content.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::engine::DesktopEngine;
use crate::error::{DesktopError, DesktopResult};
use crate::panel::{PanelBody, FETCH_FAILED_MARKER};
use crate::premade::PremadeLoader;
use crate::types::{ChildId, PanelId, PremadeId, RequestId};

/// What a fetch writes into
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchTarget {
    /// `cachedContent` of a top-level premade panel
    Panel { panel_id: PanelId },
    /// `content` of a layout child
    Child { layout_id: PanelId, child_id: ChildId },
}

/// Why a fetch was issued
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOrigin {
    /// The user picked a premade; failure shows the failure marker
    Assign,
    /// Content was missing at render time; failure leaves it missing
    Lazy,
}

/// A fetch awaiting completion
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingFetch {
    pub premade_id: PremadeId,
    pub target: FetchTarget,
    /// Target generation at issue time
    pub generation: u64,
    pub origin: FetchOrigin,
}

/// Pending fetches keyed by request ID, plus the generation source
#[derive(Clone, Debug, Default)]
pub struct FetchQueue {
    pending: BTreeMap<RequestId, PendingFetch>,
    next_request_id: RequestId,
    next_generation: u64,
}

impl FetchQueue {
    /// Record a fetch and return its request ID
    pub fn enqueue(&mut self, fetch: PendingFetch) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.pending.insert(request_id, fetch);
        request_id
    }

    /// Remove and return a pending fetch
    pub fn take(&mut self, request_id: RequestId) -> Option<PendingFetch> {
        self.pending.remove(&request_id)
    }

    pub fn get(&self, request_id: RequestId) -> Option<&PendingFetch> {
        self.pending.get(&request_id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending request IDs, oldest first
    pub fn request_ids(&self) -> Vec<RequestId> {
        self.pending.keys().copied().collect()
    }

    /// Whether a fetch for `target` at `generation` is already pending
    pub fn is_pending(&self, target: &FetchTarget, generation: u64) -> bool {
        self.pending
            .values()
            .any(|f| &f.target == target && f.generation == generation)
    }

    /// Next content generation
    pub fn bump_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Drop every pending fetch
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl DesktopEngine {
    /// Fetches awaiting completion
    pub fn pending_fetches(&self) -> &FetchQueue {
        &self.fetches
    }

    /// Current generation of a fetch target, if it still exists
    fn target_generation(&self, target: &FetchTarget) -> Option<u64> {
        match target {
            FetchTarget::Panel { panel_id } => {
                self.state.find_panel(panel_id).map(|f| f.panel.generation)
            }
            FetchTarget::Child {
                layout_id,
                child_id,
            } => self
                .state
                .find_panel(layout_id)?
                .panel
                .as_layout()?
                .child(child_id)
                .map(|c| c.generation),
        }
    }

    pub(crate) fn enqueue_fetch(
        &mut self,
        premade_id: PremadeId,
        target: FetchTarget,
        generation: u64,
        origin: FetchOrigin,
    ) -> RequestId {
        let request_id = self.fetches.enqueue(PendingFetch {
            premade_id,
            target,
            generation,
            origin,
        });
        debug!(request_id, generation, "queued premade fetch");
        request_id
    }

    /// Queue fetches for premade panels on the active tab that have no
    /// cached content yet. Returns the new request IDs.
    pub fn request_missing_premade_content(&mut self) -> Vec<RequestId> {
        let Some(tab) = self.state.active_tab() else {
            return Vec::new();
        };

        let wanted: Vec<(PremadeId, FetchTarget, u64)> = tab
            .panels
            .iter()
            .filter_map(|panel| match &panel.body {
                PanelBody::Premade(body) if body.cached_content.is_none() => {
                    let premade_id = body.premade_id.clone()?;
                    let target = FetchTarget::Panel {
                        panel_id: panel.id.clone(),
                    };
                    Some((premade_id, target, panel.generation))
                }
                _ => None,
            })
            .filter(|(_, target, generation)| !self.fetches.is_pending(target, *generation))
            .collect();

        wanted
            .into_iter()
            .map(|(premade_id, target, generation)| {
                self.enqueue_fetch(premade_id, target, generation, FetchOrigin::Lazy)
            })
            .collect()
    }

    /// Apply the result of a fetch.
    ///
    /// Returns `true` if the result was written. Unknown requests, removed
    /// targets and superseded generations are discarded.
    pub fn complete_fetch(&mut self, request_id: RequestId, result: DesktopResult<String>) -> bool {
        let Some(fetch) = self.fetches.take(request_id) else {
            debug!(request_id, "completion for unknown fetch");
            return false;
        };

        match self.target_generation(&fetch.target) {
            None => {
                debug!(request_id, "fetch target no longer exists");
                return false;
            }
            Some(current) if current != fetch.generation => {
                debug!(
                    request_id,
                    issued = fetch.generation,
                    current,
                    "discarding stale fetch"
                );
                return false;
            }
            Some(_) => {}
        }

        let content = match result {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(request_id, premade_id = %fetch.premade_id, error = %e, "premade fetch failed");
                match fetch.origin {
                    FetchOrigin::Assign => Some(FETCH_FAILED_MARKER.to_string()),
                    FetchOrigin::Lazy => None,
                }
            }
        };
        let Some(content) = content else {
            return false;
        };

        let written = match &fetch.target {
            FetchTarget::Panel { panel_id } => match self.state.find_panel_mut(panel_id) {
                Some(panel) => match &mut panel.body {
                    PanelBody::Premade(body) => {
                        body.cached_content = Some(content);
                        true
                    }
                    _ => false,
                },
                None => false,
            },
            FetchTarget::Child {
                layout_id,
                child_id,
            } => match self.state.find_sub_panel_mut(layout_id, child_id) {
                Some(child) => {
                    child.content = content;
                    true
                }
                None => false,
            },
        };

        if written {
            self.commit();
        }
        written
    }

    /// Load every pending fetch through `loader` and apply the results.
    ///
    /// Returns the number of results written.
    pub fn run_fetches(&mut self, loader: &dyn PremadeLoader) -> usize {
        let mut applied = 0;
        for request_id in self.fetches.request_ids() {
            let Some(fetch) = self.fetches.get(request_id) else {
                continue;
            };
            let result = match self.registry.get(&fetch.premade_id) {
                Some(def) => loader.load(def),
                None => Err(DesktopError::PremadeNotFound(fetch.premade_id.clone())),
            };
            if self.complete_fetch(request_id, result) {
                applied += 1;
            }
        }
        applied
    }
}
