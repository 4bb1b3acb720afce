//! Outside-interaction detector
//!
//! Listens at the ambient scope and reports interactions that land outside a
//! registered region. Interactions inside the region, including the one that
//! toggled it open, are ignored. Containment is judged from the interaction's
//! path snapshot, so the result does not depend on whether local handlers fire
//! before or after the ambient listener.

use crate::scope::{AmbientScope, Interaction, ListenerRegistration};
use quiesce_core::RegionRef;
use tracing::{debug, trace};

/// Reports interactions outside one region
///
/// Holds at most one ambient registration. Dropping the detector deactivates
/// it.
#[derive(Debug, Default)]
pub struct OutsideClickDetector {
    registration: Option<ListenerRegistration>,
}

impl OutsideClickDetector {
    /// Create an inactive detector
    pub fn new() -> Self {
        Self::default()
    }

    /// Start reporting interactions outside `region` to `on_outside`
    ///
    /// Replaces any previous registration. While `region` is empty or points
    /// at an unmounted node, nothing is reported.
    pub fn activate(
        &mut self,
        scope: &AmbientScope,
        region: RegionRef,
        on_outside: impl Fn(&Interaction) + 'static,
    ) {
        if self.deactivate() {
            debug!("Re-activating outside detector, previous listener released");
        }

        let weak_scope = scope.downgrade();
        let registration = scope.listen(move |interaction| {
            let Some(node) = region.get() else {
                trace!("Region not mounted, skipping outside check");
                return;
            };
            if interaction.is_within(node) {
                return;
            }
            // Region torn down without clearing its handle
            let mounted = weak_scope
                .upgrade()
                .is_some_and(|scope| scope.is_mounted(node));
            if !mounted {
                trace!(%node, "Region node unmounted, skipping outside check");
                return;
            }
            on_outside(interaction);
        });

        self.registration = Some(registration);
    }

    /// Stop listening
    ///
    /// Idempotent. Returns true if a listener was released.
    pub fn deactivate(&mut self) -> bool {
        match self.registration.take() {
            Some(mut registration) => registration.release(),
            None => false,
        }
    }

    /// Whether the detector holds a live registration
    pub fn is_active(&self) -> bool {
        self.registration
            .as_ref()
            .is_some_and(ListenerRegistration::is_active)
    }
}
