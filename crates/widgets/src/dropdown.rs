//! Single-select dropdown
//!
//! Mounted as three layers of region nodes:
//!
//! ```text
//! root (form, the dismiss region)
//! └── toggle (click flips open/closed)
//!     ├── option
//!     └── option ...
//! ```
//!
//! Options sit under the toggle, so choosing one bubbles up and closes the
//! menu. The currently selected option is never listed. Only clicks toggle or
//! select. Any interaction outside the root (click, pointer down or touch)
//! closes the menu through an `OutsideClickDetector`.

use dismiss::{AmbientScope, Interaction, InteractionKind, OutsideClickDetector, WeakScope};
use quiesce_core::{NodeId, RegionRef};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

/// One selectable entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    /// Display text
    pub label: String,
    /// Unique value
    pub value: String,
}

impl DropdownOption {
    /// Create an option
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

type ChangeCallback = Rc<dyn Fn(&DropdownOption)>;

struct Nodes {
    scope: WeakScope,
    root: NodeId,
    toggle: NodeId,
    options: Vec<(NodeId, String)>,
}

struct Inner {
    label: String,
    options: Vec<DropdownOption>,
    selected: DropdownOption,
    open: bool,
    on_change: Option<ChangeCallback>,
    nodes: Option<Nodes>,
}

/// Dropdown state plus its mounted nodes
pub struct Dropdown {
    inner: Rc<RefCell<Inner>>,
    region: RegionRef,
    detector: OutsideClickDetector,
}

impl Dropdown {
    /// Create an unmounted, closed dropdown
    pub fn new(
        label: impl Into<String>,
        options: Vec<DropdownOption>,
        selected: DropdownOption,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                label: label.into(),
                options,
                selected,
                open: false,
                on_change: None,
                nodes: None,
            })),
            region: RegionRef::new(),
            detector: OutsideClickDetector::new(),
        }
    }

    /// Called with the new option whenever the selection changes
    pub fn on_selected_change(&mut self, callback: impl Fn(&DropdownOption) + 'static) {
        self.inner.borrow_mut().on_change = Some(Rc::new(callback));
    }

    /// Mount under `parent` and start listening for outside clicks
    ///
    /// Re-mounting first unmounts the previous nodes.
    pub fn mount(&mut self, scope: &AmbientScope, parent: NodeId) -> quiesce_core::Result<()> {
        self.unmount();

        let root = scope.mount_child(parent)?;
        let toggle = scope.mount_child(root)?;

        let weak = Rc::downgrade(&self.inner);
        scope.on_local(toggle, move |interaction| {
            if !is_click(interaction) {
                return;
            }
            if let Some(inner) = weak.upgrade() {
                let mut inner = inner.borrow_mut();
                inner.open = !inner.open;
                debug!(open = inner.open, "Dropdown toggled");
            }
        })?;

        self.inner.borrow_mut().nodes = Some(Nodes {
            scope: scope.downgrade(),
            root,
            toggle,
            options: Vec::new(),
        });
        render_options(&self.inner)?;

        self.region.set(root);
        let weak = Rc::downgrade(&self.inner);
        self.detector.activate(scope, self.region.clone(), move |_| {
            if let Some(inner) = weak.upgrade() {
                let mut inner = inner.borrow_mut();
                if inner.open {
                    inner.open = false;
                    debug!("Dropdown closed by outside interaction");
                }
            }
        });
        Ok(())
    }

    /// Remove nodes and stop listening. Idempotent.
    pub fn unmount(&mut self) {
        self.detector.deactivate();
        self.region.clear();

        let nodes = self.inner.borrow_mut().nodes.take();
        if let Some(nodes) = nodes {
            if let Some(scope) = nodes.scope.upgrade() {
                scope.unmount(nodes.root);
            }
            debug!("Dropdown unmounted");
        }
    }

    /// Whether the dropdown is mounted
    pub fn is_mounted(&self) -> bool {
        self.inner.borrow().nodes.is_some()
    }

    /// Whether the menu is open
    pub fn is_open(&self) -> bool {
        self.inner.borrow().open
    }

    /// Field label
    pub fn label(&self) -> String {
        self.inner.borrow().label.clone()
    }

    /// Currently selected option
    pub fn selected(&self) -> DropdownOption {
        self.inner.borrow().selected.clone()
    }

    /// Options offered in the menu (everything except the selection)
    pub fn visible_options(&self) -> Vec<DropdownOption> {
        visible(&self.inner.borrow())
    }

    /// Select the option with `value`
    ///
    /// Returns false if no option has that value.
    pub fn select(&self, value: &str) -> bool {
        select_value(&self.inner, value)
    }

    /// Root node (the dismiss region) while mounted
    pub fn root_node(&self) -> Option<NodeId> {
        self.inner.borrow().nodes.as_ref().map(|n| n.root)
    }

    /// Toggle node while mounted
    pub fn toggle_node(&self) -> Option<NodeId> {
        self.inner.borrow().nodes.as_ref().map(|n| n.toggle)
    }

    /// Node rendering the option with `value`, if it is currently listed
    pub fn option_node(&self, value: &str) -> Option<NodeId> {
        self.inner.borrow().nodes.as_ref().and_then(|n| {
            n.options
                .iter()
                .find(|(_, v)| v == value)
                .map(|(node, _)| *node)
        })
    }

    /// Handle to the rendered region
    pub fn region(&self) -> RegionRef {
        self.region.clone()
    }
}

impl Drop for Dropdown {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn is_click(interaction: &Interaction) -> bool {
    interaction.kind == InteractionKind::Click
}

fn visible(inner: &Inner) -> Vec<DropdownOption> {
    inner
        .options
        .iter()
        .filter(|o| o.value != inner.selected.value)
        .cloned()
        .collect()
}

fn select_value(inner: &Rc<RefCell<Inner>>, value: &str) -> bool {
    let (option, callback) = {
        let mut state = inner.borrow_mut();
        let Some(option) = state.options.iter().find(|o| o.value == value).cloned() else {
            return false;
        };
        state.selected = option.clone();
        (option, state.on_change.clone())
    };
    debug!(value = %option.value, "Dropdown selection changed");

    // No borrow held: the callback may read the dropdown
    if let Some(callback) = callback {
        callback(&option);
    }
    if let Err(e) = render_options(inner) {
        warn!("Failed to re-render dropdown options: {}", e);
    }
    true
}

/// Replace the option nodes with one node per visible option
fn render_options(inner: &Rc<RefCell<Inner>>) -> quiesce_core::Result<()> {
    let (scope, toggle, stale, visible) = {
        let mut state = inner.borrow_mut();
        let visible = visible(&state);
        let Some(nodes) = state.nodes.as_mut() else {
            return Ok(());
        };
        let Some(scope) = nodes.scope.upgrade() else {
            return Ok(());
        };
        let stale = std::mem::take(&mut nodes.options);
        (scope, nodes.toggle, stale, visible)
    };

    for (node, _) in stale {
        scope.unmount(node);
    }

    let mut rendered = Vec::with_capacity(visible.len());
    for option in visible {
        let node = scope.mount_child(toggle)?;
        let weak: Weak<RefCell<Inner>> = Rc::downgrade(inner);
        let value = option.value.clone();
        scope.on_local(node, move |interaction| {
            if !is_click(interaction) {
                return;
            }
            if let Some(inner) = weak.upgrade() {
                select_value(&inner, &value);
            }
        })?;
        rendered.push((node, option.value));
    }

    if let Some(nodes) = inner.borrow_mut().nodes.as_mut() {
        nodes.options = rendered;
    }
    Ok(())
}
