//! Ambient interaction scope
//!
//! The document/body-level event source. Owns the region tree, per-node local
//! handlers, and the ambient listeners that observe every interaction.
//!
//! Dispatch snapshots the root-to-target path and the handler lists up front,
//! then runs handlers with no borrow held. Handlers may mount, unmount, listen
//! or release while a dispatch is in progress; a listener released mid-dispatch
//! does not fire for the rest of that dispatch.

use ahash::AHashMap;
use quiesce_core::{DismissConfig, DispatchOrder, NodeId, RegionPath, RegionTree, ReleaseGuard};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::trace;

/// Kind of user interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// Pointer click
    Click,
    /// Pointer pressed
    PointerDown,
    /// Touch start
    Touch,
}

/// One dispatched interaction
#[derive(Debug, Clone)]
pub struct Interaction {
    /// Kind of interaction
    pub kind: InteractionKind,
    /// Node the interaction landed on
    pub target: NodeId,
    /// Root-to-target path at the moment dispatch began
    pub path: RegionPath,
}

impl Interaction {
    /// Whether the interaction landed on `node` or inside it
    ///
    /// Answers from the path snapshot, so it stays correct even if a handler
    /// has since unmounted the target.
    pub fn is_within(&self, node: NodeId) -> bool {
        self.path.contains(&node)
    }
}

/// Identifier of an ambient listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler = Rc<dyn Fn(&Interaction)>;

struct ScopeInner {
    tree: RegionTree,
    order: DispatchOrder,
    local: AHashMap<NodeId, SmallVec<[Handler; 2]>>,
    ambient: Vec<(ListenerId, Handler)>,
    next_listener: u64,
}

/// Shared handle to an ambient scope
///
/// Cloning shares the scope. Single-threaded: the scope is not `Send`.
#[derive(Clone)]
pub struct AmbientScope {
    inner: Rc<RefCell<ScopeInner>>,
}

/// Non-owning handle to an ambient scope
#[derive(Clone)]
pub struct WeakScope {
    inner: Weak<RefCell<ScopeInner>>,
}

impl WeakScope {
    /// Upgrade to a strong handle if the scope still exists
    pub fn upgrade(&self) -> Option<AmbientScope> {
        self.inner.upgrade().map(|inner| AmbientScope { inner })
    }
}

impl Default for AmbientScope {
    fn default() -> Self {
        Self::new(DispatchOrder::default())
    }
}

impl AmbientScope {
    /// Create an empty scope dispatching in `order`
    pub fn new(order: DispatchOrder) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ScopeInner {
                tree: RegionTree::new(),
                order,
                local: AHashMap::new(),
                ambient: Vec::new(),
                next_listener: 0,
            })),
        }
    }

    /// Create a scope from configuration
    pub fn from_config(config: &DismissConfig) -> Self {
        Self::new(config.order)
    }

    /// Non-owning handle, for handlers stored inside the scope
    pub fn downgrade(&self) -> WeakScope {
        WeakScope {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Dispatch order
    pub fn order(&self) -> DispatchOrder {
        self.inner.borrow().order
    }

    /// Mount a parentless node (e.g. the body)
    pub fn mount_root(&self) -> NodeId {
        self.inner.borrow_mut().tree.insert_root()
    }

    /// Mount a node under `parent`
    pub fn mount_child(&self, parent: NodeId) -> quiesce_core::Result<NodeId> {
        self.inner.borrow_mut().tree.insert_child(parent)
    }

    /// Unmount `node` with its subtree and local handlers
    ///
    /// No-op for nodes that are not mounted.
    pub fn unmount(&self, node: NodeId) {
        // Handlers are dropped after the borrow ends; their captures may
        // release listeners on this scope.
        let _removed: Vec<_> = {
            let mut inner = self.inner.borrow_mut();
            let ids = inner.tree.remove(node);
            let removed = ids.iter().filter_map(|id| inner.local.remove(id)).collect();
            removed
        };
    }

    /// Whether `node` is mounted
    pub fn is_mounted(&self, node: NodeId) -> bool {
        self.inner.borrow().tree.is_mounted(node)
    }

    /// Inclusive containment test against the live tree
    pub fn contains(&self, region: NodeId, node: NodeId) -> bool {
        self.inner.borrow().tree.contains(region, node)
    }

    /// Children of `node`
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.inner.borrow().tree.children(node).to_vec()
    }

    /// Attach a local handler to `node`
    ///
    /// Local handlers see interactions targeting `node` or its descendants,
    /// in bubbling order.
    pub fn on_local(
        &self,
        node: NodeId,
        handler: impl Fn(&Interaction) + 'static,
    ) -> quiesce_core::Result<()> {
        let mut inner = self.inner.borrow_mut();
        if !inner.tree.is_mounted(node) {
            return Err(quiesce_core::Error::UnknownNode(node));
        }
        inner.local.entry(node).or_default().push(Rc::new(handler));
        Ok(())
    }

    /// Register an ambient listener that observes every interaction
    pub fn listen(&self, handler: impl Fn(&Interaction) + 'static) -> ListenerRegistration {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = ListenerId(inner.next_listener);
            inner.next_listener += 1;
            inner.ambient.push((id, Rc::new(handler)));
            id
        };
        trace!(?id, "Registered ambient listener");
        ListenerRegistration::new(self.downgrade(), id)
    }

    /// Whether listener `id` is registered
    pub fn is_listening(&self, id: ListenerId) -> bool {
        self.inner.borrow().ambient.iter().any(|(l, _)| *l == id)
    }

    /// Number of registered ambient listeners
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().ambient.len()
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let removed = {
            let mut inner = self.inner.borrow_mut();
            let position = inner.ambient.iter().position(|(l, _)| *l == id);
            let removed = position.map(|p| inner.ambient.remove(p));
            removed
        };
        removed.is_some()
    }

    /// Dispatch an interaction at `target`
    ///
    /// Returns the number of handlers invoked. Interactions on unmounted
    /// targets are dropped.
    pub fn dispatch(&self, kind: InteractionKind, target: NodeId) -> usize {
        let (interaction, locals, ambient, order) = {
            let inner = self.inner.borrow();
            if !inner.tree.is_mounted(target) {
                trace!(%target, "Dropping interaction on unmounted target");
                return 0;
            }
            let path = inner.tree.path(target);

            // Bubbling: target first, root last
            let locals: Vec<Handler> = path
                .iter()
                .rev()
                .filter_map(|node| inner.local.get(node))
                .flat_map(|handlers| handlers.iter().cloned())
                .collect();
            let ambient = inner.ambient.clone();

            (Interaction { kind, target, path }, locals, ambient, inner.order)
        };

        let mut invoked = 0;
        let run_ambient = |invoked: &mut usize| {
            for (id, handler) in &ambient {
                if self.is_listening(*id) {
                    handler(&interaction);
                    *invoked += 1;
                }
            }
        };

        match order {
            DispatchOrder::AmbientFirst => {
                run_ambient(&mut invoked);
                for handler in &locals {
                    handler(&interaction);
                    invoked += 1;
                }
            }
            DispatchOrder::LocalFirst => {
                for handler in &locals {
                    handler(&interaction);
                    invoked += 1;
                }
                run_ambient(&mut invoked);
            }
        }
        invoked
    }

    /// Dispatch a click at `target`
    pub fn click(&self, target: NodeId) -> usize {
        self.dispatch(InteractionKind::Click, target)
    }
}

/// One ambient listener registration
///
/// Released on `release()` or drop. Releasing twice, or after the scope is
/// gone, is a no-op.
pub struct ListenerRegistration {
    id: ListenerId,
    scope: WeakScope,
    guard: ReleaseGuard<Box<dyn FnOnce()>>,
}

impl ListenerRegistration {
    fn new(scope: WeakScope, id: ListenerId) -> Self {
        let release_scope = scope.clone();
        let guard: ReleaseGuard<Box<dyn FnOnce()>> = ReleaseGuard::new(Box::new(move || {
            if let Some(scope) = release_scope.upgrade() {
                if scope.remove_listener(id) {
                    trace!(?id, "Released ambient listener");
                }
            }
        }));
        Self { id, scope, guard }
    }

    /// Listener ID
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener now
    ///
    /// Returns false if it was already released.
    pub fn release(&mut self) -> bool {
        self.guard.release()
    }

    /// Whether the listener is still registered
    pub fn is_active(&self) -> bool {
        !self.guard.is_released()
            && self
                .scope
                .upgrade()
                .is_some_and(|scope| scope.is_listening(self.id))
    }
}

impl std::fmt::Debug for ListenerRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistration")
            .field("id", &self.id)
            .field("released", &self.guard.is_released())
            .finish()
    }
}
