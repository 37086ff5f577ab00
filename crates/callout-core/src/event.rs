//! Change notifications.
//!
//! Nodes fire an [`Event`] after every successful attribute change and
//! whenever a child is added to or removed from a container. Listeners are
//! plain closures registered with [`Node::on`](crate::node::Node::on) and
//! run synchronously, in registration order, before the mutating call
//! returns.
//!
//! # Invariants
//!
//! 1. An attribute change event fires only when the stored value changed.
//! 2. No interior borrow of the emitting node is held while listeners run,
//!    so a listener may read or mutate any node, including the emitter.
//! 3. The set of listeners is captured when an event is emitted; listeners
//!    added or removed during delivery take effect from the next event.
//! 4. Dropping a [`Subscription`] removes its listener.

use std::{fmt, rc::Rc, rc::Weak};

use crate::{attr::AttrValue, node::Node, node::NodeData};

/// What a listener subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The named attribute changed value.
    Changed(&'static str),
    /// A child was added to a container.
    ChildAdded,
    /// A child was removed from a container.
    ChildRemoved,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Changed(attr) => write!(f, "{attr}.changed"),
            Self::ChildAdded => write!(f, "add"),
            Self::ChildRemoved => write!(f, "remove"),
        }
    }
}

/// A delivered notification.
#[derive(Debug, Clone)]
pub enum Event {
    /// `attr` changed from `old` (`None` when it had no value) to `new`.
    Changed {
        attr: &'static str,
        old: Option<AttrValue>,
        new: AttrValue,
    },
    ChildAdded(Node),
    ChildRemoved(Node),
}

impl Event {
    /// Returns the kind listeners subscribe with to receive this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Changed { attr, .. } => EventKind::Changed(attr),
            Self::ChildAdded(_) => EventKind::ChildAdded,
            Self::ChildRemoved(_) => EventKind::ChildRemoved,
        }
    }
}

/// Identifies a registered listener on its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub(crate) type Listener = Rc<dyn Fn(&Event)>;

/// Listeners registered on one node.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, EventKind, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, kind, listener));
        id
    }

    /// Removes a listener, returning whether it was registered.
    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Snapshot of the listeners for `kind`, in registration order.
    pub(crate) fn matching(&self, kind: EventKind) -> Vec<Listener> {
        self.entries
            .iter()
            .filter(|(_, entry_kind, _)| *entry_kind == kind)
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect()
    }

    pub(crate) fn count(&self, kind: EventKind) -> usize {
        self.entries
            .iter()
            .filter(|(_, entry_kind, _)| *entry_kind == kind)
            .count()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(id, kind, _)| (id, kind)))
            .finish()
    }
}

/// Keeps a listener registered for as long as it is alive.
///
/// Bind it to a named variable (`let _sub = ...`): binding to `_` drops it,
/// and the listener with it, immediately.
#[must_use = "dropping a Subscription unregisters its listener"]
#[derive(Debug)]
pub struct Subscription {
    node: Weak<NodeData>,
    id: Option<ListenerId>,
}

impl Subscription {
    pub(crate) fn new(node: Weak<NodeData>, id: ListenerId) -> Self {
        Self { node, id: Some(id) }
    }

    /// Returns the id of the listener this subscription keeps alive.
    pub fn id(&self) -> Option<ListenerId> {
        self.id
    }

    /// Keeps the listener registered for the node's lifetime.
    pub fn forget(mut self) -> Option<ListenerId> {
        self.id.take()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let (Some(id), Some(node)) = (self.id.take(), self.node.upgrade()) {
            Node::from_data(node).off(id);
        }
    }
}
