//! The node tree.
//!
//! A [`Node`] is a shared handle to one element of a scene: its class,
//! validated attributes, listeners and (for containers) its children. Handles
//! are cheap to clone and compare by identity. Parents own their children;
//! children point back at their parent weakly, so dropping the root releases
//! the whole tree.
//!
//! Each node class also has a typed handle ([`Group`], [`Label`],
//! [`Circle`], [`Tag`], [`Text`]) implementing [`NodeKind`]. Typed handles
//! deref to `Node`, so every generic operation is available on them too.

use std::{
    cell::RefCell,
    fmt,
    ops::Deref,
    rc::{Rc, Weak},
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
};

use log::{debug, trace};

use crate::{
    attr::{self, AttrSpec, AttrValue, Attributes, name},
    error::{AttrError, TreeError},
    event::{Event, EventKind, ListenerId, Listeners, Subscription},
    geometry::{Bounds, Point, Size},
    group::Group,
    label::Label,
    shape::{
        Shape,
        circle::{self, Circle},
        tag::{self, Tag},
        text::{self, Text, TextMeasure},
    },
};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of element a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    Group,
    Label,
    Circle,
    Tag,
    Text,
}

impl NodeClass {
    pub const ALL: [NodeClass; 5] = [
        Self::Group,
        Self::Label,
        Self::Circle,
        Self::Tag,
        Self::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Group => "Group",
            Self::Label => "Label",
            Self::Circle => "Circle",
            Self::Tag => "Tag",
            Self::Text => "Text",
        }
    }

    /// Returns true if nodes of this class can hold children.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Group | Self::Label)
    }

    fn schema(self) -> &'static [&'static [AttrSpec]] {
        match self {
            Self::Group | Self::Label => &[attr::NODE_ATTRS, attr::SIZE_ATTRS],
            Self::Circle => &[attr::NODE_ATTRS, attr::SHAPE_ATTRS, circle::CIRCLE_ATTRS],
            Self::Tag => &[
                attr::NODE_ATTRS,
                attr::SIZE_ATTRS,
                attr::SHAPE_ATTRS,
                tag::TAG_ATTRS,
            ],
            Self::Text => &[attr::NODE_ATTRS, attr::SHAPE_ATTRS, text::TEXT_ATTRS],
        }
    }

    /// Every attribute this class accepts.
    pub fn attr_specs(self) -> impl Iterator<Item = &'static AttrSpec> {
        self.schema().iter().flat_map(|specs| specs.iter())
    }

    /// Looks up the schema entry for `name`.
    pub fn attr_spec(self, name: &str) -> Option<&'static AttrSpec> {
        self.attr_specs().find(|spec| spec.name() == name)
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown node type `{s}`"))
    }
}

/// Shared state behind a [`Node`] handle.
#[derive(Debug)]
pub struct NodeData {
    id: NodeId,
    class: NodeClass,
    attrs: RefCell<Attributes>,
    listeners: RefCell<Listeners>,
    children: RefCell<Vec<Node>>,
    parent: RefCell<Weak<NodeData>>,
    measurer: Option<Rc<dyn TextMeasure>>,
}

/// A shared handle to a scene node.
#[derive(Clone)]
pub struct Node(Rc<NodeData>);

impl Node {
    /// Creates a node of the given class with default attributes.
    ///
    /// This is equivalent to calling the typed constructor (for example
    /// [`Label::new`]) and converting the result.
    pub fn new(class: NodeClass) -> Self {
        match class {
            NodeClass::Group => Group::new().into(),
            NodeClass::Label => Label::new().into(),
            NodeClass::Circle => Circle::new().into(),
            NodeClass::Tag => Tag::new().into(),
            NodeClass::Text => Text::new().into(),
        }
    }

    /// Allocates a bare node; typed constructors add their wiring on top.
    pub(crate) fn alloc(class: NodeClass, measurer: Option<Rc<dyn TextMeasure>>) -> Self {
        let node = Self(Rc::new(NodeData {
            id: NodeId::next(),
            class,
            attrs: RefCell::default(),
            listeners: RefCell::default(),
            children: RefCell::default(),
            parent: RefCell::default(),
            measurer,
        }));
        trace!(node_id = node.id().get(), class = class.name(); "Node created");
        node
    }

    pub(crate) fn from_data(data: Rc<NodeData>) -> Self {
        Self(data)
    }

    pub(crate) fn downgrade(&self) -> Weak<NodeData> {
        Rc::downgrade(&self.0)
    }

    pub(crate) fn measurer(&self) -> Option<&Rc<dyn TextMeasure>> {
        self.0.measurer.as_ref()
    }

    pub fn id(&self) -> NodeId {
        self.0.id
    }

    pub fn class(&self) -> NodeClass {
        self.0.class
    }

    /// Returns the typed handle for this node if it is a `K`.
    pub fn downcast<K: NodeKind>(&self) -> Option<K> {
        K::from_node(self)
    }

    // Attributes

    /// Returns the effective value of `name`: the stored value, else the
    /// class default. `None` for unknown names and unset attributes.
    pub fn attr(&self, name: &str) -> Option<AttrValue> {
        if let Some(value) = self.0.attrs.borrow().get(name) {
            return Some(value.clone());
        }
        self.class()
            .attr_spec(name)
            .and_then(|spec| spec.default_value().to_value())
    }

    /// Returns true if `name` has been explicitly set.
    pub fn has_attr(&self, name: &str) -> bool {
        self.0.attrs.borrow().get(name).is_some()
    }

    /// Numeric value of `name`, 0 when absent.
    pub fn number(&self, name: &str) -> f32 {
        self.attr(name)
            .and_then(|value| value.as_number())
            .unwrap_or_default()
    }

    /// String value of `name`, if any.
    pub fn string(&self, name: &str) -> Option<String> {
        self.attr(name)
            .and_then(|value| value.as_str().map(str::to_string))
    }

    /// Boolean value of `name`, false when absent.
    pub fn flag(&self, name: &str) -> bool {
        self.attr(name)
            .and_then(|value| value.as_bool())
            .unwrap_or_default()
    }

    /// Validates and stores an attribute, firing a change event if the
    /// effective value changed.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError`] when the class has no such attribute or the
    /// value fails validation; the node is left unchanged.
    pub fn set_attr(&self, name: &str, value: impl Into<AttrValue>) -> Result<(), AttrError> {
        let (name, value) = self.resolve(name, value.into())?;
        self.apply(name, value);
        Ok(())
    }

    /// Sets several attributes at once.
    ///
    /// Every entry is validated before any is stored: on error nothing
    /// changes. Entries are then applied in order, each firing its own
    /// change event.
    ///
    /// # Errors
    ///
    /// Returns the first [`AttrError`] encountered.
    pub fn set_attrs<I, K, V>(&self, attrs: I) -> Result<(), AttrError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<AttrValue>,
    {
        let resolved = attrs
            .into_iter()
            .map(|(name, value)| self.resolve(name.as_ref(), value.into()))
            .collect::<Result<Vec<_>, _>>()?;
        for (name, value) in resolved {
            self.apply(name, value);
        }
        Ok(())
    }

    fn resolve(&self, name: &str, value: AttrValue) -> Result<(&'static str, AttrValue), AttrError> {
        let class = self.class();
        if class == NodeClass::Circle {
            if let Some(size) = attr::SIZE_ATTRS.iter().find(|spec| spec.name() == name) {
                return circle::radius_for_size(size, value);
            }
        }

        let spec = class.attr_spec(name).ok_or_else(|| AttrError::Unknown {
            class: class.name(),
            name: name.to_string(),
        })?;
        let value = spec.validator().coerce(spec.name(), value)?;
        Ok((spec.name(), value))
    }

    /// Stores a validated value. Returns false when it equals the current
    /// effective value.
    fn apply(&self, name: &'static str, value: AttrValue) -> bool {
        let old = self.attr(name);
        if old.as_ref() == Some(&value) {
            return false;
        }

        self.0.attrs.borrow_mut().insert(name, value.clone());
        trace!(node_id = self.id().get(), attr = name, value:? = value; "Attribute changed");

        self.emit(Event::Changed {
            attr: name,
            old,
            new: value,
        });
        true
    }

    // Events

    /// Registers `listener` for events of `kind`.
    ///
    /// The listener stays registered while the returned [`Subscription`]
    /// is alive.
    pub fn on<F>(&self, kind: EventKind, listener: F) -> Subscription
    where
        F: Fn(&Event) + 'static,
    {
        let id = self.0.listeners.borrow_mut().add(kind, Rc::new(listener));
        Subscription::new(self.downgrade(), id)
    }

    /// Removes a listener by id. Returns whether it was registered.
    pub fn off(&self, id: ListenerId) -> bool {
        self.0.listeners.borrow_mut().remove(id)
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.0.listeners.borrow().count(kind)
    }

    pub(crate) fn emit(&self, event: Event) {
        let listeners = self.0.listeners.borrow().matching(event.kind());
        for listener in listeners {
            listener(&event);
        }
    }

    // Tree

    pub fn parent(&self) -> Option<Node> {
        self.0.parent.borrow().upgrade().map(Node)
    }

    /// Direct children, in insertion order.
    pub fn children(&self) -> Vec<Node> {
        self.0.children.borrow().clone()
    }

    /// Returns the first direct child of kind `K`.
    pub fn find_child<K: NodeKind>(&self) -> Option<K> {
        self.0.children.borrow().iter().find_map(K::from_node)
    }

    /// Appends `child`, detaching it from its previous parent first.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotAContainer`] if this node cannot hold
    /// children and [`TreeError::Cycle`] if `child` is this node or one of
    /// its ancestors.
    pub fn add(&self, child: &Node) -> Result<(), TreeError> {
        let class = self.class();
        if !class.is_container() {
            return Err(TreeError::NotAContainer {
                class: class.name(),
            });
        }
        if child == self || child.is_ancestor_of(self) {
            return Err(TreeError::Cycle);
        }

        child.remove();
        self.0.children.borrow_mut().push(child.clone());
        *child.0.parent.borrow_mut() = self.downgrade();
        debug!(
            parent_id = self.id().get(),
            child_id = child.id().get(),
            child_class = child.class().name();
            "Child added"
        );

        self.emit(Event::ChildAdded(child.clone()));
        Ok(())
    }

    /// Detaches this node from its parent. Returns false if it had none.
    pub fn remove(&self) -> bool {
        let Some(parent) = self.parent() else {
            return false;
        };

        parent.0.children.borrow_mut().retain(|sibling| sibling != self);
        *self.0.parent.borrow_mut() = Weak::new();
        debug!(parent_id = parent.id().get(), child_id = self.id().get(); "Child removed");

        parent.emit(Event::ChildRemoved(self.clone()));
        true
    }

    fn is_ancestor_of(&self, other: &Node) -> bool {
        let mut current = other.parent();
        while let Some(node) = current {
            if &node == self {
                return true;
            }
            current = node.parent();
        }
        false
    }

    // Geometry

    pub fn x(&self) -> f32 {
        self.number(name::X)
    }

    pub fn y(&self) -> f32 {
        self.number(name::Y)
    }

    /// Position relative to the parent.
    pub fn position(&self) -> Point {
        Point::new(self.x(), self.y())
    }

    /// Sets `x` then `y`.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::Invalid`] for non-finite coordinates.
    pub fn set_position(&self, position: Point) -> Result<(), AttrError> {
        self.set_attrs([(name::X, position.x()), (name::Y, position.y())])
    }

    pub fn visible(&self) -> bool {
        self.flag(name::VISIBLE)
    }

    pub fn opacity(&self) -> f32 {
        self.number(name::OPACITY)
    }

    /// Nominal width. Circles report their diameter, text its measured
    /// width unless one is set, and labels the width of their text.
    pub fn width(&self) -> f32 {
        match self.class() {
            NodeClass::Circle => Circle::wrap(self.clone()).width(),
            NodeClass::Text => Text::wrap(self.clone()).width(),
            NodeClass::Label => Label::wrap(self.clone()).width(),
            NodeClass::Group | NodeClass::Tag => self.number(name::WIDTH),
        }
    }

    /// Nominal height, dispatched like [`Node::width`].
    pub fn height(&self) -> f32 {
        match self.class() {
            NodeClass::Circle => Circle::wrap(self.clone()).height(),
            NodeClass::Text => Text::wrap(self.clone()).height(),
            NodeClass::Label => Label::wrap(self.clone()).height(),
            NodeClass::Group | NodeClass::Tag => self.number(name::HEIGHT),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Extent of what this node draws itself, in its own coordinates.
    pub fn self_rect(&self) -> Bounds {
        match self.class() {
            NodeClass::Circle => Shape::self_rect(&Circle::wrap(self.clone())),
            NodeClass::Tag => Shape::self_rect(&Tag::wrap(self.clone())),
            NodeClass::Text => Shape::self_rect(&Text::wrap(self.clone())),
            NodeClass::Group | NodeClass::Label => {
                Bounds::new_from_top_left(Point::default(), self.size())
            }
        }
    }

    /// Extent of this node and its visible descendants in parent space.
    ///
    /// Containers report the union of their children; `None` for a
    /// container with nothing visible in it.
    pub fn client_rect(&self) -> Option<Bounds> {
        let local = if self.class().is_container() {
            self.children()
                .iter()
                .filter(|child| child.visible())
                .filter_map(Node::client_rect)
                .reduce(|acc, rect| acc.merge(&rect))?
        } else {
            self.self_rect()
        };
        Some(local.translate(self.position()))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id())
            .field("class", &self.class())
            .finish_non_exhaustive()
    }
}

impl AsRef<Node> for Node {
    fn as_ref(&self) -> &Node {
        self
    }
}

/// A typed handle for one [`NodeClass`].
pub trait NodeKind: Clone + Deref<Target = Node> + Into<Node> {
    const CLASS: NodeClass;

    /// Returns the typed handle if `node` is of this kind.
    fn from_node(node: &Node) -> Option<Self>;

    fn node(&self) -> &Node;
}

/// Declares a typed node handle.
macro_rules! node_kind {
    ($(#[$meta:meta])* $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $kind($crate::node::Node);

        impl $kind {
            pub(crate) fn wrap(node: $crate::node::Node) -> Self {
                debug_assert_eq!(node.class(), $crate::node::NodeClass::$kind);
                Self(node)
            }
        }

        impl $crate::node::NodeKind for $kind {
            const CLASS: $crate::node::NodeClass = $crate::node::NodeClass::$kind;

            fn from_node(node: &$crate::node::Node) -> Option<Self> {
                (node.class() == Self::CLASS).then(|| Self(node.clone()))
            }

            fn node(&self) -> &$crate::node::Node {
                &self.0
            }
        }

        impl std::ops::Deref for $kind {
            type Target = $crate::node::Node;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl AsRef<$crate::node::Node> for $kind {
            fn as_ref(&self) -> &$crate::node::Node {
                &self.0
            }
        }

        impl From<$kind> for $crate::node::Node {
            fn from(kind: $kind) -> Self {
                kind.0
            }
        }
    };
}

pub(crate) use node_kind;

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_node_class_from_str() {
        assert_eq!("Tag".parse::<NodeClass>(), Ok(NodeClass::Tag));
        assert_eq!("label".parse::<NodeClass>(), Ok(NodeClass::Label));
        assert!("Star".parse::<NodeClass>().is_err());
    }

    #[test]
    fn test_node_ids_are_unique() {
        let a = Node::new(NodeClass::Group);
        let b = Node::new(NodeClass::Group);
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_attr_defaults() {
        let tag = Node::new(NodeClass::Tag);
        assert_eq!(tag.attr(name::X), Some(AttrValue::Number(0.0)));
        assert_eq!(tag.attr(name::VISIBLE), Some(AttrValue::Bool(true)));
        assert_eq!(tag.attr(name::FILL), None);
        assert_eq!(tag.string(name::POINTER_DIRECTION).as_deref(), Some("none"));
        assert!(!tag.has_attr(name::X));
    }

    #[test]
    fn test_set_attr_coerces_numeric_strings() {
        let text = Node::new(NodeClass::Text);
        text.set_attr(name::FONT_SIZE, "12").unwrap();
        assert_eq!(text.attr(name::FONT_SIZE), Some(AttrValue::Number(12.0)));
    }

    #[test]
    fn test_set_attr_rejects_and_keeps_prior_value() {
        let tag = Node::new(NodeClass::Tag);
        tag.set_attr(name::WIDTH, 40.0).unwrap();

        assert!(matches!(
            tag.set_attr(name::WIDTH, -1.0),
            Err(AttrError::Invalid { name: "width", .. })
        ));
        assert!(tag.set_attr(name::FILL, "not a color").is_err());
        assert_eq!(
            tag.set_attr(name::RADIUS, 3.0),
            Err(AttrError::Unknown {
                class: "Tag",
                name: "radius".to_string()
            })
        );
        assert_approx_eq!(f32, tag.width(), 40.0);
        assert!(!tag.has_attr(name::FILL));
    }

    #[test]
    fn test_set_attr_equal_value_is_silent() {
        let group = Node::new(NodeClass::Group);
        let calls = Rc::new(Cell::new(0));
        let _sub = {
            let calls = Rc::clone(&calls);
            group.on(EventKind::Changed(name::X), move |_| calls.set(calls.get() + 1))
        };

        group.set_attr(name::X, 0.0).unwrap();
        assert_eq!(calls.get(), 0);
        assert!(!group.has_attr(name::X));

        group.set_attr(name::X, 5.0).unwrap();
        group.set_attr(name::X, "5").unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_changed_event_carries_old_and_new() {
        let tag = Node::new(NodeClass::Tag);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = Rc::clone(&seen);
            tag.on(EventKind::Changed(name::CORNER_RADIUS), move |event| {
                if let Event::Changed { old, new, .. } = event {
                    seen.borrow_mut().push((old.clone(), new.clone()));
                }
            })
        };

        tag.set_attr(name::CORNER_RADIUS, 4.0).unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![(Some(AttrValue::Number(0.0)), AttrValue::Number(4.0))]
        );
    }

    #[test]
    fn test_set_attrs_is_all_or_nothing() {
        let tag = Node::new(NodeClass::Tag);
        let result = tag.set_attrs([
            (name::WIDTH, AttrValue::Number(10.0)),
            (name::HEIGHT, AttrValue::from("tall")),
        ]);

        assert!(result.is_err());
        assert!(!tag.has_attr(name::WIDTH));
        assert!(!tag.has_attr(name::HEIGHT));

        tag.set_attrs([(name::WIDTH, 10.0), (name::HEIGHT, 20.0)])
            .unwrap();
        assert_eq!(tag.size(), Size::new(10.0, 20.0));
    }

    #[test]
    fn test_listener_may_mutate_emitter() {
        let group = Node::new(NodeClass::Group);
        let _sub = {
            let weak = group.downgrade();
            group.on(EventKind::Changed(name::X), move |_| {
                if let Some(data) = weak.upgrade() {
                    Node::from_data(data).set_attr(name::Y, 7.0).unwrap();
                }
            })
        };

        group.set_attr(name::X, 1.0).unwrap();
        assert_approx_eq!(f32, group.y(), 7.0);
    }

    #[test]
    fn test_add_and_remove_children() {
        let root = Node::new(NodeClass::Group);
        let a = Node::new(NodeClass::Circle);
        let b = Node::new(NodeClass::Tag);

        root.add(&a).unwrap();
        root.add(&b).unwrap();
        assert_eq!(root.children(), vec![a.clone(), b.clone()]);
        assert_eq!(a.parent(), Some(root.clone()));

        assert!(a.remove());
        assert!(!a.remove());
        assert_eq!(root.children(), vec![b]);
        assert_eq!(a.parent(), None);
    }

    #[test]
    fn test_add_reparents() {
        let first = Node::new(NodeClass::Group);
        let second = Node::new(NodeClass::Group);
        let circle = Node::new(NodeClass::Circle);

        first.add(&circle).unwrap();
        second.add(&circle).unwrap();

        assert!(first.children().is_empty());
        assert_eq!(second.children(), vec![circle.clone()]);
        assert_eq!(circle.parent(), Some(second));
    }

    #[test]
    fn test_add_rejects_leaves_and_cycles() {
        let outer = Node::new(NodeClass::Group);
        let inner = Node::new(NodeClass::Group);
        let circle = Node::new(NodeClass::Circle);
        outer.add(&inner).unwrap();

        assert_eq!(
            circle.add(&outer),
            Err(TreeError::NotAContainer { class: "Circle" })
        );
        assert_eq!(inner.add(&outer), Err(TreeError::Cycle));
        assert_eq!(outer.add(&outer), Err(TreeError::Cycle));
    }

    #[test]
    fn test_child_events() {
        let root = Node::new(NodeClass::Group);
        let log = Rc::new(RefCell::new(Vec::new()));
        let subs = [EventKind::ChildAdded, EventKind::ChildRemoved].map(|kind| {
            let log = Rc::clone(&log);
            root.on(kind, move |event| log.borrow_mut().push(event.kind()))
        });

        let child = Node::new(NodeClass::Circle);
        root.add(&child).unwrap();
        child.remove();
        drop(subs);

        assert_eq!(
            *log.borrow(),
            vec![EventKind::ChildAdded, EventKind::ChildRemoved]
        );
    }

    #[test]
    fn test_find_child_by_kind() {
        let root = Node::new(NodeClass::Group);
        let circle = Circle::new();
        let tag = Tag::new();
        root.add(&circle).unwrap();
        root.add(&tag).unwrap();

        assert_eq!(root.find_child::<Tag>(), Some(tag));
        assert_eq!(root.find_child::<Circle>(), Some(circle));
        assert_eq!(root.find_child::<Text>(), None);
    }

    #[test]
    fn test_downcast() {
        let node = Node::new(NodeClass::Circle);
        assert!(node.downcast::<Circle>().is_some());
        assert!(node.downcast::<Tag>().is_none());
    }

    #[test]
    fn test_dropping_root_releases_children() {
        let root = Node::new(NodeClass::Group);
        let child = Node::new(NodeClass::Circle);
        root.add(&child).unwrap();
        drop(root);
        assert_eq!(child.parent(), None);
    }

    #[test]
    fn test_client_rect_merges_visible_children() {
        let root = Node::new(NodeClass::Group);
        root.set_position(Point::new(10.0, 10.0)).unwrap();

        let circle = Circle::new();
        circle.set_radius(5.0).unwrap();
        circle.set_position(Point::new(20.0, 20.0)).unwrap();

        let tag = Tag::new();
        tag.set_attrs([(name::WIDTH, 30.0), (name::HEIGHT, 10.0)])
            .unwrap();

        let hidden = Tag::new();
        hidden
            .set_attrs([
                (name::WIDTH, AttrValue::Number(500.0)),
                (name::HEIGHT, AttrValue::Number(500.0)),
                (name::VISIBLE, AttrValue::Bool(false)),
            ])
            .unwrap();

        for child in [circle.node(), tag.node(), hidden.node()] {
            root.add(child).unwrap();
        }

        let rect = root.client_rect().unwrap();
        assert_approx_eq!(f32, rect.min_x(), 10.0);
        assert_approx_eq!(f32, rect.min_y(), 10.0);
        assert_approx_eq!(f32, rect.max_x(), 40.0);
        assert_approx_eq!(f32, rect.max_y(), 35.0);
    }

    #[test]
    fn test_client_rect_of_empty_group() {
        assert_eq!(Node::new(NodeClass::Group).client_rect(), None);
    }
}
