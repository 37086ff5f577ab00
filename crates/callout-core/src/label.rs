//! Labels: a text child wrapped in a pointer tag.
//!
//! A [`Label`] keeps its [`Tag`] child sized to its [`Text`] child and
//! positions both so that the tip of the tag's pointer sits at the label's
//! own origin. Moving the label therefore moves the pointer tip.
//!
//! The label listens for children being added and removed. For every text
//! child it watches the attributes that change the text's size and re-runs
//! [`Label::sync`] whenever one changes, before the mutating call returns.
//! Only the text is watched: `sync` writes to the tag and the text's
//! position, neither of which re-triggers it.
//!
//! ```
//! # use callout_core::{attr::name, label::Label, shape::{FixedAdvanceMeasure, PointerDirection, Tag, Text}};
//! let label = Label::new();
//! let tag = Tag::new();
//! tag.set_pointer_direction(PointerDirection::Down).unwrap();
//! tag.set_attrs([(name::POINTER_WIDTH, 10.0), (name::POINTER_HEIGHT, 10.0)]).unwrap();
//! label.add(&tag).unwrap();
//!
//! let text = Text::with_measurer(FixedAdvanceMeasure::new(0.5));
//! text.set_attr(name::FONT_SIZE, 20.0).unwrap();
//! text.set_text("Hi").unwrap();
//! label.add(&text).unwrap();
//!
//! assert_eq!(tag.width(), 20.0);
//! assert_eq!((tag.x(), tag.y()), (-10.0, -30.0));
//! ```

use std::{cell::RefCell, rc::Rc};

use log::{debug, trace, warn};

use crate::{
    attr::name,
    event::{Event, EventKind, Subscription},
    geometry::Point,
    node::{Node, NodeClass, NodeId, node_kind},
    shape::{PointerDirection, Tag, Text},
};

/// Text attributes that change the text's size.
pub const WATCHED_TEXT_ATTRS: &[&str] = &[
    name::FONT_FAMILY,
    name::FONT_SIZE,
    name::FONT_STYLE,
    name::PADDING,
    name::LINE_HEIGHT,
    name::TEXT,
    name::WIDTH,
];

/// Subscriptions on each watched text child.
type Watched = Rc<RefCell<Vec<(NodeId, Vec<Subscription>)>>>;

node_kind!(
    /// A container that lays out a [`Tag`] around a [`Text`].
    Label
);

impl Label {
    pub fn new() -> Self {
        let label = Self::wrap(Node::alloc(NodeClass::Label, None));
        let watched = Watched::default();

        let on_added = {
            let label_ref = label.downgrade();
            let watched = Rc::clone(&watched);
            move |event: &Event| {
                let (Event::ChildAdded(child), Some(data)) = (event, label_ref.upgrade()) else {
                    return;
                };
                let label = Self::wrap(Node::from_data(data));
                if let Some(text) = child.downcast::<Text>() {
                    let subscriptions = label.watch(&text);
                    watched.borrow_mut().push((text.id(), subscriptions));
                }
                label.sync();
            }
        };

        let on_removed = {
            let label_ref = label.downgrade();
            let watched = Rc::clone(&watched);
            move |event: &Event| {
                let (Event::ChildRemoved(child), Some(data)) = (event, label_ref.upgrade()) else {
                    return;
                };
                let detached = {
                    let mut watched = watched.borrow_mut();
                    let (detached, kept): (Vec<_>, Vec<_>) =
                        watched.drain(..).partition(|(id, _)| *id == child.id());
                    *watched = kept;
                    detached
                };
                if !detached.is_empty() {
                    trace!(text_id = child.id().get(); "Stopped watching text");
                }
                drop(detached);
                Self::wrap(Node::from_data(data)).sync();
            }
        };

        // Both listeners live as long as the label itself.
        let _ = label.on(EventKind::ChildAdded, on_added).forget();
        let _ = label.on(EventKind::ChildRemoved, on_removed).forget();

        label
    }

    /// Subscribes to every watched attribute of `text`.
    fn watch(&self, text: &Text) -> Vec<Subscription> {
        trace!(label_id = self.id().get(), text_id = text.id().get(); "Watching text");
        WATCHED_TEXT_ATTRS
            .iter()
            .map(|attr| {
                let label_ref = self.downgrade();
                text.on(EventKind::Changed(*attr), move |_| {
                    if let Some(data) = label_ref.upgrade() {
                        Self::wrap(Node::from_data(data)).sync();
                    }
                })
            })
            .collect()
    }

    /// The first text child.
    pub fn text(&self) -> Option<Text> {
        self.find_child::<Text>()
    }

    /// The first tag child.
    pub fn tag(&self) -> Option<Tag> {
        self.find_child::<Tag>()
    }

    /// Width of the text child, 0 without one.
    pub fn width(&self) -> f32 {
        self.text().map_or(0.0, |text| text.width())
    }

    /// Height of the text child, 0 without one.
    pub fn height(&self) -> f32 {
        self.text().map_or(0.0, |text| text.height())
    }

    /// Sizes the tag to the text and moves both so the pointer tip sits at
    /// the label's origin.
    ///
    /// Does nothing unless the label has both a text and a tag child.
    pub fn sync(&self) {
        let (Some(text), Some(tag)) = (self.text(), self.tag()) else {
            trace!(label_id = self.id().get(); "Label sync skipped, missing text or tag");
            return;
        };

        let width = text.width();
        let height = text.height();
        let pointer_width = tag.pointer_width();
        let pointer_height = tag.pointer_height();
        let direction = tag.pointer_direction();

        let tip = match direction {
            PointerDirection::Up => Point::new(width / 2.0, -pointer_height),
            PointerDirection::Right => Point::new(width + pointer_width, height / 2.0),
            PointerDirection::Down => Point::new(width / 2.0, height + pointer_height),
            PointerDirection::Left => Point::new(-pointer_width, height / 2.0),
            PointerDirection::None => Point::default(),
        };
        let anchor = tip.negate();

        if let Err(err) = tag.set_attrs([
            (name::X, anchor.x()),
            (name::Y, anchor.y()),
            (name::WIDTH, width),
            (name::HEIGHT, height),
        ]) {
            warn!(label_id = self.id().get(), err:err; "Failed to update label tag");
        }
        if let Err(err) = text.set_position(anchor) {
            warn!(label_id = self.id().get(), err:err; "Failed to move label text");
        }

        debug!(
            label_id = self.id().get(),
            width = width,
            height = height,
            direction = direction.as_str();
            "Label synced"
        );
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::new()
    }
}
