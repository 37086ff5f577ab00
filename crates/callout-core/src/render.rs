//! SVG rendering of node trees.
//!
//! Every visible node becomes a `<g>` translated to its position. A shape
//! draws its path into that group through an [`SvgEmitter`], then the
//! node's children follow in order, so later children paint on top.

use log::{debug, trace};
use svg::{Document, node::element as svg_element};

use crate::{
    color::Color,
    draw::{SvgEmitter, SvgNode},
    geometry::{Bounds, Point, Size},
    node::{Node, NodeClass, NodeKind},
    shape::{Circle, Shape, Tag, Text},
};

/// Document-level settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStyle {
    background: Option<Color>,
    margin: f32,
}

impl DocumentStyle {
    pub fn new(background: Option<Color>, margin: f32) -> Self {
        Self { background, margin }
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Space left around the scene's content on every side.
    pub fn margin(&self) -> f32 {
        self.margin
    }
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            background: None,
            margin: 20.0,
        }
    }
}

/// Renders `node` and its descendants. Returns `None` for invisible nodes.
pub fn render_node(node: &Node) -> Option<SvgNode> {
    if !node.visible() {
        trace!(node_id = node.id().get(); "Skipping invisible node");
        return None;
    }

    let position = node.position();
    let mut group = svg_element::Group::new()
        .set("data-node", node.class().name())
        .set(
            "transform",
            format!("translate({} {})", position.x(), position.y()),
        );

    let opacity = node.opacity();
    if opacity < 1.0 {
        group = group.set("opacity", opacity);
    }

    let mut emitter = SvgEmitter::new();
    match node.class() {
        NodeClass::Circle => draw_as::<Circle>(node, &mut emitter),
        NodeClass::Tag => draw_as::<Tag>(node, &mut emitter),
        NodeClass::Text => draw_as::<Text>(node, &mut emitter),
        NodeClass::Group | NodeClass::Label => {}
    }
    for element in emitter.into_nodes() {
        group = group.add(element);
    }

    for child in node.children() {
        if let Some(rendered) = render_node(&child) {
            group = group.add(rendered);
        }
    }

    Some(Box::new(group))
}

fn draw_as<K>(node: &Node, emitter: &mut SvgEmitter)
where
    K: NodeKind + Shape,
{
    if let Some(shape) = node.downcast::<K>() {
        shape.draw(emitter);
    }
}

/// Renders a whole scene into an SVG document sized to its content.
pub fn render_document(root: &Node, style: &DocumentStyle) -> Document {
    let bounds = root
        .client_rect()
        .unwrap_or_else(|| Bounds::new_from_top_left(root.position(), Size::default()))
        .expand(style.margin());
    let size = bounds.to_size();
    debug!(
        min_x = bounds.min_x(),
        min_y = bounds.min_y(),
        width = size.width(),
        height = size.height();
        "Rendering document"
    );

    let mut doc = Document::new()
        .set(
            "viewBox",
            format!(
                "{} {} {} {}",
                bounds.min_x(),
                bounds.min_y(),
                size.width(),
                size.height()
            ),
        )
        .set("width", size.width())
        .set("height", size.height());

    if let Some(color) = style.background() {
        doc = doc.add(background(bounds.min_point(), size, color));
    }
    if let Some(scene) = render_node(root) {
        doc = doc.add(scene);
    }
    doc
}

fn background(origin: Point, size: Size, color: Color) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("x", origin.x())
        .set("y", origin.y())
        .set("width", size.width())
        .set("height", size.height())
        .set("fill", color.to_string())
        .set("fill-opacity", color.alpha())
}
