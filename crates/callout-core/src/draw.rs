//! Path-based drawing.
//!
//! Shapes describe their outline as a sequence of path commands issued to a
//! [`PathEmitter`], in the style of the HTML canvas API: `begin_path`,
//! `move_to`, `line_to`, `arc`, `close_path`, then a single
//! `fill_stroke_shape` that paints the path with a [`ShapeStyle`].
//!
//! # Overview
//!
//! - [`PathEmitter`] - The drawing surface trait
//! - [`PathRecorder`] - Records [`PathCommand`]s for inspection
//! - [`SvgEmitter`] - Converts commands to SVG `path` and `text` elements
//! - [`ShapeStyle`] / [`TextStyle`] - Paint settings read from node attributes
//! - [`StrokeDefinition`] and [`apply_stroke!`](crate::apply_stroke!) - Stroke settings

mod stroke;
mod svg_emitter;

pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin};
pub use svg_emitter::{SvgEmitter, SvgNode};

use crate::{attr::name, color::Color, geometry::Point, node::Node};

/// A canvas-like surface that shapes draw their outlines on.
pub trait PathEmitter {
    /// Starts a new path, discarding any unpainted one.
    fn begin_path(&mut self);

    fn move_to(&mut self, point: Point);

    fn line_to(&mut self, point: Point);

    /// Adds a circular arc around `center` from `start` to `end` radians.
    ///
    /// Like the canvas `arc`, the current point is first joined to the arc's
    /// start with a straight line. Angles grow clockwise on screen unless
    /// `counterclockwise` is set.
    fn arc(&mut self, center: Point, radius: f32, start: f32, end: f32, counterclockwise: bool);

    fn close_path(&mut self);

    /// Paints the current path with `style`.
    fn fill_stroke_shape(&mut self, style: &ShapeStyle);

    /// Draws one line of text with its top-left corner at `origin`.
    fn fill_text(&mut self, line: &str, origin: Point, style: &TextStyle);
}

/// A single drawing call, as captured by [`PathRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Arc {
        center: Point,
        radius: f32,
        start: f32,
        end: f32,
        counterclockwise: bool,
    },
    ClosePath,
    FillStroke(ShapeStyle),
    FillText {
        line: String,
        origin: Point,
        style: TextStyle,
    },
}

/// A [`PathEmitter`] that records every call.
#[derive(Debug, Default, Clone)]
pub struct PathRecorder {
    commands: Vec<PathCommand>,
}

impl PathRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<PathCommand> {
        self.commands
    }
}

impl PathEmitter for PathRecorder {
    fn begin_path(&mut self) {
        self.commands.push(PathCommand::BeginPath);
    }

    fn move_to(&mut self, point: Point) {
        self.commands.push(PathCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.commands.push(PathCommand::LineTo(point));
    }

    fn arc(&mut self, center: Point, radius: f32, start: f32, end: f32, counterclockwise: bool) {
        self.commands.push(PathCommand::Arc {
            center,
            radius,
            start,
            end,
            counterclockwise,
        });
    }

    fn close_path(&mut self) {
        self.commands.push(PathCommand::ClosePath);
    }

    fn fill_stroke_shape(&mut self, style: &ShapeStyle) {
        self.commands.push(PathCommand::FillStroke(style.clone()));
    }

    fn fill_text(&mut self, line: &str, origin: Point, style: &TextStyle) {
        self.commands.push(PathCommand::FillText {
            line: line.to_string(),
            origin,
            style: style.clone(),
        });
    }
}

/// Fill and stroke used to paint a shape's path.
///
/// A shape with neither a fill nor a stroke is still drawn, it just paints
/// nothing visible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeStyle {
    fill: Option<Color>,
    stroke: Option<StrokeDefinition>,
}

impl ShapeStyle {
    pub fn new(fill: Option<Color>, stroke: Option<StrokeDefinition>) -> Self {
        Self { fill, stroke }
    }

    /// Reads `fill`, `stroke`, `strokeWidth`, `lineJoin` and `lineCap` from
    /// a shape node.
    pub fn from_node(node: &Node) -> Self {
        let fill = paint(node, name::FILL);
        let stroke = paint(node, name::STROKE).map(|color| {
            let mut stroke = StrokeDefinition::new(color, node.number(name::STROKE_WIDTH));
            if let Some(cap) = node.string(name::LINE_CAP).and_then(|s| s.parse().ok()) {
                stroke.set_cap(cap);
            }
            if let Some(join) = node.string(name::LINE_JOIN).and_then(|s| s.parse().ok()) {
                stroke.set_join(join);
            }
            stroke
        });
        Self { fill, stroke }
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }
}

/// Font selection for one run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    family: String,
    size: f32,
    style: String,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            size,
            style: style.into(),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// CSS-like style keywords, e.g. `"normal"`, `"italic"`, `"bold"` or
    /// `"italic bold"`.
    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn is_italic(&self) -> bool {
        self.style.split_whitespace().any(|word| word == "italic")
    }

    pub fn is_bold(&self) -> bool {
        self.style
            .split_whitespace()
            .any(|word| word == "bold" || word.parse::<u16>().is_ok_and(|w| w >= 600))
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Arial", 12.0, "normal")
    }
}

/// Font and paint for a line of text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyle {
    font: FontSpec,
    fill: Option<Color>,
}

impl TextStyle {
    pub fn new(font: FontSpec, fill: Option<Color>) -> Self {
        Self { font, fill }
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }
}

fn paint(node: &Node, attr: &str) -> Option<Color> {
    node.string(attr).and_then(|value| Color::new(&value).ok())
}
