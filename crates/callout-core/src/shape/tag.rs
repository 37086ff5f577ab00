//! Speech-bubble tags: rounded rectangles with an optional pointer.
//!
//! The path is built in the tag's own frame, origin at the top-left of the
//! `width × height` body, walking clockwise from the top edge. A pointer is a
//! triangular notch centred on one edge with its apex `pointerHeight` (for
//! vertical pointers) or `pointerWidth` (for horizontal ones) outside the
//! body:
//!
//! ```text
//!              ▲ up
//!      ╭──────╱ ╲──────╮
//!      │               │
//! left ◀               ▶ right
//!      │               │
//!      ╰──────╲ ╱──────╯
//!              ▼ down
//! ```

use std::{
    f32::consts::{FRAC_PI_2, PI},
    fmt,
    str::FromStr,
};

use crate::{
    attr::{AttrDefault, AttrSpec, Validator, name},
    draw::{PathEmitter, ShapeStyle},
    geometry::{Bounds, Point, Size},
    node::{Node, NodeClass, node_kind},
    shape::Shape,
};

/// Horizontal pointers grow the self rect by this many pointer widths,
/// while vertical pointers grow it by exactly one pointer height. The
/// mismatch must stay: existing output depends on these bounds.
const HORIZONTAL_POINTER_SPAN: f32 = 1.5;

pub(crate) const TAG_ATTRS: &[AttrSpec] = &[
    AttrSpec::new(
        name::POINTER_DIRECTION,
        AttrDefault::Text("none"),
        Validator::Text,
    ),
    AttrSpec::new(
        name::POINTER_WIDTH,
        AttrDefault::Number(0.0),
        Validator::NonNegative,
    ),
    AttrSpec::new(
        name::POINTER_HEIGHT,
        AttrDefault::Number(0.0),
        Validator::NonNegative,
    ),
    AttrSpec::new(
        name::CORNER_RADIUS,
        AttrDefault::Number(0.0),
        Validator::NonNegative,
    ),
];

const SIZE_ATTRS: &[&str] = &[
    name::WIDTH,
    name::HEIGHT,
    name::POINTER_DIRECTION,
    name::POINTER_WIDTH,
    name::POINTER_HEIGHT,
    name::CORNER_RADIUS,
];

/// Which edge of a tag carries the pointer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerDirection {
    #[default]
    None,
    Up,
    Right,
    Down,
    Left,
}

impl PointerDirection {
    /// Parses a direction, treating anything unrecognized as `None`.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        }
    }
}

impl FromStr for PointerDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "up" => Ok(Self::Up),
            "right" => Ok(Self::Right),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            _ => Err(format!(
                "invalid pointer direction `{s}`, valid values: none, up, right, down, left"
            )),
        }
    }
}

impl fmt::Display for PointerDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

node_kind!(
    /// A rounded rectangle with an optional pointer notch.
    ///
    /// ```
    /// # use callout_core::{attr::name, shape::{PointerDirection, Tag}};
    /// let tag = Tag::new();
    /// tag.set_attrs([(name::WIDTH, 100.0), (name::HEIGHT, 40.0), (name::CORNER_RADIUS, 50.0)])
    ///     .unwrap();
    /// tag.set_pointer_direction(PointerDirection::Down).unwrap();
    ///
    /// // The corner radius is clamped to half the shorter side.
    /// assert_eq!(tag.effective_corner_radius(), 20.0);
    /// ```
    Tag
);

impl Tag {
    pub fn new() -> Self {
        Self::wrap(Node::alloc(NodeClass::Tag, None))
    }

    /// The pointer direction; unrecognized values read as
    /// [`PointerDirection::None`].
    pub fn pointer_direction(&self) -> PointerDirection {
        self.string(name::POINTER_DIRECTION)
            .map(|value| PointerDirection::parse_lenient(&value))
            .unwrap_or_default()
    }

    /// # Errors
    ///
    /// Never fails for a valid direction; returns the attribute error type
    /// for parity with the other setters.
    pub fn set_pointer_direction(
        &self,
        direction: PointerDirection,
    ) -> Result<(), crate::error::AttrError> {
        self.set_attr(name::POINTER_DIRECTION, direction.as_str())
    }

    pub fn pointer_width(&self) -> f32 {
        self.number(name::POINTER_WIDTH)
    }

    pub fn pointer_height(&self) -> f32 {
        self.number(name::POINTER_HEIGHT)
    }

    pub fn corner_radius(&self) -> f32 {
        self.number(name::CORNER_RADIUS)
    }

    /// The corner radius actually drawn: `cornerRadius` clamped to half the
    /// width and half the height.
    pub fn effective_corner_radius(&self) -> f32 {
        self.corner_radius()
            .min(self.width() / 2.0)
            .min(self.height() / 2.0)
    }
}

impl Default for Tag {
    fn default() -> Self {
        Self::new()
    }
}

impl Shape for Tag {
    fn draw(&self, emitter: &mut dyn PathEmitter) {
        let width = self.width();
        let height = self.height();
        let direction = self.pointer_direction();
        let pointer_width = self.pointer_width();
        let pointer_height = self.pointer_height();
        let r = self.effective_corner_radius();
        let rounded = r > 0.0;

        emitter.begin_path();
        emitter.move_to(Point::new(if rounded { r } else { 0.0 }, 0.0));

        if direction == PointerDirection::Up {
            emitter.line_to(Point::new((width - pointer_width) / 2.0, 0.0));
            emitter.line_to(Point::new(width / 2.0, -pointer_height));
            emitter.line_to(Point::new((width + pointer_width) / 2.0, 0.0));
        }

        if rounded {
            emitter.line_to(Point::new(width - r, 0.0));
            emitter.arc(Point::new(width - r, r), r, PI * 1.5, 0.0, false);
        } else {
            emitter.line_to(Point::new(width, 0.0));
        }

        if direction == PointerDirection::Right {
            emitter.line_to(Point::new(width, (height - pointer_height) / 2.0));
            emitter.line_to(Point::new(width + pointer_width, height / 2.0));
            emitter.line_to(Point::new(width, (height + pointer_height) / 2.0));
        }

        if rounded {
            emitter.line_to(Point::new(width, height - r));
            emitter.arc(Point::new(width - r, height - r), r, 0.0, FRAC_PI_2, false);
        } else {
            emitter.line_to(Point::new(width, height));
        }

        if direction == PointerDirection::Down {
            emitter.line_to(Point::new((width + pointer_width) / 2.0, height));
            emitter.line_to(Point::new(width / 2.0, height + pointer_height));
            emitter.line_to(Point::new((width - pointer_width) / 2.0, height));
        }

        if rounded {
            emitter.line_to(Point::new(r, height));
            emitter.arc(Point::new(r, height - r), r, FRAC_PI_2, PI, false);
        } else {
            emitter.line_to(Point::new(0.0, height));
        }

        if direction == PointerDirection::Left {
            emitter.line_to(Point::new(0.0, (height + pointer_height) / 2.0));
            emitter.line_to(Point::new(-pointer_width, height / 2.0));
            emitter.line_to(Point::new(0.0, (height - pointer_height) / 2.0));
        }

        if rounded {
            emitter.line_to(Point::new(0.0, r));
            emitter.arc(Point::new(r, r), r, PI, PI * 1.5, false);
        }

        emitter.close_path();
        emitter.fill_stroke_shape(&ShapeStyle::from_node(self));
    }

    fn self_rect(&self) -> Bounds {
        let mut x = 0.0;
        let mut y = 0.0;
        let mut width = self.width();
        let mut height = self.height();
        let pointer_width = self.pointer_width();
        let pointer_height = self.pointer_height();

        match self.pointer_direction() {
            PointerDirection::Up => {
                y -= pointer_height;
                height += pointer_height;
            }
            PointerDirection::Down => {
                height += pointer_height;
            }
            PointerDirection::Left => {
                // Only one pointer width is added back to the width.
                x -= pointer_width * HORIZONTAL_POINTER_SPAN;
                width += pointer_width;
            }
            PointerDirection::Right => {
                width += pointer_width * HORIZONTAL_POINTER_SPAN;
            }
            PointerDirection::None => {}
        }

        Bounds::new_from_top_left(Point::new(x, y), Size::new(width, height))
    }

    fn attrs_affecting_size(&self) -> &'static [&'static str] {
        SIZE_ATTRS
    }
}
