//! SVG output for path commands.

use std::{f32::consts::PI, fmt::Write as _};

use svg::node::{Text as SvgText, element as svg_element};

use crate::{
    draw::{PathEmitter, ShapeStyle, TextStyle},
    geometry::Point,
};

pub type SvgNode = Box<dyn svg::Node>;

const TAU: f32 = 2.0 * PI;

/// Sweeps closer than this to a full turn are drawn as full circles, and
/// points closer than this are treated as the same point.
const FULL_TURN_EPSILON: f32 = 1e-4;

/// A [`PathEmitter`] producing SVG elements.
///
/// Each `fill_stroke_shape` call turns the current path into one `<path>`
/// element; each `fill_text` call produces one `<text>` element.
///
/// ```
/// # use callout_core::{draw::{PathEmitter, ShapeStyle, SvgEmitter}, geometry::Point};
/// let mut svg = SvgEmitter::new();
/// svg.begin_path();
/// svg.move_to(Point::new(0.0, 0.0));
/// svg.line_to(Point::new(10.0, 0.0));
/// svg.close_path();
/// svg.fill_stroke_shape(&ShapeStyle::default());
///
/// assert_eq!(svg.into_nodes().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SvgEmitter {
    data: String,
    current: Option<Point>,
    subpath_start: Option<Point>,
    nodes: Vec<SvgNode>,
}

impl SvgEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path data accumulated since the last `begin_path`.
    pub fn path_data(&self) -> &str {
        self.data.trim_start()
    }

    /// Returns the elements emitted so far.
    pub fn into_nodes(self) -> Vec<SvgNode> {
        self.nodes
    }

    fn push_segment(&mut self, command: char, point: Point) {
        let _ = write!(self.data, " {command} {} {}", num(point.x()), num(point.y()));
    }

    fn push_arc(&mut self, radius: f32, large_arc: bool, sweep: bool, to: Point) {
        let _ = write!(
            self.data,
            " A {r} {r} 0 {} {} {} {}",
            u8::from(large_arc),
            u8::from(sweep),
            num(to.x()),
            num(to.y()),
            r = num(radius),
        );
    }
}

impl PathEmitter for SvgEmitter {
    fn begin_path(&mut self) {
        self.data.clear();
        self.current = None;
        self.subpath_start = None;
    }

    fn move_to(&mut self, point: Point) {
        self.push_segment('M', point);
        self.current = Some(point);
        self.subpath_start = Some(point);
    }

    fn line_to(&mut self, point: Point) {
        if self.current.is_none() {
            self.move_to(point);
            return;
        }
        self.push_segment('L', point);
        self.current = Some(point);
    }

    fn arc(&mut self, center: Point, radius: f32, start: f32, end: f32, counterclockwise: bool) {
        let from = center.on_circle(radius, start);
        if !self.current.is_some_and(|current| same_point(current, from)) {
            self.line_to(from);
        }

        let requested = if counterclockwise {
            start - end
        } else {
            end - start
        };
        let sweep = if requested >= TAU - FULL_TURN_EPSILON {
            TAU
        } else {
            requested.rem_euclid(TAU)
        };
        if radius <= 0.0 || sweep <= 0.0 {
            return;
        }

        let direction = if counterclockwise { -1.0 } else { 1.0 };
        let clockwise = !counterclockwise;

        if sweep >= TAU {
            // A single SVG arc cannot end where it starts.
            let half = center.on_circle(radius, start + direction * PI);
            self.push_arc(radius, false, clockwise, half);
            self.push_arc(radius, false, clockwise, from);
            self.current = Some(from);
        } else {
            let to = center.on_circle(radius, start + direction * sweep);
            self.push_arc(radius, sweep > PI, clockwise, to);
            self.current = Some(to);
        }
    }

    fn close_path(&mut self) {
        if self.current.is_some() {
            self.data.push_str(" Z");
            self.current = self.subpath_start;
        }
    }

    fn fill_stroke_shape(&mut self, style: &ShapeStyle) {
        let mut path = svg_element::Path::new().set("d", self.path_data());

        path = match style.fill() {
            Some(fill) => path
                .set("fill", fill.to_string())
                .set("fill-opacity", fill.alpha()),
            None => path.set("fill", "none"),
        };
        if let Some(stroke) = style.stroke() {
            path = crate::apply_stroke!(path, stroke);
        }

        self.nodes.push(Box::new(path));
    }

    fn fill_text(&mut self, line: &str, origin: Point, style: &TextStyle) {
        let font = style.font();
        let mut text = svg_element::Text::new("")
            .set("x", num(origin.x()))
            .set("y", num(origin.y()))
            .set("dominant-baseline", "hanging")
            .set("font-family", font.family())
            .set("font-size", font.size());

        if font.is_italic() {
            text = text.set("font-style", "italic");
        }
        if font.is_bold() {
            text = text.set("font-weight", "bold");
        }
        if let Some(fill) = style.fill() {
            text = text
                .set("fill", fill.to_string())
                .set("fill-opacity", fill.alpha());
        }

        self.nodes.push(Box::new(text.add(SvgText::new(line))));
    }
}

fn same_point(a: Point, b: Point) -> bool {
    (a.x() - b.x()).abs() < FULL_TURN_EPSILON && (a.y() - b.y()).abs() < FULL_TURN_EPSILON
}

/// Rounds to three decimals and drops negative zero.
fn num(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0 + 0.0
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::{color::Color, draw::FontSpec};

    #[test]
    fn test_lines_and_close() {
        let mut svg = SvgEmitter::new();
        svg.begin_path();
        svg.move_to(Point::new(0.0, 0.0));
        svg.line_to(Point::new(10.0, 0.0));
        svg.line_to(Point::new(10.0, 5.0));
        svg.close_path();

        assert_eq!(svg.path_data(), "M 0 0 L 10 0 L 10 5 Z");
    }

    #[test]
    fn test_line_without_current_point_moves() {
        let mut svg = SvgEmitter::new();
        svg.begin_path();
        svg.line_to(Point::new(3.0, 4.0));
        assert_eq!(svg.path_data(), "M 3 4");
    }

    #[test]
    fn test_full_circle_is_two_half_arcs() {
        let mut svg = SvgEmitter::new();
        svg.begin_path();
        svg.arc(Point::default(), 40.0, 0.0, TAU, false);
        svg.close_path();

        assert_eq!(
            svg.path_data(),
            "M 40 0 A 40 40 0 0 1 -40 0 A 40 40 0 0 1 40 0 Z"
        );
    }

    #[test]
    fn test_quarter_arc_joins_current_point() {
        let mut svg = SvgEmitter::new();
        svg.begin_path();
        svg.move_to(Point::new(0.0, 0.0));
        svg.arc(Point::new(10.0, 10.0), 10.0, PI * 1.5, 0.0, false);

        assert_eq!(svg.path_data(), "M 0 0 L 10 0 A 10 10 0 0 1 20 10");
    }

    #[test]
    fn test_counterclockwise_arc_uses_negative_sweep() {
        let mut svg = SvgEmitter::new();
        svg.begin_path();
        svg.arc(Point::default(), 10.0, 0.0, FRAC_PI_2, true);

        assert_eq!(svg.path_data(), "M 10 0 A 10 10 0 1 0 0 10");
    }

    #[test]
    fn test_zero_radius_arc_is_a_point() {
        let mut svg = SvgEmitter::new();
        svg.begin_path();
        svg.arc(Point::new(5.0, 5.0), 0.0, 0.0, TAU, false);
        svg.close_path();

        assert_eq!(svg.path_data(), "M 5 5 Z");
    }

    #[test]
    fn test_fill_stroke_emits_path_element() {
        let mut svg = SvgEmitter::new();
        svg.begin_path();
        svg.move_to(Point::new(0.0, 0.0));
        svg.line_to(Point::new(1.0, 1.0));
        svg.fill_stroke_shape(&ShapeStyle::new(Some(Color::new("green").unwrap()), None));

        let nodes = svg.into_nodes();
        assert_eq!(nodes.len(), 1);
        let rendered = nodes[0].to_string();
        assert!(rendered.contains(r#"d="M 0 0 L 1 1""#));
        assert!(rendered.contains(r#"fill="green""#));
        assert!(!rendered.contains("stroke="));
    }

    #[test]
    fn test_fill_text_emits_text_element() {
        let mut svg = SvgEmitter::new();
        let style = TextStyle::new(FontSpec::new("Helvetica", 14.0, "italic"), None);
        svg.fill_text("Tooltip", Point::new(5.0, 7.0), &style);

        let rendered = svg.into_nodes()[0].to_string();
        assert!(rendered.contains("Tooltip"));
        assert!(rendered.contains(r#"font-family="Helvetica""#));
        assert!(rendered.contains(r#"font-style="italic""#));
        assert!(rendered.contains(r#"x="5""#));
    }
}
