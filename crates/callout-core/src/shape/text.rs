//! Text nodes and text measurement.
//!
//! A [`Text`] node lays its `text` out as one line per `\n`. Unless `width`
//! or `height` is set explicitly, its size is measured:
//!
//! - width: the widest line plus `padding` on both sides
//! - height: `lines × fontSize × lineHeight` plus `padding` on both sides
//!
//! Line widths come from a [`TextMeasure`]. The default,
//! [`CosmicTextMeasure`], shapes text with cosmic-text against the system
//! fonts; [`FixedAdvanceMeasure`] gives every character the same advance and
//! needs no fonts at all.

use std::{
    fmt,
    rc::Rc,
    sync::{Mutex, OnceLock, PoisonError},
};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, Weight};
use log::info;

use crate::{
    attr::{AttrDefault, AttrSpec, Validator, name},
    color::Color,
    draw::{FontSpec, PathEmitter, TextStyle},
    error::AttrError,
    geometry::{Bounds, Point, Size},
    node::{Node, NodeClass, node_kind},
    shape::Shape,
};

pub(crate) const TEXT_ATTRS: &[AttrSpec] = &[
    AttrSpec::new(name::WIDTH, AttrDefault::Unset, Validator::NonNegative),
    AttrSpec::new(name::HEIGHT, AttrDefault::Unset, Validator::NonNegative),
    AttrSpec::new(name::TEXT, AttrDefault::Text(""), Validator::Text),
    AttrSpec::new(name::FONT_FAMILY, AttrDefault::Text("Arial"), Validator::Text),
    AttrSpec::new(
        name::FONT_SIZE,
        AttrDefault::Number(12.0),
        Validator::NonNegative,
    ),
    AttrSpec::new(name::FONT_STYLE, AttrDefault::Text("normal"), Validator::Text),
    AttrSpec::new(name::PADDING, AttrDefault::Number(0.0), Validator::NonNegative),
    AttrSpec::new(
        name::LINE_HEIGHT,
        AttrDefault::Number(1.0),
        Validator::NonNegative,
    ),
];

const SIZE_ATTRS: &[&str] = &[
    name::WIDTH,
    name::HEIGHT,
    name::TEXT,
    name::FONT_FAMILY,
    name::FONT_SIZE,
    name::FONT_STYLE,
    name::PADDING,
    name::LINE_HEIGHT,
];

/// Measures the advance width of a single line of text.
pub trait TextMeasure: fmt::Debug {
    fn line_width(&self, line: &str, font: &FontSpec) -> f32;
}

/// Measures text by shaping it with cosmic-text.
///
/// All instances share one lazily created `FontSystem`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CosmicTextMeasure;

impl TextMeasure for CosmicTextMeasure {
    fn line_width(&self, line: &str, font: &FontSpec) -> f32 {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .line_width(line, font)
    }
}

/// Measures every character as `advance × fontSize` wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasure {
    advance: f32,
}

impl FixedAdvanceMeasure {
    /// `advance` is the width of one character in ems.
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl TextMeasure for FixedAdvanceMeasure {
    fn line_width(&self, line: &str, font: &FontSpec) -> f32 {
        line.chars().count() as f32 * self.advance * font.size()
    }
}

/// Owns the shared font system used for shaping.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    fn line_width(&self, line: &str, font: &FontSpec) -> f32 {
        if line.is_empty() || font.size() <= 0.0 {
            return 0.0;
        }

        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let metrics = Metrics::new(font.size(), font.size());
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let mut attrs = Attrs::new().family(Family::Name(font.family()));
        if font.is_italic() {
            attrs = attrs.style(Style::Italic);
        }
        if font.is_bold() {
            attrs = attrs.weight(Weight::BOLD);
        }

        buffer.set_size(None, None);
        buffer.set_text(line, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|glyph| glyph.x + glyph.w))
            .fold(0.0, f32::max)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

node_kind!(
    /// One or more lines of text.
    Text
);

impl Text {
    /// Creates a text node measured with [`CosmicTextMeasure`].
    pub fn new() -> Self {
        Self::with_measurer(CosmicTextMeasure)
    }

    /// Creates a text node measured with `measurer`.
    pub fn with_measurer<M: TextMeasure + 'static>(measurer: M) -> Self {
        let measurer: Rc<dyn TextMeasure> = Rc::new(measurer);
        Self::wrap(Node::alloc(NodeClass::Text, Some(measurer)))
    }

    pub fn text(&self) -> String {
        self.string(name::TEXT).unwrap_or_default()
    }

    /// # Errors
    ///
    /// Never fails for string input; returns the attribute error type for
    /// parity with the other setters.
    pub fn set_text(&self, text: &str) -> Result<(), AttrError> {
        self.set_attr(name::TEXT, text)
    }

    pub fn font(&self) -> FontSpec {
        FontSpec::new(
            self.string(name::FONT_FAMILY).unwrap_or_default(),
            self.number(name::FONT_SIZE),
            self.string(name::FONT_STYLE).unwrap_or_default(),
        )
    }

    pub fn padding(&self) -> f32 {
        self.number(name::PADDING)
    }

    /// Distance between consecutive baselines.
    pub fn line_advance(&self) -> f32 {
        self.number(name::FONT_SIZE) * self.number(name::LINE_HEIGHT)
    }

    /// The text split into lines. Empty text is a single empty line.
    pub fn lines(&self) -> Vec<String> {
        self.text().split('\n').map(str::to_string).collect()
    }

    /// Explicit `width`, else the widest line plus padding.
    pub fn width(&self) -> f32 {
        if self.has_attr(name::WIDTH) {
            return self.number(name::WIDTH);
        }
        let font = self.font();
        let widest = match self.measurer() {
            Some(measurer) => self
                .lines()
                .iter()
                .map(|line| measurer.line_width(line, &font))
                .fold(0.0, f32::max),
            None => 0.0,
        };
        widest + self.padding() * 2.0
    }

    /// Explicit `height`, else the height of all lines plus padding.
    pub fn height(&self) -> f32 {
        if self.has_attr(name::HEIGHT) {
            return self.number(name::HEIGHT);
        }
        self.lines().len() as f32 * self.line_advance() + self.padding() * 2.0
    }

    fn style(&self) -> TextStyle {
        let fill = self
            .string(name::FILL)
            .and_then(|value| Color::new(&value).ok());
        TextStyle::new(self.font(), fill)
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl Shape for Text {
    fn draw(&self, emitter: &mut dyn PathEmitter) {
        let style = self.style();
        let padding = self.padding();
        let advance = self.line_advance();

        for (index, line) in self.lines().iter().enumerate() {
            let origin = Point::new(padding, padding + index as f32 * advance);
            emitter.fill_text(line, origin, &style);
        }
    }

    fn self_rect(&self) -> Bounds {
        Bounds::new_from_top_left(Point::default(), Size::new(self.width(), self.height()))
    }

    fn attrs_affecting_size(&self) -> &'static [&'static str] {
        SIZE_ATTRS
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::draw::{PathCommand, PathRecorder};

    fn fixed_text(content: &str) -> Text {
        let text = Text::with_measurer(FixedAdvanceMeasure::new(0.5));
        text.set_text(content).unwrap();
        text
    }

    #[test]
    fn test_defaults() {
        let text = Text::with_measurer(FixedAdvanceMeasure::new(0.5));
        assert_eq!(text.font(), FontSpec::new("Arial", 12.0, "normal"));
        assert_eq!(text.lines(), vec![String::new()]);
        assert_approx_eq!(f32, text.width(), 0.0);
        assert_approx_eq!(f32, text.height(), 12.0);
    }

    #[test]
    fn test_measured_size() {
        let text = fixed_text("Hello\nCallout!");
        text.set_attrs([(name::FONT_SIZE, 20.0), (name::PADDING, 5.0)])
            .unwrap();

        // Widest line has 8 characters at 10px each.
        assert_approx_eq!(f32, text.width(), 90.0);
        assert_approx_eq!(f32, text.height(), 50.0);

        text.set_attr(name::LINE_HEIGHT, 1.5).unwrap();
        assert_approx_eq!(f32, text.height(), 70.0);
    }

    #[test]
    fn test_explicit_size_wins() {
        let text = fixed_text("a fairly long line of text");
        text.set_attrs([(name::WIDTH, 40.0), (name::HEIGHT, 10.0)])
            .unwrap();
        assert_approx_eq!(f32, text.width(), 40.0);
        assert_approx_eq!(f32, text.height(), 10.0);
        assert_approx_eq!(f32, Node::from(text).width(), 40.0);
    }

    #[test]
    fn test_draw_one_fill_text_per_line() {
        let text = fixed_text("one\ntwo");
        text.set_attrs([
            (name::FONT_SIZE, 10.0),
            (name::LINE_HEIGHT, 2.0),
            (name::PADDING, 3.0),
        ])
        .unwrap();

        let mut recorder = PathRecorder::new();
        text.draw(&mut recorder);

        let origins: Vec<_> = recorder
            .commands()
            .iter()
            .filter_map(|command| match command {
                PathCommand::FillText { line, origin, .. } => Some((line.as_str(), *origin)),
                _ => None,
            })
            .collect();
        assert_eq!(
            origins,
            vec![("one", Point::new(3.0, 3.0)), ("two", Point::new(3.0, 23.0))]
        );
    }

    #[test]
    fn test_font_style_in_font() {
        let text = fixed_text("x");
        text.set_attr(name::FONT_STYLE, "italic").unwrap();
        assert!(text.font().is_italic());
        assert!(text.attrs_affecting_size().contains(&name::FONT_STYLE));
    }

    #[test]
    fn test_cosmic_measure_empty_line() {
        assert_eq!(CosmicTextMeasure.line_width("", &FontSpec::default()), 0.0);
    }
}
