//! Validated node attributes.
//!
//! Every node class declares a schema: a list of [`AttrSpec`] entries naming
//! each attribute it accepts, its default and the [`Validator`] that guards
//! it. Values are stored as [`AttrValue`]s and only after validation, so
//! geometry code can read them without re-checking.
//!
//! Validators coerce where a value is unambiguous: the string `"12"` is a
//! valid `fontSize` and is stored as the number `12`.
//!
//! ```
//! # use callout_core::attr::{AttrValue, Validator};
//! let value = Validator::NonNegative.coerce("radius", AttrValue::from("12")).unwrap();
//! assert_eq!(value, AttrValue::Number(12.0));
//!
//! assert!(Validator::NonNegative.coerce("radius", AttrValue::Number(-1.0)).is_err());
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{color::Color, error::AttrError};

/// Attribute names shared by the node classes.
pub mod name {
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const VISIBLE: &str = "visible";
    pub const OPACITY: &str = "opacity";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";

    pub const FILL: &str = "fill";
    pub const STROKE: &str = "stroke";
    pub const STROKE_WIDTH: &str = "strokeWidth";
    pub const LINE_JOIN: &str = "lineJoin";
    pub const LINE_CAP: &str = "lineCap";

    pub const RADIUS: &str = "radius";

    pub const POINTER_DIRECTION: &str = "pointerDirection";
    pub const POINTER_WIDTH: &str = "pointerWidth";
    pub const POINTER_HEIGHT: &str = "pointerHeight";
    pub const CORNER_RADIUS: &str = "cornerRadius";

    pub const TEXT: &str = "text";
    pub const FONT_FAMILY: &str = "fontFamily";
    pub const FONT_SIZE: &str = "fontSize";
    pub const FONT_STYLE: &str = "fontStyle";
    pub const PADDING: &str = "padding";
    pub const LINE_HEIGHT: &str = "lineHeight";
}

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Number(f32),
    Text(String),
}

impl AttrValue {
    /// Returns the numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string value, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a flag.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Number(value as f32)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Checks, and where possible coerces, a value before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Any finite number.
    Number,
    /// A finite number `>= 0`.
    NonNegative,
    /// A number in `0..=1`.
    UnitInterval,
    /// Any string; numbers are converted to their decimal form.
    Text,
    /// A CSS color string.
    Color,
    /// A boolean, or the strings `"true"`/`"false"`.
    Bool,
    /// One of a fixed set of keywords.
    Choice(&'static [&'static str]),
}

impl Validator {
    /// Describes what the validator accepts, for error messages.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::Number => "a finite number",
            Self::NonNegative => "a non-negative number",
            Self::UnitInterval => "a number between 0 and 1",
            Self::Text => "a string",
            Self::Color => "a CSS color",
            Self::Bool => "a boolean",
            Self::Choice(_) => "a supported keyword",
        }
    }

    /// Validates `value` for the attribute `name`, returning the value to store.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::Invalid`] if the value cannot be coerced.
    pub fn coerce(&self, name: &'static str, value: AttrValue) -> Result<AttrValue, AttrError> {
        let coerced = match self {
            Self::Number => to_number(&value).filter(|n| n.is_finite()),
            Self::NonNegative => to_number(&value).filter(|n| n.is_finite() && *n >= 0.0),
            Self::UnitInterval => to_number(&value).filter(|n| (0.0..=1.0).contains(n)),
            _ => None,
        }
        .map(AttrValue::Number)
        .or_else(|| match (self, &value) {
            (Self::Text, AttrValue::Text(_)) => Some(value.clone()),
            (Self::Text, AttrValue::Number(n)) => Some(AttrValue::Text(n.to_string())),
            (Self::Color, AttrValue::Text(s)) if Color::new(s).is_ok() => Some(value.clone()),
            (Self::Bool, AttrValue::Bool(_)) => Some(value.clone()),
            (Self::Bool, AttrValue::Text(s)) => s.parse().ok().map(AttrValue::Bool),
            (Self::Choice(options), AttrValue::Text(s)) if options.contains(&s.as_str()) => {
                Some(value.clone())
            }
            _ => None,
        });

        coerced.ok_or_else(|| AttrError::Invalid {
            name,
            expected: self.expected(),
            value,
        })
    }
}

fn to_number(value: &AttrValue) -> Option<f32> {
    match value {
        AttrValue::Number(n) => Some(*n),
        AttrValue::Text(s) => s.trim().parse().ok(),
        AttrValue::Bool(_) => None,
    }
}

/// The value an attribute reports before it is first set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrDefault {
    Number(f32),
    Text(&'static str),
    Bool(bool),
    /// No value; readers fall back to something computed (e.g. measured text width).
    Unset,
}

impl AttrDefault {
    /// Converts the default into a stored value, if there is one.
    pub fn to_value(self) -> Option<AttrValue> {
        match self {
            Self::Number(n) => Some(AttrValue::Number(n)),
            Self::Text(s) => Some(AttrValue::Text(s.to_string())),
            Self::Bool(b) => Some(AttrValue::Bool(b)),
            Self::Unset => None,
        }
    }
}

/// A schema entry for one attribute of a node class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttrSpec {
    name: &'static str,
    default: AttrDefault,
    validator: Validator,
}

impl AttrSpec {
    pub const fn new(name: &'static str, default: AttrDefault, validator: Validator) -> Self {
        Self {
            name,
            default,
            validator,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn default_value(&self) -> AttrDefault {
        self.default
    }

    pub fn validator(&self) -> Validator {
        self.validator
    }
}

/// Attributes every node accepts.
pub(crate) const NODE_ATTRS: &[AttrSpec] = &[
    AttrSpec::new(name::X, AttrDefault::Number(0.0), Validator::Number),
    AttrSpec::new(name::Y, AttrDefault::Number(0.0), Validator::Number),
    AttrSpec::new(name::VISIBLE, AttrDefault::Bool(true), Validator::Bool),
    AttrSpec::new(name::OPACITY, AttrDefault::Number(1.0), Validator::UnitInterval),
];

/// Stored `width`/`height` for nodes whose size is a plain attribute.
pub(crate) const SIZE_ATTRS: &[AttrSpec] = &[
    AttrSpec::new(name::WIDTH, AttrDefault::Number(0.0), Validator::NonNegative),
    AttrSpec::new(name::HEIGHT, AttrDefault::Number(0.0), Validator::NonNegative),
];

/// Paint attributes shared by every shape.
pub(crate) const SHAPE_ATTRS: &[AttrSpec] = &[
    AttrSpec::new(name::FILL, AttrDefault::Unset, Validator::Color),
    AttrSpec::new(name::STROKE, AttrDefault::Unset, Validator::Color),
    AttrSpec::new(
        name::STROKE_WIDTH,
        AttrDefault::Number(2.0),
        Validator::NonNegative,
    ),
    AttrSpec::new(
        name::LINE_JOIN,
        AttrDefault::Text("miter"),
        Validator::Choice(&["miter", "round", "bevel"]),
    ),
    AttrSpec::new(
        name::LINE_CAP,
        AttrDefault::Text("butt"),
        Validator::Choice(&["butt", "round", "square"]),
    ),
];

/// Explicitly set attribute values of a single node, in insertion order.
#[derive(Debug, Default, Clone)]
pub(crate) struct Attributes {
    values: IndexMap<&'static str, AttrValue>,
}

impl Attributes {
    pub(crate) fn get(&self, name: &str) -> Option<&AttrValue> {
        self.values.get(name)
    }

    /// Stores a value, returning the previously stored one.
    pub(crate) fn insert(&mut self, name: &'static str, value: AttrValue) -> Option<AttrValue> {
        self.values.insert(name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative_accepts_and_coerces() {
        let v = Validator::NonNegative;
        assert_eq!(
            v.coerce("radius", AttrValue::Number(0.0)),
            Ok(AttrValue::Number(0.0))
        );
        assert_eq!(
            v.coerce("radius", AttrValue::from(" 40 ")),
            Ok(AttrValue::Number(40.0))
        );
    }

    #[test]
    fn test_non_negative_rejects() {
        let v = Validator::NonNegative;
        for bad in [
            AttrValue::Number(-0.5),
            AttrValue::Number(f32::INFINITY),
            AttrValue::from("wide"),
            AttrValue::Bool(true),
        ] {
            let err = v.coerce("width", bad.clone()).unwrap_err();
            assert_eq!(
                err,
                AttrError::Invalid {
                    name: "width",
                    expected: "a non-negative number",
                    value: bad,
                }
            );
        }

        let err = v
            .coerce("width", AttrValue::Number(f32::NAN))
            .unwrap_err();
        let AttrError::Invalid { name, value, .. } = err else {
            panic!("expected an invalid value error, got {err:?}");
        };
        assert_eq!(name, "width");
        assert!(value.as_number().is_some_and(f32::is_nan));
    }

    #[test]
    fn test_number_allows_negative() {
        assert_eq!(
            Validator::Number.coerce("x", AttrValue::Number(-60.0)),
            Ok(AttrValue::Number(-60.0))
        );
    }

    #[test]
    fn test_unit_interval() {
        assert!(Validator::UnitInterval.coerce("opacity", 0.5.into()).is_ok());
        assert!(Validator::UnitInterval.coerce("opacity", 1.5.into()).is_err());
    }

    #[test]
    fn test_text_coerces_numbers() {
        assert_eq!(
            Validator::Text.coerce("text", AttrValue::Number(42.0)),
            Ok(AttrValue::from("42"))
        );
    }

    #[test]
    fn test_color_validation() {
        assert!(Validator::Color.coerce("fill", "#bbb".into()).is_ok());
        assert!(Validator::Color.coerce("fill", "no-such-color".into()).is_err());
        assert!(Validator::Color.coerce("fill", 3.0.into()).is_err());
    }

    #[test]
    fn test_bool_validation() {
        assert_eq!(
            Validator::Bool.coerce("visible", "false".into()),
            Ok(AttrValue::Bool(false))
        );
        assert!(Validator::Bool.coerce("visible", 1.0.into()).is_err());
    }

    #[test]
    fn test_choice_validation() {
        let v = Validator::Choice(&["miter", "round"]);
        assert!(v.coerce("lineJoin", "round".into()).is_ok());
        assert!(v.coerce("lineJoin", "wobbly".into()).is_err());
    }

    #[test]
    fn test_attributes_insert_returns_previous() {
        let mut attrs = Attributes::default();
        assert_eq!(attrs.insert(name::RADIUS, 10.0.into()), None);
        assert_eq!(
            attrs.insert(name::RADIUS, 20.0.into()),
            Some(AttrValue::Number(10.0))
        );
        assert_eq!(attrs.get(name::RADIUS), Some(&AttrValue::Number(20.0)));
    }
}
