//! Configuration types for Callout scene rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every section and field is optional.
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`StyleConfig`] - Document styling such as background color and margin.
//! - [`TextConfig`] - Font defaults applied to every text node.
//!
//! # Example
//!
//! ```
//! # use callout::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [style]
//!     background_color = "white"
//!
//!     [text]
//!     font_size = 16
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(config.style().background_color().unwrap().is_some());
//! assert_eq!(config.style().margin(), 20.0);
//! ```

use serde::Deserialize;

use callout_core::{
    attr::{AttrValue, name},
    color::Color,
    render::DocumentStyle,
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    text: TextConfig,
}

impl AppConfig {
    pub fn new(style: StyleConfig, text: TextConfig) -> Self {
        Self { style, text }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the text defaults.
    pub fn text(&self) -> &TextConfig {
        &self.text
    }
}

/// Visual styling of the rendered document.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background color as a CSS color string. No background when unset.
    #[serde(default)]
    background_color: Option<String>,

    /// Space around the scene content, in pixels.
    #[serde(default = "default_margin")]
    margin: f32,
}

fn default_margin() -> f32 {
    20.0
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            margin: default_margin(),
        }
    }
}

impl StyleConfig {
    pub fn new(background_color: Option<String>, margin: f32) -> Self {
        Self {
            background_color,
            margin,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Builds the renderer's document style.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid background color or a negative or
    /// non-finite margin.
    pub fn document_style(&self) -> Result<DocumentStyle, String> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(format!(
                "Invalid margin in config: expected a non-negative number, got {}",
                self.margin
            ));
        }
        Ok(DocumentStyle::new(self.background_color()?, self.margin))
    }
}

/// Font defaults for text nodes.
///
/// These are applied to each text node before the attributes given in the
/// scene, so a scene can still override them per node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextConfig {
    #[serde(default)]
    font_family: Option<String>,

    #[serde(default)]
    font_size: Option<f32>,
}

impl TextConfig {
    pub fn new(font_family: Option<String>, font_size: Option<f32>) -> Self {
        Self {
            font_family,
            font_size,
        }
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    pub fn font_size(&self) -> Option<f32> {
        self.font_size
    }

    /// The configured defaults as text node attributes.
    pub fn attrs(&self) -> Vec<(&'static str, AttrValue)> {
        let mut attrs = Vec::new();
        if let Some(family) = &self.font_family {
            attrs.push((name::FONT_FAMILY, AttrValue::from(family.as_str())));
        }
        if let Some(size) = self.font_size {
            attrs.push((name::FONT_SIZE, AttrValue::from(size)));
        }
        attrs
    }
}
