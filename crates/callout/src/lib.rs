//! Callout - Labels, tags and shapes rendered to SVG.
//!
//! Reads scene descriptions written in TOML, builds them into a
//! `callout_core` node tree and renders that tree as SVG.

pub mod config;
pub mod scene;

mod error;

pub use callout_core::{attr, color, draw, geometry, group, label, node, shape};

pub use error::CalloutError;
pub use scene::{NodeDescription, Scene, SceneDescription};

use std::str::FromStr;

use log::{debug, info, trace};

use callout_core::{Node, NodeClass, group::Group, render::render_document};

use config::AppConfig;

/// Builder for parsing and rendering Callout scenes.
///
/// # Examples
///
/// ```rust
/// use callout::{SceneBuilder, config::AppConfig};
///
/// let source = r#"
///     [[node]]
///     type = "Circle"
///     attrs = { x = 50, y = 50, radius = 40, fill = "green" }
/// "#;
///
/// let builder = SceneBuilder::new(AppConfig::default());
/// let scene = builder.parse(source).expect("Failed to parse");
/// let svg = builder.render_svg(&scene).expect("Failed to render");
/// assert!(svg.contains("<svg"));
///
/// // Or use default config
/// let builder = SceneBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct SceneBuilder {
    config: AppConfig,
}

impl SceneBuilder {
    /// Create a new scene builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse TOML source into a built scene.
    ///
    /// # Errors
    ///
    /// Returns `CalloutError::Parse` for malformed TOML, and the errors of
    /// [`SceneBuilder::build`] for well-formed descriptions that cannot be
    /// built.
    pub fn parse(&self, source: &str) -> Result<Scene, CalloutError> {
        info!("Parsing scene");

        let description: SceneDescription =
            toml::from_str(source).map_err(|err| CalloutError::new_parse_error(err, source))?;

        debug!(top_level_nodes = description.nodes().len(); "Scene description parsed");
        trace!(description:?; "Parsed scene description");

        self.build(&description)
    }

    /// Build a node tree from a scene description.
    ///
    /// Attributes are applied before children are added. Text nodes get
    /// the configured font defaults first.
    ///
    /// # Errors
    ///
    /// Returns `CalloutError::Scene` for unknown node types or children
    /// placed under a non-container, and `CalloutError::Attr` for unknown
    /// or invalid attributes.
    pub fn build(&self, description: &SceneDescription) -> Result<Scene, CalloutError> {
        let root = Group::new();
        for node in description.nodes() {
            let child = self.build_node(node)?;
            root.add(&child)?;
        }

        debug!(node_id = root.id().get(); "Scene built");
        Ok(Scene::new(root))
    }

    fn build_node(&self, description: &NodeDescription) -> Result<Node, CalloutError> {
        let class = NodeClass::from_str(description.kind()).map_err(CalloutError::Scene)?;
        let node = Node::new(class);

        if class == NodeClass::Text {
            node.set_attrs(self.config.text().attrs())?;
        }
        node.set_attrs(
            description
                .attrs()
                .iter()
                .map(|(name, value)| (name, value.clone())),
        )?;

        for child in description.children() {
            let child = self.build_node(child)?;
            node.add(&child)?;
        }

        trace!(node_id = node.id().get(), class = class.name(); "Node built");
        Ok(node)
    }

    /// Render a scene to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `CalloutError::Config` if the style configuration is invalid.
    pub fn render_svg(&self, scene: &Scene) -> Result<String, CalloutError> {
        let style = self
            .config
            .style()
            .document_style()
            .map_err(CalloutError::Config)?;

        info!("Rendering scene");
        let svg = render_document(scene.root(), &style).to_string();
        info!(bytes = svg.len(); "SVG rendered successfully");

        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{StyleConfig, TextConfig};
    use callout_core::{NodeKind, label::Label, shape::Text};

    #[test]
    fn test_unknown_node_type() {
        let description = SceneDescription::new(vec![NodeDescription::new("Star")]);
        let err = SceneBuilder::default().build(&description).unwrap_err();
        assert!(matches!(err, CalloutError::Scene(_)));
    }

    #[test]
    fn test_invalid_attribute() {
        let description = SceneDescription::new(vec![
            NodeDescription::new("Circle").with_attr("radius", -4.0),
        ]);
        let err = SceneBuilder::default().build(&description).unwrap_err();
        assert!(matches!(err, CalloutError::Attr(_)));
    }

    #[test]
    fn test_children_under_shape_rejected() {
        let description = SceneDescription::new(vec![
            NodeDescription::new("Circle").with_child(NodeDescription::new("Text")),
        ]);
        let err = SceneBuilder::default().build(&description).unwrap_err();
        assert!(matches!(err, CalloutError::Scene(_)));
    }

    #[test]
    fn test_text_defaults_are_overridable() {
        let config = AppConfig::new(
            StyleConfig::default(),
            TextConfig::new(Some("Courier".to_string()), Some(30.0)),
        );
        let description = SceneDescription::new(vec![
            NodeDescription::new("Text").with_attr("fontSize", 10.0),
        ]);

        let scene = SceneBuilder::new(config).build(&description).unwrap();
        let text = scene.root().find_child::<Text>().unwrap();
        assert_eq!(text.string(attr::name::FONT_FAMILY).as_deref(), Some("Courier"));
        assert_eq!(text.number(attr::name::FONT_SIZE), 10.0);
    }

    #[test]
    fn test_label_is_synced_after_build() {
        let description = SceneDescription::new(vec![
            NodeDescription::new("Label")
                .with_child(
                    NodeDescription::new("Tag")
                        .with_attr("pointerDirection", "down")
                        .with_attr("pointerHeight", 10.0),
                )
                .with_child(
                    NodeDescription::new("Text")
                        .with_attr("text", "Tooltip")
                        .with_attr("width", 80.0)
                        .with_attr("height", 20.0),
                ),
        ]);

        let scene = SceneBuilder::default().build(&description).unwrap();
        let label = scene.root().find_child::<Label>().unwrap();
        let tag = label.tag().unwrap();

        assert_eq!(tag.x(), -40.0);
        assert_eq!(tag.y(), -30.0);
        assert_eq!(tag.width(), 80.0);
        assert_eq!(tag.height(), 20.0);
        assert_eq!(label.text().unwrap().position(), tag.position());
        assert_eq!(label.node().children().len(), 2);
    }

    #[test]
    fn test_invalid_background_fails_render() {
        let config = AppConfig::new(
            StyleConfig::new(Some("bogus".to_string()), 20.0),
            TextConfig::default(),
        );
        let builder = SceneBuilder::new(config);
        let scene = builder.build(&SceneDescription::default()).unwrap();
        assert!(matches!(
            builder.render_svg(&scene),
            Err(CalloutError::Config(_))
        ));
    }
}
