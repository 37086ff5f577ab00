//! Callout Core
//!
//! A small retained-mode scene graph for annotated vector drawings. It
//! includes:
//!
//! - **Attributes**: Validated, defaulted node attributes ([`attr`] module)
//! - **Events**: Synchronous change notifications ([`event`] module)
//! - **Nodes**: The shared node tree and typed handles ([`node`] module)
//! - **Shapes**: Circles, pointer tags and text ([`shape`] module)
//! - **Labels**: A tag that keeps itself wrapped around its text ([`label`] module)
//! - **Draw**: Path emitters and paint settings ([`draw`] module)
//! - **Render**: SVG output for node trees ([`render`] module)
//!
//! # Quick Start
//!
//! ```
//! use callout_core::{
//!     attr::{AttrValue, name},
//!     group::Group,
//!     label::Label,
//!     render::{DocumentStyle, render_document},
//!     shape::{FixedAdvanceMeasure, Tag, Text},
//! };
//!
//! let root = Group::new();
//! let label = Label::new();
//! label.set_attrs([(name::X, 120.0), (name::Y, 40.0)]).unwrap();
//!
//! let tag = Tag::new();
//! tag.set_attrs([
//!     (name::POINTER_DIRECTION, AttrValue::from("down")),
//!     (name::POINTER_WIDTH, AttrValue::from(12.0)),
//!     (name::POINTER_HEIGHT, AttrValue::from(8.0)),
//!     (name::FILL, AttrValue::from("#ffd")),
//! ])
//! .unwrap();
//!
//! let text = Text::with_measurer(FixedAdvanceMeasure::new(0.6));
//! text.set_text("Hello").unwrap();
//!
//! label.add(&tag).unwrap();
//! label.add(&text).unwrap();
//! root.add(&label).unwrap();
//!
//! let svg = render_document(&root, &DocumentStyle::default()).to_string();
//! assert!(svg.contains("Hello"));
//! ```

pub mod attr;
pub mod color;
pub mod draw;
pub mod error;
pub mod event;
pub mod geometry;
pub mod group;
pub mod label;
pub mod node;
pub mod render;
pub mod shape;

pub use error::{AttrError, TreeError};
pub use node::{Node, NodeClass, NodeKind};
