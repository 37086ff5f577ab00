//! Error types for attribute validation and tree mutation.

use thiserror::Error;

use crate::attr::AttrValue;

/// An attribute mutation was rejected.
///
/// The node keeps its previous value whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttrError {
    #[error("unknown attribute `{name}` for {class}")]
    Unknown { class: &'static str, name: String },

    #[error("attribute `{name}` expects {expected}, got `{value}`")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: AttrValue,
    },
}

/// A structural change to the node tree was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("{class} nodes cannot have children")]
    NotAContainer { class: &'static str },

    #[error("cannot add a node to itself or to one of its descendants")]
    Cycle,
}
