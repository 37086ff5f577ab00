//! Plain containers.

use crate::node::{Node, NodeClass, node_kind};

node_kind!(
    /// A container with no behavior of its own, used as a scene root and
    /// for nesting.
    Group
);

impl Group {
    pub fn new() -> Self {
        Self::wrap(Node::alloc(NodeClass::Group, None))
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geometry::Point, shape::Circle};

    #[test]
    fn test_group_is_container() {
        let group = Group::new();
        let circle = Circle::new();
        group.add(&circle).unwrap();
        assert_eq!(group.children().len(), 1);
        assert!(group.class().is_container());
    }

    #[test]
    fn test_nested_client_rect() {
        let outer = Group::new();
        let inner = Group::new();
        inner.set_position(Point::new(100.0, 0.0)).unwrap();
        let circle = Circle::new();
        circle.set_radius(10.0).unwrap();

        inner.add(&circle).unwrap();
        outer.add(&inner).unwrap();

        let rect = outer.client_rect().unwrap();
        assert_eq!(rect.min_point(), Point::new(90.0, -10.0));
        assert_eq!(rect.max_x(), 110.0);
    }
}
