//! Relative placement of one sprite against another
//!
//! Every `put_*` call reads the anchor's (`this`) local position and size and
//! the placed node's size, then writes only the placed node's local position.
//! Cross axes are center-aligned using half-sizes. Offsets are added last.
//!
//! ```text
//!              put_top
//!            +---------+
//!  put_left  |  this   |  put_right
//!            +---------+
//!             put_bottom
//! ```

use serde::{Deserialize, Serialize};

use super::error::Result;
use super::geometry::{Axis, Bounds3D};
use super::node::SceneNode;
use super::tree::{NodeId, SceneTree};

/// Additive shift applied after a placement is computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementOffset {
    /// Shift on the x axis
    pub x: f32,
    /// Shift on the y axis
    pub y: f32,
    /// Shift on the z axis (3D placements only)
    pub z: f32,
}

impl PlacementOffset {
    /// Offset on the x/y plane
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Offset in 3D space
    pub const fn new_3d(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    const fn on(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// Edge of the anchor a node is placed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    /// Center-aligned on the axis
    Center,
    /// Node's far edge touches the anchor's near edge
    Before,
    /// Node's near edge touches the anchor's far edge
    After,
}

fn anchor_position(anchor: &Bounds3D, axis: Axis) -> f32 {
    match axis {
        Axis::X => anchor.x,
        Axis::Y => anchor.y,
        Axis::Z => anchor.z,
    }
}

fn anchor_size(anchor: &Bounds3D, axis: Axis) -> f32 {
    match axis {
        Axis::X => anchor.width,
        Axis::Y => anchor.height,
        Axis::Z => anchor.depth,
    }
}

fn place_on_axis(anchor: &Bounds3D, node: &mut SceneNode, axis: Axis, side: Side, offset: f32) {
    let start = anchor_position(anchor, axis);
    let extent = anchor_size(anchor, axis);
    let position = match side {
        Side::Center => start + extent / 2.0 - node.half_size(axis),
        Side::Before => start - node.axis_size(axis),
        Side::After => start + extent,
    };
    *node.axis_position_mut(axis) = position + offset;
}

impl SceneTree {
    fn place(
        &mut self,
        this: NodeId,
        node: NodeId,
        sides: &[(Axis, Side)],
        offset: PlacementOffset,
    ) -> Result<()> {
        let anchor = self.node(this)?.local_bounds_3d();
        let target = self.node_mut(node)?;
        for &(axis, side) in sides {
            place_on_axis(&anchor, target, axis, side, offset.on(axis));
        }
        Ok(())
    }

    // -- 2D --

    /// Center `node` within `this` on x and y
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`](super::SceneError::NodeNotFound) if either
    /// handle is stale.
    pub fn put_center_2d(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.place(this, node, &[(Axis::X, Side::Center), (Axis::Y, Side::Center)], offset)
    }

    /// Place `node` above `this`, horizontally centered
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`](super::SceneError::NodeNotFound) if either
    /// handle is stale.
    pub fn put_top_2d(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.place(this, node, &[(Axis::X, Side::Center), (Axis::Y, Side::Before)], offset)
    }

    /// Place `node` below `this`, horizontally centered
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`](super::SceneError::NodeNotFound) if either
    /// handle is stale.
    pub fn put_bottom_2d(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.place(this, node, &[(Axis::X, Side::Center), (Axis::Y, Side::After)], offset)
    }

    /// Place `node` to the right of `this`, vertically centered
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`](super::SceneError::NodeNotFound) if either
    /// handle is stale.
    pub fn put_right_2d(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.place(this, node, &[(Axis::X, Side::After), (Axis::Y, Side::Center)], offset)
    }

    /// Place `node` to the left of `this`, vertically centered
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`](super::SceneError::NodeNotFound) if either
    /// handle is stale.
    pub fn put_left_2d(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.place(this, node, &[(Axis::X, Side::Before), (Axis::Y, Side::Center)], offset)
    }

    // -- 3D --

    /// Center `node` within `this` on all three axes
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`](super::SceneError::NodeNotFound) if either
    /// handle is stale.
    pub fn put_center_3d(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.place(
            this,
            node,
            &[(Axis::X, Side::Center), (Axis::Y, Side::Center), (Axis::Z, Side::Center)],
            offset,
        )
    }

    /// Place `node` above `this`, centered on x and z
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`](super::SceneError::NodeNotFound) if either
    /// handle is stale.
    pub fn put_top_3d(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.place(
            this,
            node,
            &[(Axis::X, Side::Center), (Axis::Y, Side::Before), (Axis::Z, Side::Center)],
            offset,
        )
    }

    /// Place `node` below `this`, centered on x and z
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`](super::SceneError::NodeNotFound) if either
    /// handle is stale.
    pub fn put_bottom_3d(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.place(
            this,
            node,
            &[(Axis::X, Side::Center), (Axis::Y, Side::After), (Axis::Z, Side::Center)],
            offset,
        )
    }

    /// Place `node` to the right of `this`, centered on y and z
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`](super::SceneError::NodeNotFound) if either
    /// handle is stale.
    pub fn put_right_3d(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.place(
            this,
            node,
            &[(Axis::X, Side::After), (Axis::Y, Side::Center), (Axis::Z, Side::Center)],
            offset,
        )
    }

    /// Place `node` to the left of `this`, centered on y and z
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`](super::SceneError::NodeNotFound) if either
    /// handle is stale.
    pub fn put_left_3d(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.place(
            this,
            node,
            &[(Axis::X, Side::Before), (Axis::Y, Side::Center), (Axis::Z, Side::Center)],
            offset,
        )
    }

    /// Place `node` in front of `this` (toward smaller z), centered on x and y
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`](super::SceneError::NodeNotFound) if either
    /// handle is stale.
    pub fn put_front_3d(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.place(
            this,
            node,
            &[(Axis::X, Side::Center), (Axis::Y, Side::Center), (Axis::Z, Side::Before)],
            offset,
        )
    }

    /// Place `node` behind `this` (toward larger z), centered on x and y
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`](super::SceneError::NodeNotFound) if either
    /// handle is stale.
    pub fn put_back_3d(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.place(
            this,
            node,
            &[(Axis::X, Side::Center), (Axis::Y, Side::Center), (Axis::Z, Side::After)],
            offset,
        )
    }

    // -- Shorthands (2D) --

    /// Same as [`put_center_2d`](Self::put_center_2d)
    ///
    /// # Errors
    ///
    /// See [`put_center_2d`](Self::put_center_2d).
    pub fn put_center(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.put_center_2d(this, node, offset)
    }

    /// Same as [`put_top_2d`](Self::put_top_2d)
    ///
    /// # Errors
    ///
    /// See [`put_top_2d`](Self::put_top_2d).
    pub fn put_top(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.put_top_2d(this, node, offset)
    }

    /// Same as [`put_bottom_2d`](Self::put_bottom_2d)
    ///
    /// # Errors
    ///
    /// See [`put_bottom_2d`](Self::put_bottom_2d).
    pub fn put_bottom(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.put_bottom_2d(this, node, offset)
    }

    /// Same as [`put_right_2d`](Self::put_right_2d)
    ///
    /// # Errors
    ///
    /// See [`put_right_2d`](Self::put_right_2d).
    pub fn put_right(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.put_right_2d(this, node, offset)
    }

    /// Same as [`put_left_2d`](Self::put_left_2d)
    ///
    /// # Errors
    ///
    /// See [`put_left_2d`](Self::put_left_2d).
    pub fn put_left(&mut self, this: NodeId, node: NodeId, offset: PlacementOffset) -> Result<()> {
        self.put_left_2d(this, node, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Anchor at (100, 50, 10) sized 80x40x20, node sized 20x10x6 at the origin
    fn fixture() -> (SceneTree, NodeId, NodeId) {
        let mut tree = SceneTree::new();
        let mut anchor = SceneNode::new().with_position(100.0, 50.0).with_size(80.0, 40.0).with_depth(20.0);
        anchor.z = 10.0;
        let this = tree.insert(anchor);
        let node = tree.insert(SceneNode::new().with_size(20.0, 10.0).with_depth(6.0));
        (tree, this, node)
    }

    fn pos(tree: &SceneTree, id: NodeId) -> (f32, f32, f32) {
        let n = tree.node(id).unwrap();
        (n.x, n.y, n.z)
    }

    #[test]
    fn test_put_center_formula() {
        let (mut tree, this, node) = fixture();
        tree.put_center(this, node, PlacementOffset::default()).unwrap();

        let a = tree.node(this).unwrap().clone();
        let b = tree.node(node).unwrap();
        assert_relative_eq!(b.x, a.x + a.half_width() - b.half_width());
        assert_relative_eq!(b.y, a.y + a.half_height() - b.half_height());
        assert_eq!(pos(&tree, node), (130.0, 65.0, 0.0));
    }

    #[test]
    fn test_put_top_and_bottom() {
        let (mut tree, this, node) = fixture();

        tree.put_top(this, node, PlacementOffset::default()).unwrap();
        assert_eq!(pos(&tree, node), (130.0, 40.0, 0.0));

        tree.put_bottom(this, node, PlacementOffset::default()).unwrap();
        assert_eq!(pos(&tree, node), (130.0, 90.0, 0.0));
    }

    #[test]
    fn test_right_minus_left_is_both_widths() {
        let (mut tree, this, node) = fixture();

        tree.put_right_2d(this, node, PlacementOffset::default()).unwrap();
        let (right_x, right_y, _) = pos(&tree, node);
        tree.put_left_2d(this, node, PlacementOffset::default()).unwrap();
        let (left_x, left_y, _) = pos(&tree, node);

        assert_relative_eq!(right_x - left_x, 80.0 + 20.0);
        assert_eq!(right_y, left_y);
        assert_eq!((right_x, left_x, right_y), (180.0, 80.0, 65.0));
    }

    #[test]
    fn test_offsets_are_additive() {
        let (mut tree, this, node) = fixture();
        tree.put_right(this, node, PlacementOffset::new(5.0, -3.0)).unwrap();
        assert_eq!(pos(&tree, node), (185.0, 62.0, 0.0));

        tree.put_left(this, node, PlacementOffset::new(-1.0, 1.0)).unwrap();
        assert_eq!(pos(&tree, node), (79.0, 66.0, 0.0));
    }

    #[test]
    fn test_2d_placement_leaves_z_alone() {
        let (mut tree, this, node) = fixture();
        tree.node_mut(node).unwrap().z = 42.0;
        tree.put_center_2d(this, node, PlacementOffset::new_3d(0.0, 0.0, 9.0)).unwrap();
        assert_eq!(tree.node(node).unwrap().z, 42.0);
    }

    #[test]
    fn test_3d_variants_center_on_z() {
        let (mut tree, this, node) = fixture();

        tree.put_center_3d(this, node, PlacementOffset::default()).unwrap();
        assert_eq!(pos(&tree, node), (130.0, 65.0, 17.0));

        tree.put_top_3d(this, node, PlacementOffset::new_3d(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(pos(&tree, node), (130.0, 40.0, 18.0));

        tree.put_bottom_3d(this, node, PlacementOffset::default()).unwrap();
        assert_eq!(pos(&tree, node), (130.0, 90.0, 17.0));

        tree.put_right_3d(this, node, PlacementOffset::default()).unwrap();
        assert_eq!(pos(&tree, node), (180.0, 65.0, 17.0));

        tree.put_left_3d(this, node, PlacementOffset::default()).unwrap();
        assert_eq!(pos(&tree, node), (80.0, 65.0, 17.0));
    }

    #[test]
    fn test_front_and_back() {
        let (mut tree, this, node) = fixture();

        tree.put_front_3d(this, node, PlacementOffset::default()).unwrap();
        assert_eq!(pos(&tree, node), (130.0, 65.0, 4.0));

        tree.put_back_3d(this, node, PlacementOffset::new_3d(0.0, 0.0, 2.0)).unwrap();
        assert_eq!(pos(&tree, node), (130.0, 65.0, 32.0));
    }

    #[test]
    fn test_placement_ignores_parent_offsets() {
        let (mut tree, this, node) = fixture();
        let holder = tree.insert(SceneNode::new().with_position(1000.0, 1000.0));
        tree.add_child(holder, this).unwrap();

        tree.put_center(this, node, PlacementOffset::default()).unwrap();
        assert_eq!(pos(&tree, node), (130.0, 65.0, 0.0));
    }

    #[test]
    fn test_stale_anchor_leaves_node_untouched() {
        let (mut tree, this, node) = fixture();
        tree.destroy(this).unwrap();

        assert!(tree.put_center(this, node, PlacementOffset::new(1.0, 1.0)).is_err());
        assert_eq!(pos(&tree, node), (0.0, 0.0, 0.0));
    }
}
