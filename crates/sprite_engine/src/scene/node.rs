//! Displayable object ("sprite") data
//!
//! A [`SceneNode`] holds everything a renderer or game loop reads off a
//! sprite: local position and size, transform parameters, visibility and
//! shadow settings, animation bookkeeping and interaction flags. Geometry that
//! depends only on the node itself lives here; anything that looks at the
//! parent (global position, placement relative to another sprite, layer
//! re-sorting) lives on [`SceneTree`](super::SceneTree).

use serde::{Deserialize, Serialize};

use super::error::{Result, SceneError};
use super::geometry::{Axis, Bounds2D, Bounds3D, Position2D, Position3D, Size2D, Size3D};
use super::tree::NodeId;
use crate::config::ShadowDefaults;
use crate::foundation::math::{utils, Vec3};

/// Compositing mode tag handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendMode {
    /// Source over destination
    Normal,
    /// Multiply source and destination
    Multiply,
    /// Inverse multiply of the inverses
    Screen,
    /// Multiply or screen depending on destination
    Overlay,
    /// Keep the darker channel
    Darken,
    /// Keep the lighter channel
    Lighten,
    /// Additive blending
    Add,
}

/// RGBA shadow color, channels in 0..=255 and alpha in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowColor {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Opacity
    pub a: f32,
}

impl Default for ShadowColor {
    fn default() -> Self {
        Self {
            r: 100,
            g: 100,
            b: 100,
            a: 0.5,
        }
    }
}

/// Outline a node's width and height describe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Independent width and height
    #[default]
    Rectangular,
    /// Width and height kept equal through diameter/radius
    Circular,
}

/// A displayable object in the scene graph
///
/// Plain state is exposed as public fields. The hierarchy (`parent`,
/// `children`, `layer`) is read-only here because changing it must keep both
/// ends of a parent/child link consistent; use the [`SceneTree`](super::SceneTree)
/// methods for that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Optional label used in diagnostics
    pub name: Option<String>,

    // -- Spatial --
    /// Local x position
    pub x: f32,
    /// Local y position
    pub y: f32,
    /// Local z position (3D only)
    pub z: f32,
    /// Local width
    pub width: f32,
    /// Local height
    pub height: f32,
    /// Local depth (3D only)
    pub depth: f32,

    // -- Transform --
    /// Rotation in degrees
    pub rotation: f32,
    /// Opacity, conceptually within 0..=1
    pub alpha: f32,
    /// Scale on the x axis
    pub scale_x: f32,
    /// Scale on the y axis
    pub scale_y: f32,
    /// Scale on the z axis
    pub scale_z: f32,
    /// Normalized rotation/scale anchor on the x axis
    pub pivot_x: f32,
    /// Normalized rotation/scale anchor on the y axis
    pub pivot_y: f32,
    /// Normalized rotation/scale anchor on the z axis
    pub pivot_z: f32,

    // -- Motion (never integrated here) --
    /// Velocity on the x axis
    pub vx: f32,
    /// Velocity on the y axis
    pub vy: f32,
    /// Velocity on the z axis
    pub vz: f32,

    // -- Visibility and compositing --
    /// Whether the renderer should draw this node
    pub is_visible: bool,
    /// Optional blend mode tag
    pub blend_mode: Option<BlendMode>,
    /// Whether a drop shadow is drawn
    pub is_shadow: bool,
    /// Shadow color
    pub shadow_color: ShadowColor,
    /// Shadow offset on the x axis
    pub shadow_offset_x: f32,
    /// Shadow offset on the y axis
    pub shadow_offset_y: f32,
    /// Shadow offset on the z axis
    pub shadow_offset_z: f32,
    /// Shadow blur radius
    pub shadow_blur: f32,

    // -- Animation bookkeeping --
    /// Frame identifiers, resolved by the asset loader
    pub frames: Vec<String>,
    /// Whether playback wraps around
    pub is_loop: bool,
    /// Whether an external animator is advancing frames
    pub is_playing: bool,
    current_frame: usize,

    // -- Interaction --
    /// Whether the sprite can be dragged
    pub is_draggable: bool,
    /// Whether the sprite receives pointer input
    pub is_interactive: bool,

    // -- Hierarchy (maintained by SceneTree) --
    pub(crate) layer: i32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,

    shape: ShapeKind,
}

impl Default for SceneNode {
    fn default() -> Self {
        let shadow = ShadowDefaults::default();
        Self {
            name: None,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            width: 0.0,
            height: 0.0,
            depth: 0.0,
            rotation: 0.0,
            alpha: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            scale_z: 1.0,
            pivot_x: 0.5,
            pivot_y: 0.5,
            pivot_z: 0.5,
            vx: 0.0,
            vy: 0.0,
            vz: 0.0,
            is_visible: true,
            blend_mode: None,
            is_shadow: false,
            shadow_color: shadow.color,
            shadow_offset_x: shadow.offset_x,
            shadow_offset_y: shadow.offset_y,
            shadow_offset_z: shadow.offset_z,
            shadow_blur: shadow.blur,
            frames: Vec::new(),
            is_loop: true,
            is_playing: false,
            current_frame: 0,
            is_draggable: false,
            is_interactive: false,
            layer: 0,
            parent: None,
            children: Vec::new(),
            shape: ShapeKind::Rectangular,
        }
    }
}

impl SceneNode {
    /// Create a node at the origin with zero size
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Set name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder pattern: Set local x/y position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Builder pattern: Set local width and height
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builder pattern: Set local depth
    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    /// Builder pattern: Set frame identifiers
    pub fn with_frames<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frames = frames.into_iter().map(Into::into).collect();
        self
    }

    /// Copy configured shadow defaults into this node
    pub fn apply_shadow_defaults(&mut self, shadow: &ShadowDefaults) {
        self.shadow_color = shadow.color;
        self.shadow_offset_x = shadow.offset_x;
        self.shadow_offset_y = shadow.offset_y;
        self.shadow_offset_z = shadow.offset_z;
        self.shadow_blur = shadow.blur;
    }

    /// Name for messages, falling back to a placeholder
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed node>")
    }

    // -- Hierarchy (read-only) --

    /// Draw-order key among siblings
    pub const fn layer(&self) -> i32 {
        self.layer
    }

    /// Parent handle, if attached
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in draw order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether the node has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    // -- Axis access --

    /// Local coordinate on an axis
    pub const fn axis_position(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Mutable local coordinate on an axis
    pub fn axis_position_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }

    /// Local extent on an axis (width, height or depth)
    pub const fn axis_size(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
            Axis::Z => self.depth,
        }
    }

    // -- Local geometry --

    /// Local x/y position
    pub const fn position_2d(&self) -> Position2D {
        Position2D { x: self.x, y: self.y }
    }

    /// Local x/y/z position
    pub const fn position_3d(&self) -> Position3D {
        Position3D {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }

    /// Local position (2D)
    pub const fn position(&self) -> Position2D {
        self.position_2d()
    }

    /// Local width and height
    pub const fn size_2d(&self) -> Size2D {
        Size2D {
            width: self.width,
            height: self.height,
        }
    }

    /// Local width, height and depth
    pub const fn size_3d(&self) -> Size3D {
        Size3D {
            width: self.width,
            height: self.height,
            depth: self.depth,
        }
    }

    /// Local size (2D)
    pub const fn current_size(&self) -> Size2D {
        self.size_2d()
    }

    /// Local position merged with local size (2D)
    pub const fn local_bounds_2d(&self) -> Bounds2D {
        Bounds2D::from_parts(self.position_2d(), self.size_2d())
    }

    /// Local position merged with local size (3D)
    pub const fn local_bounds_3d(&self) -> Bounds3D {
        Bounds3D::from_parts(self.position_3d(), self.size_3d())
    }

    /// Local bounds (2D)
    pub const fn local_bounds(&self) -> Bounds2D {
        self.local_bounds_2d()
    }

    /// Half of the extent on an axis
    pub fn half_size(&self, axis: Axis) -> f32 {
        self.axis_size(axis) / 2.0
    }

    /// Half of the extent on a named axis (`"x"`, `"y"` or `"z"`)
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidArgument`] for any other axis name.
    pub fn half_size_named(&self, axis: &str) -> Result<f32> {
        Ok(self.half_size(axis.parse()?))
    }

    /// Half the width
    pub fn half_width(&self) -> f32 {
        self.half_size(Axis::X)
    }

    /// Half the height
    pub fn half_height(&self) -> f32 {
        self.half_size(Axis::Y)
    }

    /// Half the depth
    pub fn half_depth(&self) -> f32 {
        self.half_size(Axis::Z)
    }

    /// Local coordinate plus half the extent on an axis
    pub fn center_axis(&self, axis: Axis) -> f32 {
        self.axis_position(axis) + self.half_size(axis)
    }

    /// Center on a named axis
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidArgument`] for an unknown axis name.
    pub fn center_named(&self, axis: &str) -> Result<f32> {
        Ok(self.center_axis(axis.parse()?))
    }

    /// Horizontal center in local coordinates
    pub fn center_x(&self) -> f32 {
        self.center_axis(Axis::X)
    }

    /// Vertical center in local coordinates
    pub fn center_y(&self) -> f32 {
        self.center_axis(Axis::Y)
    }

    /// Depth center in local coordinates
    pub fn center_z(&self) -> f32 {
        self.center_axis(Axis::Z)
    }

    // -- Transform and motion --

    /// Rotation converted to radians
    pub fn rotation_radians(&self) -> f32 {
        utils::deg_to_rad(self.rotation)
    }

    /// Velocity as a vector
    pub fn velocity(&self) -> Vec3 {
        Vec3::new(self.vx, self.vy, self.vz)
    }

    /// Set velocity from a vector
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.vx = velocity.x;
        self.vy = velocity.y;
        self.vz = velocity.z;
    }

    // -- Animation bookkeeping --

    /// Index of the frame currently shown
    pub const fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Jump to a frame without starting playback
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidArgument`] when `index` is past the last frame.
    pub fn show_frame(&mut self, index: usize) -> Result<()> {
        if index >= self.frames.len() {
            return Err(SceneError::InvalidArgument(format!(
                "frame index {index} out of range for {} ({} frames)",
                self.label(),
                self.frames.len()
            )));
        }
        self.current_frame = index;
        Ok(())
    }

    // -- Circular specialization --

    /// Current shape
    pub const fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// Whether the node is in circular mode
    pub fn is_circular(&self) -> bool {
        self.shape == ShapeKind::Circular
    }

    /// Switch circular mode on or off
    ///
    /// Idempotent; width and height are left as they are.
    pub fn set_circular(&mut self, circular: bool) {
        self.shape = if circular {
            ShapeKind::Circular
        } else {
            ShapeKind::Rectangular
        };
    }

    /// Diameter, or `None` for a rectangular node
    pub fn diameter(&self) -> Option<f32> {
        self.is_circular().then_some(self.width)
    }

    /// Set width and height to `diameter`
    ///
    /// # Errors
    ///
    /// [`SceneError::NotCircular`] on a rectangular node.
    pub fn set_diameter(&mut self, diameter: f32) -> Result<()> {
        self.ensure_circular()?;
        self.width = diameter;
        self.height = diameter;
        Ok(())
    }

    /// Radius (half the width), or `None` for a rectangular node
    pub fn radius(&self) -> Option<f32> {
        self.is_circular().then(|| self.half_width())
    }

    /// Set width and height to twice `radius`
    ///
    /// # Errors
    ///
    /// [`SceneError::NotCircular`] on a rectangular node.
    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        self.set_diameter(radius * 2.0)
    }

    fn ensure_circular(&self) -> Result<()> {
        if self.is_circular() {
            Ok(())
        } else {
            Err(SceneError::NotCircular(self.label().to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let node = SceneNode::new();

        assert_eq!(node.position_3d(), Position3D::default());
        assert_eq!(node.size_3d(), Size3D::default());
        assert_eq!(node.alpha, 1.0);
        assert_eq!((node.scale_x, node.scale_y, node.scale_z), (1.0, 1.0, 1.0));
        assert_eq!((node.pivot_x, node.pivot_y, node.pivot_z), (0.5, 0.5, 0.5));
        assert!(node.is_visible);
        assert!(node.is_loop);
        assert!(!node.is_playing);
        assert_eq!(node.layer(), 0);
        assert!(node.parent().is_none());
        assert!(node.is_empty());
        assert_eq!(node.shadow_color, ShadowColor { r: 100, g: 100, b: 100, a: 0.5 });
        assert_eq!(node.shadow_blur, 3.0);
        assert_eq!(node.shape(), ShapeKind::Rectangular);
        assert!(node.blend_mode.is_none());
    }

    #[test]
    fn test_half_size_and_center() {
        let mut node = SceneNode::new().with_position(10.0, 20.0).with_size(100.0, 50.0).with_depth(8.0);
        node.z = 1.0;

        assert_eq!(node.half_width(), 50.0);
        assert_eq!(node.half_height(), 25.0);
        assert_eq!(node.half_depth(), 4.0);
        assert_eq!(node.center_x(), 60.0);
        assert_eq!(node.center_y(), 45.0);
        assert_eq!(node.center_z(), 5.0);
        assert_eq!(node.half_size_named("y"), Ok(25.0));
        assert_eq!(node.center_named("x"), Ok(60.0));
    }

    #[test]
    fn test_unknown_axis_name_is_invalid_argument() {
        let node = SceneNode::new();
        assert!(matches!(node.half_size_named("q"), Err(SceneError::InvalidArgument(_))));
        assert!(matches!(node.center_named("w"), Err(SceneError::InvalidArgument(_))));
    }

    #[test]
    fn test_local_bounds_merge_position_and_size() {
        let mut node = SceneNode::new().with_position(1.0, 2.0).with_size(3.0, 4.0).with_depth(6.0);
        node.z = 5.0;

        assert_eq!(node.local_bounds(), Bounds2D { x: 1.0, y: 2.0, width: 3.0, height: 4.0 });
        assert_eq!(
            node.local_bounds_3d(),
            Bounds3D { x: 1.0, y: 2.0, z: 5.0, width: 3.0, height: 4.0, depth: 6.0 }
        );
        assert_eq!(node.position(), Position2D { x: 1.0, y: 2.0 });
        assert_eq!(node.current_size(), Size2D { width: 3.0, height: 4.0 });
    }

    #[test]
    fn test_circular_radius_sets_width_and_height() {
        let mut node = SceneNode::new();
        node.set_circular(true);
        node.set_radius(10.0).unwrap();

        assert_eq!(node.width, 20.0);
        assert_eq!(node.height, 20.0);
        assert_eq!(node.diameter(), Some(20.0));
        assert_eq!(node.radius(), Some(10.0));

        node.set_diameter(7.0).unwrap();
        assert_eq!((node.width, node.height), (7.0, 7.0));
        assert_eq!(node.radius(), Some(3.5));
    }

    #[test]
    fn test_circular_off_hides_accessors() {
        let mut node = SceneNode::new().with_size(20.0, 20.0);
        node.set_circular(true);
        node.set_circular(false);

        assert_eq!(node.diameter(), None);
        assert_eq!(node.radius(), None);
        assert_eq!((node.width, node.height), (20.0, 20.0));
    }

    #[test]
    fn test_circular_toggle_is_idempotent() {
        let mut node = SceneNode::new().with_size(4.0, 6.0);
        node.set_circular(true);
        node.set_circular(true);
        assert!(node.is_circular());
        // enabling leaves the stored size alone
        assert_eq!((node.width, node.height), (4.0, 6.0));

        node.set_circular(false);
        node.set_circular(false);
        assert!(!node.is_circular());
    }

    #[test]
    fn test_rectangular_rejects_radius() {
        let mut node = SceneNode::new().with_name("box").with_size(4.0, 6.0);
        let err = node.set_radius(5.0).unwrap_err();

        assert_eq!(err, SceneError::NotCircular("box".to_string()));
        assert_eq!((node.width, node.height), (4.0, 6.0));
        assert!(node.set_diameter(1.0).is_err());
    }

    #[test]
    fn test_show_frame_bounds() {
        let mut node = SceneNode::new().with_frames(["idle", "walk_0", "walk_1"]);
        node.show_frame(2).unwrap();
        assert_eq!(node.current_frame(), 2);

        assert!(matches!(node.show_frame(3), Err(SceneError::InvalidArgument(_))));
        assert_eq!(node.current_frame(), 2);
    }

    #[test]
    fn test_velocity_and_rotation() {
        let mut node = SceneNode::new();
        node.set_velocity(Vec3::new(1.0, -2.0, 0.5));
        assert_eq!((node.vx, node.vy, node.vz), (1.0, -2.0, 0.5));
        assert_eq!(node.velocity(), Vec3::new(1.0, -2.0, 0.5));

        node.rotation = 90.0;
        assert_relative_eq!(node.rotation_radians(), std::f32::consts::FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn test_apply_shadow_defaults() {
        let mut node = SceneNode::new();
        let shadow = ShadowDefaults {
            color: ShadowColor { r: 0, g: 0, b: 0, a: 1.0 },
            offset_x: 1.0,
            offset_y: 2.0,
            offset_z: 0.0,
            blur: 8.0,
        };
        node.apply_shadow_defaults(&shadow);

        assert_eq!(node.shadow_color.a, 1.0);
        assert_eq!((node.shadow_offset_x, node.shadow_offset_y), (1.0, 2.0));
        assert_eq!(node.shadow_blur, 8.0);
    }
}
