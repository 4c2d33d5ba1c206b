//! # Sprite Engine
//!
//! The displayable-object core of a lightweight 2D game engine (with a partial
//! 3D extension).
//!
//! ## Features
//!
//! - **Scene Graph**: Arena-backed tree of sprites with layer-ordered children
//! - **Geometry**: Local and global positions, sizes, bounds, half-sizes and centers
//! - **Placement**: Put one sprite centered on, above, below, left or right of another
//! - **Circular Sprites**: Diameter/radius accessors that keep width and height equal
//! - **Configuration**: Stage and shadow defaults loaded from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use sprite_engine::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let mut tree = SceneTree::new();
//!     let stage = tree.create_node();
//!     let player = tree.create_node();
//!
//!     tree.node_mut(stage)?.width = 640.0;
//!     tree.node_mut(stage)?.height = 360.0;
//!     tree.node_mut(player)?.width = 32.0;
//!     tree.node_mut(player)?.height = 32.0;
//!
//!     tree.add_child(stage, player)?;
//!     tree.put_center(stage, player, PlacementOffset::default())?;
//!
//!     assert_eq!(tree.node(player)?.x, 304.0);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, SceneConfig, ShadowDefaults, StageConfig},
        foundation::math::{Point2, Point3, Vec2, Vec3},
        scene::{
            Axis, BlendMode, Bounds2D, Bounds3D, NodeId, PlacementOffset, Position2D,
            Position3D, SceneError, SceneNode, SceneTree, ShadowColor, ShapeKind, Size2D,
            Size3D, AABB,
        },
    };
}
