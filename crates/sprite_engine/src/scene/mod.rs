//! Scene graph of displayable objects
//!
//! Sprites form a tree: every node may hold children, drawn after (on top of)
//! their parent in list order. Positions are local to the parent, and the
//! global getters add the direct parent's offset.
//!
//! ## Architecture
//!
//! ```text
//! SceneTree (arena, owns every SceneNode)
//!      ↓ NodeId handles
//! SceneNode (local geometry, transform, shadow, animation flags)
//!      ↓
//! Renderer / game loop (reads draw_order and global bounds)
//! ```
//!
//! The tree:
//! - Keeps parent and children links consistent on attach, detach and destroy
//! - Re-sorts siblings by layer, stably
//! - Derives global positions, sizes and bounds
//! - Places one sprite relative to another

mod error;
mod geometry;
mod node;
mod placement;
mod tree;

#[cfg(test)]
mod tests;

pub use error::{Result, SceneError};
pub use geometry::{Axis, Bounds2D, Bounds3D, Position2D, Position3D, Size2D, Size3D, AABB};
pub use node::{BlendMode, SceneNode, ShadowColor, ShapeKind};
pub use placement::PlacementOffset;
pub use tree::{NodeId, SceneTree};
