//! Geometry snapshots read off scene nodes
//!
//! These are plain values: taking one copies the node's current numbers, and
//! later mutations of the node do not show through.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::SceneError;
use crate::foundation::math::{Point2, Point3, Vec3};

/// Coordinate axis of a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal axis (width)
    X,
    /// Vertical axis (height)
    Y,
    /// Depth axis (depth)
    Z,
}

impl Axis {
    /// All three axes in x, y, z order
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Lowercase axis name
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

impl FromStr for Axis {
    type Err = SceneError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            other => Err(SceneError::InvalidArgument(format!(
                "Axis name: {other} is unknown. Please use either x, y or z"
            ))),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position on the x/y plane
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position2D {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Position2D {
    /// Convert to a nalgebra point
    pub fn to_point(self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// Position in 3D space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position3D {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
    /// Z coordinate
    pub z: f32,
}

impl Position3D {
    /// Convert to a nalgebra point
    pub fn to_point(self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }

    /// Drop the z component
    pub const fn to_2d(self) -> Position2D {
        Position2D { x: self.x, y: self.y }
    }
}

/// Width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size2D {
    /// Extent on the x axis
    pub width: f32,
    /// Extent on the y axis
    pub height: f32,
}

/// Width, height and depth
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size3D {
    /// Extent on the x axis
    pub width: f32,
    /// Extent on the y axis
    pub height: f32,
    /// Extent on the z axis
    pub depth: f32,
}

impl Size3D {
    /// Drop the depth component
    pub const fn to_2d(self) -> Size2D {
        Size2D {
            width: self.width,
            height: self.height,
        }
    }
}

/// Position merged with size on the x/y plane
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds2D {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
    /// Extent on the x axis
    pub width: f32,
    /// Extent on the y axis
    pub height: f32,
}

impl Bounds2D {
    /// Merge a position and a size
    pub const fn from_parts(position: Position2D, size: Size2D) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Position part
    pub const fn position(&self) -> Position2D {
        Position2D { x: self.x, y: self.y }
    }

    /// Size part
    pub const fn size(&self) -> Size2D {
        Size2D {
            width: self.width,
            height: self.height,
        }
    }

    /// Whether a point lies inside (edges included)
    pub fn contains_point(&self, point: Point2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Position merged with size in 3D space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds3D {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
    /// Z coordinate
    pub z: f32,
    /// Extent on the x axis
    pub width: f32,
    /// Extent on the y axis
    pub height: f32,
    /// Extent on the z axis
    pub depth: f32,
}

impl Bounds3D {
    /// Merge a position and a size
    pub const fn from_parts(position: Position3D, size: Size3D) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            width: size.width,
            height: size.height,
            depth: size.depth,
        }
    }

    /// Drop the z and depth components
    pub const fn to_2d(&self) -> Bounds2D {
        Bounds2D {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Axis-aligned box spanning these bounds
    ///
    /// Negative extents are normalized so `min <= max` on every axis.
    pub fn to_aabb(&self) -> AABB {
        let a = Vec3::new(self.x, self.y, self.z);
        let b = a + Vec3::new(self.width, self.height, self.depth);
        AABB::new(a.inf(&b), a.sup(&b))
    }
}

/// Axis-Aligned Bounding Box for culling and overlap queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}
