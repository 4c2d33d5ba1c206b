//! Arena-backed scene graph
//!
//! All nodes of a scene live in one [`SceneTree`], addressed by [`NodeId`]
//! handles. A node's `parent` is a plain handle used for lookup only, and a
//! parent's `children` list records membership and draw order; neither owns
//! the other. Node storage belongs to the tree, so reparenting never moves
//! node data and a detached node stays alive until [`SceneTree::destroy`].

use slotmap::{new_key_type, SlotMap};

use super::error::{Result, SceneError};
use super::geometry::{Axis, Bounds2D, Bounds3D, Position2D, Position3D, Size2D, Size3D};
use super::node::SceneNode;
use crate::config::{SceneConfig, ShadowDefaults};

new_key_type! {
    /// Handle to a node in a [`SceneTree`]
    ///
    /// Handles are generational: once a node is destroyed its handle is stale
    /// and every lookup through it fails with [`SceneError::NodeNotFound`].
    pub struct NodeId;
}

/// Scene graph owning every node of one scene
#[derive(Debug, Clone, Default)]
pub struct SceneTree {
    nodes: SlotMap<NodeId, SceneNode>,
    shadow_defaults: ShadowDefaults,
    stage: Option<NodeId>,
}

impl SceneTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree with a stage root node sized from the configuration
    ///
    /// Nodes created afterwards through [`create_node`](Self::create_node)
    /// start with the configured shadow parameters.
    pub fn with_config(config: &SceneConfig) -> Self {
        let mut tree = Self {
            nodes: SlotMap::with_key(),
            shadow_defaults: config.shadow.clone(),
            stage: None,
        };
        let stage = tree.insert(
            SceneNode::new()
                .with_name("stage")
                .with_size(config.stage.width, config.stage.height),
        );
        tree.stage = Some(stage);
        log::debug!(
            "Scene tree created with {}x{} stage",
            config.stage.width,
            config.stage.height
        );
        tree
    }

    /// Stage root created by [`with_config`](Self::with_config)
    pub const fn stage(&self) -> Option<NodeId> {
        self.stage
    }

    // -- Allocation --

    /// Create a node with default values and return its handle
    pub fn create_node(&mut self) -> NodeId {
        let mut node = SceneNode::new();
        node.apply_shadow_defaults(&self.shadow_defaults);
        self.insert(node)
    }

    /// Insert a prepared node and return its handle
    ///
    /// The node enters the tree detached: any parent or children it carried
    /// (for example from a clone) are cleared.
    pub fn insert(&mut self, mut node: SceneNode) -> NodeId {
        node.parent = None;
        node.children.clear();
        self.nodes.insert(node)
    }

    /// Remove a node from the tree
    ///
    /// The node is detached from its parent. Its children are orphaned, not
    /// destroyed; the caller decides whether to reparent or destroy them.
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn destroy(&mut self, id: NodeId) -> Result<SceneNode> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.remove_child(parent, id)?;
        }
        let mut node = self.nodes.remove(id).ok_or(SceneError::NodeNotFound(id))?;
        for child in node.children.drain(..) {
            if let Some(orphan) = self.nodes.get_mut(child) {
                orphan.parent = None;
            }
        }
        if self.stage == Some(id) {
            self.stage = None;
        }
        log::trace!("Destroyed {} ({id:?})", node.label());
        Ok(node)
    }

    /// Whether the handle refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Borrow a node
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn node(&self, id: NodeId) -> Result<&SceneNode> {
        self.nodes.get(id).ok_or(SceneError::NodeNotFound(id))
    }

    /// Mutably borrow a node
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode> {
        self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))
    }

    /// Iterate over all live nodes
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter()
    }

    /// Nodes without a parent
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    // -- Hierarchy --

    /// Parent of a node
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// Children of a node in draw order
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    /// Whether a node has no children
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn is_empty(&self, id: NodeId) -> Result<bool> {
        Ok(self.node(id)?.is_empty())
    }

    /// Position of `child` in `parent`'s children, if it is one
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale `parent` handle.
    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Result<Option<usize>> {
        Ok(self.node(parent)?.children.iter().position(|&c| c == child))
    }

    /// Append `child` to `parent`'s children
    ///
    /// A child that already has a parent is detached from it first, so a node
    /// is never listed under two parents. Adding a node to the parent it
    /// already has moves it to the end of the list.
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] if either handle is stale, and
    /// [`SceneError::InvalidArgument`] if `child` is `parent` itself or one of
    /// its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(parent)?;
        if self.is_ancestor(child, parent) {
            return Err(SceneError::InvalidArgument(format!(
                "attaching {child:?} under {parent:?} would create a cycle"
            )));
        }
        let old_parent = self.node(child)?.parent;
        if let Some(old_parent) = old_parent {
            self.remove_child(old_parent, child)?;
            log::trace!("Reparenting {child:?} from {old_parent:?} to {parent:?}");
        }

        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        log::trace!("Attached {child:?} to {parent:?}");
        Ok(())
    }

    /// Whether `ancestor` is `node` or lies on its parent chain
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Append several children in argument order
    ///
    /// # Errors
    ///
    /// Stops at the first failing child; earlier children stay attached.
    pub fn add(&mut self, parent: NodeId, children: &[NodeId]) -> Result<()> {
        for &child in children {
            self.add_child(parent, child)?;
        }
        Ok(())
    }

    /// Detach `child` from `parent`
    ///
    /// # Errors
    ///
    /// [`SceneError::NotAChild`] if `child`'s parent is not `parent`, and
    /// [`SceneError::NodeNotFound`] if either handle is stale.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Err(SceneError::NotAChild { parent, child });
        }

        let siblings = &mut self.node_mut(parent)?.children;
        if let Some(index) = siblings.iter().position(|&c| c == child) {
            siblings.remove(index);
        }
        self.node_mut(child)?.parent = None;
        log::trace!("Detached {child:?} from {parent:?}");
        Ok(())
    }

    /// Detach several children in argument order
    ///
    /// # Errors
    ///
    /// Stops at the first failing child; earlier children stay detached.
    pub fn remove(&mut self, parent: NodeId, children: &[NodeId]) -> Result<()> {
        for &child in children {
            self.remove_child(parent, child)?;
        }
        Ok(())
    }

    /// Set a node's layer and re-sort its siblings
    ///
    /// When the node has a parent, the parent's children are stably sorted by
    /// ascending layer, so siblings on equal layers keep their relative order.
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle, including a stale
    /// sibling; the layer and the children list are then left unchanged.
    pub fn set_layer(&mut self, id: NodeId, layer: i32) -> Result<()> {
        let Some(parent) = self.node(id)?.parent else {
            self.node_mut(id)?.layer = layer;
            return Ok(());
        };

        let mut keyed = self
            .node(parent)?
            .children
            .iter()
            .map(|&c| -> Result<(i32, NodeId)> {
                let key = if c == id { layer } else { self.node(c)?.layer };
                Ok((key, c))
            })
            .collect::<Result<Vec<_>>>()?;
        keyed.sort_by_key(|&(key, _)| key);

        self.node_mut(id)?.layer = layer;
        self.node_mut(parent)?.children = keyed.into_iter().map(|(_, c)| c).collect();
        log::trace!("Re-sorted children of {parent:?} after layer change on {id:?}");
        Ok(())
    }

    /// Exchange the positions of two children
    ///
    /// Layers are left untouched and no re-sort happens.
    ///
    /// # Errors
    ///
    /// [`SceneError::NotAChild`] naming `parent` and the missing node when
    /// either `a` or `b` is not among `parent`'s children.
    pub fn swap_children(&mut self, parent: NodeId, a: NodeId, b: NodeId) -> Result<()> {
        let children = &mut self.node_mut(parent)?.children;
        let index_a = children
            .iter()
            .position(|&c| c == a)
            .ok_or(SceneError::NotAChild { parent, child: a })?;
        let index_b = children
            .iter()
            .position(|&c| c == b)
            .ok_or(SceneError::NotAChild { parent, child: b })?;
        children.swap(index_a, index_b);
        Ok(())
    }

    /// Visible nodes of a subtree in the order a renderer draws them
    ///
    /// Depth-first, parents before children, children in list order. A hidden
    /// node hides its whole subtree.
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale `root` handle.
    pub fn draw_order(&self, root: NodeId) -> Result<Vec<NodeId>> {
        let mut order = Vec::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            let node = self.node(id)?;
            if !node.is_visible {
                continue;
            }
            order.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        Ok(order)
    }

    // -- Global geometry --

    /// Coordinate on an axis including the direct parent's local offset
    ///
    /// Only one level is added: a grandparent's position is not reflected.
    /// Use [`root_relative_axis`](Self::root_relative_axis) for the position
    /// accumulated along the whole ancestor chain.
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn global_axis(&self, id: NodeId, axis: Axis) -> Result<f32> {
        let node = self.node(id)?;
        let own = node.axis_position(axis);
        match node.parent {
            Some(parent) => Ok(own + self.node(parent)?.axis_position(axis)),
            None => Ok(own),
        }
    }

    /// Global x (direct parent only)
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn gx(&self, id: NodeId) -> Result<f32> {
        self.global_axis(id, Axis::X)
    }

    /// Global y (direct parent only)
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn gy(&self, id: NodeId) -> Result<f32> {
        self.global_axis(id, Axis::Y)
    }

    /// Global z (direct parent only)
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn gz(&self, id: NodeId) -> Result<f32> {
        self.global_axis(id, Axis::Z)
    }

    /// Global coordinate on a named axis
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidArgument`] for an unknown axis name.
    pub fn global_axis_named(&self, id: NodeId, axis: &str) -> Result<f32> {
        self.global_axis(id, axis.parse()?)
    }

    /// Coordinate on an axis summed over the node and all its ancestors
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn root_relative_axis(&self, id: NodeId, axis: Axis) -> Result<f32> {
        let mut total = 0.0;
        let mut current = Some(id);

        while let Some(node_id) = current {
            let node = self.node(node_id)?;
            total += node.axis_position(axis);
            current = node.parent;
        }
        Ok(total)
    }

    /// Position accumulated along the whole ancestor chain
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn root_relative_position_3d(&self, id: NodeId) -> Result<Position3D> {
        Ok(Position3D {
            x: self.root_relative_axis(id, Axis::X)?,
            y: self.root_relative_axis(id, Axis::Y)?,
            z: self.root_relative_axis(id, Axis::Z)?,
        })
    }

    /// Global x/y position
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn global_position_2d(&self, id: NodeId) -> Result<Position2D> {
        Ok(Position2D {
            x: self.gx(id)?,
            y: self.gy(id)?,
        })
    }

    /// Global x/y/z position
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn global_position_3d(&self, id: NodeId) -> Result<Position3D> {
        Ok(Position3D {
            x: self.gx(id)?,
            y: self.gy(id)?,
            z: self.gz(id)?,
        })
    }

    /// Local size with global x/y added into width/height
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn global_size_2d(&self, id: NodeId) -> Result<Size2D> {
        let size = self.node(id)?.size_2d();
        Ok(Size2D {
            width: size.width + self.gx(id)?,
            height: size.height + self.gy(id)?,
        })
    }

    /// Local size with global x/y/z added into width/height/depth
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn global_size_3d(&self, id: NodeId) -> Result<Size3D> {
        let size = self.node(id)?.size_3d();
        Ok(Size3D {
            width: size.width + self.gx(id)?,
            height: size.height + self.gy(id)?,
            depth: size.depth + self.gz(id)?,
        })
    }

    /// Global position merged with global size (2D)
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn global_bounds_2d(&self, id: NodeId) -> Result<Bounds2D> {
        Ok(Bounds2D::from_parts(
            self.global_position_2d(id)?,
            self.global_size_2d(id)?,
        ))
    }

    /// Global position merged with global size (3D)
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn global_bounds_3d(&self, id: NodeId) -> Result<Bounds3D> {
        Ok(Bounds3D::from_parts(
            self.global_position_3d(id)?,
            self.global_size_3d(id)?,
        ))
    }

    /// Global bounds (2D)
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for a stale handle.
    pub fn global_bounds(&self, id: NodeId) -> Result<Bounds2D> {
        self.global_bounds_2d(id)
    }
}
