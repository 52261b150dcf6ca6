// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory scene graph that receives escort transforms.

use dungeon_chess_sequencer::{TransformCommand, TransformSink, TransformTarget};
use indexmap::IndexMap;

/// Node name of the dungeon guard
pub const GUARD_NODE: &str = "guard";
/// Node name of the escorted piece
pub const CAPTURED_PIECE_NODE: &str = "captured_piece";
/// Node name of the left door leaf
pub const DOOR_LEFT_NODE: &str = "cell_door_left";
/// Node name of the right door leaf
pub const DOOR_RIGHT_NODE: &str = "cell_door_right";

/// Identity rotation `(x, y, z, w)`
pub const IDENTITY_ROTATION: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Transform state of a scene node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneNode {
    /// World position
    pub position: [f32; 3],
    /// Rotation quaternion `(x, y, z, w)`
    pub rotation: [f32; 4],
    /// Visibility
    pub visible: bool,
    /// Whether the node is mounted; detached nodes are unbound handles
    pub attached: bool,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: IDENTITY_ROTATION,
            visible: true,
            attached: true,
        }
    }
}

impl SceneNode {
    /// Node at a position
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Direction the node faces: its local +z rotated into world space
    pub fn forward(&self) -> [f32; 3] {
        rotate([0.0, 0.0, 1.0], self.rotation)
    }
}

/// Rotation about +y by `radians`
pub fn rotation_y(radians: f32) -> [f32; 4] {
    let (s, c) = (radians * 0.5).sin_cos();
    [0.0, s, 0.0, c]
}

/// Rotation that turns +z towards `to` as seen from `from`.
///
/// Yaw about +y then pitch about the local x axis; no roll.
pub fn look_rotation(from: [f32; 3], to: [f32; 3]) -> [f32; 4] {
    let dx = to[0] - from[0];
    let dy = to[1] - from[1];
    let dz = to[2] - from[2];
    let yaw = dx.atan2(dz);
    let pitch = -dy.atan2((dx * dx + dz * dz).sqrt());

    let (sy, cy) = (yaw * 0.5).sin_cos();
    let (sp, cp) = (pitch * 0.5).sin_cos();
    [cy * sp, sy * cp, -sy * sp, cy * cp]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn rotate(v: [f32; 3], q: [f32; 4]) -> [f32; 3] {
    let u = [q[0], q[1], q[2]];
    let w = q[3];
    let t = cross(u, v).map(|c| 2.0 * c);
    let ut = cross(u, t);
    [
        v[0] + w * t[0] + ut[0],
        v[1] + w * t[1] + ut[1],
        v[2] + w * t[2] + ut[2],
    ]
}

/// Named nodes plus the escort handle bindings
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: IndexMap<String, SceneNode>,
    bindings: IndexMap<TransformTarget, String>,
}

impl SceneGraph {
    /// Empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene with the four escort nodes created and bound
    pub fn with_escort_nodes() -> Self {
        let mut scene = Self::new();
        for (target, name) in [
            (TransformTarget::Guard, GUARD_NODE),
            (TransformTarget::CapturedPiece, CAPTURED_PIECE_NODE),
            (TransformTarget::DoorLeft, DOOR_LEFT_NODE),
            (TransformTarget::DoorRight, DOOR_RIGHT_NODE),
        ] {
            scene.add_node(name, SceneNode::default());
            scene.bind(target, name);
        }
        scene
    }

    /// Insert or replace a node
    pub fn add_node(&mut self, name: impl Into<String>, node: SceneNode) {
        self.nodes.insert(name.into(), node);
    }

    /// Route a handle to a node
    pub fn bind(&mut self, target: TransformTarget, name: impl Into<String>) {
        self.bindings.insert(target, name.into());
    }

    /// Mark a node mounted or not; returns false if it does not exist
    pub fn set_attached(&mut self, name: &str, attached: bool) -> bool {
        match self.nodes.get_mut(name) {
            Some(node) => {
                node.attached = attached;
                true
            }
            None => false,
        }
    }

    /// Unmount a node
    pub fn detach(&mut self, name: &str) -> bool {
        self.set_attached(name, false)
    }

    /// Node by name
    pub fn node(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.get(name)
    }

    /// Node bound to a handle
    pub fn node_for(&self, target: TransformTarget) -> Option<&SceneNode> {
        self.bindings.get(&target).and_then(|name| self.nodes.get(name))
    }

    fn node_for_mut(&mut self, target: TransformTarget) -> Option<&mut SceneNode> {
        let name = self.bindings.get(&target)?;
        self.nodes.get_mut(name)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &SceneNode)> {
        self.nodes.iter().map(|(name, node)| (name.as_str(), node))
    }
}

impl TransformSink for SceneGraph {
    fn is_bound(&self, target: TransformTarget) -> bool {
        self.node_for(target).is_some_and(|node| node.attached)
    }

    fn apply(&mut self, command: &TransformCommand) {
        let Some(node) = self.node_for_mut(command.target()) else {
            tracing::warn!("No node bound for {}", command.target().name());
            return;
        };
        match *command {
            TransformCommand::SetPosition { position, .. } => node.position = position,
            TransformCommand::LookAt { point, .. } => node.rotation = look_rotation(node.position, point),
            TransformCommand::SetRotationY { radians, .. } => node.rotation = rotation_y(radians),
            TransformCommand::SetVisible { visible, .. } => node.visible = visible,
        }
    }
}
