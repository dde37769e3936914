//! Scene interface: child nodes, lights, materials, camera and visibility.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::camera::Camera;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub usize);

/// Whether an object still holds graphics resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resources {
    #[default]
    Live,
    Released,
}

/// A node in the scene: a named transform with optional geometry and
/// owned children.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub transform: Mat4,
    pub material: Option<MaterialId>,
    pub children: Vec<SceneNode>,
    resources: Resources,
}

impl SceneNode {
    /// Empty container node.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Mat4::IDENTITY,
            material: None,
            children: Vec::new(),
            resources: Resources::Live,
        }
    }

    /// Geometry node drawn with `material`.
    pub fn mesh(name: impl Into<String>, material: MaterialId) -> Self {
        Self {
            material: Some(material),
            ..Self::group(name)
        }
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Release this node's resources and those of all its descendants.
    pub fn release_resources(&mut self) {
        self.resources = Resources::Released;
        for child in &mut self.children {
            child.release_resources();
        }
    }

    pub fn resources(&self) -> Resources {
        self.resources
    }

    /// Number of nodes in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(SceneNode::subtree_len).sum::<usize>()
    }
}

/// Point light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
}

impl Light {
    pub fn at(position: Vec3) -> Self {
        Self { position }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    resources: Resources,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: Resources::Live,
        }
    }

    pub fn release_resources(&mut self) {
        self.resources = Resources::Released;
    }

    pub fn resources(&self) -> Resources {
        self.resources
    }
}

/// The 3D scene owned by the rendering context.
///
/// Enumeration methods return snapshots; callers tearing the scene down
/// re-query after every removal.
pub trait Scene {
    fn add_child(&mut self, node: SceneNode) -> NodeId;

    /// Ids of the scene's top-level children.
    fn children(&self) -> Vec<NodeId>;

    fn child_mut(&mut self, id: NodeId) -> Option<&mut SceneNode>;

    /// Detach a top-level child, returning it.
    fn remove_child(&mut self, id: NodeId) -> Option<SceneNode>;

    fn add_light(&mut self, light: Light);

    /// Remove the light at `index`. `None` once no light exists there.
    fn remove_light(&mut self, index: usize) -> Option<Light>;

    fn light_count(&self) -> usize;

    fn add_material(&mut self, material: Material) -> MaterialId;

    fn materials(&self) -> Vec<MaterialId>;

    fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material>;

    fn remove_material(&mut self, id: MaterialId) -> Option<Material>;

    fn camera(&self) -> &Camera;

    fn camera_mut(&mut self) -> &mut Camera;

    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;
}
