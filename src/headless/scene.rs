use std::cell::RefCell;
use std::rc::Rc;

use slab::Slab;

use crate::collaborators::{Camera, Light, Material, MaterialId, NodeId, Scene, SceneNode};

/// In-memory scene backed by slabs.
pub struct SceneGraph {
    children: Slab<SceneNode>,
    lights: Vec<Light>,
    materials: Slab<Material>,
    camera: Camera,
    visible: bool,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            children: Slab::new(),
            lights: Vec::new(),
            materials: Slab::new(),
            camera: Camera::new(),
            visible: true,
        }
    }

    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn child(&self, id: NodeId) -> Option<&SceneNode> {
        self.children.get(id.0)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Every node in the scene, counting descendants.
    pub fn node_count(&self) -> usize {
        self.children.iter().map(|(_, n)| n.subtree_len()).sum()
    }

    pub fn find_child(&self, name: &str) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(key, _)| NodeId(key))
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for SceneGraph {
    fn add_child(&mut self, node: SceneNode) -> NodeId {
        NodeId(self.children.insert(node))
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.iter().map(|(key, _)| NodeId(key)).collect()
    }

    fn child_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.children.get_mut(id.0)
    }

    fn remove_child(&mut self, id: NodeId) -> Option<SceneNode> {
        self.children.try_remove(id.0)
    }

    fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    fn remove_light(&mut self, index: usize) -> Option<Light> {
        (index < self.lights.len()).then(|| self.lights.remove(index))
    }

    fn light_count(&self) -> usize {
        self.lights.len()
    }

    fn add_material(&mut self, material: Material) -> MaterialId {
        MaterialId(self.materials.insert(material))
    }

    fn materials(&self) -> Vec<MaterialId> {
        self.materials.iter().map(|(key, _)| MaterialId(key)).collect()
    }

    fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0)
    }

    fn remove_material(&mut self, id: MaterialId) -> Option<Material> {
        self.materials.try_remove(id.0)
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
