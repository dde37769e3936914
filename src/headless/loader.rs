use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::collaborators::{
    AssetLoader, LoadObserver, LoaderFactory, LoaderId, Material, MaterialId, NodeId,
    SceneNode, SharedScene,
};

/// One mesh of a model and the material it is drawn with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshPart {
    pub name: String,
    pub material: String,
}

impl MeshPart {
    pub fn new(name: impl Into<String>, material: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            material: material.into(),
        }
    }
}

/// Loader that "streams" a fixed manifest of mesh parts over a set time.
///
/// Progress is elapsed time over `duration_ms`. Once it reaches 1 the parts
/// are added under the container node and the observer hears about
/// completion exactly once.
pub struct TimedLoader {
    id: LoaderId,
    scene: SharedScene,
    container: NodeId,
    observer: Option<Rc<dyn LoadObserver>>,
    auto_merge: bool,
    request: Option<String>,
    parts: Vec<MeshPart>,
    duration_ms: f64,
    elapsed_ms: f64,
    completed: bool,
}

impl TimedLoader {
    pub fn new(
        id: LoaderId,
        scene: SharedScene,
        container: NodeId,
        parts: Vec<MeshPart>,
        duration_ms: f64,
    ) -> Self {
        Self {
            id,
            scene,
            container,
            observer: None,
            auto_merge: false,
            request: None,
            parts,
            duration_ms,
            elapsed_ms: 0.0,
            completed: false,
        }
    }

    /// Path of the queued model, if any.
    pub fn request(&self) -> Option<&str> {
        self.request.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn is_auto_merging(&self) -> bool {
        self.auto_merge
    }

    fn materialize(&self) {
        let mut scene = self.scene.borrow_mut();

        let mut materials: BTreeMap<&str, MaterialId> = BTreeMap::new();
        for part in &self.parts {
            if !materials.contains_key(part.material.as_str()) {
                let id = scene.add_material(Material::new(part.material.as_str()));
                materials.insert(part.material.as_str(), id);
            }
        }

        let meshes: Vec<SceneNode> = if self.auto_merge {
            materials
                .iter()
                .map(|(name, id)| SceneNode::mesh(*name, *id))
                .collect()
        } else {
            self.parts
                .iter()
                .filter_map(|part| {
                    materials
                        .get(part.material.as_str())
                        .map(|id| SceneNode::mesh(part.name.as_str(), *id))
                })
                .collect()
        };

        match scene.child_mut(self.container) {
            Some(container) => {
                debug!(loader = self.id.0, meshes = meshes.len(), "Model added to scene");
                container.children.extend(meshes);
            }
            None => warn!(loader = self.id.0, "Container node is gone, model discarded"),
        }
    }
}

impl AssetLoader for TimedLoader {
    fn id(&self) -> LoaderId {
        self.id
    }

    fn set_observer(&mut self, observer: Rc<dyn LoadObserver>) {
        self.observer = Some(observer);
    }

    fn clear_observer(&mut self) {
        self.observer = None;
    }

    fn enable_auto_merge_by_material(&mut self) {
        self.auto_merge = true;
    }

    fn load_obj(&mut self, directory: &str, file: &str) {
        self.request = Some(format!("{directory}{file}"));
        self.elapsed_ms = 0.0;
        self.completed = false;
    }

    fn update(&mut self, delta_ms: f64) {
        if self.completed || self.request.is_none() {
            return;
        }

        self.elapsed_ms += delta_ms.max(0.0);
        let progress = self.total_progress();

        if progress >= 1.0 {
            self.materialize();
            self.completed = true;
        }

        // The scene borrow is released before observers run.
        if let Some(observer) = self.observer.clone() {
            observer.on_load_progress(self.id, progress);
            if self.completed {
                observer.on_load_completed(self.id);
            }
        }
    }

    fn total_progress(&self) -> f32 {
        if self.request.is_none() {
            return 0.0;
        }
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).min(1.0) as f32
    }
}

/// Factory producing [`TimedLoader`]s with sequential ids.
pub fn timed_loader_factory(parts: Vec<MeshPart>, duration_ms: f64) -> LoaderFactory {
    let next_id = Cell::new(0u64);
    Rc::new(move |scene: SharedScene, container: NodeId| {
        let id = next_id.get();
        next_id.set(id + 1);
        let loader: Box<dyn AssetLoader> = Box::new(TimedLoader::new(
            LoaderId(id),
            scene,
            container,
            parts.clone(),
            duration_ms,
        ));
        loader
    })
}
