//! Asset loader interface and its observer capability.

use serde::{Deserialize, Serialize};
use std::rc::Rc;

use super::scene::NodeId;
use super::SharedScene;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoaderId(pub u64);

/// Receives progress from an [`AssetLoader`].
///
/// There is no failure callback: a loader that fails simply never reports
/// completion.
pub trait LoadObserver {
    /// `fraction` is the loader's overall completion in `[0, 1]`.
    fn on_load_progress(&self, loader: LoaderId, fraction: f32);

    fn on_load_completed(&self, loader: LoaderId);
}

/// Loads model files into a scene, polled once per frame.
pub trait AssetLoader {
    fn id(&self) -> LoaderId;

    fn set_observer(&mut self, observer: Rc<dyn LoadObserver>);

    fn clear_observer(&mut self);

    /// Merge loaded geometry into one node per material.
    fn enable_auto_merge_by_material(&mut self);

    /// Queue `file` from `directory` for loading.
    fn load_obj(&mut self, directory: &str, file: &str);

    /// Make incremental progress.
    fn update(&mut self, delta_ms: f64);

    /// Overall completion in `[0, 1]`.
    fn total_progress(&self) -> f32;
}

/// Creates a loader that fills `container` inside `scene`.
pub type LoaderFactory = Rc<dyn Fn(SharedScene, NodeId) -> Box<dyn AssetLoader>>;
