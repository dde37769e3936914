use crate::collaborators::{
    CameraControllerFactory, LoaderFactory, SharedHud, SharedPointerInput, SharedScene,
};

/// Handles to the rendering context a lesson runs in.
#[derive(Clone)]
pub struct LessonContext {
    pub scene: SharedScene,
    pub hud: SharedHud,
    pub pointer: SharedPointerInput,
    pub loaders: LoaderFactory,
    pub cameras: CameraControllerFactory,
}

impl LessonContext {
    pub fn new(
        scene: SharedScene,
        hud: SharedHud,
        pointer: SharedPointerInput,
        loaders: LoaderFactory,
        cameras: CameraControllerFactory,
    ) -> Self {
        Self {
            scene,
            hud,
            pointer,
            loaders,
            cameras,
        }
    }
}
