//! Load phase: streams the model in behind a progress bar.

use std::cell::Cell;
use std::rc::Rc;

use glam::{Mat4, Vec3};
use tracing::debug;

use crate::collaborators::{
    AssetLoader, DrawRect, HudRectangle, Light, LoadObserver, LoaderId, SceneNode, SharedHud,
    WidgetId,
};
use crate::core::{SignalEmitter, State};
use crate::lesson::config::WidgetStyle;
use crate::lesson::data::OperatingData;
use crate::lesson::LOAD_COMPLETE;

/// Receives loader notifications on behalf of [`LoadState`].
struct LoadTracker {
    signals: SignalEmitter,
    hud: SharedHud,
    fill: WidgetId,
    fill_rect: DrawRect,
    track_width: f32,
    threshold: u32,
    completions: Cell<u32>,
}

impl LoadObserver for LoadTracker {
    fn on_load_progress(&self, _loader: LoaderId, fraction: f32) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };

        let mut hud = self.hud.borrow_mut();
        if let Some(fill) = hud.widget_mut(self.fill) {
            fill.set_draw_rect(
                self.fill_rect.x(),
                self.fill_rect.y(),
                fraction * self.track_width,
                self.fill_rect.height(),
            );
        }
    }

    fn on_load_completed(&self, loader: LoaderId) {
        let completions = self.completions.get() + 1;
        self.completions.set(completions);
        debug!(loader = loader.0, completions, "Loader completed");

        if completions >= self.threshold {
            self.signals.fire(LOAD_COMPLETE);
        }
    }
}

/// Builds the loading HUD, loads the model and fires `loadComplete` once
/// enough loads have completed.
///
/// A loader that fails never completes, which leaves the lesson here until
/// the owner fires `exitReq`.
pub struct LoadState {
    data: Rc<OperatingData>,
    loader: Option<Box<dyn AssetLoader>>,
    tracker: Option<Rc<LoadTracker>>,
    widgets: Vec<WidgetId>,
}

impl LoadState {
    pub fn new(data: Rc<OperatingData>) -> Self {
        Self {
            data,
            loader: None,
            tracker: None,
            widgets: Vec::new(),
        }
    }

    /// Completed notifications received since the last `enter`.
    pub fn completions(&self) -> u32 {
        self.tracker
            .as_ref()
            .map_or(0, |tracker| tracker.completions.get())
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_some()
    }

    fn build_hud(&mut self) -> WidgetId {
        let config = self.data.config();
        let mut hud = self.data.context().hud.borrow_mut();

        for widget in hud.widgets() {
            hud.remove_widget(widget);
        }

        let [background, panel, track, fill] = config.progress_bar.styles();
        self.widgets = [background, panel, track]
            .iter()
            .map(|style| hud.add_widget(rectangle(style)))
            .collect();

        // The fill is drawn last.
        let fill = hud.add_widget(rectangle(&fill));
        self.widgets.push(fill);
        fill
    }
}

fn draw_rect(style: &WidgetStyle) -> DrawRect {
    DrawRect::new(style.rect.x, style.rect.y, style.rect.z, style.rect.w)
}

fn rectangle(style: &WidgetStyle) -> HudRectangle {
    HudRectangle::new()
        .with_color(style.color)
        .with_draw_rect(draw_rect(style))
}

impl State for LoadState {
    fn enter(&mut self, signals: SignalEmitter) {
        let data = Rc::clone(&self.data);
        let config = data.config();
        let context = data.context();

        let group = SceneNode::group(config.group_name.as_str())
            .with_transform(Mat4::from_scale(Vec3::splat(config.group_scale)));
        let container = context.scene.borrow_mut().add_child(group);

        let fill = self.build_hud();
        let tracker = Rc::new(LoadTracker {
            signals,
            hud: Rc::clone(&context.hud),
            fill,
            fill_rect: draw_rect(&config.progress_bar.fill),
            track_width: config.progress_bar.track_width(),
            threshold: config.completion_threshold,
            completions: Cell::new(0),
        });

        let mut loader = (context.loaders)(Rc::clone(&context.scene), container);
        loader.set_observer(tracker.clone());
        if config.auto_merge_by_material {
            loader.enable_auto_merge_by_material();
        }
        loader.load_obj(&config.asset_dir, &config.asset_file);
        debug!(
            lesson = %data.id(),
            loader = loader.id().0,
            file = %config.asset_file,
            "Loading model"
        );

        {
            let mut scene = context.scene.borrow_mut();
            scene.set_visible(false);
            let camera = scene.camera_mut();
            camera.set_look_at(config.camera.look_at);
            camera.set_up(config.camera.up);
            camera.set_eye(config.camera.eye);
        }

        self.loader = Some(loader);
        self.tracker = Some(tracker);
    }

    fn exit(&mut self) {
        if let Some(mut loader) = self.loader.take() {
            loader.clear_observer();
        }
        self.tracker = None;

        let context = self.data.context();
        {
            let mut hud = context.hud.borrow_mut();
            for widget in self.widgets.drain(..) {
                hud.remove_widget(widget);
            }
        }

        let mut scene = context.scene.borrow_mut();
        for position in &self.data.config().lights {
            scene.add_light(Light::at(*position));
        }
        scene.set_visible(true);
    }

    fn update(&mut self, delta_ms: f64) {
        if let Some(loader) = self.loader.as_mut() {
            loader.update(delta_ms);
        }
    }

    fn signals(&self) -> Vec<&str> {
        vec![LOAD_COMPLETE]
    }
}
