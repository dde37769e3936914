//! HUD interface: overlay widgets with colors and normalized rectangles.

use glam::Vec4;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(pub usize);

/// Rectangle in normalized screen space. Every component lies in `[0, 1]`.
///
/// Serialized as `[x, y, width, height]`; deserializing clamps like
/// [`DrawRect::new`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct DrawRect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl DrawRect {
    /// Build a rectangle, clamping each component into `[0, 1]`.
    ///
    /// Non-finite components become `0`.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x: unit(x),
            y: unit(y),
            width: unit(width),
            height: unit(height),
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

impl From<[f32; 4]> for DrawRect {
    fn from([x, y, width, height]: [f32; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<DrawRect> for [f32; 4] {
    fn from(rect: DrawRect) -> Self {
        [rect.x, rect.y, rect.width, rect.height]
    }
}

fn unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Flat colored rectangle drawn over the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudRectangle {
    color: Vec4,
    rect: DrawRect,
}

impl HudRectangle {
    /// Opaque white rectangle covering the whole screen.
    pub fn new() -> Self {
        Self {
            color: Vec4::ONE,
            rect: DrawRect::new(0.0, 0.0, 1.0, 1.0),
        }
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.set_color(color);
        self
    }

    pub fn with_draw_rect(mut self, rect: DrawRect) -> Self {
        self.rect = rect;
        self
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = color.clamp(Vec4::ZERO, Vec4::ONE);
    }

    pub fn set_draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.rect = DrawRect::new(x, y, width, height);
    }

    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn draw_rect(&self) -> DrawRect {
        self.rect
    }
}

impl Default for HudRectangle {
    fn default() -> Self {
        Self::new()
    }
}

/// The HUD overlay owned by the rendering context.
pub trait Hud {
    fn add_widget(&mut self, widget: HudRectangle) -> WidgetId;

    fn remove_widget(&mut self, id: WidgetId) -> Option<HudRectangle>;

    /// Ids of every widget currently shown, in draw order.
    fn widgets(&self) -> Vec<WidgetId>;

    fn widget(&self, id: WidgetId) -> Option<&HudRectangle>;

    fn widget_mut(&mut self, id: WidgetId) -> Option<&mut HudRectangle>;
}
