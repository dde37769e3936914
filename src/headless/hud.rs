use std::cell::RefCell;
use std::rc::Rc;

use crate::collaborators::{Hud, HudRectangle, WidgetId};

/// In-memory HUD keeping widgets in draw order.
#[derive(Default)]
pub struct Overlay {
    widgets: Vec<(WidgetId, HudRectangle)>,
    next_id: usize,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl Hud for Overlay {
    fn add_widget(&mut self, widget: HudRectangle) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        self.widgets.push((id, widget));
        id
    }

    fn remove_widget(&mut self, id: WidgetId) -> Option<HudRectangle> {
        let position = self.widgets.iter().position(|(w, _)| *w == id)?;
        Some(self.widgets.remove(position).1)
    }

    fn widgets(&self) -> Vec<WidgetId> {
        self.widgets.iter().map(|(id, _)| *id).collect()
    }

    fn widget(&self, id: WidgetId) -> Option<&HudRectangle> {
        self.widgets
            .iter()
            .find(|(w, _)| *w == id)
            .map(|(_, widget)| widget)
    }

    fn widget_mut(&mut self, id: WidgetId) -> Option<&mut HudRectangle> {
        self.widgets
            .iter_mut()
            .find(|(w, _)| *w == id)
            .map(|(_, widget)| widget)
    }
}
