use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;

use crate::collaborators::SharedAnimator;
use crate::lesson::config::LessonConfig;
use crate::lesson::context::LessonContext;

/// Data shared by every state of one lesson instance.
pub struct OperatingData {
    id: Uuid,
    context: LessonContext,
    config: LessonConfig,
    humanoid_animator: RefCell<Option<SharedAnimator>>,
}

impl OperatingData {
    pub fn new(context: LessonContext, config: LessonConfig) -> Rc<Self> {
        Rc::new(Self {
            id: Uuid::new_v4(),
            context,
            config,
            humanoid_animator: RefCell::new(None),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn context(&self) -> &LessonContext {
        &self.context
    }

    pub fn config(&self) -> &LessonConfig {
        &self.config
    }

    pub fn set_humanoid_animator(&self, animator: SharedAnimator) {
        *self.humanoid_animator.borrow_mut() = Some(animator);
    }

    pub fn humanoid_animator(&self) -> Option<SharedAnimator> {
        self.humanoid_animator.borrow().clone()
    }
}
