use std::collections::HashMap;

use log::trace;

use cohort_shared::{EventName, GameplayNotice, NoticeCategory};

/// Receives gameplay notices addressed to active remote entities.
///
/// Closures taking `&GameplayNotice` implement this trait.
pub trait NoticeHandler: Send {
    fn handle(&mut self, notice: &GameplayNotice);
}

impl<F> NoticeHandler for F
where
    F: FnMut(&GameplayNotice) + Send,
{
    fn handle(&mut self, notice: &GameplayNotice) {
        self(notice)
    }
}

/// Routes notices to handlers registered for their exact event name, then
/// to handlers registered for their category
#[derive(Default)]
pub struct HandlerRegistry {
    by_event: HashMap<EventName, Vec<Box<dyn NoticeHandler>>>,
    by_category: HashMap<NoticeCategory, Vec<Box<dyn NoticeHandler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_event<H: NoticeHandler + 'static>(&mut self, event: EventName, handler: H) {
        self.by_event
            .entry(event)
            .or_default()
            .push(Box::new(handler));
    }

    pub fn register_category<H: NoticeHandler + 'static>(
        &mut self,
        category: NoticeCategory,
        handler: H,
    ) {
        self.by_category
            .entry(category)
            .or_default()
            .push(Box::new(handler));
    }

    pub fn is_empty(&self) -> bool {
        self.by_event.is_empty() && self.by_category.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_event.clear();
        self.by_category.clear();
    }

    /// Returns how many handlers saw the notice
    pub fn dispatch(&mut self, notice: &GameplayNotice) -> usize {
        let mut handled = 0;

        if let Some(handlers) = self.by_event.get_mut(&notice.event) {
            for handler in handlers.iter_mut() {
                handler.handle(notice);
                handled += 1;
            }
        }

        if let Some(category) = notice.event.notice_category() {
            if let Some(handlers) = self.by_category.get_mut(&category) {
                for handler in handlers.iter_mut() {
                    handler.handle(notice);
                    handled += 1;
                }
            }
        }

        if handled == 0 {
            trace!("No handler for '{}' notice to {}", notice.event, notice.id);
        }
        handled
    }
}
