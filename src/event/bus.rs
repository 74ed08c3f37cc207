use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::event::{EditorEvent, EventHandler};

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Broadcasts editor events to registered handlers.
///
/// Events emitted while a dispatch is running are queued and delivered in
/// order once the current event has reached every handler.
pub struct EventBus {
    handlers: RefCell<Vec<(Subscription, Box<dyn EventHandler>)>>,
    queued: RefCell<VecDeque<EditorEvent>>,
    dispatching: Cell<bool>,
    next_id: Cell<u64>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handler_count())
            .field("queued", &self.queued.borrow().len())
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            queued: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
            next_id: Cell::new(0),
        }
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) -> Subscription {
        let id = Subscription(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, handler));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(id, _)| *id != subscription);
        handlers.len() != before
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn emit(&self, event: EditorEvent) {
        log::trace!("event: {:?}", event);
        self.queued.borrow_mut().push_back(event);
        if self.dispatching.replace(true) {
            return;
        }
        loop {
            let Some(event) = self.queued.borrow_mut().pop_front() else {
                break;
            };
            for (_, handler) in self.handlers.borrow_mut().iter_mut() {
                handler.handle_event(&event);
            }
        }
        self.dispatching.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventLog;

    #[test]
    fn unsubscribed_handlers_stop_receiving() {
        let bus = EventBus::new();
        let kept = EventLog::new();
        let dropped = EventLog::new();
        bus.subscribe(kept.handler());
        let id = bus.subscribe(dropped.handler());

        bus.emit(EditorEvent::CanvasCleared);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(EditorEvent::CanvasCleared);

        assert_eq!(kept.events().len(), 2);
        assert_eq!(dropped.events().len(), 1);
        assert_eq!(bus.handler_count(), 1);

        kept.clear();
        bus.emit(EditorEvent::CanvasCleared);
        assert_eq!(kept.events(), vec![EditorEvent::CanvasCleared]);
    }
}
