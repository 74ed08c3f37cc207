mod bus;
mod events;

pub use bus::{EventBus, Subscription};
pub use events::EditorEvent;

pub trait EventHandler {
    fn handle_event(&mut self, event: &EditorEvent);
}

/// Handler that keeps every event it sees
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: std::rc::Rc<std::cell::RefCell<Vec<EditorEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler sharing this log's storage, to subscribe on a bus
    pub fn handler(&self) -> Box<dyn EventHandler> {
        Box::new(self.clone())
    }

    pub fn events(&self) -> Vec<EditorEvent> {
        self.events.borrow().clone()
    }

    pub fn last(&self) -> Option<EditorEvent> {
        self.events.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EventHandler for EventLog {
    fn handle_event(&mut self, event: &EditorEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
