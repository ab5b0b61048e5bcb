use crate::{
    input::events::{ControllerEvent, ControllerEventKind},
    prelude::HashMap,
};
use std::collections::VecDeque;

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&ControllerEvent) + Send + Sync>;

/// Event management system for the controller
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event kind
    listeners: HashMap<ControllerEventKind, Vec<EventCallback>>,
    /// Event queue for processing
    event_queue: VecDeque<ControllerEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, kind: ControllerEventKind, callback: F)
    where
        F: Fn(&ControllerEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(kind)
            .or_default()
            .push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: ControllerEvent) {
        self.event_queue.push_back(event);
    }

    /// Process all queued events, notifying listeners in emission order
    pub fn process_events(&mut self) -> Vec<ControllerEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(&event.kind()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    pub fn listener_count(&self, kind: ControllerEventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("listeners", &self.listeners.len())
            .field("pending", &self.event_queue.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Coordinate;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[test]
    fn test_listeners_receive_matching_events() {
        let mut manager = EventManager::new();
        let moves = Arc::new(AtomicUsize::new(0));
        let failures = Arc::new(AtomicUsize::new(0));

        let counter = moves.clone();
        manager.on(ControllerEventKind::LocationChanged, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = failures.clone();
        manager.on(ControllerEventKind::Failed, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        manager.emit(ControllerEvent::LocationChanged {
            location: Coordinate::new(10.0, 20.0),
            zoom: 15.0,
        });
        manager.emit(ControllerEvent::LocationChanged {
            location: Coordinate::new(11.0, 21.0),
            zoom: 15.0,
        });
        assert_eq!(moves.load(Ordering::SeqCst), 0);

        let processed = manager.process_events();
        assert_eq!(processed.len(), 2);
        assert!(manager.process_events().is_empty());
        assert_eq!(moves.load(Ordering::SeqCst), 2);
        assert_eq!(failures.load(Ordering::SeqCst), 0);
        assert_eq!(manager.listener_count(ControllerEventKind::Failed), 1);
        assert_eq!(manager.listener_count(ControllerEventKind::AlertCompleted), 0);
    }
}
