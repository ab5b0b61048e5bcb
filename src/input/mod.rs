pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{ControllerEvent, ControllerEventKind, EventHandled, UiEvent};
pub use handler::{EventCallback, EventManager};
