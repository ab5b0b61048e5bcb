pub mod elements;
pub mod render;
pub mod traits;
pub mod widget;

#[cfg(feature = "wasm")]
pub mod dom;
#[cfg(feature = "wasm")]
pub mod mapbox;

pub use traits::{MapWidget, UiSurface};

pub use elements::{BarState, BarStyle, ChannelElements, ElementIds, HeadlessUi, MessageTone};

pub use widget::HeadlessMap;

#[cfg(feature = "wasm")]
pub use dom::DomSurface;
#[cfg(feature = "wasm")]
pub use mapbox::MapboxWidget;
