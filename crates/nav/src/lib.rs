//! DroidWeb navigation core
//!
//! This crate owns everything the browser chrome needs to answer "where are
//! we, and what happens when the user types something": the linear history
//! stack, free-text vs URL classification, the search-engine registry, the
//! demo-media fixture, and the controller tying them together.
//!
//! It is deliberately UI-free so the state machine can be tested without an
//! event loop.

pub mod controller;
pub mod engines;
pub mod history;
pub mod media;
pub mod resolve;

// Re-export the main controller and the types the application works with
pub use controller::{LoadStatus, LoadTicket, NavigationController, LOAD_LATENCY};
pub use engines::{engine_by_name, SearchEngine, SEARCH_ENGINES};
pub use history::HistoryStack;
pub use media::{detect_media, VideoResource, DEMO_VIDEO_TITLE, DEMO_VIDEO_URL};
pub use resolve::{classify, resolve_input, InputKind, HOME_URL};
