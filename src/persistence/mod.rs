//! Saving and loading editor state.
//!
//! - [`store`]: the [`KeyValueStore`] abstraction and an in-memory store.
//! - [`gateway`]: card list and presentation save/load with image
//!   offloading and quota fallback.
//! - [`throttle`]: save debouncing and image-result generations.

pub mod gateway;
pub mod store;
pub mod throttle;

pub use gateway::{CardGateway, IMAGE_SENTINEL, ImageKind, PresentationSummary, StoredCard};
pub use store::{KeyValueStore, MemoryStore};
pub use throttle::{ImageGenerations, SaveThrottle, Ticket};
