//! Infrastructure Layer
//!
//! Concrete implementations of the domain ports: the in-memory store, the
//! clocks and the notifier adapters.

pub mod clock;
pub mod memory;
pub mod notify;

pub use clock::{FixedClock, SystemClock};
pub use memory::MemoryStore;
pub use notify::RecordingNotifier;
