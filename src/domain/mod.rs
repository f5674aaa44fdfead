//! Domain layer - Pure ticker state, normalization, and formatting.
//!
//! This module contains the pure logic of the ticker demo.
//! No transport or terminal dependencies allowed here (hexagonal
//! architecture inner ring). All types are testable in isolation.

pub mod format;
pub mod normalize;
pub mod snapshot;

// Re-export core types for convenience
pub use format::{format_price, format_timestamp, PLACEHOLDER};
pub use normalize::normalize_frame;
pub use snapshot::{FeedSnapshot, FeedStatus, TickUpdate, TimestampValue};
