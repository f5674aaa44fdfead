//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the presentation layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `TickerFeed`: Read-only access to live feed snapshots

pub mod ticker_feed;
