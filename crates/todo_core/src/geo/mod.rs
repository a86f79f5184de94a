//! Map-screen helpers: coordinates, route planning and location watching.
//!
//! # Responsibility
//! - Keep the small amount of map logic independent of any maps SDK.
//! - Model location watching as a subscription token released exactly once.
//!
//! # Invariants
//! - Coordinates are finite and within latitude/longitude ranges.
//! - A subscription's release hook runs at most once.

pub mod location;
pub mod route;
pub mod watch;
