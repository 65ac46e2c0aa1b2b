//! Target Trail History
//!
//! This module stores the recent position history of each target, used by
//! renderers for a fading-path effect.
//!
//! # Features
//!
//! - Fixed capacity per trail, oldest sample evicted first
//! - Samples kept in chronological order
//! - Capacity can be changed between ticks without losing the newest samples
//!
//! # Example
//!
//! ```rust
//! use sonar_core::trails::{Trail, TrailPoint};
//!
//! let mut trail = Trail::new(2);
//! trail.push(TrailPoint::new(1.0, 300.0));
//! trail.push(TrailPoint::new(2.0, 310.0));
//! trail.push(TrailPoint::new(3.0, 320.0));
//!
//! assert_eq!(trail.len(), 2);
//! assert_eq!(trail.oldest().map(|p| p.angle), Some(2.0));
//! ```

mod history;

pub use history::*;
