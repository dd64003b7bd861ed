//! Animation module for the scatter/tree morph
//!
//! Handles the per-population progress scalars, the easing applied
//! to them for display, and the user-owned mode selector.

mod easing;
mod mode;
mod progress;

pub use easing::ease_in_out_cubic;
pub use mode::ModeSelector;
pub use progress::{MorphProgress, TreeMode};
