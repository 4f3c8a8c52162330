//! Synthetic parallax view generation.
//!
//! Each view re-projects the source image horizontally by a per-pixel
//! shift proportional to depth, simulating a lateral camera move: closer
//! pixels travel further. Depth is normalized by the fixed 8-bit ceiling
//! here (not by the field maximum) — the two conventions are deliberately
//! distinct, see `dibr_core::DepthMap`.

mod shift;
mod warp;

pub use shift::{perspective_scale, shift_map, ShiftPolicy};
pub use warp::{synthesize_view, synthesize_views, SynthesizedView, ViewError, ViewParams};
