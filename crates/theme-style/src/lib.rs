//! Style-sheet production for Adaptive Theme
//!
//! This crate turns raw style mappings into compiled, cached style sheets:
//!
//! - [`color`] - Hex to `rgba()` conversion offered to style producers
//! - [`scaling`] - Allow-listed, per-axis scaling of numeric style values
//! - [`fingerprint`] - Order-insensitive content digests used as cache keys
//! - [`compiler`] - The style-sheet compilation collaborator
//! - [`cache`] - Per-consumer memoization of compiled sheets by theme name

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod color;
pub mod compiler;
pub mod fingerprint;
pub mod scaling;

pub use cache::{CacheStats, StyleSheetCache};
pub use color::{hex_to_rgba, parse_hex, ColorError, ColorUtils};
pub use compiler::{CompiledStyles, JsonStyleCompiler, StyleCompiler};
pub use fingerprint::{Fingerprint, ScaleKey};
pub use scaling::{apply_scale, scale_value, Axis, ScaleRules};
