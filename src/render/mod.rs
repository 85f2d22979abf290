//! Rendering of lookup and calculation results as text

pub mod text;

pub use text::{damage_range, details_lines, percent_range, DamageReport, MOVE_PLACEHOLDER};
