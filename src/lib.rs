//! dexcalc - Creature lookup and damage range calculator

pub mod api;
pub mod calc;
pub mod core;
pub mod debounce;
pub mod render;
pub mod session;
pub mod ui;
