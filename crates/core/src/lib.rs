//! Domain types shared by the plan_vision backend and client crates.

pub mod error;
pub mod generation;
pub mod style;
pub mod types;
