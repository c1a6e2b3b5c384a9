//! Homework entry parsing
//!
//! Extracts the review status of a single homework entry and renders the
//! notification text for it.

pub mod status;

pub use status::{parse_homework, parse_status};
