//! Core types and validation for the contract trigger simulator.

pub mod error;
pub mod limits;
pub mod trigger;

pub use error::{Error, Result};
pub use trigger::*;
