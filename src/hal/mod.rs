//! Concrete implementations of the traits in [`crate::traits`].
//!
//! # Available Implementations
//!
//! - `mock`: Test doubles for the clock, directory and display

pub mod mock;

pub use mock::*;
