//! # IO Module
//!
//! Boundary between the wire format of the back-office API and the typed
//! records in [`crate::domain`]. Nothing outside this module looks at a DTO
//! field directly.

pub mod mappers;
