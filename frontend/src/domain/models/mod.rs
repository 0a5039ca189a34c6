//! Typed records the screens work with.
//!
//! These are produced from the wire DTOs in `shared` by the mappers in
//! `crate::io::mappers`. Dates are real [`chrono::NaiveDate`] values here,
//! never strings; birthdays use [`crate::domain::Birthday`] so a Feb 29 survives. A record without an `id` has not been saved yet.

pub mod customer;
pub mod message;
pub mod pic;
pub mod port_call;
pub mod reference;
pub mod user;
pub mod vendor;
pub mod vessel;

pub use customer::*;
pub use message::*;
pub use pic::*;
pub use port_call::*;
pub use reference::*;
pub use user::*;
pub use vendor::*;
pub use vessel::*;
