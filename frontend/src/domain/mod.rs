//! # Domain Module
//!
//! Business rules of the port agency back office that do not depend on the
//! network: typed records, the certificate and birthday date rules, form
//! state, client-side validation and list filtering.
//!
//! ## Module Organization
//!
//! - **models**: Typed customer, vendor, vessel, port call, user and message records
//! - **sscec**: Sanitation certificate expiry arithmetic and status buckets
//! - **birthday**: Upcoming birthday reminders for contacts and staff
//! - **forms**: Editable state for the nested company/PIC and vessel editors
//! - **validation**: Checks that block a submit before any request is made
//! - **filter**: Search box and status filters over loaded lists

pub mod birthday;
pub mod filter;
pub mod forms;
pub mod models;
pub mod sscec;
pub mod validation;

pub use birthday::*;
pub use filter::*;
pub use forms::*;
pub use sscec::*;
pub use validation::*;
