//! Client library of the port agency back office.
//!
//! `domain` holds the date rules, records, forms and validation that work
//! offline; `io` maps wire DTOs onto them; `services` talks to the API.

pub mod domain;
pub mod io;
pub mod services;
