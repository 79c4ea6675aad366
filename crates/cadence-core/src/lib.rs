//! Schedule descriptors, validation and shared calendar types.
//!
//! This crate owns everything that happens before a schedule is compiled:
//! - `descriptor` for the wire shape exchanged with the persistence/form layer
//!   and its validation into a `ValidDescriptor`
//! - `types` for rule kinds, weekday sets, ordinal positions and month sets
//! - `zone` for time zone resolution and local-time placement
//! - `config` for engine settings

pub mod config;
pub mod descriptor;
pub mod error;
pub mod types;
pub mod zone;

pub use descriptor::{Descriptor, OwnerRef, ValidDescriptor, validate};
pub use error::{CoreError, CoreResult, ValidationError, ValidationErrors};
