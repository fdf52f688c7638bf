//! Trellis Form
//!
//! This crate contains the serializable form types shared by every Trellis
//! wizard: the field value store that accumulates user input across pages,
//! and the per-page error map produced by validation.
//!
//! These types carry no behavior beyond reads and writes. Validation rules
//! live with the wizard definitions (`trellis-wizard`, `trellis-connect`);
//! this crate only defines what they read and what they return.

mod error_map;
mod value;
mod values;

pub use error_map::ErrorMap;
pub use value::FieldValue;
pub use values::FieldValues;
