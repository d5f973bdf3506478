//! Typed records crossing the crate's boundaries.
//!
//! Layout:
//! - `fields.rs`: the flat key→value form surface and uploaded file payloads
//! - `visa.rs`: visa request/person rows and their enums
//! - `package.rs`: trip package rows

pub mod fields;
pub mod package;
pub mod visa;

pub use fields::{FieldValue, FormFields, UploadFile};
pub use package::NewTripPackage;
pub use visa::{
    Address, MaritalStatus, NewVisaPerson, NewVisaRequest, PriorSchengen, VisaCategory,
};
