//! View-model for the two intake forms.
//!
//! The real UI tree is a projection of these types; nothing in here touches
//! the network. Layout:
//! - `visibility.rs`: category-driven show/required derivation
//! - `persons.rs`: per-traveler sub-form rendering and typed recovery
//! - `submit.rs`: the busy guard around the submit control
//! - `nav.rs`: single-active section switcher

pub mod nav;
pub mod persons;
pub mod submit;
pub mod visibility;

pub use nav::SectionNav;
pub use persons::{PersonBlock, PersonForm, person_count, person_field, render_person_blocks};
pub use submit::{BusyGuard, SubmitButton};
pub use visibility::{VisaFormState, VisaFormUi};
