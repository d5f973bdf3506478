use crate::form::persons::{PersonBlock, render_person_blocks};
use crate::types::VisaCategory;

/// Mutable inputs of the visa form that the controller owns: the category
/// selector plus the two schengen-only inputs and the rendered blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct VisaFormState {
    pub category: Option<VisaCategory>,
    pub region: String,
    pub person_count: String,
    pub persons: Vec<PersonBlock>,
}

impl Default for VisaFormState {
    fn default() -> Self {
        Self {
            category: None,
            region: String::new(),
            person_count: "1".to_string(),
            persons: Vec::new(),
        }
    }
}

/// Show/required projection of the form. Derived from scratch on every call
/// so no flag can survive a category switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisaFormUi {
    pub show_requirements: bool,
    pub show_schengen_section: bool,
    pub show_schengen_notes: bool,
    pub show_russian_section: bool,
    pub show_region: bool,
    pub show_person_count: bool,
    pub show_person_blocks: bool,

    pub passport_required: bool,
    pub region_required: bool,
    pub person_count_required: bool,
    pub personal_photo_required: bool,
    // The three extra schengen documents stay optional in every state, but
    // the flags are part of the projection so the UI never has to remember.
    pub id_doc_required: bool,
    pub family_card_required: bool,
    pub old_schengen_required: bool,
}

pub fn derive_ui(category: Option<VisaCategory>) -> VisaFormUi {
    let mut ui = VisaFormUi {
        show_requirements: category.is_some(),
        passport_required: category.is_some(),
        ..VisaFormUi::default()
    };
    match category {
        Some(VisaCategory::Schengen) => {
            ui.show_schengen_section = true;
            ui.show_schengen_notes = true;
            ui.show_region = true;
            ui.show_person_count = true;
            ui.show_person_blocks = true;
            ui.region_required = true;
            ui.person_count_required = true;
        }
        Some(VisaCategory::Russian) => {
            ui.show_russian_section = true;
            ui.personal_photo_required = true;
        }
        None => {}
    }
    ui
}

impl VisaFormState {
    /// Category transition. Schengen re-renders the traveler blocks; russian
    /// hides and clears the schengen-only inputs entirely.
    pub fn set_category(&mut self, category: Option<VisaCategory>) {
        self.category = category;
        match category {
            Some(VisaCategory::Schengen) => {
                self.persons = render_person_blocks(&self.person_count);
            }
            Some(VisaCategory::Russian) => {
                self.region.clear();
                self.person_count = "1".to_string();
                self.persons.clear();
            }
            None => {}
        }
    }

    /// Person-count input change: values below 1 are rewritten to "1"
    /// before the blocks are re-rendered.
    pub fn set_person_count(&mut self, raw: &str) {
        if raw.trim().parse::<i64>().is_ok_and(|n| n < 1) {
            self.person_count = "1".to_string();
        } else {
            self.person_count = raw.to_string();
        }
        if self.category == Some(VisaCategory::Schengen) {
            self.persons = render_person_blocks(&self.person_count);
        }
    }

    pub fn ui(&self) -> VisaFormUi {
        derive_ui(self.category)
    }

    /// Back to the pristine state after a successful submission.
    pub fn reset(&mut self) {
        *self = VisaFormState::default();
    }
}
