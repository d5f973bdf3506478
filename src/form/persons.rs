use crate::types::{Address, FormFields, MaritalStatus, PriorSchengen};

/// Typed per-traveler record, recovered from the flat field map by index.
/// Missing text fields default to "" (the backend columns accept them);
/// the two proof documents are read separately as files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonForm {
    pub full_name: String,
    pub marital_status: Option<MaritalStatus>,
    pub personal_email: String,
    pub work_email: String,
    pub work_phone: String,
    pub job_title: String,
    pub sector: String,
    pub had_schengen: Option<PriorSchengen>,
    pub national_address: Address,
    pub work_address: Address,
}

/// One rendered per-traveler sub-form. `index` is 0-based; the UI shows
/// "person N" with N = index + 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonBlock {
    pub index: usize,
    pub form: PersonForm,
}

/// Field key for person `index`, e.g. `person_0_full_name`. This naming is
/// the only place the traveler index is string-encoded; both the renderer
/// and the orchestrator go through it.
pub fn person_field(index: usize, purpose: &str) -> String {
    format!("person_{index}_{purpose}")
}

/// Declared traveler count: `max(1, parsed)`. "0", "", and garbage all
/// yield 1.
pub fn person_count(raw: &str) -> usize {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n >= 1)
        .unwrap_or(1) as usize
}

/// Destroy-and-regenerate rendering: always returns exactly
/// `person_count(raw)` fresh blocks. Values previously entered in any block
/// are discarded, which is accepted data loss on re-render.
pub fn render_person_blocks(raw_count: &str) -> Vec<PersonBlock> {
    (0..person_count(raw_count))
        .map(|index| PersonBlock {
            index,
            form: PersonForm::default(),
        })
        .collect()
}

impl PersonForm {
    fn address_from_fields(fields: &FormFields, index: usize, prefix: &str) -> Address {
        let get = |suffix: &str| {
            fields
                .text(&person_field(index, &format!("{prefix}_{suffix}")))
                .to_string()
        };
        Address {
            city: get("city"),
            district: get("district"),
            street: get("street"),
            postal_code: get("postal_code"),
            building_no: get("building_no"),
            additional_no: get("additional_no"),
        }
    }

    /// Recover the typed record for traveler `index` from the serialized
    /// form surface.
    pub fn from_fields(fields: &FormFields, index: usize) -> Self {
        let text = |purpose: &str| fields.text(&person_field(index, purpose)).to_string();
        PersonForm {
            full_name: text("full_name"),
            marital_status: MaritalStatus::parse(fields.text(&person_field(index, "marital_status"))),
            personal_email: text("personal_email"),
            work_email: text("work_email"),
            work_phone: text("work_phone"),
            job_title: text("job_title"),
            sector: text("sector"),
            had_schengen: PriorSchengen::parse(fields.text(&person_field(index, "had_schengen"))),
            national_address: Self::address_from_fields(fields, index, "na"),
            work_address: Self::address_from_fields(fields, index, "work"),
        }
    }
}
