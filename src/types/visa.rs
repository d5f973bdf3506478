use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IntakeError;

/// Top-level visa type selector. Governs which fields are shown, which are
/// required, and which flow the orchestrator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisaCategory {
    Schengen,
    Russian,
}

impl fmt::Display for VisaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisaCategory::Schengen => f.write_str("schengen"),
            VisaCategory::Russian => f.write_str("russian"),
        }
    }
}

impl FromStr for VisaCategory {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "schengen" => Ok(VisaCategory::Schengen),
            "russian" => Ok(VisaCategory::Russian),
            other => Err(IntakeError::UnknownCategory(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
}

impl MaritalStatus {
    /// Lenient parse at the form boundary: anything unrecognised is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "single" => Some(MaritalStatus::Single),
            "married" => Some(MaritalStatus::Married),
            "divorced" => Some(MaritalStatus::Divorced),
            _ => None,
        }
    }
}

/// Whether the traveler held a Schengen visa before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorSchengen {
    Yes,
    No,
}

impl PriorSchengen {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "yes" => Some(PriorSchengen::Yes),
            "no" => Some(PriorSchengen::No),
            _ => None,
        }
    }
}

/// One postal address block, national or work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub district: String,
    pub street: String,
    pub postal_code: String,
    pub building_no: String,
    pub additional_no: String,
}

/// Row payload for `visa_requests`. Schengen-only fields are `None` for
/// russian submissions and vice versa; the backend generates the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVisaRequest {
    pub visa_type: VisaCategory,
    pub contact_phone: String,
    pub travel_date: String,
    pub region: Option<String>,
    pub num_persons: Option<i64>,
    pub passport_path: Option<String>,
    pub id_path: Option<String>,
    pub family_card_path: Option<String>,
    pub old_schengen_path: Option<String>,
    pub personal_photo_path: Option<String>,
}

/// Row payload for `visa_persons`. Built only after the parent request id
/// exists; `person_index` is 1-based and unique within a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVisaPerson {
    pub visa_request_id: i64,
    pub person_index: i64,

    pub full_name: String,
    pub marital_status: Option<MaritalStatus>,
    pub personal_email: String,
    pub work_email: String,
    pub work_phone: String,
    pub job_title: String,
    pub sector: String,
    pub had_schengen: Option<PriorSchengen>,

    pub na_city: String,
    pub na_district: String,
    pub na_street: String,
    pub na_postal_code: String,
    pub na_building_no: String,
    pub na_additional_no: String,
    pub na_proof_path: Option<String>,

    pub work_city: String,
    pub work_district: String,
    pub work_street: String,
    pub work_postal_code: String,
    pub work_building_no: String,
    pub work_additional_no: String,
    pub work_proof_path: Option<String>,
}
