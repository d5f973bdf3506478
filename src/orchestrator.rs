use serde_json::Value;
use tracing::{info, warn};

use crate::backend::IntakeBackend;
use crate::error::IntakeError;
use crate::form::{BusyGuard, PersonForm, SubmitButton, VisaFormState, person_count, person_field};
use crate::notify;
use crate::types::{
    FormFields, NewTripPackage, NewVisaPerson, NewVisaRequest, VisaCategory,
};
use crate::upload::upload;

const BUSY_LABEL: &str = "Sending...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    RussianVisa,
    SchengenVisa,
    Package,
}

/// Outcome of a successful submission: which flow ran and the id the
/// backend generated for the parent row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub kind: SubmissionKind,
    pub id: i64,
}

/// Sequences each flow: uploads, then the parent insert, then dependent
/// rows, then the email trigger. Strictly sequential; any failure aborts
/// the rest of the flow and earlier side effects stay as they are.
pub struct Orchestrator<B: IntakeBackend> {
    backend: B,
    email_function: String,
}

impl<B: IntakeBackend> Orchestrator<B> {
    pub fn new(backend: B, email_function: impl Into<String>) -> Self {
        Self {
            backend,
            email_function: email_function.into(),
        }
    }

    /// Visa form submission, dispatching on the selected category. The
    /// submit control is locked for the duration and released on every
    /// exit path. On success the fields and view state are reset.
    pub async fn submit_visa(
        &self,
        fields: &mut FormFields,
        view: &mut VisaFormState,
        button: &mut SubmitButton,
    ) -> Result<SubmissionReceipt, IntakeError> {
        let _busy = BusyGuard::hold(button, BUSY_LABEL);

        let raw_category = fields.text("visa_type");
        if raw_category.is_empty() {
            return Err(IntakeError::MissingCategory);
        }
        let category: VisaCategory = raw_category.parse()?;

        let result = match category {
            VisaCategory::Russian => self.submit_russian(fields).await,
            VisaCategory::Schengen => self.submit_schengen(fields).await,
        };
        let receipt = result.inspect_err(|e| {
            warn!(category = %category, error = %e, "visa submission failed");
        })?;

        fields.clear();
        view.reset();
        info!(id = receipt.id, category = %category, "visa submission complete");
        Ok(receipt)
    }

    /// Russian flow: two independent uploads (either file may be absent),
    /// one request row, one email.
    async fn submit_russian(&self, fields: &FormFields) -> Result<SubmissionReceipt, IntakeError> {
        let passport_path = upload(
            &self.backend,
            fields.file("passport"),
            "visa/russian/passport",
        )
        .await?;
        let personal_photo_path = upload(
            &self.backend,
            fields.file("personal_photo"),
            "visa/russian/photo",
        )
        .await?;

        let request = NewVisaRequest {
            visa_type: VisaCategory::Russian,
            contact_phone: fields.text("contact_phone").to_string(),
            travel_date: fields.text("travel_date").to_string(),
            region: None,
            num_persons: None,
            passport_path,
            id_path: None,
            family_card_path: None,
            old_schengen_path: None,
            personal_photo_path,
        };
        let id = self
            .backend
            .insert_returning_id("visa_requests", &serde_json::to_value(&request)?)
            .await?;

        notify::notify_visa(&self.backend, &self.email_function, id).await?;
        Ok(SubmissionReceipt {
            kind: SubmissionKind::RussianVisa,
            id,
        })
    }

    /// Schengen flow. The request insert must complete and yield an id
    /// before any per-person work starts: person upload paths and the
    /// foreign key both derive from it. Person uploads run one traveler at
    /// a time; person rows go in as a single batch.
    async fn submit_schengen(&self, fields: &FormFields) -> Result<SubmissionReceipt, IntakeError> {
        let count = person_count(fields.text("num_persons"));
        let persons: Vec<PersonForm> = (0..count)
            .map(|i| PersonForm::from_fields(fields, i))
            .collect();

        let passport_path = upload(
            &self.backend,
            fields.file("passport"),
            "visa/schengen/request/passport",
        )
        .await?;
        let id_path = upload(
            &self.backend,
            fields.file("id_document"),
            "visa/schengen/request/id",
        )
        .await?;
        let family_card_path = upload(
            &self.backend,
            fields.file("family_card"),
            "visa/schengen/request/family",
        )
        .await?;
        let old_schengen_path = upload(
            &self.backend,
            fields.file("old_schengen"),
            "visa/schengen/request/old_schengen",
        )
        .await?;

        let request = NewVisaRequest {
            visa_type: VisaCategory::Schengen,
            contact_phone: fields.text("contact_phone").to_string(),
            travel_date: fields.text("travel_date").to_string(),
            region: Some(fields.text("region").to_string()),
            num_persons: Some(count as i64),
            passport_path,
            id_path,
            family_card_path,
            old_schengen_path,
            personal_photo_path: None,
        };
        let request_id = self
            .backend
            .insert_returning_id("visa_requests", &serde_json::to_value(&request)?)
            .await?;
        info!(request_id, persons = count, "visa request stored");

        let mut rows: Vec<Value> = Vec::with_capacity(count);
        for (i, person) in persons.into_iter().enumerate() {
            let person_no = i + 1;
            let na_proof_path = upload(
                &self.backend,
                fields.file(&person_field(i, "na_proof")),
                &format!("visa/schengen/request_{request_id}/person_{person_no}/national_address_proof"),
            )
            .await?;
            let work_proof_path = upload(
                &self.backend,
                fields.file(&person_field(i, "work_proof")),
                &format!("visa/schengen/request_{request_id}/person_{person_no}/work_address_proof"),
            )
            .await?;

            let row = NewVisaPerson {
                visa_request_id: request_id,
                person_index: person_no as i64,
                full_name: person.full_name,
                marital_status: person.marital_status,
                personal_email: person.personal_email,
                work_email: person.work_email,
                work_phone: person.work_phone,
                job_title: person.job_title,
                sector: person.sector,
                had_schengen: person.had_schengen,
                na_city: person.national_address.city,
                na_district: person.national_address.district,
                na_street: person.national_address.street,
                na_postal_code: person.national_address.postal_code,
                na_building_no: person.national_address.building_no,
                na_additional_no: person.national_address.additional_no,
                na_proof_path,
                work_city: person.work_address.city,
                work_district: person.work_address.district,
                work_street: person.work_address.street,
                work_postal_code: person.work_address.postal_code,
                work_building_no: person.work_address.building_no,
                work_additional_no: person.work_address.additional_no,
                work_proof_path,
            };
            rows.push(serde_json::to_value(&row)?);
        }
        self.backend.insert_rows("visa_persons", &rows).await?;

        notify::notify_visa(&self.backend, &self.email_function, request_id).await?;
        Ok(SubmissionReceipt {
            kind: SubmissionKind::SchengenVisa,
            id: request_id,
        })
    }

    /// Package inquiry: numeric fields parse leniently (ints default 0,
    /// budget defaults 0.0), one row, one tagged email.
    pub async fn submit_package(
        &self,
        fields: &mut FormFields,
        button: &mut SubmitButton,
    ) -> Result<SubmissionReceipt, IntakeError> {
        let _busy = BusyGuard::hold(button, BUSY_LABEL);

        let row = NewTripPackage {
            destination: fields.text("destination").to_string(),
            adults: fields.int_or("adults", 0),
            children: fields.int_or("children", 0),
            infants: fields.int_or("infants", 0),
            departure_airport: fields.text("departure_airport").to_string(),
            budget: fields.float_or("budget", 0.0),
            special_requests: fields.text("special_requests").to_string(),
            contact_phone: fields.text("package_phone").to_string(),
        };

        let result = async {
            let id = self
                .backend
                .insert_returning_id("trip_packages", &serde_json::to_value(&row)?)
                .await?;
            notify::notify_package(&self.backend, &self.email_function, id).await?;
            Ok::<i64, IntakeError>(id)
        }
        .await;
        let id = result.inspect_err(|e| warn!(error = %e, "package submission failed"))?;

        fields.clear();
        info!(id, "package inquiry complete");
        Ok(SubmissionReceipt {
            kind: SubmissionKind::Package,
            id,
        })
    }
}
