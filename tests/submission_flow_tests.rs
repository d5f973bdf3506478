use std::sync::Mutex;

use serde_json::{Value, json};

use travel_intake::backend::IntakeBackend;
use travel_intake::error::IntakeError;
use travel_intake::form::{SubmitButton, VisaFormState, person_field};
use travel_intake::orchestrator::{Orchestrator, SubmissionKind};
use travel_intake::types::{FormFields, UploadFile, VisaCategory};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Upload { path: String },
    Insert { table: &'static str, rows: Vec<Value> },
    Invoke { function: String, body: Value },
}

/// Recording stand-in for the hosted backend. Inserts hand out sequential
/// ids; individual surfaces can be switched to fail.
#[derive(Default)]
struct MockBackend {
    ops: Mutex<Vec<Op>>,
    next_id: Mutex<i64>,
    insert_failure: Mutex<Option<&'static str>>,
    invoke_failure: Mutex<bool>,
}

impl MockBackend {
    fn ops(&self) -> Vec<Op> {
        self.ops.lock().unwrap().clone()
    }

    fn fail_insert_into(&self, table: &'static str) {
        *self.insert_failure.lock().unwrap() = Some(table);
    }

    fn fail_invoke(&self) {
        *self.invoke_failure.lock().unwrap() = true;
    }

    fn inserted_rows(&self, table: &'static str) -> Vec<Vec<Value>> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Insert { table: t, rows } if t == table => Some(rows),
                _ => None,
            })
            .collect()
    }

    fn backend_error(context: &'static str) -> IntakeError {
        IntakeError::Backend {
            context,
            status: 500,
            message: "simulated failure".to_string(),
        }
    }
}

impl IntakeBackend for &MockBackend {
    async fn upload_object(
        &self,
        path: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<(), IntakeError> {
        self.ops.lock().unwrap().push(Op::Upload {
            path: path.to_string(),
        });
        Ok(())
    }

    async fn insert_returning_id(
        &self,
        table: &'static str,
        row: &Value,
    ) -> Result<i64, IntakeError> {
        if *self.insert_failure.lock().unwrap() == Some(table) {
            return Err(MockBackend::backend_error("row insert"));
        }
        self.ops.lock().unwrap().push(Op::Insert {
            table,
            rows: vec![row.clone()],
        });
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        Ok(*next)
    }

    async fn insert_rows(&self, table: &'static str, rows: &[Value]) -> Result<(), IntakeError> {
        if *self.insert_failure.lock().unwrap() == Some(table) {
            return Err(MockBackend::backend_error("batch insert"));
        }
        self.ops.lock().unwrap().push(Op::Insert {
            table,
            rows: rows.to_vec(),
        });
        Ok(())
    }

    async fn invoke_function(&self, name: &str, body: &Value) -> Result<Value, IntakeError> {
        if *self.invoke_failure.lock().unwrap() {
            return Err(MockBackend::backend_error("function invoke"));
        }
        self.ops.lock().unwrap().push(Op::Invoke {
            function: name.to_string(),
            body: body.clone(),
        });
        Ok(Value::Null)
    }
}

fn pdf(name: &str) -> UploadFile {
    UploadFile {
        name: name.to_string(),
        content_type: "application/pdf".to_string(),
        bytes: vec![0x25, 0x50, 0x44, 0x46],
    }
}

fn russian_fields() -> FormFields {
    let mut fields = FormFields::new();
    fields.set_text("visa_type", "russian");
    fields.set_text("contact_phone", "0501112222");
    fields.set_text("travel_date", "2026-10-01");
    fields.set_file("passport", pdf("passport scan.pdf"));
    fields
}

fn schengen_fields(count: &str) -> FormFields {
    let mut fields = FormFields::new();
    fields.set_text("visa_type", "schengen");
    fields.set_text("contact_phone", "0501112222");
    fields.set_text("travel_date", "2026-10-01");
    fields.set_text("region", "Riyadh");
    fields.set_text("num_persons", count);
    fields.set_file("passport", pdf("passport.pdf"));
    for i in 0..2 {
        fields.set_text(person_field(i, "full_name"), format!("Traveler {i}"));
        fields.set_text(person_field(i, "marital_status"), "single");
        fields.set_text(person_field(i, "personal_email"), "me@example.com");
        fields.set_text(person_field(i, "work_email"), "work@example.com");
        fields.set_text(person_field(i, "work_phone"), "0112223333");
        fields.set_text(person_field(i, "job_title"), "Engineer");
        fields.set_text(person_field(i, "sector"), "Education");
        fields.set_text(person_field(i, "had_schengen"), "no");
        fields.set_text(person_field(i, "na_city"), "Riyadh");
    }
    fields.set_file(person_field(0, "na_proof"), pdf("na proof.pdf"));
    fields
}

#[tokio::test]
async fn russian_flow_inserts_request_with_null_photo_and_notifies() {
    let backend = MockBackend::default();
    let orchestrator = Orchestrator::new(&backend, "email-notify");
    let mut fields = russian_fields();
    let mut view = VisaFormState::default();
    view.set_category(Some(VisaCategory::Russian));
    let mut button = SubmitButton::new("Send");

    let receipt = orchestrator
        .submit_visa(&mut fields, &mut view, &mut button)
        .await
        .expect("russian submission should succeed");

    assert_eq!(receipt.kind, SubmissionKind::RussianVisa);

    let inserts = backend.inserted_rows("visa_requests");
    assert_eq!(inserts.len(), 1);
    let row = &inserts[0][0];
    assert_eq!(row["visa_type"], "russian");
    assert!(row["personal_photo_path"].is_null());
    let passport_path = row["passport_path"].as_str().expect("passport path");
    assert!(passport_path.starts_with("visa/russian/passport/"));
    assert!(passport_path.ends_with("-passport_scan.pdf"));

    let ops = backend.ops();
    assert!(ops.contains(&Op::Invoke {
        function: "email-notify".to_string(),
        body: json!({ "visa_request_id": receipt.id }),
    }));

    // form reset after success
    assert!(fields.is_empty());
    assert_eq!(view, VisaFormState::default());
    assert!(button.enabled);
    assert_eq!(button.label, "Send");
}

#[tokio::test]
async fn schengen_flow_inserts_one_request_and_two_persons() {
    let backend = MockBackend::default();
    let orchestrator = Orchestrator::new(&backend, "email-notify");
    let mut fields = schengen_fields("2");
    let mut view = VisaFormState::default();
    let mut button = SubmitButton::new("Send");

    let receipt = orchestrator
        .submit_visa(&mut fields, &mut view, &mut button)
        .await
        .expect("schengen submission should succeed");

    let requests = backend.inserted_rows("visa_requests");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0][0]["num_persons"], 2);
    assert_eq!(requests[0][0]["region"], "Riyadh");

    let persons = backend.inserted_rows("visa_persons");
    assert_eq!(persons.len(), 1, "person rows go in as one batch");
    let rows = &persons[0];
    assert_eq!(rows.len(), 2);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row["visa_request_id"], receipt.id);
        assert_eq!(row["person_index"], (i + 1) as i64);
        assert_eq!(row["full_name"], format!("Traveler {i}"));
    }

    // person 1's proof landed under the parent id's namespace
    assert_eq!(
        rows[0]["na_proof_path"]
            .as_str()
            .map(|p| p.starts_with(&format!(
                "visa/schengen/request_{}/person_1/national_address_proof/",
                receipt.id
            ))),
        Some(true)
    );
    assert!(rows[1]["na_proof_path"].is_null());
}

#[tokio::test]
async fn schengen_request_insert_precedes_all_person_work() {
    let backend = MockBackend::default();
    let orchestrator = Orchestrator::new(&backend, "email-notify");
    let mut fields = schengen_fields("2");
    let mut view = VisaFormState::default();
    let mut button = SubmitButton::new("Send");

    orchestrator
        .submit_visa(&mut fields, &mut view, &mut button)
        .await
        .expect("schengen submission should succeed");

    let ops = backend.ops();
    let request_insert = ops
        .iter()
        .position(|op| matches!(op, Op::Insert { table, .. } if *table == "visa_requests"))
        .expect("request insert recorded");
    let first_person_op = ops
        .iter()
        .position(|op| match op {
            Op::Upload { path } => path.contains("/person_"),
            Op::Insert { table, .. } => *table == "visa_persons",
            Op::Invoke { .. } => false,
        })
        .expect("person work recorded");
    assert!(request_insert < first_person_op);
}

#[tokio::test]
async fn failed_request_insert_aborts_before_any_person_rows() {
    let backend = MockBackend::default();
    backend.fail_insert_into("visa_requests");
    let orchestrator = Orchestrator::new(&backend, "email-notify");
    let mut fields = schengen_fields("2");
    let mut view = VisaFormState::default();
    let mut button = SubmitButton::new("Send");

    let err = orchestrator
        .submit_visa(&mut fields, &mut view, &mut button)
        .await
        .expect_err("insert failure must surface");

    assert!(matches!(err, IntakeError::Backend { .. }));
    assert!(backend.inserted_rows("visa_persons").is_empty());
    assert!(
        !backend
            .ops()
            .iter()
            .any(|op| matches!(op, Op::Invoke { .. }))
    );
    // error path keeps the entered data and releases the submit lock
    assert!(!fields.is_empty());
    assert!(button.enabled);
    assert_eq!(button.label, "Send");
}

#[tokio::test]
async fn package_flow_parses_numbers_leniently() {
    let backend = MockBackend::default();
    let orchestrator = Orchestrator::new(&backend, "email-notify");
    let mut fields = FormFields::new();
    fields.set_text("destination", "Georgia");
    fields.set_text("adults", "3");
    fields.set_text("children", "");
    fields.set_text("budget", "abc");
    fields.set_text("package_phone", "0509998888");
    let mut button = SubmitButton::new("Send");

    let receipt = orchestrator
        .submit_package(&mut fields, &mut button)
        .await
        .expect("package submission should succeed");

    assert_eq!(receipt.kind, SubmissionKind::Package);
    let inserts = backend.inserted_rows("trip_packages");
    assert_eq!(inserts.len(), 1);
    let row = &inserts[0][0];
    assert_eq!(row["adults"], 3);
    assert_eq!(row["children"], 0);
    assert_eq!(row["infants"], 0);
    assert_eq!(row["budget"], 0.0);

    let ops = backend.ops();
    assert!(ops.contains(&Op::Invoke {
        function: "email-notify".to_string(),
        body: json!({ "type": "package", "trip_package_id": receipt.id }),
    }));
    assert!(fields.is_empty());
}

#[tokio::test]
async fn disallowed_file_is_rejected_before_any_backend_call() {
    let backend = MockBackend::default();
    let orchestrator = Orchestrator::new(&backend, "email-notify");
    let mut fields = russian_fields();
    fields.set_file(
        "passport",
        UploadFile {
            name: "malware.exe".to_string(),
            content_type: "application/x-msdownload".to_string(),
            bytes: vec![0x4d, 0x5a],
        },
    );
    let mut view = VisaFormState::default();
    let mut button = SubmitButton::new("Send");

    let err = orchestrator
        .submit_visa(&mut fields, &mut view, &mut button)
        .await
        .expect_err("bad file type must be rejected");

    assert!(matches!(err, IntakeError::UnsupportedFileType(_)));
    assert!(backend.ops().is_empty(), "no network call may happen");
    assert!(button.enabled);
}

#[tokio::test]
async fn missing_category_is_rejected_up_front() {
    let backend = MockBackend::default();
    let orchestrator = Orchestrator::new(&backend, "email-notify");
    let mut fields = FormFields::new();
    let mut view = VisaFormState::default();
    let mut button = SubmitButton::new("Send");

    let err = orchestrator
        .submit_visa(&mut fields, &mut view, &mut button)
        .await
        .expect_err("missing category must be rejected");

    assert!(matches!(err, IntakeError::MissingCategory));
    assert!(backend.ops().is_empty());
}

#[tokio::test]
async fn notification_failure_surfaces_after_rows_are_persisted() {
    let backend = MockBackend::default();
    backend.fail_invoke();
    let orchestrator = Orchestrator::new(&backend, "email-notify");
    let mut fields = russian_fields();
    let mut view = VisaFormState::default();
    let mut button = SubmitButton::new("Send");

    let err = orchestrator
        .submit_visa(&mut fields, &mut view, &mut button)
        .await
        .expect_err("notify failure must surface");

    assert!(matches!(err, IntakeError::Backend { .. }));
    // the request row is already persisted; it is not rolled back
    assert_eq!(backend.inserted_rows("visa_requests").len(), 1);
    assert!(!fields.is_empty());
    assert!(button.enabled);
}
