use mimalloc::MiMalloc;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use travel_intake::Orchestrator;
use travel_intake::SupabaseBackend;
use travel_intake::config::Config;
use travel_intake::form::{SubmitButton, VisaFormState};
use travel_intake::types::FormFields;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// One serialized form submission, as captured at the UI boundary. File
/// fields carry their bytes base64-encoded.
#[derive(Debug, Deserialize)]
#[serde(tag = "form", rename_all = "lowercase")]
enum Submission {
    Visa { fields: FormFields },
    Package { fields: FormFields },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        supabase_url = %cfg.supabase_url,
        bucket = %cfg.bucket,
        email_function = %cfg.email_function,
        "intake pipeline starting"
    );

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: travel-intake <submission.json>")?;
    let raw = std::fs::read_to_string(&path)?;
    let submission: Submission = serde_json::from_str(&raw)?;

    let backend = SupabaseBackend::new(&cfg)?;
    let orchestrator = Orchestrator::new(backend, cfg.email_function.clone());
    let mut button = SubmitButton::new("Send");

    match submission {
        Submission::Visa { mut fields } => {
            let mut view = VisaFormState::default();
            let receipt = orchestrator
                .submit_visa(&mut fields, &mut view, &mut button)
                .await?;
            info!(id = receipt.id, "visa request submitted");
        }
        Submission::Package { mut fields } => {
            let receipt = orchestrator.submit_package(&mut fields, &mut button).await?;
            info!(id = receipt.id, "package inquiry submitted");
        }
    }

    Ok(())
}
