use figment::Figment;
use figment::providers::Env;
use serde::Deserialize;
use url::Url;

use crate::error::IntakeError;

/// Runtime configuration, extracted from `INTAKE_`-prefixed environment
/// variables. The backend URL and anon key have no defaults on purpose:
/// a missing endpoint must abort before any upload or insert is attempted.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub supabase_url: Url,
    pub supabase_anon_key: String,
    pub bucket: String,
    #[serde(default = "default_email_function")]
    pub email_function: String,
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

fn default_email_function() -> String {
    "email-notify".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}

impl Config {
    pub fn load() -> Result<Self, IntakeError> {
        let cfg = Figment::new()
            .merge(Env::prefixed("INTAKE_"))
            .extract::<Config>()?;
        Ok(cfg)
    }
}
