pub mod backend;
pub mod config;
pub mod error;
pub mod form;
pub mod notify;
pub mod orchestrator;
pub mod types;
pub mod upload;

pub use backend::IntakeBackend;
pub use backend::supabase::SupabaseBackend;
pub use error::IntakeError;
pub use orchestrator::Orchestrator;
