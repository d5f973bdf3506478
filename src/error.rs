use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum IntakeError {
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("only JPG/PNG/WEBP/GIF images or PDF files are accepted (got {0})")]
    UnsupportedFileType(String),

    #[error("file {name} is {size} bytes; the limit is {limit} bytes")]
    FileTooLarge {
        name: String,
        size: usize,
        limit: usize,
    },

    #[error("choose a visa type first")]
    MissingCategory,

    #[error("unknown visa type: {0}")]
    UnknownCategory(String),

    #[error("backend rejected {context} with status {status}: {message}")]
    Backend {
        context: &'static str,
        status: u16,
        message: String,
    },

    #[error("insert into {0} returned no generated id")]
    MissingGeneratedId(&'static str),
}
