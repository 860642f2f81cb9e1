use thiserror::Error;

/// Errors that can occur during recipe import operations
#[derive(Error, Debug)]
pub enum ImportError {
    /// The remote document could not be retrieved (network failure, timeout, non-2xx)
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The supplied URL is not an absolute http(s) URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The document was loaded but carries no JSON-LD script elements
    #[error("The page contains no recipe metadata")]
    NoMetadataFound,

    /// One JSON-LD node failed to parse. Logged and skipped, never returned by the selector.
    #[error("Malformed JSON-LD in metadata node {index}: {source}")]
    MalformedNodeJson {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Every node and candidate was scanned without finding a valid Recipe
    #[error("Unable to extract Recipe metadata from {nodes} metadata node(s)")]
    NoRecipeFound { nodes: usize },

    /// An instruction element carries an unrecognized `@type`
    #[error("Invalid step type at instruction {index}{}", section_suffix(.section))]
    InvalidStepType {
        index: usize,
        section: Option<String>,
    },

    /// Error talking to the pantry service
    #[error("Pantry service error: {0}")]
    Pantry(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error (reading HTML input)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn section_suffix(section: &Option<String>) -> String {
    section
        .as_ref()
        .map(|name| format!(" in section '{name}'"))
        .unwrap_or_default()
}

impl ImportError {
    pub(crate) fn fetch(url: &str, source: reqwest::Error) -> Self {
        ImportError::Fetch {
            url: url.to_string(),
            source,
        }
    }
}
