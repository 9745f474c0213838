use serde::{Deserialize, Serialize};

/// Client configuration for reaching the dashboard backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the REST backend, without a trailing slash.
    pub api_base_url: String,

    /// Optional bearer token sent with every request.
    /// The library only carries the string; obtaining and storing it
    /// is the caller's concern.
    pub api_token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            api_token: None,
        }
    }
}
