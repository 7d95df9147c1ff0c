//! Provider-level constants

use std::time::Duration;

/// Default HTTP timeout for provider requests
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Default Ollama server URL
pub const OLLAMA_DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default Ollama embedding model
pub const OLLAMA_DEFAULT_MODEL: &str = "nomic-embed-text";

/// Default MediaWiki API endpoint for the Wikipedia article source
pub const WIKIPEDIA_DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// JSON content type header value
pub const CONTENT_TYPE_JSON: &str = "application/json";
