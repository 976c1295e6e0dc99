use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Resolved environment configuration for the Vertex AI client.
///
/// `project_id` may be absent here; the service falls back to the project
/// recorded in the service account key.
#[derive(Debug, Clone)]
pub struct VertexConfig {
    pub project_id: Option<String>,
    pub location: String,
    pub credentials_path: PathBuf,
}

impl VertexConfig {
    pub fn from_env() -> Result<Self> {
        let location = env::var("LOCATION")
            .map_err(|_| anyhow::anyhow!("LOCATION environment variable not set"))?;

        let credentials_path = resolve_credentials_path()?;

        Ok(Self {
            project_id: env::var("PROJECT_ID").ok().filter(|v| !v.is_empty()),
            location,
            credentials_path,
        })
    }
}

// Inline key material takes precedence over an ambient key path. The raw
// JSON is written to a fixed location under the system temp directory so
// the rest of the process sees an ordinary key file.
fn resolve_credentials_path() -> Result<PathBuf> {
    if let Ok(inline) = env::var("GOOGLE_APPLICATION_CREDENTIALS_JSON") {
        if !inline.is_empty() {
            let path = env::temp_dir().join("service_account_key.json");
            fs::write(&path, inline).with_context(|| {
                format!("failed to write service account key to {}", path.display())
            })?;
            log::info!("Service account key written to {}", path.display());
            return Ok(path);
        }
    }

    let path = env::var("GOOGLE_APPLICATION_CREDENTIALS").map_err(|_| {
        anyhow::anyhow!(
            "neither GOOGLE_APPLICATION_CREDENTIALS_JSON nor GOOGLE_APPLICATION_CREDENTIALS is set"
        )
    })?;
    Ok(PathBuf::from(path))
}
