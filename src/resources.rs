use log::{info, warn};

use crate::entity::CrmError;

/// Loads the organization logo at startup, from an http(s) URL or a local
/// path. Failure is non-fatal: documents simply render without the logo.
pub async fn load_logo(source: Option<&str>) -> Option<Vec<u8>> {
    let source = source?;

    let result = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_logo(source).await
    } else {
        tokio::fs::read(source)
            .await
            .map_err(|e| CrmError::ResourceLoad(e.to_string()))
    };

    match result {
        Ok(bytes) => {
            info!("Loaded organization logo ({} bytes)", bytes.len());
            Some(bytes)
        }
        Err(e) => {
            warn!("Failed to load organization logo from {}: {}", source, e);
            None
        }
    }
}

async fn fetch_logo(url: &str) -> Result<Vec<u8>, CrmError> {
    let response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| CrmError::ResourceLoad(e.to_string()))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| CrmError::ResourceLoad(e.to_string()))?;

    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_source_or_file_is_non_fatal() {
        assert_eq!(load_logo(None).await, None);
        assert_eq!(load_logo(Some("/nonexistent/logo.png")).await, None);
    }
}
