use anyhow::bail;
use anyhow::Result;
use folio_client::BackendFactory;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendBox;

pub struct BackendManager {}

impl BackendManager {
    pub fn get() -> Result<BackendBox> {
        return BackendManager::from_url(&Config::get(ConfigKey::ApiBaseUrl));
    }

    pub fn from_url(url: &str) -> Result<BackendBox> {
        if url.trim().is_empty() {
            bail!("No API base url configured, set --api-base-url or FOLIO_API_BASE_URL");
        }

        return Ok(BackendFactory::create_http_client(url)?);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_http_backends() {
        let backend = BackendManager::from_url("http://127.0.0.1:8000/").unwrap();
        assert_eq!(backend.base_url(), "http://127.0.0.1:8000");
    }

    #[test]
    fn it_rejects_missing_or_invalid_urls() {
        assert!(BackendManager::from_url("  ").is_err());
        let err = BackendManager::from_url("127.0.0.1 8000").err().unwrap();
        assert_eq!(err.to_string(), "invalid backend base url '127.0.0.1 8000'");
    }
}
