use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::*;

pub const WCA_URL: &str = "https://www.worldcubeassociation.org";

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("request to the registry failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("registry answered {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("registry sent a document that is not WCIF: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("registry refused the request: {0}")]
    Api(String),
}

/// Read-only access to the public WCIF endpoints of a WCA registry.
#[derive(Debug, Clone)]
pub struct Registry {
    base_url: String,
    client: Client
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new(WCA_URL)
    }
}

impl Registry {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new()
        }
    }

    pub fn wcif_url(&self, id: &str) -> String {
        format!("{}/api/v0/competitions/{}/wcif/public", self.base_url, id)
    }

    pub async fn get_wcif_api(&self, id: &str) -> Result<String, RegistryError> {
        let url = self.wcif_url(id);
        debug!(%url, "fetching wcif");
        let response = self.client
            .get(&url)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RegistryError::Status { url, status: response.status().as_u16() });
        }
        Ok(response.text().await?)
    }

    pub async fn get_wcif(&self, id: &str) -> WcifResult {
        let json = self.get_wcif_api(id).await?;
        parse(&json)
    }

    /// Downloads the avatar thumbnail, falling back to the full size image when the thumbnail is missing.
    pub async fn get_avatar(&self, avatar: &Avatar) -> Result<Vec<u8>, RegistryError> {
        let thumb = self.client.get(&avatar.thumb_url).send().await?;
        let response = if thumb.status().is_success() {
            thumb
        }
        else {
            let full = self.client.get(&avatar.url).send().await?;
            if !full.status().is_success() {
                return Err(RegistryError::Status { url: avatar.url.clone(), status: full.status().as_u16() });
            }
            full
        };
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod test {
    use super::Registry;

    #[test]
    fn wcif_url_ignores_trailing_slash() {
        let registry = Registry::new("https://staging.example.org/");
        assert_eq!(registry.wcif_url("NordicOpen2024"), "https://staging.example.org/api/v0/competitions/NordicOpen2024/wcif/public");
    }

    #[tokio::test]
    async fn unreachable_registry_is_an_error() {
        let registry = Registry::new("http://127.0.0.1:9");
        assert!(registry.get_wcif("NordicOpen2024").await.is_err());
    }
}
