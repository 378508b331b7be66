//! Favicon URL resolution

use url::Url;

use crate::error::CoreError;
use crate::Result;

/// Maps a page URL to an icon URL. Without an endpoint the page URL itself
/// is returned so the caller can resolve a generic icon.
#[derive(Debug, Clone, Default)]
pub struct FaviconResolver {
    endpoint: Option<Url>,
    size: u32,
}

impl FaviconResolver {
    pub fn new(endpoint: Option<&str>, size: u32) -> Result<Self> {
        let endpoint = endpoint
            .map(|raw| {
                Url::parse(raw).map_err(|e| {
                    CoreError::Config(format!("Invalid favicon endpoint {raw}: {e}"))
                })
            })
            .transpose()?;

        Ok(Self { endpoint, size })
    }

    pub fn resolve(&self, page_url: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => {
                let mut icon = endpoint.clone();
                icon.query_pairs_mut()
                    .append_pair("pageUrl", page_url)
                    .append_pair("size", &self.size.to_string());
                icon.to_string()
            }
            None => page_url.to_string(),
        }
    }
}
