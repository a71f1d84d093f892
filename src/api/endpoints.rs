//! Endpoint URLs derived from the configured base URL.

use url::Url;

use crate::error::Result;

/// Fixed set of API endpoints, resolved once per client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
    validate: String,
    datasets: String,
    manual: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self> {
        // Parse to reject malformed bases up front.
        Url::parse(base_url)?;
        let base = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            validate: format!("{}/api/keyValidate.do", base),
            datasets: format!("{}/info/dataset.do", base),
            manual: format!("{}/info/api.do", base),
            base,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn validate(&self) -> &str {
        &self.validate
    }

    pub fn datasets(&self) -> &str {
        &self.datasets
    }

    pub fn manual(&self) -> &str {
        &self.manual
    }

    /// File tree of one dataset.
    pub fn filetree(&self, dataset_key: &str) -> String {
        format!("{}/info/{}.do", self.base, dataset_key)
    }

    /// Archive download for one dataset. The file selector goes in `fileSn`.
    pub fn download(&self, dataset_key: &str) -> String {
        format!("{}/down/0.5/{}.do", self.base, dataset_key)
    }
}
