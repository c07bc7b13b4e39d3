use std::collections::BTreeMap;

use crate::{
    endpoint::EndpointDescriptor,
    error::{ProviderError, Result},
};

/// Fixed table of endpoint descriptors plus the base URL of the remote service.
///
/// Immutable once built, so one registry can be shared between tasks freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRegistry {
    base_url: String,
    endpoints: BTreeMap<String, EndpointDescriptor>,
}

impl EndpointRegistry {
    pub fn new(
        base_url: impl Into<String>,
        endpoints: BTreeMap<String, EndpointDescriptor>,
    ) -> Self {
        Self { base_url: base_url.into(), endpoints }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoints(&self) -> &BTreeMap<String, EndpointDescriptor> {
        &self.endpoints
    }

    pub fn get(&self, name: &str) -> Option<&EndpointDescriptor> {
        self.endpoints.get(name)
    }

    /// Look up an endpoint by its logical name.
    pub fn resolve(&self, name: &str) -> Result<&EndpointDescriptor> {
        self.endpoints.get(name).ok_or_else(|| ProviderError::UnknownEndpoint {
            name: name.to_string(),
            available: self.endpoints.keys().cloned().collect::<Vec<_>>().join(", "),
        })
    }

    /// Full request URL for a logical endpoint name.
    pub fn url_for(&self, name: &str) -> Result<String> {
        let endpoint = self.resolve(name)?;
        let base = self.base_url.trim_end_matches('/');
        let route = endpoint.route.trim_start_matches('/');
        Ok(format!("{base}/{route}"))
    }
}
