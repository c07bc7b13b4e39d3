use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::{endpoint::Payload, error::Result, registry::EndpointRegistry};

pub mod rapidapi;

pub use rapidapi::RapidApiClient;

/// Performs the HTTP call behind a logical endpoint name.
///
/// Implementations own authentication, transport and decoding. Providers only
/// hand over their registry, the endpoint name and the caller's payload.
#[async_trait]
pub trait RequestExecutor: Send + Sync + Debug {
    async fn call_endpoint(
        &self,
        registry: &EndpointRegistry,
        route_name: &str,
        payload: &Payload,
    ) -> Result<Value>;
}

