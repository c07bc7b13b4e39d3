//! Core library for the `rapid-weather` data provider.
//!
//! This crate defines:
//! - Endpoint descriptors and the per-service endpoint registry
//! - The request executor that talks to RapidAPI
//! - The weather provider and the service catalog
//! - Configuration & credentials handling
//!
//! It is used by `weather-provider-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod executor;
pub mod provider;
pub mod registry;

pub use config::Config;
pub use endpoint::{EndpointDescriptor, HttpMethod, Payload, PayloadSchema};
pub use error::ProviderError;
pub use executor::{RapidApiClient, RequestExecutor};
pub use provider::{
    DataProvider, DataProviders, ProviderId, provider_from_config,
    weather::{CurrentWeatherQuery, WeatherProvider},
};
pub use registry::EndpointRegistry;
