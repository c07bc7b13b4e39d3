use async_trait::async_trait;
use serde_json::Value;
use std::{collections::BTreeMap, convert::TryFrom, fmt::Debug};

use crate::{
    Config,
    endpoint::{EndpointDescriptor, Payload},
    error::{ProviderError, Result},
    executor::RapidApiClient,
    provider::weather::WeatherProvider,
    registry::EndpointRegistry,
};

pub mod weather;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Weather,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Weather => "weather",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Weather]
    }

    /// Endpoint table of the service; needs no credentials.
    pub fn registry(&self) -> EndpointRegistry {
        match self {
            ProviderId::Weather => weather::weather_registry(),
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "weather" => Ok(ProviderId::Weather),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: {}.",
                supported_services()
            )),
        }
    }
}

fn supported_services() -> String {
    ProviderId::all().iter().map(ProviderId::as_str).collect::<Vec<_>>().join(", ")
}

/// A remote service exposed as a table of named endpoints.
#[async_trait]
pub trait DataProvider: Send + Sync + Debug {
    fn service_name(&self) -> &'static str;

    fn registry(&self) -> &EndpointRegistry;

    /// Call the endpoint registered under `route_name` with `payload` as-is.
    async fn call_endpoint(&self, route_name: &str, payload: &Payload) -> Result<Value>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn DataProvider>> {
    if !config.is_configured() {
        return Err(anyhow::anyhow!(
            "No RapidAPI key configured for provider '{id}'.\n\
             Hint: run `rapid-weather configure` or set RAPID_API_KEY."
        ));
    }

    let client = RapidApiClient::from_config(config)?;

    let boxed: Box<dyn DataProvider> = match id {
        ProviderId::Weather => Box::new(WeatherProvider::new(client)),
    };

    Ok(boxed)
}

/// Catalog of data providers keyed by service name.
#[derive(Debug, Default)]
pub struct DataProviders {
    providers: BTreeMap<String, Box<dyn DataProvider>>,
}

impl DataProviders {
    pub fn new(providers: impl IntoIterator<Item = Box<dyn DataProvider>>) -> Self {
        let providers = providers
            .into_iter()
            .map(|p| (p.service_name().to_string(), p))
            .collect();

        Self { providers }
    }

    /// Every known service, built from one shared config.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let providers = ProviderId::all()
            .iter()
            .map(|id| provider_from_config(*id, config))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self::new(providers))
    }

    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn provider(&self, service: &str) -> Result<&dyn DataProvider> {
        self.providers
            .get(&service.to_lowercase())
            .map(|p| &**p)
            .ok_or_else(|| {
                ProviderError::UnknownService(
                    service.to_string(),
                    self.services().collect::<Vec<_>>().join(", "),
                )
            })
    }

    pub fn endpoints(&self, service: &str) -> Result<&BTreeMap<String, EndpointDescriptor>> {
        Ok(self.provider(service)?.registry().endpoints())
    }

    /// Dispatch a call by service and endpoint name.
    ///
    /// Unknown services and endpoints fail before any request is sent.
    pub async fn call(&self, service: &str, route_name: &str, payload: &Payload) -> Result<Value> {
        let provider = self.provider(service)?;
        provider.registry().resolve(route_name)?;

        tracing::info!(
            service = provider.service_name(),
            route = route_name,
            "dispatching data provider call"
        );

        provider.call_endpoint(route_name, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn registry_matches_built_provider() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(ProviderId::Weather, &cfg).expect("provider");
        assert_eq!(&ProviderId::Weather.registry(), provider.registry());
    }

    #[test]
    fn provider_id_is_case_insensitive() {
        assert_eq!(ProviderId::try_from("Weather").unwrap(), ProviderId::Weather);
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("doesnotexist").unwrap_err();
        let msg = err.to_string();

        assert!(msg.contains("Unknown provider"));
        assert!(msg.contains("weather"));
    }

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(ProviderId::Weather, &cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No RapidAPI key configured"));
        assert!(msg.contains("Hint: run `rapid-weather configure`"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(ProviderId::Weather, &cfg).expect("provider");
        assert_eq!(provider.service_name(), "weather");
    }

    #[test]
    fn catalog_lists_endpoints_by_service() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let providers = DataProviders::from_config(&cfg).expect("catalog");

        assert_eq!(providers.services().collect::<Vec<_>>(), vec!["weather"]);
        let endpoints = providers.endpoints("WEATHER").expect("weather endpoints");
        assert!(endpoints.contains_key("current_weather"));
    }

    #[test]
    fn catalog_rejects_unknown_service() {
        let providers = DataProviders::default();
        let err = providers.endpoints("zillow").unwrap_err();

        assert!(matches!(err, ProviderError::UnknownService(ref name, _) if name == "zillow"));
    }

    #[tokio::test]
    async fn catalog_rejects_unknown_route_before_sending() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());
        let providers = DataProviders::from_config(&cfg).expect("catalog");

        let err = providers.call("weather", "forecast", &Payload::new()).await.unwrap_err();

        assert!(matches!(err, ProviderError::UnknownEndpoint { ref name, .. } if name == "forecast"));
    }
}
