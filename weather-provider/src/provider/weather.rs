//! RapidAPI "weather-api167" service.
//!
//! <https://rapidapi.com/maruf111/api/weather-api167>

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::{
    Config,
    endpoint::{EndpointDescriptor, Payload},
    error::Result,
    executor::{RapidApiClient, RequestExecutor},
    registry::EndpointRegistry,
};

use super::DataProvider;

pub const BASE_URL: &str = "https://weather-api167.p.rapidapi.com";

/// Logical name of the current-conditions endpoint.
pub const CURRENT_WEATHER: &str = "current_weather";

/// Weather data provider backed by a [`RequestExecutor`].
///
/// Holds only the static endpoint table; every call is forwarded to the
/// executor untouched.
#[derive(Debug, Clone)]
pub struct WeatherProvider<E = RapidApiClient> {
    registry: EndpointRegistry,
    executor: E,
}

impl<E: RequestExecutor> WeatherProvider<E> {
    pub fn new(executor: E) -> Self {
        Self { registry: weather_registry(), executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub async fn current_weather(&self, query: &CurrentWeatherQuery) -> Result<Value> {
        self.executor
            .call_endpoint(&self.registry, CURRENT_WEATHER, &query.to_payload())
            .await
    }
}

impl WeatherProvider<RapidApiClient> {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(RapidApiClient::from_config(config)?))
    }
}

#[async_trait]
impl<E: RequestExecutor> DataProvider for WeatherProvider<E> {
    fn service_name(&self) -> &'static str {
        "weather"
    }

    fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    async fn call_endpoint(&self, route_name: &str, payload: &Payload) -> Result<Value> {
        self.executor.call_endpoint(&self.registry, route_name, payload).await
    }
}

/// Endpoint table of the weather service.
pub fn weather_registry() -> EndpointRegistry {
    let current = EndpointDescriptor::get("/api/weather/current", "Current Weather Info")
        .with_description(
            "Provides accurate and up-to-date information on temperature, humidity, wind speed, \
             visibility, and more for any location worldwide.",
        )
        .with_param(
            "lon",
            "Optional Longitude coordinate (Note: lat and lon value has priority over both place \
             and zip value). Use the lat and lon for more accurate and reliable weather data.",
        )
        .with_param(
            "lat",
            "Optional Latitude coordinate (Note: lat and lon value has priority over both place \
             and zip value). Use the lat and lon for more accurate and reliable weather data.",
        )
        .with_param(
            "place",
            "Optional city name, state code (only for the US) and country code divided by comma, \
             like Zion,VA,US. Please use ISO 3166 country codes. Note: place value has priority \
             over zip value.",
        )
        .with_param(
            "zip",
            "Optional zip code with optional country code (Note: zip value will only be used if \
             both lat,lon and place name not provided).",
        )
        .with_param("units", "Optional Unit type (standard, metric, and imperial).")
        .with_param("lang", "Optional language type.")
        .with_param("mode", "Optional mode type.");

    let endpoints = BTreeMap::from([(CURRENT_WEATHER.to_string(), current)]);

    EndpointRegistry::new(BASE_URL, endpoints)
}

/// Typed parameters for [`CURRENT_WEATHER`].
///
/// Precedence `lat/lon > place > zip` is applied by the remote service; nothing
/// here checks which fields are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentWeatherQuery {
    pub lon: Option<String>,
    pub lat: Option<String>,
    /// `city,state,country` with ISO 3166 country codes, e.g. `Zion,VA,US`.
    pub place: Option<String>,
    pub zip: Option<String>,
    /// `standard`, `metric` or `imperial`.
    pub units: Option<String>,
    pub lang: Option<String>,
    pub mode: Option<String>,
}

impl CurrentWeatherQuery {
    pub fn place(place: impl Into<String>) -> Self {
        Self { place: Some(place.into()), ..Self::default() }
    }

    pub fn coordinates(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self { lat: Some(lat.into()), lon: Some(lon.into()), ..Self::default() }
    }

    /// All seven parameters, unset ones as empty strings.
    pub fn to_payload(&self) -> Payload {
        let field = |v: &Option<String>| v.clone().unwrap_or_default();

        Payload::from([
            ("lon".to_string(), field(&self.lon)),
            ("lat".to_string(), field(&self.lat)),
            ("place".to_string(), field(&self.place)),
            ("zip".to_string(), field(&self.zip)),
            ("units".to_string(), field(&self.units)),
            ("lang".to_string(), field(&self.lang)),
            ("mode".to_string(), field(&self.mode)),
        ])
    }
}
