use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Parameters passed to an endpoint call, by name.
pub type Payload = BTreeMap<String, String>;

/// Parameter documentation of an endpoint: name -> free-text description.
pub type PayloadSchema = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one remote operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// Path appended to the registry base URL, e.g. `/api/weather/current`.
    /// A missing leading `/` is added when the URL is built.
    pub route: String,
    pub method: HttpMethod,
    /// Human-readable label.
    pub name: String,
    pub description: String,
    /// Documented parameters. Descriptions are prose only; nothing here is enforced.
    pub payload: PayloadSchema,
}

impl EndpointDescriptor {
    pub fn get(route: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            method: HttpMethod::Get,
            name: name.into(),
            description: String::new(),
            payload: PayloadSchema::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, doc: impl Into<String>) -> Self {
        self.payload.insert(key.into(), doc.into());
        self
    }
}
