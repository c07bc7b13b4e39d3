use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use weather_provider::{
    Config, CurrentWeatherQuery, DataProviders, Payload, ProviderId,
    provider::weather::CURRENT_WEATHER,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "rapid-weather", version, about = "RapidAPI weather data provider")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the RapidAPI key in the config file.
    Configure,

    /// Print the endpoint table of a service (all services when omitted).
    Endpoints {
        /// Service name, e.g. "weather".
        service: Option<String>,
    },

    /// Call any endpoint by service and logical endpoint name.
    Call {
        /// Service name, e.g. "weather".
        service: String,

        /// Logical endpoint name, e.g. "current_weather".
        route: String,

        /// Payload entry as key=value; repeatable.
        #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },

    /// Current weather for a location.
    Current(CurrentArgs),
}

/// Parameters of `current_weather`. Precedence (lat/lon > place > zip) is applied remotely.
#[derive(Debug, Args)]
pub struct CurrentArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<String>,

    /// City, state code (US only) and ISO 3166 country code, e.g. "Zion,VA,US".
    #[arg(long)]
    pub place: Option<String>,

    #[arg(long)]
    pub zip: Option<String>,

    /// standard, metric or imperial.
    #[arg(long)]
    pub units: Option<String>,

    #[arg(long)]
    pub lang: Option<String>,

    #[arg(long)]
    pub mode: Option<String>,
}

impl From<CurrentArgs> for CurrentWeatherQuery {
    fn from(args: CurrentArgs) -> Self {
        Self {
            lon: args.lon,
            lat: args.lat,
            place: args.place,
            zip: args.zip,
            units: args.units,
            lang: args.lang,
            mode: args.mode,
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Endpoints { service } => {
                let listing = endpoint_listing(service.as_deref())?;
                print_json(&listing)
            }
            Command::Call { service, route, params } => {
                let payload: Payload = params.into_iter().collect();
                call(&service, &route, &payload).await
            }
            Command::Current(args) => {
                let payload = CurrentWeatherQuery::from(args).to_payload();
                call(ProviderId::Weather.as_str(), CURRENT_WEATHER, &payload).await
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("RapidAPI key:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved RapidAPI key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn call(service: &str, route: &str, payload: &Payload) -> Result<()> {
    let config = Config::load()?.with_env_overrides();
    let providers = DataProviders::from_config(&config)?;

    let body = providers
        .call(service, route, payload)
        .await
        .with_context(|| format!("Call to {service}/{route} failed"))?;

    print_json(&body)
}

/// JSON listing of endpoint tables, keyed by service name.
fn endpoint_listing(service: Option<&str>) -> Result<Value> {
    let ids = match service {
        Some(name) => vec![ProviderId::try_from(name)?],
        None => ProviderId::all().to_vec(),
    };

    let mut listing = serde_json::Map::new();
    for id in ids {
        let registry = id.registry();
        listing.insert(
            id.to_string(),
            json!({
                "base_url": registry.base_url(),
                "endpoints": registry.endpoints(),
            }),
        );
    }

    Ok(Value::Object(listing))
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("invalid payload entry '{s}', expected key=value"))
}
