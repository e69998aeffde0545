// ABOUTME: Built-in capability adapters - weather, flights, hotels, currency, news.
// ABOUTME: Also assembles the default registry from a loaded Config.

mod amadeus;
mod currency;
mod flights;
mod hotels;
mod http;
mod news;
mod weather;

pub use currency::{CurrencyAdapter, CurrencyTool};
pub use flights::{FlightsAdapter, FlightsTool};
pub use hotels::{HotelsAdapter, HotelsTool};
pub use http::build_client;
pub use news::{NewsAdapter, NewsTool};
pub use weather::{WeatherAdapter, WeatherTool};

use crate::config::Config;
use crate::error::ConfigError;
use crate::tool::{ContractTool, Registry};

/// Build a registry holding one adapter per capability, sharing one HTTP client.
pub fn default_registry(config: &Config) -> Result<Registry, ConfigError> {
    let client = build_client(&config.http)?;
    let mut registry = Registry::new();

    registry.register(ContractTool::new(WeatherAdapter::new(
        client.clone(),
        config.weather.clone(),
    )))?;
    registry.register(ContractTool::new(FlightsAdapter::new(
        client.clone(),
        config.flights.clone(),
    )))?;
    registry.register(ContractTool::new(HotelsAdapter::new(
        client.clone(),
        config.hotels.clone(),
    )))?;
    registry.register(ContractTool::new(CurrencyAdapter::new(
        client.clone(),
        config.currency.clone(),
    )))?;
    registry.register(ContractTool::new(NewsAdapter::new(
        client,
        config.news.clone(),
    )))?;

    Ok(registry)
}
