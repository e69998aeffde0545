// ABOUTME: WeatherAdapter - fetches a multi-day forecast for a city and maps
// ABOUTME: each day into the fixed forecast template.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};

use super::http::{self, HttpFailure};
use crate::config::WeatherConfig;
use crate::contract::{ForecastDay, WeatherForecast, WeatherRequest};
use crate::tool::{ContractTool, ToolAdapter, ToolFailure, ToolResult};

const SERVICE: &str = "Weather";

pub type WeatherTool = ContractTool<WeatherAdapter>;

/// Adapter over the weatherapi.com forecast endpoint.
pub struct WeatherAdapter {
    client: reqwest::Client,
    config: WeatherConfig,
}

impl WeatherAdapter {
    pub fn new(client: reqwest::Client, config: WeatherConfig) -> Self {
        Self { client, config }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastBody {
    forecast: ForecastSection,
}

#[derive(Debug, Deserialize)]
struct ForecastSection {
    forecastday: Vec<RawForecastDay>,
}

#[derive(Debug, Deserialize)]
struct RawForecastDay {
    date: String,
    day: RawDay,
}

#[derive(Debug, Deserialize)]
struct RawDay {
    mintemp_c: f64,
    maxtemp_c: f64,
    maxwind_kph: f64,
    avghumidity: f64,
    daily_chance_of_rain: i64,
    daily_chance_of_snow: i64,
    condition: RawCondition,
}

#[derive(Debug, Deserialize)]
struct RawCondition {
    text: String,
}

fn upstream_error_message(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    Some(
        error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string(),
    )
}

/// Map an upstream forecast body to at most `days` forecast entries.
pub(crate) fn parse_forecast(
    city: &str,
    days: u32,
    body: Value,
) -> Result<WeatherForecast, ToolFailure> {
    if let Some(message) = upstream_error_message(&body) {
        return Err(ToolFailure::upstream_format(format!(
            "Weather service error: {}",
            message
        )));
    }

    let parsed: ForecastBody = serde_json::from_value(body).map_err(|e| {
        ToolFailure::upstream_format(format!("Weather data validation error: {}", e))
    })?;

    let days = parsed
        .forecast
        .forecastday
        .into_iter()
        .take(days as usize)
        .map(|raw| ForecastDay {
            date: raw.date,
            condition: raw.day.condition.text,
            min_temp_c: raw.day.mintemp_c,
            max_temp_c: raw.day.maxtemp_c,
            max_wind_kph: raw.day.maxwind_kph,
            avg_humidity: raw.day.avghumidity,
            chance_of_rain: raw.day.daily_chance_of_rain,
            chance_of_snow: raw.day.daily_chance_of_snow,
        })
        .collect();

    Ok(WeatherForecast {
        city: city.to_string(),
        days,
    })
}

async fn fetch(call: reqwest::RequestBuilder) -> Result<Value, ToolFailure> {
    match http::get_json(call).await {
        Ok(body) => Ok(body),
        // Unknown locations come back as a 4xx carrying an error object.
        Err(HttpFailure::Status { status, body }) => match serde_json::from_str::<Value>(&body) {
            Ok(value) if upstream_error_message(&value).is_some() => Ok(value),
            _ => Err(HttpFailure::Status { status, body }.into_failure(SERVICE)),
        },
        Err(e) => Err(e.into_failure(SERVICE)),
    }
}

#[async_trait]
impl ToolAdapter for WeatherAdapter {
    type Request = WeatherRequest;

    async fn execute(&self, request: WeatherRequest) -> ToolResult {
        info!(city = %request.city, days = request.days, "fetching weather forecast");

        let url = format!("{}/forecast.json", self.config.base_url);
        debug!(%url, "weather request");
        let days = request.days.to_string();
        let call = self.client.get(&url).query(&[
            ("key", self.config.api_key.as_str()),
            ("q", request.city.as_str()),
            ("days", days.as_str()),
        ]);

        let body = match fetch(call).await {
            Ok(body) => body,
            Err(failure) => {
                error!(error = %failure, "weather request failed");
                return failure.into();
            }
        };

        match parse_forecast(&request.city, request.days, body) {
            Ok(forecast) => {
                info!(city = %request.city, days = forecast.days.len(), "weather forecast ready");
                ToolResult::success(forecast)
            }
            Err(failure) => {
                error!(error = %failure, "weather response rejected");
                failure.into()
            }
        }
    }
}
