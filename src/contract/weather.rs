// ABOUTME: Weather forecast contract - request schema and per-day forecast
// ABOUTME: payload rendered in the fixed date-stamped template.

use std::fmt;

use serde::Deserialize;

use super::ResultSchema;
use crate::tool::{Constraint, Contract, ParamSpec, ToolSpec};

pub const WEATHER_TOOL: &str = "get_weather";

/// Validated weather request.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherRequest {
    pub city: String,
    pub days: u32,
}

impl Contract for WeatherRequest {
    fn spec() -> ToolSpec {
        ToolSpec::new(
            WEATHER_TOOL,
            "Fetch the weather forecast for a city for the next 1 to 14 days. \
             Use when the user asks about weather, temperature or packing for a trip.",
            ResultSchema::Forecast,
        )
        .param(
            ParamSpec::string("city", "Name of the city, e.g. \"Paris\"")
                .required()
                .constraint(Constraint::NonBlank),
        )
        .param(
            ParamSpec::integer("days", "Number of forecast days (1-14)")
                .default_value(1)
                .constraint(Constraint::Range { min: 1.0, max: 14.0 }),
        )
    }
}

/// One forecast day.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: String,
    pub condition: String,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub max_wind_kph: f64,
    pub avg_humidity: f64,
    pub chance_of_rain: i64,
    pub chance_of_snow: i64,
}

impl fmt::Display for ForecastDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Date: {}", self.date)?;
        writeln!(f, "Weather: {}", self.condition)?;
        writeln!(
            f,
            "Temperature: {}°C - {}°C",
            self.min_temp_c, self.max_temp_c
        )?;
        writeln!(f, "Wind Speed: {} Kph", self.max_wind_kph)?;
        writeln!(f, "Humidity: {}%", self.avg_humidity)?;
        writeln!(f, "Rain Probability: {}%", self.chance_of_rain)?;
        write!(f, "Snow Probability: {}%", self.chance_of_snow)
    }
}

/// Forecast for a city, one entry per requested day.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherForecast {
    pub city: String,
    pub days: Vec<ForecastDay>,
}

impl fmt::Display for WeatherForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Weather forecast for {}:", self.city)?;
        for day in &self.days {
            write!(f, "\n\n{}", day)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::tool::{validate, FailureKind};

    #[test]
    fn test_days_default_to_one() {
        let args = validate(&WeatherRequest::spec(), &json!({"city": "Paris"})).unwrap();
        assert_eq!(args["days"], 1);
    }

    #[test]
    fn test_days_out_of_range() {
        for days in [0, 15] {
            let failure =
                validate(&WeatherRequest::spec(), &json!({"city": "Paris", "days": days}))
                    .unwrap_err();
            assert_eq!(failure.kind, FailureKind::SchemaViolation);
            assert_eq!(failure.field.as_deref(), Some("days"));
        }
    }

    #[test]
    fn test_blank_city_rejected() {
        let failure = validate(&WeatherRequest::spec(), &json!({"city": "  "})).unwrap_err();
        assert_eq!(failure.field.as_deref(), Some("city"));
    }

    #[test]
    fn test_render_is_date_stamped() {
        let day = |date: &str| ForecastDay {
            date: date.to_string(),
            condition: "Sunny".to_string(),
            min_temp_c: 4.5,
            max_temp_c: 12.0,
            max_wind_kph: 14.4,
            avg_humidity: 70.0,
            chance_of_rain: 10,
            chance_of_snow: 0,
        };
        let forecast = WeatherForecast {
            city: "Paris".to_string(),
            days: vec![day("2025-03-01"), day("2025-03-02")],
        };

        let text = forecast.to_string();
        assert!(text.starts_with("Weather forecast for Paris:"));
        assert_eq!(text.matches("Date: ").count(), 2);
        assert!(text.contains("Temperature: 4.5°C - 12°C"));
        assert!(text.contains("Rain Probability: 10%"));
    }
}
