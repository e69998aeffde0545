// ABOUTME: Contract module - typed request schemas and result payloads for
// ABOUTME: the weather, flights, hotels, currency and news capabilities.

mod currency;
mod flights;
mod hotels;
mod news;
mod weather;

use std::fmt;

pub use currency::*;
pub use flights::*;
pub use hotels::*;
pub use news::*;
pub use weather::*;

/// The payload shape a tool declares it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSchema {
    Forecast,
    Flights,
    Hotels,
    Conversion,
    Articles,
}

/// A successful tool payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolPayload {
    Forecast(WeatherForecast),
    Flights(Vec<FlightOption>),
    Hotels(Vec<HotelOption>),
    Conversion(ConvertedAmount),
    Articles(Vec<NewsArticle>),
}

impl ToolPayload {
    pub fn schema(&self) -> ResultSchema {
        match self {
            ToolPayload::Forecast(_) => ResultSchema::Forecast,
            ToolPayload::Flights(_) => ResultSchema::Flights,
            ToolPayload::Hotels(_) => ResultSchema::Hotels,
            ToolPayload::Conversion(_) => ResultSchema::Conversion,
            ToolPayload::Articles(_) => ResultSchema::Articles,
        }
    }
}

impl fmt::Display for ToolPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolPayload::Forecast(forecast) => write!(f, "{}", forecast),
            ToolPayload::Flights(flights) => write_list(f, flights),
            ToolPayload::Hotels(hotels) => write_list(f, hotels),
            ToolPayload::Conversion(amount) => write!(f, "{}", amount),
            ToolPayload::Articles(articles) => write_list(f, articles),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(f, "{}. {}", i + 1, item)?;
    }
    Ok(())
}

impl From<WeatherForecast> for ToolPayload {
    fn from(v: WeatherForecast) -> Self {
        ToolPayload::Forecast(v)
    }
}

impl From<Vec<FlightOption>> for ToolPayload {
    fn from(v: Vec<FlightOption>) -> Self {
        ToolPayload::Flights(v)
    }
}

impl From<Vec<HotelOption>> for ToolPayload {
    fn from(v: Vec<HotelOption>) -> Self {
        ToolPayload::Hotels(v)
    }
}

impl From<ConvertedAmount> for ToolPayload {
    fn from(v: ConvertedAmount) -> Self {
        ToolPayload::Conversion(v)
    }
}

impl From<Vec<NewsArticle>> for ToolPayload {
    fn from(v: Vec<NewsArticle>) -> Self {
        ToolPayload::Articles(v)
    }
}
