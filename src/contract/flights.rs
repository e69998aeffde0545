// ABOUTME: Flight search contract - IATA route, date, passengers and currency
// ABOUTME: request schema, plus the flight option payload.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::ResultSchema;
use crate::tool::{Constraint, Contract, Normalize, ParamSpec, ToolSpec};

pub const FLIGHTS_TOOL: &str = "search_flights";

/// Offers returned per search.
pub const MAX_FLIGHTS: usize = 5;

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

/// Validated flight search request.
#[derive(Debug, Clone, Deserialize)]
pub struct FlightSearchRequest {
    pub source: String,
    pub destination: String,
    pub date: String,
    pub adults: u32,
    pub currency: String,
}

impl Contract for FlightSearchRequest {
    fn spec() -> ToolSpec {
        ToolSpec::new(
            FLIGHTS_TOOL,
            "Search for flights between two airports on a date. Use when the user \
             asks for flights between two cities or airports. Airports are 3-letter \
             IATA codes (e.g. JFK, CDG). The date defaults to today.",
            ResultSchema::Flights,
        )
        .param(iata("source", "IATA code of the departure airport"))
        .param(iata("destination", "IATA code of the destination airport"))
        .param(
            ParamSpec::string("date", "Travel date in YYYY-MM-DD format")
                .default_today()
                .constraint(Constraint::Pattern {
                    regex: &ISO_DATE,
                    hint: "YYYY-MM-DD",
                }),
        )
        .param(
            ParamSpec::integer("adults", "Number of adult passengers")
                .default_value(1)
                .constraint(Constraint::GreaterThan(0.0)),
        )
        .param(
            ParamSpec::string("currency", "Currency code for prices, e.g. USD")
                .default_value("USD")
                .normalize(Normalize::Upper)
                .constraint(Constraint::Letters(3)),
        )
    }
}

fn iata(name: &'static str, description: &'static str) -> ParamSpec {
    ParamSpec::string(name, description)
        .required()
        .normalize(Normalize::Upper)
        .constraint(Constraint::Letters(3))
}

/// A single bookable flight offer.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightOption {
    /// Carrier code of the first segment.
    pub airline: String,
    /// Departure of the first segment.
    pub departure_time: String,
    /// Arrival of the last segment.
    pub arrival_time: String,
    /// Total price as quoted by the upstream.
    pub price: String,
    pub currency: String,
}

impl fmt::Display for FlightOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Airline: {}, Departure: {}, Arrival: {}, Price: {} {}",
            self.airline, self.departure_time, self.arrival_time, self.price, self.currency
        )
    }
}
