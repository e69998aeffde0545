// ABOUTME: Hotel search contract - city code, radius and optional filters,
// ABOUTME: plus the hotel option payload with its documented defaults.

use std::fmt;

use serde::Deserialize;

use super::ResultSchema;
use crate::tool::{Constraint, Contract, Normalize, ParamSpec, ToolSpec};

pub const HOTELS_TOOL: &str = "search_hotels";

/// Placeholder for a hotel id or country code the upstream omitted.
pub const NOT_SPECIFIED: &str = "Not specified";
/// Placeholder for a hotel without a rating.
pub const NOT_RATED: &str = "Not rated";

/// Validated hotel search request.
#[derive(Debug, Clone, Deserialize)]
pub struct HotelSearchRequest {
    pub city_code: String,
    pub radius: u32,
    pub radius_unit: String,
    #[serde(default)]
    pub amenities: Option<String>,
    #[serde(default)]
    pub ratings: Option<String>,
}

impl Contract for HotelSearchRequest {
    fn spec() -> ToolSpec {
        ToolSpec::new(
            HOTELS_TOOL,
            "Search for hotels in a city. Use when the user asks about places to \
             stay. The city is an IATA city code (e.g. PAR, NYC).",
            ResultSchema::Hotels,
        )
        .param(
            ParamSpec::string("city_code", "IATA city code")
                .required()
                .normalize(Normalize::Upper)
                .constraint(Constraint::NonBlank),
        )
        .param(
            ParamSpec::integer("radius", "Search radius around the city center")
                .default_value(10)
                .constraint(Constraint::AtLeast(1.0)),
        )
        .param(
            ParamSpec::string("radius_unit", "Unit of the radius, KM or MI")
                .default_value("KM")
                .normalize(Normalize::Upper)
                .constraint(Constraint::OneOf(&["KM", "MI"])),
        )
        .param(ParamSpec::string(
            "amenities",
            "Comma-separated amenities, e.g. SWIMMING_POOL,WIFI",
        ))
        .param(ParamSpec::string(
            "ratings",
            "Comma-separated star ratings, e.g. 4,5",
        ))
    }
}

/// A hotel near the requested city.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelOption {
    pub name: String,
    pub hotel_id: String,
    pub country_code: String,
    pub rating: String,
    pub amenities: Vec<String>,
}

impl fmt::Display for HotelOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (id: {}, country: {}, rating: {})",
            self.name, self.hotel_id, self.country_code, self.rating
        )?;
        if !self.amenities.is_empty() {
            write!(f, ", amenities: {}", self.amenities.join(", "))?;
        }
        Ok(())
    }
}
