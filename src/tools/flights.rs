// ABOUTME: FlightsAdapter - exchanges credentials for a token, searches flight
// ABOUTME: offers, and maps each offer to carrier, times and total price.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::{amadeus, http};
use crate::config::OAuthServiceConfig;
use crate::contract::{FlightOption, FlightSearchRequest, MAX_FLIGHTS};
use crate::tool::{ContractTool, ToolAdapter, ToolFailure, ToolResult};

const SERVICE: &str = "Flight search";

pub type FlightsTool = ContractTool<FlightsAdapter>;

/// Adapter over the flight-offers search endpoint.
pub struct FlightsAdapter {
    client: reqwest::Client,
    config: OAuthServiceConfig,
}

impl FlightsAdapter {
    pub fn new(client: reqwest::Client, config: OAuthServiceConfig) -> Self {
        Self { client, config }
    }

    async fn search(&self, request: &FlightSearchRequest) -> Result<Value, ToolFailure> {
        let token = amadeus::access_token(&self.client, &self.config, SERVICE).await?;

        let url = format!("{}/v2/shopping/flight-offers", self.config.base_url);
        let adults = request.adults.to_string();
        let max = MAX_FLIGHTS.to_string();
        debug!(%url, source = %request.source, destination = %request.destination, "flight offers request");

        let call = self.client.get(&url).bearer_auth(token).query(&[
            ("originLocationCode", request.source.as_str()),
            ("destinationLocationCode", request.destination.as_str()),
            ("departureDate", request.date.as_str()),
            ("adults", adults.as_str()),
            ("currencyCode", request.currency.as_str()),
            ("max", max.as_str()),
        ]);

        http::get_json(call).await.map_err(|e| e.into_failure(SERVICE))
    }
}

#[derive(Debug, Deserialize)]
struct OffersBody {
    #[serde(default)]
    data: Vec<Offer>,
}

#[derive(Debug, Deserialize)]
struct Offer {
    itineraries: Vec<Itinerary>,
    price: Price,
}

#[derive(Debug, Deserialize)]
struct Itinerary {
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Segment {
    carrier_code: String,
    departure: Endpoint,
    arrival: Endpoint,
}

#[derive(Debug, Deserialize)]
struct Endpoint {
    at: String,
}

#[derive(Debug, Deserialize)]
struct Price {
    total: String,
    currency: String,
}

fn map_offer(offer: Offer) -> Option<FlightOption> {
    let segments = &offer.itineraries.first()?.segments;
    let first = segments.first()?;
    let last = segments.last()?;
    Some(FlightOption {
        airline: first.carrier_code.clone(),
        departure_time: first.departure.at.clone(),
        arrival_time: last.arrival.at.clone(),
        price: offer.price.total,
        currency: offer.price.currency,
    })
}

/// Map the first `MAX_FLIGHTS` offers of a body into flight options.
pub(crate) fn parse_offers(body: Value) -> Result<Vec<FlightOption>, ToolFailure> {
    let parsed: OffersBody = serde_json::from_value(body).map_err(|e| {
        ToolFailure::upstream_format(format!("Flight offer validation error: {}", e))
    })?;

    parsed
        .data
        .into_iter()
        .take(MAX_FLIGHTS)
        .map(|offer| {
            map_offer(offer).ok_or_else(|| {
                ToolFailure::upstream_format("Flight offer without itinerary segments")
            })
        })
        .collect()
}

#[async_trait]
impl ToolAdapter for FlightsAdapter {
    type Request = FlightSearchRequest;

    async fn execute(&self, request: FlightSearchRequest) -> ToolResult {
        info!(
            source = %request.source,
            destination = %request.destination,
            date = %request.date,
            adults = request.adults,
            currency = %request.currency,
            "searching flights"
        );

        let flights = match self.search(&request).await.and_then(parse_offers) {
            Ok(flights) => flights,
            Err(failure) => {
                error!(error = %failure, "flight search failed");
                return failure.into();
            }
        };

        if flights.is_empty() {
            warn!(source = %request.source, destination = %request.destination, "no flights found");
            return ToolResult::empty(format!(
                "No flights found from {} to {} on {}",
                request.source, request.destination, request.date
            ));
        }

        info!(count = flights.len(), "flight search complete");
        ToolResult::success(flights)
    }
}
