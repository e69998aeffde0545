// ABOUTME: HotelsAdapter - lists hotels in a city through the travel API,
// ABOUTME: filling documented defaults for missing id, country and rating.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::{amadeus, http};
use crate::config::OAuthServiceConfig;
use crate::contract::{HotelOption, HotelSearchRequest, NOT_RATED, NOT_SPECIFIED};
use crate::tool::{ContractTool, ToolAdapter, ToolFailure, ToolResult};

const SERVICE: &str = "Hotel search";

pub type HotelsTool = ContractTool<HotelsAdapter>;

/// Adapter over the hotels-by-city endpoint.
pub struct HotelsAdapter {
    client: reqwest::Client,
    config: OAuthServiceConfig,
}

impl HotelsAdapter {
    pub fn new(client: reqwest::Client, config: OAuthServiceConfig) -> Self {
        Self { client, config }
    }

    async fn search(&self, request: &HotelSearchRequest) -> Result<Value, ToolFailure> {
        let token = amadeus::access_token(&self.client, &self.config, SERVICE).await?;

        let url = format!(
            "{}/v1/reference-data/locations/hotels/by-city",
            self.config.base_url
        );

        let mut query = vec![
            ("cityCode", request.city_code.clone()),
            ("radius", request.radius.to_string()),
            ("radiusUnit", request.radius_unit.clone()),
        ];
        if let Some(amenities) = &request.amenities {
            query.push(("amenities", amenities.clone()));
        }
        if let Some(ratings) = &request.ratings {
            query.push(("ratings", ratings.clone()));
        }
        debug!(%url, ?query, "hotel list request");

        let call = self.client.get(&url).bearer_auth(token).query(&query);
        http::get_json(call).await.map_err(|e| e.into_failure(SERVICE))
    }
}

#[derive(Debug, Deserialize)]
struct HotelsBody {
    #[serde(default)]
    data: Vec<RawHotel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHotel {
    name: String,
    #[serde(default)]
    hotel_id: Option<String>,
    #[serde(default)]
    address: Option<RawAddress>,
    #[serde(default)]
    rating: Option<Value>,
    #[serde(default)]
    amenities: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAddress {
    #[serde(default)]
    country_code: Option<String>,
}

fn rating_text(rating: Option<Value>) -> String {
    match rating {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => NOT_RATED.to_string(),
    }
}

/// Map a hotels body into hotel options.
pub(crate) fn parse_hotels(body: Value) -> Result<Vec<HotelOption>, ToolFailure> {
    let parsed: HotelsBody = serde_json::from_value(body).map_err(|e| {
        ToolFailure::upstream_format(format!("Hotel data validation error: {}", e))
    })?;

    Ok(parsed
        .data
        .into_iter()
        .map(|hotel| HotelOption {
            name: hotel.name,
            hotel_id: hotel.hotel_id.unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            country_code: hotel
                .address
                .and_then(|a| a.country_code)
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            rating: rating_text(hotel.rating),
            amenities: hotel.amenities,
        })
        .collect())
}

#[async_trait]
impl ToolAdapter for HotelsAdapter {
    type Request = HotelSearchRequest;

    async fn execute(&self, request: HotelSearchRequest) -> ToolResult {
        info!(
            city_code = %request.city_code,
            radius = request.radius,
            radius_unit = %request.radius_unit,
            "searching hotels"
        );

        let hotels = match self.search(&request).await.and_then(parse_hotels) {
            Ok(hotels) => hotels,
            Err(failure) => {
                error!(error = %failure, "hotel search failed");
                return failure.into();
            }
        };

        if hotels.is_empty() {
            warn!(city_code = %request.city_code, "no hotels found");
            return ToolResult::empty(format!("No hotels found in {}", request.city_code));
        }

        info!(count = hotels.len(), "hotel search complete");
        ToolResult::success(hotels)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::HttpConfig;
    use crate::contract::ToolPayload;
    use crate::tool::Tool;

    fn tool(server: &MockServer) -> HotelsTool {
        let client = http::build_client(&HttpConfig::default()).unwrap();
        ContractTool::new(HotelsAdapter::new(
            client,
            OAuthServiceConfig {
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
                base_url: server.uri(),
            },
        ))
    }

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/v1/security/oauth2/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok"})),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_maps_hotels_with_defaults() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/v1/reference-data/locations/hotels/by-city"))
            .and(query_param("cityCode", "PAR"))
            .and(query_param("radius", "5"))
            .and(query_param("radiusUnit", "MI"))
            .and(query_param("amenities", "WIFI"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"name": "Hotel Lumiere", "hotelId": "HLPAR001", "address": {"countryCode": "FR"}, "rating": 4, "amenities": ["WIFI", "SPA"]},
                    {"name": "Bare Hotel"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server)
            .call(&json!({"city_code": "par", "radius": 5, "radius_unit": "mi", "amenities": "WIFI"}))
            .await;

        match result {
            ToolResult::Success(ToolPayload::Hotels(hotels)) => {
                assert_eq!(hotels.len(), 2);
                assert_eq!(hotels[0].hotel_id, "HLPAR001");
                assert_eq!(hotels[0].country_code, "FR");
                assert_eq!(hotels[0].rating, "4");
                assert_eq!(hotels[0].amenities, vec!["WIFI", "SPA"]);
                assert_eq!(hotels[1].hotel_id, NOT_SPECIFIED);
                assert_eq!(hotels[1].country_code, NOT_SPECIFIED);
                assert_eq!(hotels[1].rating, NOT_RATED);
                assert!(hotels[1].amenities.is_empty());
            }
            other => panic!("expected hotels, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_zero_hotels_is_empty() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/v1/reference-data/locations/hotels/by-city"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let result = tool(&server).call(&json!({"city_code": "PAR"})).await;
        match result {
            ToolResult::Empty(message) => assert_eq!(message, "No hotels found in PAR"),
            other => panic!("expected empty, got {:?}", other),
        }
    }

    #[test]
    fn test_hotel_without_name_is_format_error() {
        let failure = parse_hotels(json!({"data": [{"hotelId": "X"}]})).unwrap_err();
        assert_eq!(failure.kind, crate::tool::FailureKind::UpstreamFormat);
    }
}
