use serde::{Deserialize, Serialize};

use crate::{error::UserInputError, persona::Persona};

/// Raw form input as typed by the user, before validation.
#[derive(Debug, Clone, Default)]
pub struct QueryInput {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub persona: Persona,
}

impl QueryInput {
    pub fn new(
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        persona: Persona,
    ) -> Self {
        Self {
            latitude: Some(latitude.into()),
            longitude: Some(longitude.into()),
            persona,
        }
    }
}

/// A validated request against the dashboard data service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query {
    pub latitude: f64,
    pub longitude: f64,
    pub persona: Persona,
}

impl TryFrom<&QueryInput> for Query {
    type Error = UserInputError;

    /// Presence and numeric syntax only; coordinate ranges are left to the service.
    fn try_from(input: &QueryInput) -> Result<Self, Self::Error> {
        let lat = non_blank(input.latitude.as_deref());
        let lon = non_blank(input.longitude.as_deref());

        let (Some(lat), Some(lon)) = (lat, lon) else {
            return Err(UserInputError::MissingCoordinates);
        };

        Ok(Query {
            latitude: parse_coordinate("latitude", lat)?,
            longitude: parse_coordinate("longitude", lon)?,
            persona: input.persona,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_coordinate(field: &'static str, value: &str) -> Result<f64, UserInputError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| UserInputError::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lat, c.lon]
    }
}

/// Snapshot returned by `GET /api/dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub air_quality: AirQuality,
    #[serde(default)]
    pub weather: Weather,
    #[serde(default)]
    pub vulnerability_analysis: VulnerabilityAnalysis,
    #[serde(default)]
    pub recommendations: Recommendations,
    #[serde(default)]
    pub visualization_data: VisualizationData,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    pub no2_tropospheric: f64,
    #[serde(default)]
    pub pm25: Option<f64>,
    pub quality_index: String,
    /// Integral in practice, but the service may send it as a float.
    pub aqi_value: f64,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityAnalysis {
    #[serde(default)]
    pub area_type: Option<String>,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub vulnerable_groups: Vec<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub protection_priority: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default)]
    pub general: Vec<String>,
    #[serde(default)]
    pub for_schools: Vec<String>,
    #[serde(default)]
    pub for_elderly: Vec<String>,
    #[serde(default)]
    pub for_health_centers: Vec<String>,
    #[serde(default)]
    pub immediate_actions: Vec<String>,
}

impl Recommendations {
    pub fn category(&self, category: RecommendationCategory) -> &[String] {
        match category {
            RecommendationCategory::General => &self.general,
            RecommendationCategory::ForSchools => &self.for_schools,
            RecommendationCategory::ForElderly => &self.for_elderly,
            RecommendationCategory::ForHealthCenters => &self.for_health_centers,
        }
    }
}

/// Keyed recommendation lists a persona can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecommendationCategory {
    General,
    ForSchools,
    ForElderly,
    ForHealthCenters,
}

impl RecommendationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationCategory::General => "general",
            RecommendationCategory::ForSchools => "for_schools",
            RecommendationCategory::ForElderly => "for_elderly",
            RecommendationCategory::ForHealthCenters => "for_health_centers",
        }
    }
}

impl std::fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualizationData {
    #[serde(default)]
    pub historical_trend: Vec<TrendPoint>,
    #[serde(default)]
    pub forecast: Vec<ForecastPoint>,
    #[serde(default)]
    pub risk_map: RiskMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub no2: f64,
    #[serde(default)]
    pub quality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub hour: u8,
    pub no2: f64,
    #[serde(default)]
    pub quality: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskMap {
    pub center: Option<Coordinate>,
    #[serde(default)]
    pub risk_zones: Vec<RiskZone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskZone {
    pub coords: Coordinate,
    #[serde(default)]
    pub risk: String,
    /// Metres; the map falls back to a default when absent.
    #[serde(default)]
    pub radius: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub data_source: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_requires_both_coordinates() {
        let mut input = QueryInput::new("19.43", "", Persona::Children);
        assert_eq!(Query::try_from(&input), Err(UserInputError::MissingCoordinates));

        input.latitude = None;
        input.longitude = Some("-99.13".into());
        assert_eq!(Query::try_from(&input), Err(UserInputError::MissingCoordinates));

        input.latitude = Some("   ".into());
        assert_eq!(Query::try_from(&input), Err(UserInputError::MissingCoordinates));
    }

    #[test]
    fn query_rejects_non_numeric_coordinates() {
        let input = QueryInput::new("north", "-99.13", Persona::Adults);
        let err = Query::try_from(&input).unwrap_err();

        assert_eq!(
            err,
            UserInputError::InvalidCoordinate {
                field: "latitude",
                value: "north".into(),
            }
        );
    }

    #[test]
    fn query_does_not_check_ranges() {
        let input = QueryInput::new(" 123.5 ", "-400", Persona::Elderly);
        let query = Query::try_from(&input).expect("out-of-range values are accepted");

        assert_eq!(query.latitude, 123.5);
        assert_eq!(query.longitude, -400.0);
        assert_eq!(query.persona, Persona::Elderly);
    }

    #[test]
    fn parses_full_service_payload() {
        let resp = fixtures::mexico_city();

        assert_eq!(resp.air_quality.quality_index, "Mala");
        assert_eq!(resp.air_quality.aqi_value, 75.0);
        assert_eq!(resp.weather.condition.as_deref(), Some("Templado"));
        assert_eq!(
            resp.visualization_data.risk_map.center,
            Some(Coordinate {
                lat: 19.43,
                lon: -99.13,
            })
        );
        assert_eq!(resp.visualization_data.risk_map.risk_zones[1].radius, None);
        assert_eq!(
            resp.metadata.and_then(|m| m.resolution).as_deref(),
            Some("2km x 5.5km")
        );
    }

    #[test]
    fn optional_sections_default_when_absent() {
        let json = r#"{
            "air_quality": {"no2_tropospheric": 12.0, "quality_index": "Buena", "aqi_value": 25}
        }"#;
        let resp: DashboardResponse = serde_json::from_str(json).expect("minimal payload parses");

        assert_eq!(resp.air_quality.pm25, None);
        assert_eq!(resp.weather, Weather::default());
        assert!(resp.recommendations.general.is_empty());
        assert!(resp.visualization_data.forecast.is_empty());
        assert!(resp.metadata.is_none());
    }

    #[test]
    fn aqi_accepts_float_values() {
        let json = r#"{
            "air_quality": {"no2_tropospheric": 1.0, "quality_index": "Buena", "aqi_value": 25.0}
        }"#;
        let resp: DashboardResponse = serde_json::from_str(json).expect("float aqi parses");

        assert_eq!(resp.air_quality.aqi_value, 25.0);
    }

    #[test]
    fn recommendation_category_selects_matching_list() {
        let recs = fixtures::mexico_city().recommendations;

        assert_eq!(
            recs.category(RecommendationCategory::ForSchools),
            ["Suspender educación física al aire libre".to_string()]
        );
        assert!(recs.category(RecommendationCategory::ForHealthCenters).is_empty());
        assert_eq!(RecommendationCategory::ForHealthCenters.to_string(), "for_health_centers");
    }
}
