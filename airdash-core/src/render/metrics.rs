use chrono::{DateTime, Local, NaiveDateTime};

use crate::{
    model::{DashboardResponse, Metadata},
    persona::display_name_for_tag,
};

use super::{DisplaySurface, ElementId, PLACEHOLDER};

/// Four-tier style applied to the AQI and quality-index elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityStyle {
    Good,
    Moderate,
    Bad,
    VeryBad,
}

impl QualityStyle {
    /// Exact match on the service's quality token; anything else has no style.
    pub fn from_index(index: &str) -> Option<Self> {
        match index {
            "Buena" => Some(QualityStyle::Good),
            "Moderada" => Some(QualityStyle::Moderate),
            "Mala" => Some(QualityStyle::Bad),
            "Muy Mala" => Some(QualityStyle::VeryBad),
            _ => None,
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            QualityStyle::Good => "quality-good",
            QualityStyle::Moderate => "quality-moderate",
            QualityStyle::Bad => "quality-bad",
            QualityStyle::VeryBad => "quality-very-bad",
        }
    }
}

impl std::fmt::Display for QualityStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Copies the scalar air-quality, weather, vulnerability and metadata fields
/// into their display elements.
pub fn render_metrics<S: DisplaySurface + ?Sized>(response: &DashboardResponse, surface: &mut S) {
    let aq = &response.air_quality;

    surface.set_text(ElementId::No2Value, &aq.no2_tropospheric.to_string());
    surface.set_text(ElementId::Pm25Value, &or_placeholder(aq.pm25));
    surface.set_text(ElementId::QualityIndex, &aq.quality_index);
    surface.set_text(ElementId::AqiValue, &aq.aqi_value.to_string());
    surface.set_text(
        ElementId::LastUpdated,
        &aq.timestamp.as_deref().map(format_timestamp).unwrap_or_else(placeholder),
    );

    let style = QualityStyle::from_index(&aq.quality_index);
    surface.set_style(ElementId::AqiValue, style);
    surface.set_style(ElementId::QualityIndex, style);

    let w = &response.weather;
    surface.set_text(ElementId::Temperature, &or_placeholder(w.temperature));
    surface.set_text(ElementId::WindSpeed, &or_placeholder(w.wind_speed));
    surface.set_text(ElementId::Humidity, &or_placeholder(w.humidity));
    surface.set_text(ElementId::WeatherCondition, text_or_placeholder(&w.condition));

    let v = &response.vulnerability_analysis;
    surface.set_text(ElementId::AreaType, text_or_placeholder(&v.area_type));
    surface.set_text(ElementId::RiskLevel, text_or_placeholder(&v.risk_level));
    surface.set_text(
        ElementId::VulnerableGroups,
        &join_or_placeholder(v.vulnerable_groups.iter().map(|g| display_name_for_tag(g))),
    );
    surface.set_text(
        ElementId::RiskFactors,
        &join_or_placeholder(v.risk_factors.iter().map(String::as_str)),
    );
    surface.set_text(ElementId::ProtectionPriority, text_or_placeholder(&v.protection_priority));

    render_metadata(response.metadata.as_ref(), surface);
}

fn render_metadata<S: DisplaySurface + ?Sized>(metadata: Option<&Metadata>, surface: &mut S) {
    let empty = Metadata::default();
    let m = metadata.unwrap_or(&empty);

    surface.set_text(ElementId::DataSource, text_or_placeholder(&m.data_source));
    surface.set_text(ElementId::Location, text_or_placeholder(&m.location));
    surface.set_text(ElementId::Resolution, text_or_placeholder(&m.resolution));
    surface.set_text(
        ElementId::MetadataUpdated,
        &m.last_updated.as_deref().map(format_timestamp).unwrap_or_else(placeholder),
    );
}

/// Local-time rendering of a service timestamp, or the raw text if it does not parse.
///
/// The service sends either RFC 3339 or a naive ISO timestamp in UTC.
pub fn format_timestamp(raw: &str) -> String {
    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(FORMAT).to_string();
    }

    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => naive.and_utc().with_timezone(&Local).format(FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

fn or_placeholder(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(placeholder)
}

fn text_or_placeholder(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => PLACEHOLDER,
    }
}

fn join_or_placeholder<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let joined = items.collect::<Vec<_>>().join(", ");
    if joined.is_empty() { placeholder() } else { joined }
}
