use crate::model::{Coordinate, RiskZone};

/// Radius used for zones that do not carry one, in metres.
pub const DEFAULT_ZONE_RADIUS_M: f64 = 500.0;
pub const DEFAULT_ZOOM: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleOverlay {
    pub center: Coordinate,
    pub radius_m: f64,
    pub risk: String,
    pub color: &'static str,
    pub fill_opacity: f64,
}

/// Owned reference to a live map instance.
#[derive(Debug, PartialEq, Eq)]
pub struct MapHandle(u64);

impl MapHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

pub trait MapRenderer {
    fn create(&mut self, view: MapView) -> MapHandle;

    fn add_marker(&mut self, map: &MapHandle, marker: Marker);

    fn add_circle(&mut self, map: &MapHandle, circle: CircleOverlay);

    fn dispose(&mut self, map: MapHandle);
}

pub fn risk_color(risk: &str) -> &'static str {
    match risk {
        "high" => "#FF5252",
        "medium" => "#FFC107",
        "low" => "#4CAF50",
        _ => "#64FFDA",
    }
}

pub fn zone_overlay(zone: &RiskZone) -> CircleOverlay {
    CircleOverlay {
        center: zone.coords,
        radius_m: zone.radius.unwrap_or(DEFAULT_ZONE_RADIUS_M),
        risk: zone.risk.clone(),
        color: risk_color(&zone.risk),
        fill_opacity: 0.35,
    }
}

pub fn popup_text(no2: f64, risk_level: Option<&str>) -> String {
    format!(
        "Current NO2: {no2} µg/m³ | Risk level: {}",
        risk_level.unwrap_or(super::PLACEHOLDER)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(risk: &str, radius: Option<f64>) -> RiskZone {
        RiskZone {
            coords: Coordinate { lat: 1.0, lon: 2.0 },
            risk: risk.into(),
            radius,
        }
    }

    #[test]
    fn risk_tiers_have_distinct_colors() {
        assert_eq!(risk_color("high"), "#FF5252");
        assert_eq!(risk_color("medium"), "#FFC107");
        assert_eq!(risk_color("low"), "#4CAF50");
        assert_eq!(risk_color("extreme"), "#64FFDA");
        assert_eq!(risk_color(""), "#64FFDA");
    }

    #[test]
    fn zone_radius_defaults_when_missing() {
        assert_eq!(zone_overlay(&zone("low", None)).radius_m, DEFAULT_ZONE_RADIUS_M);
        assert_eq!(zone_overlay(&zone("high", Some(1000.0))).radius_m, 1000.0);
    }

    #[test]
    fn popup_summarizes_no2_and_risk() {
        assert_eq!(
            popup_text(45.12, Some("Alto")),
            "Current NO2: 45.12 µg/m³ | Risk level: Alto"
        );
        assert!(popup_text(3.0, None).ends_with("Risk level: N/A"));
    }
}
