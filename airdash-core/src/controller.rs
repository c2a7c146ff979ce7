use tracing::{debug, info, warn};

use crate::{
    error::DashboardError,
    model::{Coordinate, DashboardResponse, HealthStatus, Query, QueryInput, RiskZone},
    persona::Persona,
    render::{
        ChartHandle, ChartRenderer, DisplaySurface, ElementId, MapHandle, MapRenderer, MapView,
        Marker,
        charts::{forecast_chart, historical_chart},
        map::{DEFAULT_ZOOM, popup_text, zone_overlay},
        metrics::render_metrics,
        recommendations::render_recommendations,
    },
    service::DashboardService,
};

pub const SUBMIT_LABEL: &str = "Get data and recommendations";
pub const LOADING_LABEL: &str = "Loading data...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Loading { token: u64 },
}

/// Drives one dashboard: collects a query, calls the data service and
/// distributes the snapshot across the metrics, recommendations, map and
/// chart regions.
///
/// Owns every chart and map instance it creates and disposes them before
/// drawing replacements.
#[derive(Debug)]
pub struct DashboardController<Svc, S, C, M> {
    service: Svc,
    surface: S,
    charts: C,
    maps: M,
    state: ControllerState,
    next_token: u64,
    last: Option<DashboardResponse>,
    historical_chart: Option<ChartHandle>,
    forecast_chart: Option<ChartHandle>,
    map: Option<MapHandle>,
}

impl<Svc, S, C, M> DashboardController<Svc, S, C, M>
where
    Svc: DashboardService,
    S: DisplaySurface,
    C: ChartRenderer,
    M: MapRenderer,
{
    pub fn new(service: Svc, surface: S, charts: C, maps: M) -> Self {
        Self {
            service,
            surface,
            charts,
            maps,
            state: ControllerState::Idle,
            next_token: 0,
            last: None,
            historical_chart: None,
            forecast_chart: None,
            map: None,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn last_response(&self) -> Option<&DashboardResponse> {
        self.last.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn charts(&self) -> &C {
        &self.charts
    }

    pub fn maps(&self) -> &M {
        &self.maps
    }

    /// Validates the input, fetches one snapshot and re-renders every panel.
    ///
    /// On any error the user is alerted and the previous panels stay as they were.
    pub async fn submit(
        &mut self,
        input: &QueryInput,
    ) -> Result<&DashboardResponse, DashboardError> {
        self.surface.set_text(ElementId::SelectedPersona, input.persona.display_name());

        let query = match Query::try_from(input) {
            Ok(query) => query,
            Err(e) => {
                let err = DashboardError::from(e);
                warn!(error = %err, "rejected dashboard query");
                self.surface.alert(err.user_message());
                return Err(err);
            }
        };

        let token = self.begin_request();
        info!(
            token,
            lat = query.latitude,
            lon = query.longitude,
            persona = %query.persona,
            "requesting dashboard"
        );

        let result = self.service.fetch_dashboard(&query).await;
        self.finish_request(token);

        match result {
            Ok(response) => {
                debug!(token, quality = %response.air_quality.quality_index, "dashboard received");

                let Self {
                    surface,
                    charts,
                    maps,
                    last,
                    historical_chart,
                    forecast_chart,
                    map,
                    ..
                } = self;
                let response = &*last.insert(response);

                render_metrics(response, surface);
                render_recommendations(&response.recommendations, query.persona, surface);

                let risk_map = &response.visualization_data.risk_map;
                match risk_map.center {
                    Some(center) => replace_map(maps, map, center, &risk_map.risk_zones, response),
                    None => debug!("response has no risk map center, keeping previous map"),
                }
                replace_charts(charts, historical_chart, forecast_chart, response);

                Ok(response)
            }
            Err(e) => {
                let err = DashboardError::from(e);
                warn!(token, error = %err, "dashboard request failed");
                self.surface.alert(err.user_message());
                Err(err)
            }
        }
    }

    /// Updates the persona label without re-querying.
    pub fn on_persona_change(&mut self, persona: Persona) {
        self.surface.set_text(ElementId::SelectedPersona, persona.display_name());
    }

    pub async fn check_health(&self) -> Result<HealthStatus, DashboardError> {
        Ok(self.service.health().await?)
    }

    fn begin_request(&mut self) -> u64 {
        if let ControllerState::Loading { token } = self.state {
            warn!(stale = token, "superseding a request that never completed");
        }

        self.next_token += 1;
        self.state = ControllerState::Loading {
            token: self.next_token,
        };
        self.surface.set_busy(true, LOADING_LABEL);
        self.next_token
    }

    fn finish_request(&mut self, token: u64) {
        if self.state == (ControllerState::Loading { token }) {
            self.state = ControllerState::Idle;
            self.surface.set_busy(false, SUBMIT_LABEL);
        }
    }
}

/// Disposes the current map, if any, and draws a fresh one.
///
/// The center marker's popup summarizes the snapshot the map was drawn for.
fn replace_map<M: MapRenderer>(
    maps: &mut M,
    slot: &mut Option<MapHandle>,
    center: Coordinate,
    zones: &[RiskZone],
    response: &DashboardResponse,
) {
    if let Some(old) = slot.take() {
        maps.dispose(old);
    }

    let map = maps.create(MapView {
        center,
        zoom: DEFAULT_ZOOM,
    });

    let popup = popup_text(
        response.air_quality.no2_tropospheric,
        response.vulnerability_analysis.risk_level.as_deref(),
    );
    maps.add_marker(
        &map,
        Marker {
            position: center,
            popup,
        },
    );

    for zone in zones {
        maps.add_circle(&map, zone_overlay(zone));
    }

    debug!(zones = zones.len(), "map rendered");
    *slot = Some(map);
}

fn replace_charts<C: ChartRenderer>(
    charts: &mut C,
    historical: &mut Option<ChartHandle>,
    forecast: &mut Option<ChartHandle>,
    response: &DashboardResponse,
) {
    for old in [historical.take(), forecast.take()].into_iter().flatten() {
        charts.dispose(old);
    }

    let viz = &response.visualization_data;
    *historical = Some(charts.draw(historical_chart(&viz.historical_trend)));
    *forecast = Some(charts.draw(forecast_chart(&viz.forecast)));
}
