use crate::model::{ForecastPoint, TrendPoint};

pub const NO2_SERIES_LABEL: &str = "NO2 (µg/m³)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartCanvas {
    Historical,
    Forecast,
}

impl ChartCanvas {
    pub fn title(&self) -> &'static str {
        match self {
            ChartCanvas::Historical => "NO2 trend (last days)",
            ChartCanvas::Forecast => "NO2 forecast (next hours)",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<f64>,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub fill: bool,
    pub tension: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    pub legend_color: &'static str,
    pub tick_color: &'static str,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            legend_color: "#CCD6F6",
            tick_color: "#8892B0",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub canvas: ChartCanvas,
    pub labels: Vec<String>,
    pub dataset: Dataset,
    pub style: ChartStyle,
}

/// Owned reference to a live chart instance.
#[derive(Debug, PartialEq, Eq)]
pub struct ChartHandle(u64);

impl ChartHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

pub trait ChartRenderer {
    fn draw(&mut self, chart: LineChart) -> ChartHandle;

    fn dispose(&mut self, handle: ChartHandle);
}

/// NO2 by date over the historical window.
pub fn historical_chart(points: &[TrendPoint]) -> LineChart {
    LineChart {
        canvas: ChartCanvas::Historical,
        labels: points.iter().map(|p| p.date.clone()).collect(),
        dataset: Dataset {
            label: NO2_SERIES_LABEL,
            data: points.iter().map(|p| p.no2).collect(),
            border_color: "rgba(100, 255, 218, 1)",
            background_color: "rgba(100, 255, 218, 0.2)",
            fill: true,
            tension: 0.4,
        },
        style: ChartStyle::default(),
    }
}

/// NO2 by hour of day over the forecast window.
pub fn forecast_chart(points: &[ForecastPoint]) -> LineChart {
    LineChart {
        canvas: ChartCanvas::Forecast,
        labels: points.iter().map(|p| format!("{}:00", p.hour)).collect(),
        dataset: Dataset {
            label: NO2_SERIES_LABEL,
            data: points.iter().map(|p| p.no2).collect(),
            border_color: "rgba(255, 193, 7, 1)",
            background_color: "rgba(255, 193, 7, 0.2)",
            fill: true,
            tension: 0.4,
        },
        style: ChartStyle::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    #[test]
    fn historical_chart_is_labelled_by_date() {
        let viz = fixtures::mexico_city().visualization_data;
        let chart = historical_chart(&viz.historical_trend);

        assert_eq!(chart.canvas, ChartCanvas::Historical);
        assert_eq!(chart.labels, vec!["2025-10-03", "2025-10-04"]);
        assert_eq!(chart.dataset.data, vec![31.5, 44.0]);
        assert_eq!(chart.dataset.label, NO2_SERIES_LABEL);
    }

    #[test]
    fn forecast_chart_is_labelled_by_hour() {
        let viz = fixtures::mexico_city().visualization_data;
        let chart = forecast_chart(&viz.forecast);

        assert_eq!(chart.labels, vec!["15:00", "16:00", "17:00"]);
        assert_eq!(chart.dataset.border_color, "rgba(255, 193, 7, 1)");
        assert!(chart.dataset.fill);
    }

    #[test]
    fn empty_series_yield_empty_charts() {
        let chart = forecast_chart(&[]);
        assert!(chart.labels.is_empty());
        assert!(chart.dataset.data.is_empty());
    }
}
