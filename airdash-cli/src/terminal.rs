//! Terminal implementations of the dashboard rendering seams.

use std::collections::BTreeMap;

use airdash_core::render::{
    ChartCanvas, ChartHandle, ChartRenderer, CircleOverlay, DisplaySurface, ElementId, LineChart,
    ListItem, ListRegion, MapHandle, MapRenderer, MapView, Marker, PLACEHOLDER, QualityStyle,
    SpecificSection,
};
use comfy_table::{
    Attribute, Cell, Color, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS,
    presets::UTF8_FULL,
};

const BAR_WIDTH: usize = 30;

fn table(header: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new(header).add_attribute(Attribute::Bold)]);
    table
}

fn quality_color(style: QualityStyle) -> Color {
    match style {
        QualityStyle::Good => Color::Green,
        QualityStyle::Moderate => Color::Yellow,
        QualityStyle::Bad => Color::Red,
        QualityStyle::VeryBad => Color::Magenta,
    }
}

/// Holds the latest value of every named element and prints them as panels.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    texts: BTreeMap<ElementId, String>,
    styles: BTreeMap<ElementId, QualityStyle>,
    lists: BTreeMap<ListRegion, Vec<ListItem>>,
    specific: Option<SpecificSection>,
    alert: Option<String>,
}

impl TerminalSurface {
    /// Latest alert raised by the controller; the caller decides how to report it.
    pub fn alert_message(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    fn cell(&self, element: ElementId) -> Cell {
        let text = self.texts.get(&element).map(String::as_str).unwrap_or(PLACEHOLDER);
        let cell = Cell::new(text);
        match self.styles.get(&element) {
            Some(style) => cell.fg(quality_color(*style)).add_attribute(Attribute::Bold),
            None => cell,
        }
    }

    fn panel(&self, header: &str, rows: &[(&str, ElementId)]) -> String {
        let mut t = table(header);
        for (label, element) in rows {
            t.add_row(vec![Cell::new(label), self.cell(*element)]);
        }
        t.to_string()
    }

    fn list_panel(&self, header: &str, items: &[ListItem]) -> String {
        let mut t = table(header);
        for item in items {
            let cell = Cell::new(format!("• {}", item.text));
            t.add_row(vec![if item.emphasis {
                cell.add_attribute(Attribute::Bold).fg(Color::Yellow)
            } else {
                cell
            }]);
        }
        t.to_string()
    }

    pub fn render_report(&self) -> String {
        let mut out = Vec::new();

        out.push(self.panel(
            "Air quality",
            &[
                ("NO2 (µg/m³)", ElementId::No2Value),
                ("PM2.5 (µg/m³)", ElementId::Pm25Value),
                ("Quality", ElementId::QualityIndex),
                ("AQI", ElementId::AqiValue),
                ("Updated", ElementId::LastUpdated),
            ],
        ));
        out.push(self.panel(
            "Weather",
            &[
                ("Temperature (°C)", ElementId::Temperature),
                ("Wind (km/h)", ElementId::WindSpeed),
                ("Humidity (%)", ElementId::Humidity),
                ("Condition", ElementId::WeatherCondition),
            ],
        ));
        out.push(self.panel(
            "Vulnerability",
            &[
                ("Area type", ElementId::AreaType),
                ("Risk level", ElementId::RiskLevel),
                ("Vulnerable groups", ElementId::VulnerableGroups),
                ("Risk factors", ElementId::RiskFactors),
                ("Protection priority", ElementId::ProtectionPriority),
            ],
        ));

        let persona = self
            .texts
            .get(&ElementId::SelectedPersona)
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER);
        let general = self.lists.get(&ListRegion::General).map(Vec::as_slice).unwrap_or(&[]);
        out.push(self.list_panel(&format!("Recommendations for {persona}"), general));

        if let Some(section) = &self.specific {
            out.push(self.list_panel(&section.heading, &section.items));
        }

        let immediate =
            self.lists.get(&ListRegion::ImmediateActions).map(Vec::as_slice).unwrap_or(&[]);
        out.push(self.list_panel("Immediate actions", immediate));

        out.push(self.panel(
            "Source",
            &[
                ("Data source", ElementId::DataSource),
                ("Location", ElementId::Location),
                ("Resolution", ElementId::Resolution),
                ("Data updated", ElementId::MetadataUpdated),
            ],
        ));

        out.join("\n")
    }
}

impl DisplaySurface for TerminalSurface {
    fn set_text(&mut self, element: ElementId, text: &str) {
        self.texts.insert(element, text.to_string());
    }

    fn set_style(&mut self, element: ElementId, style: Option<QualityStyle>) {
        match style {
            Some(style) => self.styles.insert(element, style),
            None => self.styles.remove(&element),
        };
    }

    fn set_list(&mut self, region: ListRegion, items: Vec<ListItem>) {
        self.lists.insert(region, items);
    }

    fn set_specific(&mut self, section: Option<SpecificSection>) {
        self.specific = section;
    }

    fn set_busy(&mut self, busy: bool, label: &str) {
        if busy {
            eprintln!("{label}");
        }
    }

    fn alert(&mut self, message: &str) {
        self.alert = Some(message.to_string());
    }
}

/// Draws line charts as horizontal bar tables.
#[derive(Debug, Default)]
pub struct TerminalCharts {
    next_id: u64,
    live: BTreeMap<u64, LineChart>,
}

impl TerminalCharts {
    pub fn render_report(&self) -> String {
        let mut charts: Vec<&LineChart> = self.live.values().collect();
        charts.sort_by_key(|c| c.canvas);
        charts.into_iter().map(render_chart).collect::<Vec<_>>().join("\n")
    }
}

fn render_chart(chart: &LineChart) -> String {
    let mut t = table(chart.canvas.title());
    if chart.labels.is_empty() {
        t.add_row(vec!["no data"]);
        return t.to_string();
    }

    let max = chart.dataset.data.iter().copied().fold(0.0_f64, f64::max);
    let color = match chart.canvas {
        ChartCanvas::Historical => Color::Cyan,
        ChartCanvas::Forecast => Color::Yellow,
    };

    for (label, value) in chart.labels.iter().zip(&chart.dataset.data) {
        t.add_row(vec![
            Cell::new(label),
            Cell::new(format!("{value:.2}")),
            Cell::new(bar(*value, max)).fg(color),
        ]);
    }
    t.add_row(vec![Cell::new(""), Cell::new(chart.dataset.label), Cell::new("")]);
    t.to_string()
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.clamp(1, BAR_WIDTH))
}

impl ChartRenderer for TerminalCharts {
    fn draw(&mut self, chart: LineChart) -> ChartHandle {
        self.next_id += 1;
        self.live.insert(self.next_id, chart);
        ChartHandle::new(self.next_id)
    }

    fn dispose(&mut self, handle: ChartHandle) {
        self.live.remove(&handle.id());
    }
}

#[derive(Debug)]
struct TerminalMap {
    view: MapView,
    markers: Vec<Marker>,
    circles: Vec<CircleOverlay>,
}

/// Lists the map's center marker and risk-zone overlays.
#[derive(Debug, Default)]
pub struct TerminalMaps {
    next_id: u64,
    live: BTreeMap<u64, TerminalMap>,
}

impl TerminalMaps {
    pub fn render_report(&self) -> String {
        self.live.values().map(render_map).collect::<Vec<_>>().join("\n")
    }
}

fn render_map(map: &TerminalMap) -> String {
    let mut t = table(&format!(
        "Risk map @ {:.4}, {:.4} (zoom {})",
        map.view.center.lat, map.view.center.lon, map.view.zoom
    ));

    for marker in &map.markers {
        t.add_row(vec![
            Cell::new("📍"),
            Cell::new(format!("{:.4}, {:.4}", marker.position.lat, marker.position.lon)),
            Cell::new(&marker.popup),
        ]);
    }
    for circle in &map.circles {
        t.add_row(vec![
            Cell::new("◯"),
            Cell::new(format!("{:.4}, {:.4}", circle.center.lat, circle.center.lon)),
            Cell::new(format!(
                "{} risk, {} m radius ({})",
                circle.risk, circle.radius_m, circle.color
            ))
            .fg(hex_color(circle.color)),
        ]);
    }
    t.to_string()
}

fn hex_color(hex: &str) -> Color {
    let channel = |i: usize| {
        u8::from_str_radix(hex.get(i..i + 2).unwrap_or("ff"), 16).unwrap_or(255)
    };
    Color::Rgb {
        r: channel(1),
        g: channel(3),
        b: channel(5),
    }
}

impl MapRenderer for TerminalMaps {
    fn create(&mut self, view: MapView) -> MapHandle {
        self.next_id += 1;
        let map = TerminalMap {
            view,
            markers: Vec::new(),
            circles: Vec::new(),
        };
        self.live.insert(self.next_id, map);
        MapHandle::new(self.next_id)
    }

    fn add_marker(&mut self, map: &MapHandle, marker: Marker) {
        if let Some(m) = self.live.get_mut(&map.id()) {
            m.markers.push(marker);
        }
    }

    fn add_circle(&mut self, map: &MapHandle, circle: CircleOverlay) {
        if let Some(m) = self.live.get_mut(&map.id()) {
            m.circles.push(circle);
        }
    }

    fn dispose(&mut self, map: MapHandle) {
        self.live.remove(&map.id());
    }
}
