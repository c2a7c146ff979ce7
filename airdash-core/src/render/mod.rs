//! Rendering seams between the controller and whatever draws the dashboard.
//!
//! The controller never touches a concrete UI. It writes text and styles into
//! named elements of a [`DisplaySurface`], and asks a [`ChartRenderer`] and a
//! [`MapRenderer`] for disposable instances. Handles are not `Clone`, so each
//! instance has exactly one owner and disposing it consumes the handle.

pub mod charts;
pub mod map;
pub mod metrics;
pub mod recommendations;

pub use charts::{ChartCanvas, ChartHandle, ChartRenderer, ChartStyle, Dataset, LineChart};
pub use map::{CircleOverlay, MapHandle, MapRenderer, MapView, Marker};
pub use metrics::QualityStyle;
pub use recommendations::SpecificSection;

/// Text shown wherever an optional value is missing.
pub const PLACEHOLDER: &str = "N/A";

/// Named display elements the controller writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    No2Value,
    Pm25Value,
    QualityIndex,
    AqiValue,
    LastUpdated,
    Temperature,
    WindSpeed,
    Humidity,
    WeatherCondition,
    AreaType,
    RiskLevel,
    VulnerableGroups,
    RiskFactors,
    ProtectionPriority,
    SelectedPersona,
    DataSource,
    Location,
    Resolution,
    MetadataUpdated,
}

/// Lists that are cleared and rebuilt on every render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListRegion {
    General,
    ImmediateActions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub text: String,
    pub emphasis: bool,
}

impl ListItem {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: true,
        }
    }
}

pub trait DisplaySurface {
    fn set_text(&mut self, element: ElementId, text: &str);

    /// Replaces the element's quality style; `None` clears it.
    fn set_style(&mut self, element: ElementId, style: Option<QualityStyle>);

    /// Replaces the whole list.
    fn set_list(&mut self, region: ListRegion, items: Vec<ListItem>);

    /// Replaces the persona-specific section; `None` leaves it empty.
    fn set_specific(&mut self, section: Option<SpecificSection>);

    fn set_busy(&mut self, busy: bool, label: &str);

    fn alert(&mut self, message: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording doubles for the rendering seams.

    use std::collections::{BTreeMap, BTreeSet};

    use super::*;

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub texts: BTreeMap<ElementId, String>,
        pub styles: BTreeMap<ElementId, QualityStyle>,
        pub lists: BTreeMap<ListRegion, Vec<ListItem>>,
        pub specific: Option<SpecificSection>,
        pub busy: bool,
        pub busy_history: Vec<(bool, String)>,
        pub alerts: Vec<String>,
    }

    impl RecordingSurface {
        pub fn text(&self, element: ElementId) -> Option<&str> {
            self.texts.get(&element).map(String::as_str)
        }

        pub fn list_texts(&self, region: ListRegion) -> Vec<&str> {
            self.lists
                .get(&region)
                .map(|items| items.iter().map(|i| i.text.as_str()).collect())
                .unwrap_or_default()
        }
    }

    impl DisplaySurface for RecordingSurface {
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
            self.busy = busy;
            self.busy_history.push((busy, label.to_string()));
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingCharts {
        next_id: u64,
        pub live: BTreeMap<u64, LineChart>,
        pub disposed: BTreeSet<u64>,
    }

    impl ChartRenderer for RecordingCharts {
        fn draw(&mut self, chart: LineChart) -> ChartHandle {
            self.next_id += 1;
            self.live.insert(self.next_id, chart);
            ChartHandle::new(self.next_id)
        }

        fn dispose(&mut self, handle: ChartHandle) {
            self.live.remove(&handle.id());
            self.disposed.insert(handle.id());
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordedMap {
        pub view: Option<MapView>,
        pub markers: Vec<Marker>,
        pub circles: Vec<CircleOverlay>,
    }

    #[derive(Debug, Default)]
    pub struct RecordingMaps {
        next_id: u64,
        pub live: BTreeMap<u64, RecordedMap>,
        pub created: usize,
    }

    impl MapRenderer for RecordingMaps {
        fn create(&mut self, view: MapView) -> MapHandle {
            self.next_id += 1;
            self.created += 1;
            let recorded = RecordedMap {
                view: Some(view),
                ..Default::default()
            };
            self.live.insert(self.next_id, recorded);
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
}
