use crate::model::RecommendationCategory;

/// Display name used for tags that are not a known persona.
pub const FALLBACK_DISPLAY_NAME: &str = "General";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Persona {
    Children,
    Elderly,
    #[default]
    Adults,
    Asthmatics,
    OutdoorWorkers,
    Schools,
    Hospitals,
    LowIncome,
    ElderlyCommunities,
}

impl Persona {
    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Children => "children",
            Persona::Elderly => "elderly",
            Persona::Adults => "adults",
            Persona::Asthmatics => "asthmatics",
            Persona::OutdoorWorkers => "outdoor_workers",
            Persona::Schools => "schools",
            Persona::Hospitals => "hospitals",
            Persona::LowIncome => "low_income",
            Persona::ElderlyCommunities => "elderly_communities",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::Children => "Children",
            Persona::Elderly => "Older Adults",
            Persona::Adults => "Adults",
            Persona::Asthmatics => "Asthmatics",
            Persona::OutdoorWorkers => "Outdoor Workers",
            Persona::Schools => "Schools",
            Persona::Hospitals => "Hospitals",
            Persona::LowIncome => "Low-Income Households",
            Persona::ElderlyCommunities => "Senior Communities",
        }
    }

    /// Which keyed recommendation list this persona reads from.
    ///
    /// Personas without an entry in the lookup use the general list.
    pub fn category(&self) -> RecommendationCategory {
        match self {
            Persona::Children | Persona::Schools => RecommendationCategory::ForSchools,
            Persona::Elderly => RecommendationCategory::ForElderly,
            Persona::Hospitals => RecommendationCategory::ForHealthCenters,
            Persona::Asthmatics | Persona::OutdoorWorkers | Persona::Adults => {
                RecommendationCategory::General
            }
            Persona::LowIncome | Persona::ElderlyCommunities => RecommendationCategory::General,
        }
    }

    pub const fn all() -> &'static [Persona] {
        &[
            Persona::Children,
            Persona::Elderly,
            Persona::Adults,
            Persona::Asthmatics,
            Persona::OutdoorWorkers,
            Persona::Schools,
            Persona::Hospitals,
            Persona::LowIncome,
            Persona::ElderlyCommunities,
        ]
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Persona {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        Persona::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| {
                let known: Vec<&str> = Persona::all().iter().map(Persona::as_str).collect();
                anyhow::anyhow!(
                    "Unknown persona '{value}'. Supported personas: {}.",
                    known.join(", ")
                )
            })
    }
}

/// Human name for a group tag as sent by the service (e.g. `vulnerable_groups`).
pub fn display_name_for_tag(tag: &str) -> &'static str {
    Persona::try_from(tag)
        .map(|p| p.display_name())
        .unwrap_or(FALLBACK_DISPLAY_NAME)
}
