use crate::{
    model::{RecommendationCategory, Recommendations},
    persona::Persona,
};

use super::{DisplaySurface, ListItem, ListRegion};

pub const NO_GENERAL_RECOMMENDATIONS: &str = "No general recommendations at this time.";
pub const NO_IMMEDIATE_ACTIONS: &str = "No immediate actions required.";

/// Recommendations tailored to the selected persona.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificSection {
    pub category: RecommendationCategory,
    pub heading: String,
    pub items: Vec<ListItem>,
}

/// Rebuilds the general, persona-specific and immediate-action regions.
pub fn render_recommendations<S: DisplaySurface + ?Sized>(
    recommendations: &Recommendations,
    persona: Persona,
    surface: &mut S,
) {
    let general = if recommendations.general.is_empty() {
        vec![ListItem::plain(NO_GENERAL_RECOMMENDATIONS)]
    } else {
        recommendations.general.iter().map(ListItem::plain).collect()
    };
    surface.set_list(ListRegion::General, general);

    surface.set_specific(specific_section(recommendations, persona));

    let immediate = if recommendations.immediate_actions.is_empty() {
        vec![ListItem::plain(NO_IMMEDIATE_ACTIONS)]
    } else {
        recommendations.immediate_actions.iter().map(ListItem::emphasized).collect()
    };
    surface.set_list(ListRegion::ImmediateActions, immediate);
}

fn specific_section(
    recommendations: &Recommendations,
    persona: Persona,
) -> Option<SpecificSection> {
    let category = persona.category();
    let items = recommendations.category(category);

    if items.is_empty() {
        return None;
    }

    Some(SpecificSection {
        category,
        heading: format!("Specific for {} ({category}):", persona.display_name()),
        items: items.iter().map(ListItem::plain).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::fixtures, render::testing::RecordingSurface};

    #[test]
    fn children_read_school_recommendations() {
        let recs = fixtures::mexico_city().recommendations;
        let mut surface = RecordingSurface::default();

        render_recommendations(&recs, Persona::Children, &mut surface);

        let specific = surface.specific.expect("school list is not empty");
        assert_eq!(specific.category, RecommendationCategory::ForSchools);
        assert_eq!(specific.heading, "Specific for Children (for_schools):");
        assert_eq!(
            specific.items,
            vec![ListItem::plain("Suspender educación física al aire libre")]
        );
    }

    #[test]
    fn unmapped_persona_falls_back_to_general() {
        let recs = fixtures::mexico_city().recommendations;
        let mut surface = RecordingSurface::default();

        render_recommendations(&recs, Persona::LowIncome, &mut surface);

        let specific = surface.specific.expect("general list is not empty");
        assert_eq!(specific.category, RecommendationCategory::General);
        assert_eq!(specific.items.len(), recs.general.len());
    }

    #[test]
    fn empty_lists_render_placeholders() {
        let recs = Recommendations::default();
        let mut surface = RecordingSurface::default();

        render_recommendations(&recs, Persona::Elderly, &mut surface);

        assert_eq!(surface.list_texts(ListRegion::General), vec![NO_GENERAL_RECOMMENDATIONS]);
        assert_eq!(surface.list_texts(ListRegion::ImmediateActions), vec![NO_IMMEDIATE_ACTIONS]);
        assert!(!surface.lists[&ListRegion::ImmediateActions][0].emphasis);
        assert!(surface.specific.is_none());
    }

    #[test]
    fn immediate_actions_are_emphasized() {
        let recs = fixtures::mexico_city().recommendations;
        let mut surface = RecordingSurface::default();

        render_recommendations(&recs, Persona::Adults, &mut surface);

        let actions = &surface.lists[&ListRegion::ImmediateActions];
        assert_eq!(actions.len(), 1);
        assert!(actions.iter().all(|a| a.emphasis));
    }

    #[test]
    fn each_pass_replaces_previous_content() {
        let recs = fixtures::mexico_city().recommendations;
        let mut surface = RecordingSurface::default();
        render_recommendations(&recs, Persona::Hospitals, &mut surface);
        assert!(surface.specific.is_none(), "fixture has no health-center advice");

        render_recommendations(&recs, Persona::Elderly, &mut surface);
        render_recommendations(&Recommendations::default(), Persona::Elderly, &mut surface);

        assert_eq!(surface.list_texts(ListRegion::General), vec![NO_GENERAL_RECOMMENDATIONS]);
        assert!(surface.specific.is_none());
    }
}
