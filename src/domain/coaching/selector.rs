//! Deterministic technique selection.
//!
//! Selection runs up to three passes over the catalog in stored order:
//!
//! 1. first technique of the barrier's category with a keyword found in the barrier
//! 2. first technique of the barrier's category
//! 3. first technique in the catalog, whatever its category
//!
//! There is no scoring; ties are always broken by catalog position.

use serde::Serialize;

use super::{BarrierCategory, CoachingError, Technique, TechniqueCatalog};

/// Why a technique was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionReason {
    /// Category matched and the barrier contained this keyword.
    KeywordMatch { keyword: String },
    /// Category matched but no keyword did.
    CategoryDefault,
    /// Nothing in the catalog targets the category.
    CatalogFallback,
}

/// A selected technique together with the rule that picked it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    pub technique: &'a Technique,
    pub reason: SelectionReason,
}

/// Picks a technique for a classified barrier.
///
/// Fails with [`CoachingError::EmptyCatalog`] only when the catalog has no entries.
pub fn select_technique<'a>(
    catalog: &'a TechniqueCatalog,
    barrier: &str,
    category: BarrierCategory,
) -> Result<Selection<'a>, CoachingError> {
    let barrier_lower = barrier.to_lowercase();

    for technique in catalog.for_category(category) {
        if let Some(keyword) = technique.matching_keyword(&barrier_lower) {
            return Ok(Selection {
                technique,
                reason: SelectionReason::KeywordMatch {
                    keyword: keyword.to_string(),
                },
            });
        }
    }

    if let Some(technique) = catalog.for_category(category).next() {
        return Ok(Selection {
            technique,
            reason: SelectionReason::CategoryDefault,
        });
    }

    catalog
        .first()
        .map(|technique| Selection {
            technique,
            reason: SelectionReason::CatalogFallback,
        })
        .ok_or(CoachingError::EmptyCatalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn technique(name: &str, category: BarrierCategory, keywords: &[&str]) -> Technique {
        Technique::new(
            name,
            category,
            keywords.iter().map(|k| k.to_string()).collect(),
            "Do [GOAL].",
        )
    }

    fn sample_catalog() -> TechniqueCatalog {
        TechniqueCatalog::new(vec![
            technique("Skill Builder", BarrierCategory::Capability, &["how", "know"]),
            technique("Habit Stacking", BarrierCategory::Opportunity, &["forget"]),
            technique("Time Blocking", BarrierCategory::Opportunity, &["time", "busy"]),
            technique("Temptation Bundling", BarrierCategory::Motivation, &["boring"]),
            technique("Values Reflection", BarrierCategory::Motivation, &["tired", "why"]),
        ])
        .unwrap()
    }

    #[test]
    fn keyword_match_within_category_wins() {
        let catalog = sample_catalog();
        let selection =
            select_technique(&catalog, "I'm always too TIRED", BarrierCategory::Motivation)
                .unwrap();

        assert_eq!(selection.technique.name, "Values Reflection");
        assert_eq!(
            selection.reason,
            SelectionReason::KeywordMatch {
                keyword: "tired".to_string()
            }
        );
    }

    #[test]
    fn first_keyword_match_in_catalog_order_wins() {
        let catalog = sample_catalog();
        let selection = select_technique(
            &catalog,
            "I forget and I have no time",
            BarrierCategory::Opportunity,
        )
        .unwrap();

        assert_eq!(selection.technique.name, "Habit Stacking");
    }

    #[test]
    fn keywords_of_other_categories_are_ignored() {
        let catalog = sample_catalog();
        let selection =
            select_technique(&catalog, "it's boring", BarrierCategory::Capability).unwrap();

        assert_eq!(selection.technique.name, "Skill Builder");
        assert_eq!(selection.reason, SelectionReason::CategoryDefault);
    }

    #[test]
    fn falls_back_to_first_of_category_without_keyword_match() {
        let catalog = sample_catalog();
        let selection = select_technique(
            &catalog,
            "my gym closed down",
            BarrierCategory::Opportunity,
        )
        .unwrap();

        assert_eq!(selection.technique.name, "Habit Stacking");
        assert_eq!(selection.reason, SelectionReason::CategoryDefault);
    }

    #[test]
    fn falls_back_to_first_entry_when_category_missing() {
        let catalog = TechniqueCatalog::new(vec![
            technique("Only Capability", BarrierCategory::Capability, &["how"]),
            technique("Only Opportunity", BarrierCategory::Opportunity, &["time"]),
        ])
        .unwrap();

        let selection =
            select_technique(&catalog, "I'm too tired", BarrierCategory::Motivation).unwrap();

        assert_eq!(selection.technique.name, "Only Capability");
        assert_eq!(selection.reason, SelectionReason::CatalogFallback);
    }

    #[test]
    fn empty_catalog_fails() {
        let catalog = TechniqueCatalog::empty();
        let result = select_technique(&catalog, "anything", BarrierCategory::Motivation);

        assert!(matches!(result, Err(CoachingError::EmptyCatalog)));
    }

    #[test]
    fn single_motivation_technique_is_selected_for_tired_barrier() {
        let catalog = TechniqueCatalog::new(vec![Technique::new(
            "A",
            BarrierCategory::Motivation,
            vec!["tired".to_string(), "bored".to_string()],
            "Try pairing [GOAL] with something fun.",
        )])
        .unwrap();

        let selection =
            select_technique(&catalog, "I'm too tired", BarrierCategory::Motivation).unwrap();

        assert_eq!(selection.technique.name, "A");
    }

    #[test]
    fn selection_reason_serializes_with_kind_tag() {
        let json = serde_json::to_value(SelectionReason::KeywordMatch {
            keyword: "tired".to_string(),
        })
        .unwrap();
        assert_eq!(json["kind"], "keyword_match");
        assert_eq!(json["keyword"], "tired");

        let json = serde_json::to_value(SelectionReason::CatalogFallback).unwrap();
        assert_eq!(json["kind"], "catalog_fallback");
    }

    fn category_strategy() -> impl Strategy<Value = BarrierCategory> {
        prop_oneof![
            Just(BarrierCategory::Capability),
            Just(BarrierCategory::Opportunity),
            Just(BarrierCategory::Motivation),
        ]
    }

    proptest! {
        #[test]
        fn selection_respects_category_when_available(
            barrier in "[a-z ]{0,40}",
            category in category_strategy(),
        ) {
            let catalog = sample_catalog();
            let selection = select_technique(&catalog, &barrier, category).unwrap();
            prop_assert_eq!(selection.technique.target_component, category);
        }

        #[test]
        fn selection_is_deterministic(
            barrier in ".{0,40}",
            category in category_strategy(),
        ) {
            let catalog = sample_catalog();
            let first = select_technique(&catalog, &barrier, category).unwrap();
            let second = select_technique(&catalog, &barrier, category).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
