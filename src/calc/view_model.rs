use crate::calc::filter::{CaseMode, FilterState, RangeFilter, filtered_peaks, range_list};
use crate::calc::progress::{AchievementTier, DerivedStats, NextGoal, calculate_stats, star_rating};
use crate::data::{Catalog, ClimbState, Peak};

/// Everything the panels read, computed in one pass from the catalog, the
/// climb state and the filter. Never persisted.
#[derive(Debug, Clone)]
pub struct DerivedView<'a> {
    pub stats: DerivedStats,
    pub tier: AchievementTier,
    pub stars: u8,
    pub next_goal: NextGoal,
    pub ranges: Vec<RangeFilter>,
    /// Filtered peaks sorted by rank. May be empty.
    pub peaks: Vec<&'a Peak>,
}

impl<'a> DerivedView<'a> {
    pub fn compute(
        catalog: &'a Catalog,
        state: &ClimbState,
        filter: &FilterState,
        case: CaseMode,
    ) -> Self {
        let stats = calculate_stats(catalog, state);
        DerivedView {
            stats,
            tier: AchievementTier::for_count(stats.climbed),
            stars: star_rating(stats.climbed),
            next_goal: NextGoal::from_stats(&stats),
            ranges: range_list(catalog),
            peaks: filtered_peaks(catalog, filter, case),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::peak::test_peak;

    #[test]
    fn test_compute_three_peak_scenario() {
        let catalog = Catalog::new(vec![
            test_peak("A", 2, "R"),
            test_peak("B", 1, "R"),
            test_peak("C", 3, "R"),
        ])
        .unwrap();
        let state = ClimbState::from_ids(["A", "C"]);
        let view =
            DerivedView::compute(&catalog, &state, &FilterState::default(), CaseMode::default());
        assert_eq!(view.stats.climbed, 2);
        assert_eq!(view.stats.remaining, 1);
        assert_eq!(view.stats.percentage, 67);
        let order: Vec<&str> = view.peaks.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
        assert_eq!(view.tier, AchievementTier::Novice);
        assert_eq!(view.stars, 0);
        assert_eq!(view.next_goal, NextGoal::Peak(3));
    }

    #[test]
    fn test_compute_tier_from_catalog_count() {
        let catalog = Catalog::bundled().unwrap();
        let ids: Vec<String> = catalog
            .peaks()
            .iter()
            .take(10)
            .map(|p| p.id.clone())
            .collect();
        let state = ClimbState::from_ids(ids);
        let view =
            DerivedView::compute(&catalog, &state, &FilterState::default(), CaseMode::default());
        assert_eq!(view.tier, AchievementTier::PeakHunter);
        assert_eq!(view.stats.percentage, 10);
    }

    #[test]
    fn test_compute_empty_result_is_empty_vec() {
        let catalog = Catalog::bundled().unwrap();
        let filter = FilterState {
            search: "no such mountain".to_string(),
            range: RangeFilter::All,
        };
        let view =
            DerivedView::compute(&catalog, &ClimbState::default(), &filter, CaseMode::default());
        assert!(view.peaks.is_empty());
        assert_eq!(view.stats.total, 100);
        assert_eq!(view.ranges.len(), 4);
    }
}
