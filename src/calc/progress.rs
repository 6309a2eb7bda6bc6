use crate::data::{Catalog, ClimbState};
use std::fmt;

pub const MAX_STARS: u8 = 5;
pub const PEAKS_PER_STAR: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DerivedStats {
    /// Climbed ids that exist in the catalog.
    pub climbed: usize,
    pub total: usize,
    pub remaining: usize,
    /// `round(climbed / total * 100)`, 0 for an empty catalog.
    pub percentage: u8,
}

pub fn calculate_stats(catalog: &Catalog, state: &ClimbState) -> DerivedStats {
    let total = catalog.len();
    let climbed = state.count_in(catalog).min(total);
    DerivedStats {
        climbed,
        total,
        remaining: total - climbed,
        percentage: completion_percentage(climbed, total),
    }
}

/// Rounds half up, so 2 of 3 is 67 and 1 of 8 is 13.
pub fn completion_percentage(climbed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let climbed = climbed.min(total);
    ((climbed * 200 + total) / (total * 2)) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AchievementTier {
    Novice,
    PeakHunter,
    MountaineeringMaster,
    HundredPeaksLegend,
}

impl AchievementTier {
    const ALL: [AchievementTier; 4] = [
        AchievementTier::HundredPeaksLegend,
        AchievementTier::MountaineeringMaster,
        AchievementTier::PeakHunter,
        AchievementTier::Novice,
    ];

    /// Inclusive lower bound of the tier.
    pub fn threshold(self) -> usize {
        match self {
            AchievementTier::Novice => 0,
            AchievementTier::PeakHunter => 10,
            AchievementTier::MountaineeringMaster => 50,
            AchievementTier::HundredPeaksLegend => 100,
        }
    }

    pub fn for_count(climbed: usize) -> Self {
        Self::ALL
            .into_iter()
            .find(|tier| climbed >= tier.threshold())
            .unwrap_or(AchievementTier::Novice)
    }

    pub fn label(self) -> &'static str {
        match self {
            AchievementTier::Novice => "Novice",
            AchievementTier::PeakHunter => "Peak Hunter",
            AchievementTier::MountaineeringMaster => "Mountaineering Master",
            AchievementTier::HundredPeaksLegend => "Hundred Peaks Legend",
        }
    }
}

impl fmt::Display for AchievementTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Number of lit star slots, one per twenty peaks.
pub fn star_rating(climbed: usize) -> u8 {
    (climbed / PEAKS_PER_STAR).min(MAX_STARS as usize) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextGoal {
    /// Every peak in a non-empty catalog is climbed.
    Complete,
    /// Ordinal of the next peak to climb.
    Peak(usize),
}

impl NextGoal {
    pub fn from_stats(stats: &DerivedStats) -> Self {
        if stats.total > 0 && stats.climbed == stats.total {
            NextGoal::Complete
        } else {
            NextGoal::Peak(stats.climbed + 1)
        }
    }
}

impl fmt::Display for NextGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextGoal::Complete => f.write_str("All peaks complete!"),
            NextGoal::Peak(n) => write!(f, "On to peak #{n}"),
        }
    }
}
