pub mod filter;
pub mod progress;
pub mod view_model;

pub use filter::{CaseMode, FilterState, RangeFilter, cycle_range, filtered_peaks, range_list};
pub use progress::{
    AchievementTier, DerivedStats, MAX_STARS, NextGoal, calculate_stats, star_rating,
};
pub use view_model::DerivedView;
