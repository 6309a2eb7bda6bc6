use crate::calc::{AchievementTier, DerivedStats, MAX_STARS, NextGoal, calculate_stats, star_rating};
use crate::data::{Catalog, ClimbStore, FileStorage, persistence::get_data_dir};
use anyhow::Result;

pub fn run() -> Result<()> {
    let catalog = Catalog::load()?;
    let store = ClimbStore::open(FileStorage::new(get_data_dir()?));
    let stats = calculate_stats(&catalog, store.state());
    write_stats(&stats, &mut std::io::stdout())
}

pub(crate) fn write_stats<W: std::io::Write>(stats: &DerivedStats, out: &mut W) -> Result<()> {
    let stars = star_rating(stats.climbed);
    let star_bar: String = (0..MAX_STARS).map(|i| if i < stars { '★' } else { '☆' }).collect();

    writeln!(out, "Taiwan 100 Peaks Progress")?;
    writeln!(out, "---")?;
    writeln!(out, "{:<14} {} / {}", "Climbed:", stats.climbed, stats.total)?;
    writeln!(out, "{:<14} {}", "Remaining:", stats.remaining)?;
    writeln!(out, "{:<14} {}%", "Completion:", stats.percentage)?;
    writeln!(out, "---")?;
    writeln!(out, "{:<14} {}", "Level:", AchievementTier::for_count(stats.climbed))?;
    writeln!(out, "{:<14} {}", "Stars:", star_bar)?;
    writeln!(out, "{:<14} {}", "Next Goal:", NextGoal::from_stats(stats))?;

    Ok(())
}
