use crate::calc::{CaseMode, FilterState, RangeFilter, filtered_peaks};
use crate::data::{
    AppSettings, Catalog, ClimbState, ClimbStore, FileStorage, Peak, Persistable,
    persistence::get_data_dir,
};
use anyhow::Result;

pub fn run(search: Option<&str>, range: Option<&str>) -> Result<()> {
    let settings = AppSettings::load()?;
    let catalog = Catalog::load()?;
    let store = ClimbStore::open(FileStorage::new(get_data_dir()?));

    let filter = FilterState {
        search: search.unwrap_or_default().to_string(),
        range: range.map(RangeFilter::parse).unwrap_or_default(),
    };
    let case = CaseMode::from_sensitive(settings.case_sensitive_search);
    let peaks = filtered_peaks(&catalog, &filter, case);
    write_peaks(&peaks, store.state(), &mut std::io::stdout())
}

pub(crate) fn write_peaks<W: std::io::Write>(
    peaks: &[&Peak],
    state: &ClimbState,
    out: &mut W,
) -> Result<()> {
    if peaks.is_empty() {
        writeln!(out, "No peaks match the current filters.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<4} {:<5} {:<6} {:<24} {:>6}  {:<4} {}",
        "Rank", "Done", "ID", "Name", "Height", "Diff", "Range"
    )?;
    writeln!(out, "{}", "-".repeat(72))?;
    for p in peaks {
        let done = if state.contains(&p.id) { "✓" } else { "" };
        writeln!(
            out,
            "{:<4} {:<5} {:<6} {:<24} {:>5}m  {:<4} {}",
            p.rank, done, p.id, p.name, p.height, p.difficulty, p.mountain_range
        )?;
    }
    writeln!(out, "{}", "-".repeat(72))?;
    writeln!(out, "{} peak(s)", peaks.len())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::peak::test_peak;

    #[test]
    fn test_write_peaks_marks_climbed() {
        let a = test_peak("A", 1, "Central Range");
        let b = test_peak("B", 2, "Central Range");
        let mut buf = Vec::new();
        write_peaks(&[&a, &b], &ClimbState::from_ids(["B"]), &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let b_line = output.lines().find(|l| l.contains("Peak B")).unwrap();
        let a_line = output.lines().find(|l| l.contains("Peak A")).unwrap();
        assert!(b_line.contains('✓'));
        assert!(!a_line.contains('✓'));
        assert!(output.contains("2 peak(s)"));
    }

    #[test]
    fn test_write_peaks_empty() {
        let mut buf = Vec::new();
        write_peaks(&[], &ClimbState::default(), &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("No peaks match"));
    }

    #[test]
    fn test_write_peaks_in_given_order() {
        let a = test_peak("A", 2, "R");
        let b = test_peak("B", 1, "R");
        let catalog = Catalog::new(vec![a, b]).unwrap();
        let peaks = filtered_peaks(&catalog, &FilterState::default(), CaseMode::default());
        let mut buf = Vec::new();
        write_peaks(&peaks, &ClimbState::default(), &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let pos_a = output.find("Peak A").unwrap();
        let pos_b = output.find("Peak B").unwrap();
        assert!(pos_b < pos_a);
    }
}
