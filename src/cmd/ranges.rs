use crate::calc::{RangeFilter, range_list};
use crate::data::Catalog;
use anyhow::Result;

pub fn run() -> Result<()> {
    let catalog = Catalog::load()?;
    write_ranges(&catalog, &mut std::io::stdout())
}

/// One line per range with its peak count; the `All` entry is skipped.
pub(crate) fn write_ranges<W: std::io::Write>(catalog: &Catalog, out: &mut W) -> Result<()> {
    for range in range_list(catalog) {
        if let RangeFilter::Named(label) = &range {
            let count = catalog
                .peaks()
                .iter()
                .filter(|p| range.matches(&p.mountain_range))
                .count();
            writeln!(out, "{:<24} {:>3}", label, count)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::peak::test_peak;

    #[test]
    fn test_write_ranges_sorted_with_counts() {
        let catalog = Catalog::new(vec![
            test_peak("A", 1, "Snow Mountain Range"),
            test_peak("B", 2, "Central Range"),
            test_peak("C", 3, "Central Range"),
        ])
        .unwrap();
        let mut buf = Vec::new();
        write_ranges(&catalog, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Central Range"));
        assert!(lines[0].ends_with("2"));
        assert!(lines[1].starts_with("Snow Mountain Range"));
    }

    #[test]
    fn test_write_ranges_bundled_catalog() {
        let catalog = Catalog::bundled().unwrap();
        let mut buf = Vec::new();
        write_ranges(&catalog, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("Yushan Range"));
        assert!(!output.contains("All ranges"));
    }
}
