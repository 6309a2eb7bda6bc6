use crate::data::{Catalog, Peak};
use std::collections::BTreeSet;
use std::fmt;

/// Selected mountain range, or the "all" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RangeFilter {
    #[default]
    All,
    Named(String),
}

impl RangeFilter {
    pub fn matches(&self, range: &str) -> bool {
        match self {
            RangeFilter::All => true,
            RangeFilter::Named(name) => name == range,
        }
    }

    /// Parses a command-line value; "all" in any case is the sentinel.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            RangeFilter::All
        } else {
            RangeFilter::Named(value.to_string())
        }
    }
}

impl fmt::Display for RangeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeFilter::All => f.write_str("All ranges"),
            RangeFilter::Named(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    #[default]
    Insensitive,
    Sensitive,
}

impl CaseMode {
    pub fn from_sensitive(sensitive: bool) -> Self {
        if sensitive {
            CaseMode::Sensitive
        } else {
            CaseMode::Insensitive
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search: String,
    pub range: RangeFilter,
}

impl FilterState {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.range != RangeFilter::All
    }

    pub fn clear(&mut self) {
        self.search.clear();
        self.range = RangeFilter::All;
    }
}

/// `All` followed by every distinct range label in lexical order.
pub fn range_list(catalog: &Catalog) -> Vec<RangeFilter> {
    let names: BTreeSet<&str> = catalog
        .peaks()
        .iter()
        .map(|p| p.mountain_range.as_str())
        .collect();
    std::iter::once(RangeFilter::All)
        .chain(names.into_iter().map(|n| RangeFilter::Named(n.to_string())))
        .collect()
}

/// Peaks matching the search text (name or location) and range, by rank.
pub fn filtered_peaks<'a>(
    catalog: &'a Catalog,
    filter: &FilterState,
    case: CaseMode,
) -> Vec<&'a Peak> {
    let needle = match case {
        CaseMode::Sensitive => filter.search.clone(),
        CaseMode::Insensitive => filter.search.to_lowercase(),
    };
    let mut peaks: Vec<&Peak> = catalog
        .peaks()
        .iter()
        .filter(|p| filter.range.matches(&p.mountain_range))
        .filter(|p| matches_search(p, &needle, case))
        .collect();
    peaks.sort_by_key(|p| p.rank);
    peaks
}

fn matches_search(peak: &Peak, needle: &str, case: CaseMode) -> bool {
    if needle.is_empty() {
        return true;
    }
    match case {
        CaseMode::Sensitive => peak.name.contains(needle) || peak.location.contains(needle),
        CaseMode::Insensitive => {
            peak.name.to_lowercase().contains(needle)
                || peak.location.to_lowercase().contains(needle)
        }
    }
}

/// Steps through `ranges` from `current`, wrapping at both ends. An unknown
/// current value restarts at `All`.
pub fn cycle_range(ranges: &[RangeFilter], current: &RangeFilter, forward: bool) -> RangeFilter {
    if ranges.is_empty() {
        return RangeFilter::All;
    }
    let Some(pos) = ranges.iter().position(|r| r == current) else {
        return RangeFilter::All;
    };
    let len = ranges.len();
    let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
    ranges[next].clone()
}
