use crate::data::catalog::Catalog;
use crate::data::persistence::{Format, Persistable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifiers of the peaks the user has climbed.
///
/// Persisted as a flat JSON array of strings. The set is ordered so that the
/// stored snapshot depends only on membership, never on toggle history.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct ClimbState {
    ids: BTreeSet<String>,
}

impl Persistable for ClimbState {
    fn filename() -> &'static str {
        "climbed_peaks.json"
    }
    fn format() -> Format {
        Format::Json
    }
}

impl ClimbState {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Adds `id` if absent, removes it if present. Returns the new membership.
    pub(super) fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Climbed ids that exist in `catalog`. Unknown ids are inert.
    pub fn count_in(&self, catalog: &Catalog) -> usize {
        self.ids.iter().filter(|id| catalog.contains(id)).count()
    }
}

#[cfg(test)]
impl ClimbState {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ClimbState {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}
