use serde::{Deserialize, Serialize};
use std::fmt;

/// Trail difficulty grade, easiest first.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    A,
    B,
    C,
    #[serde(rename = "C+")]
    CPlus,
    D,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::A => "A",
            Difficulty::B => "B",
            Difficulty::C => "C",
            Difficulty::CPlus => "C+",
            Difficulty::D => "D",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One entry of the peak catalog. Field names on disk follow the bundled
/// dataset (`mountainRange`).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Peak {
    pub id: String,
    pub name: String,
    /// Elevation in metres.
    pub height: u32,
    pub location: String,
    pub difficulty: Difficulty,
    pub rank: u32,
    pub lat: f64,
    pub lng: f64,
    pub mountain_range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Peak {
    pub fn has_valid_coordinates(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

#[cfg(test)]
pub(crate) fn test_peak(id: &str, rank: u32, range: &str) -> Peak {
    Peak {
        id: id.to_string(),
        name: format!("Peak {id}"),
        height: 3000 + rank,
        location: "Nantou".to_string(),
        difficulty: Difficulty::B,
        rank,
        lat: 23.5,
        lng: 121.0,
        mountain_range: range.to_string(),
        notes: None,
    }
}
