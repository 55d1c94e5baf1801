//! Query engine: sorted, filtered view over the collection
//!
//! Sort first, then filter, so the filtered rows keep the sorted order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::programme::Programme;
use crate::Error;

/// Sortable column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Id,
    Name,
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            other => Err(Error::InvalidInput(format!("Unknown sort key: {}", other))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Id => write!(f, "id"),
            SortKey::Name => write!(f, "name"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Sort toggle state machine
///
/// Starts on `id` ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub active_key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            active_key: SortKey::Id,
            direction: SortDirection::Asc,
        }
    }
}

impl SortState {
    pub fn new(active_key: SortKey, direction: SortDirection) -> Self {
        Self { active_key, direction }
    }

    /// Same key flips direction; a new key starts ascending
    pub fn toggle(self, key: SortKey) -> Self {
        if key == self.active_key {
            Self {
                active_key: key,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                active_key: key,
                direction: SortDirection::Asc,
            }
        }
    }

    /// Comparator for this state. Case-folded name ties compare equal.
    pub fn compare(&self, a: &Programme, b: &Programme) -> Ordering {
        let ordering = match self.active_key {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        };
        self.direction.apply(ordering)
    }
}

/// Case-insensitive substring match on `name`. Empty text matches everything.
pub fn matches_filter(programme: &Programme, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(text) if text.is_empty() => true,
        Some(text) => programme
            .name
            .to_lowercase()
            .contains(&text.to_lowercase()),
    }
}

/// Ordered, filtered view of `all`
pub fn view<'a, I>(all: I, sort: SortState, filter: Option<&str>) -> Vec<Programme>
where
    I: IntoIterator<Item = &'a Programme>,
{
    let mut rows: Vec<Programme> = all.into_iter().cloned().collect();
    rows.sort_by(|a, b| sort.compare(a, b));
    rows.retain(|p| matches_filter(p, filter));
    rows
}
