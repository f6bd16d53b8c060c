use crate::models::{Category, Floor, GameMap, Smoke};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

/// Active list/radar filters for one map page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SmokeFilter {
    /// `None` when the map has no floor distinction.
    pub floor: Option<Floor>,
    pub category: CategoryFilter,
    pub search: String,
}

/// True when any smoke carries an explicit floor tag.
pub fn has_floor_distinction(smokes: &[Smoke]) -> bool {
    smokes.iter().any(|s| s.floor.is_some())
}

/// Floor rule: with floors in use, untagged smokes count as upper.
fn matches_floor(smoke: &Smoke, active: Option<Floor>, floors_in_use: bool) -> bool {
    match active {
        Some(floor) if floors_in_use => smoke.effective_floor() == floor,
        _ => true,
    }
}

fn matches_search(smoke: &Smoke, needle_lower: &str) -> bool {
    needle_lower.is_empty() || smoke.title.to_lowercase().contains(needle_lower)
}

/// Smokes that pass every active predicate, in input order.
pub fn filter_smokes<'a>(smokes: &'a [Smoke], filter: &SmokeFilter) -> Vec<&'a Smoke> {
    let floors_in_use = has_floor_distinction(smokes);
    let needle = filter.search.to_lowercase();
    smokes
        .iter()
        .filter(|s| matches_floor(s, filter.floor, floors_in_use))
        .filter(|s| filter.category.matches(s.category))
        .filter(|s| matches_search(s, &needle))
        .collect()
}

/// Owned variant for component props.
pub fn filter_smokes_owned(smokes: &[Smoke], filter: &SmokeFilter) -> Vec<Smoke> {
    filter_smokes(smokes, filter).into_iter().cloned().collect()
}

/// Case-insensitive match on name, display name or description for the home page.
pub fn filter_maps<'a>(maps: &'a [GameMap], search: &str) -> Vec<&'a GameMap> {
    let needle = search.to_lowercase();
    maps.iter()
        .filter(|m| {
            needle.is_empty()
                || m.name.to_lowercase().contains(&needle)
                || m.title().to_lowercase().contains(&needle)
                || m
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect()
}
