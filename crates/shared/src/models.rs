use serde::{Deserialize, Serialize};

pub type SmokeId = i64;
pub type MapId = i64;
pub type UserId = i64;

/// What a smoke annotation throws (or plans). Wire names are fixed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "SMOKE")]
    Smoke,
    #[serde(rename = "BANG")]
    Flashbang,
    #[serde(rename = "MOLOTOV")]
    Molotov,
    #[serde(rename = "STRATEGY")]
    Strategy,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Smoke,
        Category::Flashbang,
        Category::Molotov,
        Category::Strategy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Smoke => "Smoke",
            Category::Flashbang => "Flashbang",
            Category::Molotov => "Molotov",
            Category::Strategy => "Strategy",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Smoke => "\u{1f4a8}",
            Category::Flashbang => "\u{1f4a5}",
            Category::Molotov => "\u{1f525}",
            Category::Strategy => "\u{1f4cb}",
        }
    }

    /// Wire value, also used as `<option>` value in forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Smoke => "SMOKE",
            Category::Flashbang => "BANG",
            Category::Molotov => "MOLOTOV",
            Category::Strategy => "STRATEGY",
        }
    }

    pub fn parse(value: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Level of a multi-floor map. A smoke without a floor tag belongs to `Upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Floor {
    #[default]
    Upper,
    Lower,
}

impl Floor {
    pub fn label(&self) -> &'static str {
        match self {
            Floor::Upper => "Upper",
            Floor::Lower => "Lower",
        }
    }
}

/// A point in percentage space, both axes in `[0, 100]` with two-decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: UserId,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Smoke {
    pub id: SmokeId,
    pub title: String,
    pub video_url: String,
    /// Start offset into the video, in seconds.
    pub timestamp: u32,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(rename = "x_coord")]
    pub x_percent: f64,
    #[serde(rename = "y_coord")]
    pub y_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<Floor>,
    #[serde(default)]
    pub score: i64,
    pub author: Author,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Smoke {
    pub fn position(&self) -> PercentPoint {
        PercentPoint {
            x: self.x_percent,
            y: self.y_percent,
        }
    }

    /// Floor the smoke is shown on; untagged smokes predate floor support and live upstairs.
    pub fn effective_floor(&self) -> Floor {
        self.floor.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMap {
    pub id: MapId,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub radar: Option<String>,
    #[serde(default)]
    pub radar_lower: Option<String>,
}

impl GameMap {
    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    pub fn has_lower_floor(&self) -> bool {
        self.radar_lower.is_some()
    }

    /// Radar image for a floor. Falls back to the main radar when the map has no lower level.
    pub fn radar_for(&self, floor: Option<Floor>) -> Option<&str> {
        match floor {
            Some(Floor::Lower) => self.radar_lower.as_deref().or(self.radar.as_deref()),
            _ => self.radar.as_deref(),
        }
    }
}

/// Body of `POST /smokes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSmokeData {
    pub title: String,
    pub video_url: String,
    pub timestamp: u32,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(rename = "x_coord")]
    pub x_percent: f64,
    #[serde(rename = "y_coord")]
    pub y_percent: f64,
    pub map_id: MapId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<Floor>,
}
