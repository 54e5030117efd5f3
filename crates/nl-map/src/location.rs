//! Locations, access requirements, and map markers.

use serde::{Deserialize, Serialize};

/// Night City district.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum District {
    /// Northern industrial district.
    Watson,
    /// Wealthy district with Japantown and Charter Hill.
    Westbrook,
    /// Corporate towers.
    CityCenter,
    /// Residential, Valentinos territory.
    Heywood,
    /// Abandoned resort district.
    Pacifica,
    /// Factories and housing blocks.
    SantoDomingo,
    /// Walled-off enclave inside Pacifica.
    Dogtown,
    /// Desert outside the city.
    Badlands,
}

impl District {
    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Watson => "Watson",
            Self::Westbrook => "Westbrook",
            Self::CityCenter => "City Center",
            Self::Heywood => "Heywood",
            Self::Pacifica => "Pacifica",
            Self::SantoDomingo => "Santo Domingo",
            Self::Dogtown => "Dogtown",
            Self::Badlands => "Badlands",
        }
    }
}

impl std::fmt::Display for District {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How dangerous a location is, from safe to off-limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DangerLevel {
    /// No threat.
    Safe,
    /// Petty crime.
    Low,
    /// Gang territory.
    Moderate,
    /// Regular firefights.
    High,
    /// Warzone.
    Extreme,
    /// Off-limits. Only an explicit arrival in the story unlocks it.
    Restricted,
}

impl std::fmt::Display for DangerLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Safe => "Safe",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Extreme => "Extreme",
            Self::Restricted => "Restricted",
        };
        f.write_str(name)
    }
}

/// The player facts access requirements are checked against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessContext {
    /// Current street cred.
    pub cred_rating: i32,
    /// Current level.
    pub level: u32,
    /// Ids of held items.
    pub item_ids: Vec<String>,
}

/// What a player needs before a location can be unlocked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequirement {
    /// Minimum street cred.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_cred: Option<i32>,
    /// Minimum level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_level: Option<u32>,
    /// Item ids that must be held.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_items: Vec<String>,
}

impl AccessRequirement {
    /// The first unmet condition, or `None` if the context qualifies.
    pub fn unmet(&self, ctx: &AccessContext) -> Option<String> {
        if let Some(cred) = self.min_cred.filter(|min| ctx.cred_rating < *min) {
            return Some(format!("street cred {cred}"));
        }
        if let Some(level) = self.min_level.filter(|min| ctx.level < *min) {
            return Some(format!("level {level}"));
        }
        self.required_items
            .iter()
            .find(|id| !ctx.item_ids.contains(*id))
            .map(|id| format!("item '{id}'"))
    }

    /// Whether the context qualifies.
    pub fn is_met(&self, ctx: &AccessContext) -> bool {
        self.unmet(ctx).is_none()
    }
}

/// A node of the city graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short name the story tends to use.
    pub short_name: String,
    /// Flavor text.
    pub description: String,
    /// District.
    pub district: District,
    /// Danger tier.
    pub danger_level: DangerLevel,
    /// Map x coordinate.
    pub x: i32,
    /// Map y coordinate.
    pub y: i32,
    /// Ids of directly connected locations.
    pub connections: Vec<String>,
    /// Visited or mentioned at least once. Never reset.
    pub discovered: bool,
    /// Open for travel. Never reset.
    pub unlocked: bool,
    /// Has a fast-travel terminal.
    pub fast_travel_point: bool,
    /// Services offered.
    pub services: Vec<String>,
    /// Notable residents.
    pub npcs: Vec<String>,
    /// Access gate, if any.
    pub access: Option<AccessRequirement>,
}

impl Location {
    /// Whether `other` is directly connected.
    pub fn is_connected_to(&self, other: &str) -> bool {
        self.connections.iter().any(|c| c == other)
    }
}

/// Kind of map marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// A job or story beat.
    Quest,
    /// Somewhere to buy or sell.
    Vendor,
    /// Something worth a look.
    PointOfInterest,
}

/// An annotation pinned to a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapMarker {
    /// Stable identifier.
    pub id: String,
    /// Location the marker is attached to.
    pub location_id: String,
    /// Kind.
    pub kind: MarkerKind,
    /// Label.
    pub title: String,
    /// Shown on the map.
    pub visible: bool,
    /// Done. Completed markers are hidden for good.
    pub completed: bool,
}

impl MapMarker {
    /// A visible, open marker.
    pub fn new(id: &str, location_id: &str, kind: MarkerKind, title: &str) -> Self {
        Self {
            id: id.to_string(),
            location_id: location_id.to_string(),
            kind,
            title: title.to_string(),
            visible: true,
            completed: false,
        }
    }
}
