//! The map store: current position, discovery, unlocks, and travel.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use nl_core::ActionResult;

use crate::error::{MapError, MapResult};
use crate::graph::{START_LOCATION, night_city, starting_markers};
use crate::location::{AccessContext, DangerLevel, Location, MapMarker};
use crate::story::{find_mentioned, is_explicit_arrival, mentions_movement, resolve_phrase};

/// Most entries kept in the travel history.
pub const TRAVEL_HISTORY_LIMIT: usize = 50;

/// Discovery and unlock flags of one location, as persisted in saves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationState {
    /// Discovered flag.
    pub discovered: bool,
    /// Unlocked flag.
    pub unlocked: bool,
}

/// Serialized form of the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSnapshot {
    /// Id of the current location.
    pub current_location: String,
    /// Whether fast travel is enabled.
    pub fast_travel_available: bool,
    /// Previously visited location ids, oldest first.
    pub travel_history: Vec<String>,
    /// Flags by location id.
    pub locations: BTreeMap<String, LocationState>,
    /// Every marker.
    pub markers: Vec<MapMarker>,
}

/// The city graph plus the player's position on it.
///
/// `discovered` and `unlocked` only ever go from false to true, except
/// through [`CityMap::reset`] and [`CityMap::restore`].
#[derive(Debug, Clone)]
pub struct CityMap {
    locations: Vec<Location>,
    current: usize,
    fast_travel_available: bool,
    travel_history: Vec<String>,
    markers: Vec<MapMarker>,
}

impl Default for CityMap {
    fn default() -> Self {
        Self::new()
    }
}

impl CityMap {
    /// A new map with the player at home.
    pub fn new() -> Self {
        let locations = night_city();
        let current = locations
            .iter()
            .position(|l| l.id == START_LOCATION)
            .unwrap_or(0);
        Self {
            locations,
            current,
            fast_travel_available: false,
            travel_history: Vec::new(),
            markers: starting_markers(),
        }
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // -- Accessors -----------------------------------------------------------

    /// The current location.
    pub fn current_location(&self) -> Location {
        self.locations[self.current].clone()
    }

    /// Id of the current location.
    pub fn current_location_id(&self) -> String {
        self.locations[self.current].id.clone()
    }

    /// Every location.
    pub fn locations(&self) -> Vec<Location> {
        self.locations.clone()
    }

    /// One location by id.
    pub fn location(&self, id: &str) -> Option<Location> {
        self.locations.iter().find(|l| l.id == id).cloned()
    }

    /// Whether fast travel is enabled.
    pub fn fast_travel_available(&self) -> bool {
        self.fast_travel_available
    }

    /// Previously visited location ids, oldest first.
    pub fn travel_history(&self) -> Vec<String> {
        self.travel_history.clone()
    }

    /// Every marker, completed ones included.
    pub fn markers(&self) -> Vec<MapMarker> {
        self.markers.clone()
    }

    /// Visible markers at a location.
    pub fn markers_at(&self, location_id: &str) -> Vec<MapMarker> {
        self.markers
            .iter()
            .filter(|m| m.visible && m.location_id == location_id)
            .cloned()
            .collect()
    }

    fn index_of(&self, id: &str) -> MapResult<usize> {
        self.locations
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| MapError::UnknownLocation(id.to_string()))
    }

    // -- Discovery and access ------------------------------------------------

    fn mark_discovered(&mut self, idx: usize) -> bool {
        let loc = &mut self.locations[idx];
        let newly = !loc.discovered;
        loc.discovered = true;
        if loc.fast_travel_point && !self.fast_travel_available {
            self.fast_travel_available = true;
            tracing::info!(location = %loc.id, "fast travel available");
        }
        if newly {
            tracing::debug!(location = %loc.id, "location discovered");
        }
        newly
    }

    /// Mark a location discovered. Returns true if it was not before.
    pub fn discover_location(&mut self, id: &str) -> bool {
        self.index_of(id)
            .map(|idx| self.mark_discovered(idx))
            .unwrap_or(false)
    }

    /// Unlock a location if the player meets its access requirement.
    pub fn unlock_location(&mut self, id: &str, ctx: &AccessContext) -> ActionResult {
        ActionResult::from_result(self.try_unlock(id, ctx))
    }

    fn try_unlock(&mut self, id: &str, ctx: &AccessContext) -> MapResult<String> {
        let idx = self.index_of(id)?;
        let loc = &mut self.locations[idx];
        if loc.unlocked {
            return Ok(format!("{} is already unlocked", loc.name));
        }
        if let Some(requirement) = loc.access.as_ref().and_then(|a| a.unmet(ctx)) {
            return Err(MapError::AccessDenied {
                name: loc.name.clone(),
                requirement,
            });
        }
        loc.unlocked = true;
        tracing::info!(location = id, "location unlocked");
        Ok(format!("{} unlocked", loc.name))
    }

    /// Unlock every discovered, gated location whose requirement is now
    /// met. Returns the ids unlocked.
    pub fn refresh_access(&mut self, ctx: &AccessContext) -> Vec<String> {
        let mut unlocked = Vec::new();
        for loc in self.locations.iter_mut().filter(|l| l.discovered && !l.unlocked) {
            if loc.access.as_ref().is_some_and(|a| a.is_met(ctx)) {
                loc.unlocked = true;
                unlocked.push(loc.id.clone());
            }
        }
        if !unlocked.is_empty() {
            tracing::info!(?unlocked, "access refreshed");
        }
        unlocked
    }

    // -- Travel --------------------------------------------------------------

    fn move_to(&mut self, idx: usize) -> String {
        let previous = self.locations[self.current].id.clone();
        self.travel_history.push(previous);
        if self.travel_history.len() > TRAVEL_HISTORY_LIMIT {
            let excess = self.travel_history.len() - TRAVEL_HISTORY_LIMIT;
            self.travel_history.drain(..excess);
        }
        self.current = idx;
        self.mark_discovered(idx);
        let loc = &self.locations[idx];
        tracing::info!(location = %loc.id, "travelled");
        format!("Travelled to {}", loc.name)
    }

    /// Travel to an unlocked location connected to the current one, or to
    /// any discovered unlocked location once fast travel is available.
    pub fn travel_to(&mut self, id: &str) -> ActionResult {
        ActionResult::from_result(self.try_travel_to(id))
    }

    fn try_travel_to(&mut self, id: &str) -> MapResult<String> {
        let idx = self.index_of(id)?;
        let here = &self.locations[self.current];
        let target = &self.locations[idx];
        if idx == self.current {
            return Err(MapError::AlreadyHere(target.name.clone()));
        }
        if !target.unlocked {
            return Err(MapError::Locked(target.name.clone()));
        }
        let reachable = here.is_connected_to(id) || (self.fast_travel_available && target.discovered);
        if !reachable {
            return Err(MapError::NotConnected {
                from: here.name.clone(),
                to: target.name.clone(),
            });
        }
        Ok(self.move_to(idx))
    }

    /// Jump to any discovered, unlocked location, ignoring connections.
    pub fn fast_travel(&mut self, id: &str) -> ActionResult {
        ActionResult::from_result(self.try_fast_travel(id))
    }

    fn try_fast_travel(&mut self, id: &str) -> MapResult<String> {
        let idx = self.index_of(id)?;
        if !self.fast_travel_available {
            return Err(MapError::FastTravelUnavailable);
        }
        let target = &self.locations[idx];
        if idx == self.current {
            return Err(MapError::AlreadyHere(target.name.clone()));
        }
        if !target.discovered {
            return Err(MapError::NotDiscovered(target.name.clone()));
        }
        if !target.unlocked {
            return Err(MapError::Locked(target.name.clone()));
        }
        Ok(self.move_to(idx))
    }

    // -- Story -----------------------------------------------------------------

    fn auto_unlock(&mut self, idx: usize, explicit_arrival: bool) {
        let loc = &mut self.locations[idx];
        if !loc.unlocked && (loc.danger_level != DangerLevel::Restricted || explicit_arrival) {
            loc.unlocked = true;
            tracing::info!(location = %loc.id, "location unlocked by story");
        }
    }

    /// Look for a movement phrase and a location mention in a passage.
    ///
    /// On a hit the location is discovered, unlocked (restricted locations
    /// only on an explicit arrival phrase), and travelled to with the usual
    /// travel rules. Returns `None` when the passage names no new place.
    pub fn update_location_from_story(&mut self, text: &str) -> Option<ActionResult> {
        if !mentions_movement(text) {
            return None;
        }
        let id = find_mentioned(&self.locations, text)?.id.clone();
        if id == self.locations[self.current].id {
            return None;
        }
        Some(self.travel_from_story(&id, is_explicit_arrival(text)))
    }

    /// Travel to a location the story names as a destination.
    ///
    /// The location is discovered and unlocked (restricted locations only on
    /// an explicit arrival), then the move goes through
    /// [`CityMap::travel_to`], so it needs a connection or fast travel.
    pub fn travel_from_story(&mut self, id: &str, explicit_arrival: bool) -> ActionResult {
        let idx = match self.index_of(id) {
            Ok(idx) => idx,
            Err(e) => return ActionResult::fail(e.to_string()),
        };
        self.mark_discovered(idx);
        self.auto_unlock(idx, explicit_arrival);
        self.travel_to(id)
    }

    /// Force the player into a location, skipping the connection check.
    ///
    /// Used when the story puts the player somewhere without a journey, such
    /// as stepping out onto the street. Discovers and unlocks like
    /// [`CityMap::travel_from_story`]; locked restricted locations still
    /// refuse.
    pub fn sync_to_location(&mut self, id: &str, explicit_arrival: bool) -> ActionResult {
        let idx = match self.index_of(id) {
            Ok(idx) => idx,
            Err(e) => return ActionResult::fail(e.to_string()),
        };
        if idx == self.current {
            return ActionResult::ok(format!("Already at {}", self.locations[idx].name));
        }
        self.mark_discovered(idx);
        self.auto_unlock(idx, explicit_arrival);
        if !self.locations[idx].unlocked {
            return ActionResult::fail(MapError::Locked(self.locations[idx].name.clone()).to_string());
        }
        ActionResult::ok(self.move_to(idx))
    }

    /// Resolve a free-text place name to a location id.
    pub fn resolve_location_phrase(&self, phrase: &str) -> Option<String> {
        resolve_phrase(&self.locations, phrase)
    }

    // -- Markers -------------------------------------------------------------

    /// Add a marker. Rejected for unknown locations or duplicate ids.
    pub fn add_marker(&mut self, marker: MapMarker) -> bool {
        if self.index_of(&marker.location_id).is_err()
            || self.markers.iter().any(|m| m.id == marker.id)
        {
            return false;
        }
        self.markers.push(marker);
        true
    }

    /// Complete a marker, hiding it for good.
    pub fn complete_marker(&mut self, id: &str) -> ActionResult {
        let Some(marker) = self.markers.iter_mut().find(|m| m.id == id) else {
            return ActionResult::fail(MapError::UnknownMarker(id.to_string()).to_string());
        };
        if marker.completed {
            return ActionResult::fail(MapError::MarkerCompleted(marker.title.clone()).to_string());
        }
        marker.completed = true;
        marker.visible = false;
        tracing::info!(marker = id, "marker completed");
        ActionResult::ok(format!("Completed: {}", marker.title))
    }

    // -- Persistence ---------------------------------------------------------

    /// Capture the map.
    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            current_location: self.current_location_id(),
            fast_travel_available: self.fast_travel_available,
            travel_history: self.travel_history.clone(),
            locations: self
                .locations
                .iter()
                .map(|l| {
                    (
                        l.id.clone(),
                        LocationState {
                            discovered: l.discovered,
                            unlocked: l.unlocked,
                        },
                    )
                })
                .collect(),
            markers: self.markers.clone(),
        }
    }

    /// Check that every id in a snapshot exists on the map.
    pub fn validate(snapshot: &MapSnapshot) -> MapResult<()> {
        let city = night_city();
        let known = |id: &str| city.iter().any(|l| l.id == id);
        let invalid = |reason: String| Err(MapError::InvalidSnapshot(reason));
        if !known(snapshot.current_location.as_str()) {
            return invalid(format!("unknown current location '{}'", snapshot.current_location));
        }
        if let Some(id) = snapshot.locations.keys().find(|id| !known(id.as_str())) {
            return invalid(format!("unknown location '{id}'"));
        }
        if let Some(id) = snapshot.travel_history.iter().find(|id| !known(id.as_str())) {
            return invalid(format!("unknown location '{id}' in history"));
        }
        if let Some(m) = snapshot.markers.iter().find(|m| !known(m.location_id.as_str())) {
            return invalid(format!("marker '{}' on unknown location", m.id));
        }
        if snapshot.markers.iter().any(|m| m.completed && m.visible) {
            return invalid("completed marker is visible".to_string());
        }
        Ok(())
    }

    /// Replace the map with a snapshot. Nothing changes if the snapshot is
    /// invalid.
    pub fn restore(&mut self, snapshot: MapSnapshot) -> MapResult<()> {
        Self::validate(&snapshot)?;
        let mut locations = night_city();
        for loc in &mut locations {
            if let Some(state) = snapshot.locations.get(&loc.id) {
                loc.discovered = state.discovered;
                loc.unlocked = state.unlocked;
            }
        }
        let current = locations
            .iter()
            .position(|l| l.id == snapshot.current_location)
            .ok_or_else(|| MapError::UnknownLocation(snapshot.current_location.clone()))?;
        self.locations = locations;
        self.current = current;
        self.fast_travel_available = snapshot.fast_travel_available;
        self.travel_history = snapshot.travel_history;
        self.markers = snapshot.markers;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::MarkerKind;
    use proptest::prelude::*;

    fn flags(map: &CityMap) -> Vec<(bool, bool)> {
        map.locations()
            .iter()
            .map(|l| (l.discovered, l.unlocked))
            .collect()
    }

    #[test]
    fn starts_at_home() {
        let map = CityMap::new();
        assert_eq!(map.current_location_id(), "apartment_v");
        assert!(!map.fast_travel_available());
        assert!(map.travel_history().is_empty());
    }

    #[test]
    fn travel_along_connection() {
        let mut map = CityMap::new();
        let r = map.travel_to("watson_streets");
        assert!(r.success, "{r}");
        assert_eq!(r.message, "Travelled to Watson Streets");
        assert_eq!(map.travel_history(), vec!["apartment_v"]);
        assert!(map.location("watson_streets").is_some_and(|l| l.discovered));
        assert!(map.fast_travel_available());
    }

    #[test]
    fn travel_rejections() {
        let mut map = CityMap::new();
        let r = map.travel_to("kabuki_market");
        assert!(!r.success);
        assert_eq!(r.message, "Kabuki Market is not reachable from V's Apartment");
        assert!(!map.travel_to("afterlife_bar").success);
        assert_eq!(map.travel_to("apartment_v").message, "you're already at V's Apartment");
        assert!(!map.travel_to("the_moon").success);
        assert_eq!(map.current_location_id(), "apartment_v");
    }

    #[test]
    fn fast_travel_needs_terminal_and_discovery() {
        let mut map = CityMap::new();
        assert_eq!(map.fast_travel("kabuki_market").message, "fast travel is not available yet");
        map.travel_to("watson_streets");
        map.travel_to("kabuki_market");
        map.travel_to("watson_streets");
        map.travel_to("apartment_v");
        assert!(map.fast_travel("kabuki_market").success);
        let r = map.fast_travel("lizzies_bar");
        assert_eq!(r.message, "Lizzie's Bar has not been discovered");
    }

    #[test]
    fn fast_travel_enables_remote_travel_to() {
        let mut map = CityMap::new();
        map.travel_to("watson_streets");
        map.travel_to("kabuki_market");
        map.travel_to("watson_streets");
        map.travel_to("apartment_v");
        assert!(map.travel_to("kabuki_market").success);
    }

    #[test]
    fn story_moves_player() {
        let mut map = CityMap::new();
        let r = map.update_location_from_story("You head to the Watson streets to clear your head.");
        assert!(r.is_some_and(|r| r.success));
        assert_eq!(map.current_location_id(), "watson_streets");
    }

    #[test]
    fn story_alias_and_unlock() {
        let mut map = CityMap::new();
        map.travel_to("watson_streets");
        let r = map.update_location_from_story("You walk to the Afterlife for a drink.");
        assert!(r.is_some_and(|r| r.success));
        assert_eq!(map.current_location_id(), "afterlife_bar");
        assert!(map.location("afterlife_bar").is_some_and(|l| l.unlocked));
    }

    #[test]
    fn story_without_movement_is_ignored() {
        let mut map = CityMap::new();
        assert!(map.update_location_from_story("Kabuki Market is loud tonight.").is_none());
        assert!(map.update_location_from_story("You head to a nameless alley.").is_none());
        assert_eq!(map.current_location_id(), "apartment_v");
    }

    #[test]
    fn story_respects_connections() {
        let mut map = CityMap::new();
        let r = map.update_location_from_story("You head to Lizzie's Bar.");
        assert!(r.is_some_and(|r| !r.success));
        assert!(map.location("lizzies_bar").is_some_and(|l| l.discovered));
        assert_eq!(map.current_location_id(), "apartment_v");
    }

    #[test]
    fn restricted_needs_explicit_arrival() {
        let mut map = CityMap::new();
        map.sync_to_location("corpo_plaza", false);
        map.update_location_from_story("You head to Arasaka Tower.");
        assert!(map.location("arasaka_tower").is_some_and(|l| l.discovered && !l.unlocked));
        assert_eq!(map.current_location_id(), "corpo_plaza");

        map.update_location_from_story("You enter Arasaka Tower through the loading dock.");
        assert!(map.location("arasaka_tower").is_some_and(|l| l.unlocked));
        assert_eq!(map.current_location_id(), "arasaka_tower");
    }

    #[test]
    fn story_destination_follows_travel_rules() {
        let mut map = CityMap::new();
        let r = map.travel_from_story("misty_esoterica", false);
        assert!(!r.success);
        assert_eq!(r.message, "Misty's Esoterica is not reachable from V's Apartment");
        assert!(map.location("misty_esoterica").is_some_and(|l| l.discovered));
        assert_eq!(map.current_location_id(), "apartment_v");

        assert!(map.travel_from_story("watson_streets", false).success);
        assert!(map.travel_from_story("misty_esoterica", false).success);
        assert_eq!(map.current_location_id(), "misty_esoterica");
        assert!(!map.travel_from_story("misty_esoterica", false).success);
    }

    #[test]
    fn story_destination_uses_fast_travel_once_available() {
        let mut map = CityMap::new();
        map.travel_to("watson_streets");
        assert!(map.fast_travel_available());
        let r = map.travel_from_story("corpo_plaza", false);
        assert!(r.success, "{r}");
        assert_eq!(map.current_location_id(), "corpo_plaza");

        let r = map.travel_from_story("dogtown", false);
        assert_eq!(r.message, "Dogtown is locked");
        assert!(map.travel_from_story("dogtown", true).success);
    }

    #[test]
    fn sync_bypasses_connections() {
        let mut map = CityMap::new();
        let r = map.sync_to_location("kabuki_market", false);
        assert!(r.success);
        assert_eq!(map.current_location_id(), "kabuki_market");
        assert!(map.sync_to_location("kabuki_market", false).success);
        assert_eq!(map.travel_history().len(), 1);

        let r = map.sync_to_location("dogtown", false);
        assert!(!r.success);
        assert_eq!(r.message, "Dogtown is locked");
        assert!(map.location("dogtown").is_some_and(|l| l.discovered));
        assert!(!map.sync_to_location("nowhere", true).success);
    }

    #[test]
    fn unlock_checks_access() {
        let mut map = CityMap::new();
        let mut ctx = AccessContext::default();
        let r = map.unlock_location("afterlife_bar", &ctx);
        assert_eq!(r.message, "The Afterlife requires street cred 5");
        ctx.cred_rating = 5;
        assert!(map.unlock_location("afterlife_bar", &ctx).success);
        assert!(map.unlock_location("afterlife_bar", &ctx).success);
    }

    #[test]
    fn refresh_only_touches_discovered_gated_locations() {
        let mut map = CityMap::new();
        map.discover_location("japantown");
        map.discover_location("wellsprings");
        let ctx = AccessContext {
            cred_rating: 50,
            level: 20,
            item_ids: Vec::new(),
        };
        assert_eq!(map.refresh_access(&ctx), vec!["japantown"]);
        assert!(map.location("corpo_plaza").is_some_and(|l| !l.unlocked));
        assert!(map.location("wellsprings").is_some_and(|l| !l.unlocked));
    }

    #[test]
    fn markers_complete_once() {
        let mut map = CityMap::new();
        assert_eq!(map.markers_at("afterlife_bar").len(), 1);
        assert!(map.complete_marker("find_a_fixer").success);
        assert!(map.markers_at("afterlife_bar").is_empty());
        assert!(!map.complete_marker("find_a_fixer").success);
        assert!(!map.complete_marker("nope").success);
        assert!(map.add_marker(MapMarker::new("gig", "japantown", MarkerKind::Quest, "Gig")));
        assert!(!map.add_marker(MapMarker::new("gig", "japantown", MarkerKind::Quest, "Gig")));
        assert!(!map.add_marker(MapMarker::new("x", "mars", MarkerKind::Quest, "X")));
    }

    #[test]
    fn resolve_through_store() {
        let map = CityMap::new();
        assert_eq!(map.resolve_location_phrase("kabuki").as_deref(), Some("kabuki_market"));
    }

    #[test]
    fn snapshot_round_trip() {
        let mut map = CityMap::new();
        map.travel_to("watson_streets");
        map.sync_to_location("japantown", true);
        map.complete_marker("meet_viktor");
        let json = serde_json::to_string(&map.snapshot()).unwrap();
        let snapshot: MapSnapshot = serde_json::from_str(&json).unwrap();
        let mut restored = CityMap::new();
        restored.restore(snapshot).unwrap();
        assert_eq!(restored.locations(), map.locations());
        assert_eq!(restored.current_location(), map.current_location());
        assert_eq!(restored.travel_history(), map.travel_history());
        assert_eq!(restored.markers(), map.markers());
        assert_eq!(restored.fast_travel_available(), map.fast_travel_available());
    }

    #[test]
    fn invalid_snapshot_leaves_map() {
        let mut map = CityMap::new();
        map.travel_to("watson_streets");
        let mut bad = map.snapshot();
        bad.current_location = "atlantis".to_string();
        assert!(map.restore(bad).is_err());
        assert_eq!(map.current_location_id(), "watson_streets");
    }

    #[derive(Debug, Clone)]
    enum Op {
        Travel(usize),
        Fast(usize),
        Sync(usize, bool),
        Story(usize),
        Discover(usize),
    }

    fn any_op() -> impl Strategy<Value = Op> {
        let n = night_city().len();
        prop_oneof![
            (0..n).prop_map(Op::Travel),
            (0..n).prop_map(Op::Fast),
            (0..n, any::<bool>()).prop_map(|(i, e)| Op::Sync(i, e)),
            (0..n).prop_map(Op::Story),
            (0..n).prop_map(Op::Discover),
        ]
    }

    proptest! {
        #[test]
        fn flags_never_reset(ops in prop::collection::vec(any_op(), 0..60)) {
            let mut map = CityMap::new();
            let ids: Vec<String> = map.locations().into_iter().map(|l| l.id).collect();
            let names: Vec<String> = map.locations().into_iter().map(|l| l.name).collect();
            let mut before = flags(&map);
            for op in ops {
                match op {
                    Op::Travel(i) => { map.travel_to(&ids[i]); }
                    Op::Fast(i) => { map.fast_travel(&ids[i]); }
                    Op::Sync(i, e) => { map.sync_to_location(&ids[i], e); }
                    Op::Story(i) => { map.update_location_from_story(&format!("You head to {}.", names[i])); }
                    Op::Discover(i) => { map.discover_location(&ids[i]); }
                }
                let after = flags(&map);
                for ((d0, u0), (d1, u1)) in before.iter().zip(&after) {
                    prop_assert!(!*d0 || *d1);
                    prop_assert!(!*u0 || *u1);
                }
                before = after;
            }
        }
    }
}
