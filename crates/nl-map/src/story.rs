//! Matching location mentions in narrative text.

use strsim::jaro_winkler;

use crate::graph::ALIASES;
use crate::location::Location;

/// Minimum similarity score for fuzzy matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// Phrases that put a mentioned place in motion context.
const MOVEMENT_PHRASES: &[&str] = &[
    "go to",
    "goes to",
    "went to",
    "head to",
    "heads to",
    "headed to",
    "head back to",
    "travel to",
    "travels to",
    "travelled to",
    "traveled to",
    "walk to",
    "walked to",
    "walk into",
    "walked into",
    "drive to",
    "drove to",
    "move to",
    "moved to",
    "make your way to",
    "made your way to",
    "return to",
    "returned to",
    "back to",
    "arrive",
    "arrives",
    "arrived",
    "arriving",
    "enter",
    "enters",
    "entered",
    "entering",
    "step into",
    "stepped into",
    "you're now in",
    "you are now in",
    "you find yourself in",
    "you reach",
    "you've reached",
];

/// Phrases that count as actually entering a place.
const ARRIVAL_PHRASES: &[&str] = &[
    "arrive",
    "arrives",
    "arrived",
    "arriving",
    "enter",
    "enters",
    "entered",
    "entering",
    "step into",
    "stepped into",
    "walk into",
    "walked into",
    "you're now in",
    "you are now in",
    "you find yourself in",
    "you reach",
    "you've reached",
    "you're inside",
    "you are inside",
];

/// Whether `needle` occurs in `haystack` on word boundaries.
/// Both must already be lowercase.
pub(crate) fn contains_phrase(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Whether the text mentions moving somewhere.
pub fn mentions_movement(text: &str) -> bool {
    let lowered = text.to_lowercase();
    MOVEMENT_PHRASES.iter().any(|p| contains_phrase(&lowered, p))
}

/// Whether the text says the player actually entered or arrived somewhere.
/// Restricted locations only unlock on such a phrase.
pub fn is_explicit_arrival(text: &str) -> bool {
    let lowered = text.to_lowercase();
    ARRIVAL_PHRASES.iter().any(|p| contains_phrase(&lowered, p))
}

/// Find the location a passage mentions by alias, name, or short name.
///
/// Aliases win. Among names, the earliest mention in the text wins.
pub(crate) fn find_mentioned<'a>(locations: &'a [Location], text: &str) -> Option<&'a Location> {
    let lowered = text.to_lowercase();
    if let Some(loc) = ALIASES
        .iter()
        .find(|(alias, _)| contains_phrase(&lowered, alias))
        .and_then(|(_, id)| locations.iter().find(|l| l.id == *id))
    {
        return Some(loc);
    }
    locations
        .iter()
        .filter_map(|loc| {
            [loc.name.to_lowercase(), loc.short_name.to_lowercase()]
                .iter()
                .filter(|n| contains_phrase(&lowered, n))
                .filter_map(|n| lowered.find(n.as_str()))
                .min()
                .map(|pos| (pos, loc))
        })
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, loc)| loc)
}

/// Resolve a short phrase (usually an extracted destination) to a location id.
///
/// Tries the id itself, then exact name, short name, or alias, then a
/// mention inside the phrase, then fuzzy matching on names.
pub fn resolve_phrase(locations: &[Location], phrase: &str) -> Option<String> {
    let lowered = phrase.trim().to_lowercase();
    let lowered = lowered.strip_prefix("the ").unwrap_or(&lowered).trim();
    if lowered.is_empty() {
        return None;
    }

    let exact = locations.iter().find(|l| {
        l.id == lowered
            || l.name.to_lowercase() == lowered
            || l.name.to_lowercase().strip_prefix("the ") == Some(lowered)
            || l.short_name.to_lowercase() == lowered
    });
    if let Some(loc) = exact {
        return Some(loc.id.clone());
    }
    if let Some((_, id)) = ALIASES.iter().find(|(alias, _)| *alias == lowered) {
        return Some(id.to_string());
    }
    if let Some(loc) = find_mentioned(locations, lowered) {
        return Some(loc.id.clone());
    }

    let mut best: Option<(f64, &Location)> = None;
    for loc in locations {
        let score = jaro_winkler(lowered, &loc.name.to_lowercase())
            .max(jaro_winkler(lowered, &loc.short_name.to_lowercase()));
        if score >= FUZZY_THRESHOLD && best.is_none_or(|(s, _)| score > s) {
            best = Some((score, loc));
        }
    }
    best.map(|(_, loc)| loc.id.clone())
}
