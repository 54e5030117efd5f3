//! Narrative text to [`StoryUpdates`].

use regex_lite::Regex;

use crate::patterns::{
    AMBUSH_RE, ARRIVAL_RE, COMBAT_RE, CRED_GAINED_RE, CRED_LOST_RE, DAMAGE_DEALT_RE,
    DAMAGE_HIT_RE, DAMAGE_TAKEN_RE, EDDIES_GAINED_RE, EDDIES_SPENT_RE, EXPERIENCE_RE,
    GENERIC_EXPERIENCE, ITEM_FOUND_RE, ITEM_LOST_RE, ITEM_NOUNS, LEAVING_RE, NPC_ENCOUNTER_RE,
    NPC_NAME_RE, PLOT_RE, REJECTED_LEADS, SCAVENGE_RE, SKILL_IMPROVEMENT_RE, STREET_LOCATION_ID,
};
use crate::updates::{StoryTrigger, StoryUpdates};

/// Scan a narrative passage for state-changing signals.
///
/// Numeric and item signals count every match in the text. Location takes
/// only the first match, and any mention of leaving or stepping outside
/// resolves to the street outside regardless of other destinations named in
/// the same passage. Text with no recognisable signals yields
/// `StoryUpdates::default()`.
pub fn extract(text: &str) -> StoryUpdates {
    let mut updates = StoryUpdates::default();
    if text.trim().is_empty() {
        return updates;
    }

    updates.experience_gained = sum_captures(&EXPERIENCE_RE, text);
    if updates.experience_gained == 0 && SKILL_IMPROVEMENT_RE.is_match(text) {
        updates.experience_gained = GENERIC_EXPERIENCE;
    }

    updates.damage_taken =
        sum_captures(&DAMAGE_TAKEN_RE, text).saturating_add(sum_captures(&DAMAGE_HIT_RE, text));
    updates.damage_dealt = sum_captures(&DAMAGE_DEALT_RE, text);

    updates.eddies_delta = i64::from(sum_captures(&EDDIES_GAINED_RE, text))
        - i64::from(sum_captures(&EDDIES_SPENT_RE, text));
    updates.cred_delta = clamp_to_i32(sum_captures(&CRED_GAINED_RE, text))
        .saturating_sub(clamp_to_i32(sum_captures(&CRED_LOST_RE, text)));

    updates.items_found = item_phrases(&ITEM_FOUND_RE, text);
    updates.items_lost = item_phrases(&ITEM_LOST_RE, text);

    updates.new_location = detect_location(text);
    updates.combat_occurred = COMBAT_RE.is_match(text);
    updates.npc_encounters = npc_names(text);
    updates.plot_points = plot_sentences(text);
    updates.triggers = detect_triggers(text);

    updates.refresh_flags();
    updates
}

/// Returns true if a captured noun phrase plausibly names an item.
///
/// A phrase qualifies if it contains a known item noun, or if its length is
/// strictly between 4 and 49 characters.
pub fn is_valid_item_phrase(phrase: &str) -> bool {
    let lower = phrase.to_lowercase();
    if ITEM_NOUNS.iter().any(|noun| lower.contains(noun)) {
        return true;
    }
    let len = phrase.chars().count();
    len > 4 && len < 49
}

/// Sum every captured number, saturating at `u32::MAX`. Captures are digit
/// runs, so a failed parse means the number is too long for `u64`.
fn sum_captures(re: &Regex, text: &str) -> u32 {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .fold(0u32, u32::saturating_add)
}

fn clamp_to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn item_phrases(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|phrase| !phrase.is_empty())
        .filter(|phrase| !has_rejected_lead(phrase))
        .filter(|phrase| is_valid_item_phrase(phrase))
        .collect()
}

fn has_rejected_lead(phrase: &str) -> bool {
    let first = phrase
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();
    REJECTED_LEADS.contains(&first.as_str())
}

fn detect_location(text: &str) -> Option<String> {
    if LEAVING_RE.is_match(text) {
        return Some(STREET_LOCATION_ID.to_string());
    }

    ARRIVAL_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_lowercase())
        .filter(|place| !place.is_empty())
}

fn npc_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in NPC_NAME_RE.captures_iter(text) {
        if let Some(m) = caps.get(1) {
            let name = m.as_str().trim().to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

fn plot_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty() && PLOT_RE.is_match(sentence))
        .map(str::to_string)
        .collect()
}

fn detect_triggers(text: &str) -> Vec<StoryTrigger> {
    let table: [(&Regex, StoryTrigger); 3] = [
        (&AMBUSH_RE, StoryTrigger::Ambush),
        (&SCAVENGE_RE, StoryTrigger::Scavenge),
        (&NPC_ENCOUNTER_RE, StoryTrigger::NpcEncounter),
    ];
    table
        .into_iter()
        .filter(|(re, _)| re.is_match(text))
        .map(|(_, trigger)| trigger)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_empty(updates: &StoryUpdates) {
        assert_eq!(updates.experience_gained, 0);
        assert_eq!(updates.damage_taken, 0);
        assert_eq!(updates.damage_dealt, 0);
        assert_eq!(updates.eddies_delta, 0);
        assert_eq!(updates.cred_delta, 0);
        assert!(updates.items_found.is_empty());
        assert!(updates.items_lost.is_empty());
        assert!(!updates.stats_updated);
        assert!(!updates.location_changed);
        assert!(!updates.inventory_changed);
        assert!(!updates.combat_occurred);
        assert!(updates.new_location.is_none());
        assert!(updates.triggers.is_empty());
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert_empty(&extract(""));
        assert_empty(&extract("the weather is nice today"));
    }

    #[test]
    fn experience_from_hack() {
        let u = extract("You successfully hack into the terminal and gain 25 experience.");
        assert_eq!(u.experience_gained, 25);
        assert!(u.stats_updated);
    }

    #[test]
    fn experience_matches_are_summed() {
        let u = extract("You gain 10 XP. Later you earned 15 exp for the save.");
        assert_eq!(u.experience_gained, 25);
    }

    #[test]
    fn generic_skill_improvement_awards_default() {
        let u = extract("After hours in the sim, you feel more experienced.");
        assert_eq!(u.experience_gained, 25);
    }

    #[test]
    fn numeric_experience_wins_over_generic() {
        let u = extract("Your skills improve and you gain 40 experience.");
        assert_eq!(u.experience_gained, 40);
    }

    #[test]
    fn leaving_apartment_goes_to_street() {
        let u = extract(
            "You step outside your apartment and head to the Watson district streets.",
        );
        assert!(u.location_changed);
        assert_eq!(u.new_location.as_deref(), Some("watson_streets"));
    }

    #[test]
    fn leaving_beats_named_destination() {
        let u = extract("You step outside your apartment and head to Kabuki Market.");
        assert_eq!(u.new_location.as_deref(), Some("watson_streets"));
    }

    #[test]
    fn arrival_takes_first_destination() {
        let u = extract("You head to Kabuki Market. Later you travel to Japantown.");
        assert_eq!(u.new_location.as_deref(), Some("kabuki market"));
    }

    #[test]
    fn arrival_strips_article() {
        let u = extract("You enter the Afterlife where the legends drink.");
        assert_eq!(u.new_location.as_deref(), Some("afterlife"));
    }

    #[test]
    fn explosion_damage() {
        let u = extract("The explosion hits you for 15 damage.");
        assert_eq!(u.damage_taken, 15);
        assert!(u.stats_updated);
    }

    #[test]
    fn damage_patterns_are_summed() {
        let u = extract("You take 10 damage. The turret hits you for 5.");
        assert_eq!(u.damage_taken, 15);
    }

    #[test]
    fn damage_dealt_is_separate() {
        let u = extract("You deal 30 damage to the gonk.");
        assert_eq!(u.damage_dealt, 30);
        assert_eq!(u.damage_taken, 0);
        assert!(!u.stats_updated);
    }

    #[test]
    fn combined_event() {
        let u = extract(
            "You find a valuable data shard and gain 30 experience. A guard attacks but you take 15 damage.",
        );
        assert!(u.items_found.iter().any(|i| i.contains("data shard")));
        assert_eq!(u.experience_gained, 30);
        assert_eq!(u.damage_taken, 15);
        assert!(u.combat_occurred);
        assert!(u.inventory_changed);
        assert!(u.has_trigger(StoryTrigger::Scavenge));
    }

    #[test]
    fn multiple_items_found() {
        let u = extract("You pick up a pistol, then loot some ammo.");
        assert_eq!(u.items_found, vec!["pistol".to_string(), "ammo".to_string()]);
    }

    #[test]
    fn items_lost() {
        let u = extract("In the chaos you drop your katana.");
        assert_eq!(u.items_lost, vec!["katana".to_string()]);
        assert!(u.inventory_changed);
    }

    #[test]
    fn reflexive_phrase_is_not_an_item() {
        let u = extract("You find yourself in Japantown.");
        assert!(u.items_found.is_empty());
        assert_eq!(u.new_location.as_deref(), Some("japantown"));
    }

    #[test]
    fn item_validity_rules() {
        assert!(is_valid_item_phrase("gun"));
        assert!(is_valid_item_phrase("strange relic"));
        assert!(!is_valid_item_phrase("box"));
        assert!(!is_valid_item_phrase(&"a".repeat(49)));
        assert!(is_valid_item_phrase(&"a".repeat(48)));
    }

    #[test]
    fn eddies_and_cred() {
        let u = extract("You collect 500 eddies but pay 200 eddies for the ride. You gain 3 street cred.");
        assert_eq!(u.eddies_delta, 300);
        assert_eq!(u.cred_delta, 3);
        assert!(u.stats_updated);
    }

    #[test]
    fn npc_names_keep_case() {
        let u = extract("You meet Jackie Welles outside. Later you talk to Misty.");
        assert_eq!(u.npc_encounters, vec!["Jackie Welles".to_string(), "Misty".to_string()]);
        assert!(u.has_trigger(StoryTrigger::NpcEncounter));
    }

    #[test]
    fn plot_points_are_sentences() {
        let u = extract("Rain falls. Dex has a job for you at the Afterlife!");
        assert_eq!(u.plot_points, vec!["Dex has a job for you at the Afterlife".to_string()]);
    }

    #[test]
    fn ambush_trigger() {
        let u = extract("Out of nowhere, you are attacked by Maelstrom thugs.");
        assert!(u.has_trigger(StoryTrigger::Ambush));
        assert!(u.combat_occurred);
    }

    #[test]
    fn triggers_fire_once() {
        let u = extract("You meet a fixer. You meet a ripper.");
        assert_eq!(u.triggers, vec![StoryTrigger::NpcEncounter]);
    }

    #[test]
    fn oversized_numbers_saturate() {
        let u = extract("You gain 5000000000 experience.");
        assert_eq!(u.experience_gained, u32::MAX);
        let u = extract("You take 99999999999999999999999 damage.");
        assert_eq!(u.damage_taken, u32::MAX);
        let u = extract("You gain 4294967295 XP and earn 10 exp.");
        assert_eq!(u.experience_gained, u32::MAX);
    }

    proptest! {
        #[test]
        fn extract_never_panics(text in ".{0,200}") {
            let _ = extract(&text);
        }

        #[test]
        fn numeric_experience_is_exact(n in 1u32..100_000) {
            let u = extract(&format!("You gain {n} experience."));
            prop_assert_eq!(u.experience_gained, n);
            prop_assert!(u.stats_updated);
        }
    }
}
