//! Integration tests for story synchronization.
use std::cell::RefCell;
use std::rc::Rc;

use nl_character::{Attribute, Origin, Role};
use nl_sync::{GameSnapshot, GameStateManager, SAVE_VERSION, SyncConfig};

const LEAVE: &str = "You step outside your apartment and head to the Watson district streets.";

fn manager() -> GameStateManager {
    GameStateManager::new(SyncConfig::default())
}

fn played() -> GameStateManager {
    let mut gsm = manager();
    gsm.set_origin(Origin::StreetKid);
    gsm.set_role(Role::Solo);
    gsm.increase_attribute(Attribute::Body);
    for passage in [
        LEAVE,
        "You meet Jackie near a noodle stand. He has a gig for you.",
        "You find a valuable data shard and gain 30 experience.",
        "The explosion hits you for 15 damage.",
        "You head to Kabuki Market and earn 200 eddies.",
    ] {
        gsm.update_from_story(passage);
    }
    gsm.record_choice("Took the gig from Jackie");
    gsm
}

#[test]
fn damage_passage_reduces_health_exactly() {
    let mut gsm = manager();
    let before = gsm.character().stats().health.current;
    let updates = gsm.update_from_story("The explosion hits you for 15 damage.");
    assert_eq!(updates.damage_taken, 15);
    assert_eq!(gsm.character().stats().health.current, before - 15);
}

#[test]
fn combined_passage() {
    let mut gsm = manager();
    let updates = gsm.update_from_story(
        "You find a valuable data shard and gain 30 experience. A guard attacks but you take 15 damage.",
    );
    assert!(updates.items_found.iter().any(|i| i.contains("data shard")));
    assert_eq!(updates.experience_gained, 30);
    assert_eq!(updates.damage_taken, 15);
    assert!(updates.combat_occurred);
    assert!(updates.inventory_changed);

    let stats = gsm.character().stats();
    assert_eq!(stats.experience, 30);
    assert_eq!(stats.health.current, 85);
    assert!(gsm.inventory().item_count("data_shard") >= 1);
    assert!(
        gsm.memory()
            .key_events()
            .iter()
            .any(|e| e == "Found valuable data shard")
    );
}

#[test]
fn leaving_the_apartment() {
    let mut gsm = manager();
    let updates = gsm.update_from_story(
        "You step outside your apartment and head to the Watson district streets.",
    );
    assert!(updates.location_changed);
    assert_eq!(updates.new_location.as_deref(), Some("watson_streets"));
    assert_eq!(gsm.map().current_location_id(), "watson_streets");
    assert_eq!(gsm.map().travel_history(), vec!["apartment_v"]);
    assert_eq!(gsm.memory().location_history(), vec!["Watson Streets"]);
}

#[test]
fn story_moves_follow_travel_rules() {
    let mut gsm = manager();
    let updates = gsm.update_from_story("You walk to Misty's Esoterica.");
    assert!(!updates.location_changed);
    assert!(updates.new_location.is_none());
    assert_eq!(gsm.map().current_location_id(), "apartment_v");
    assert!(gsm.map().location("misty_esoterica").unwrap().discovered);
    assert!(!gsm.map().fast_travel_available());

    gsm.update_from_story(LEAVE);
    let updates = gsm.update_from_story("You head to Kabuki Market.");
    assert_eq!(updates.new_location.as_deref(), Some("kabuki_market"));
    assert_eq!(gsm.map().current_location_id(), "kabuki_market");
    assert!(gsm.map().fast_travel_available());
}

#[test]
fn restricted_location_needs_arrival() {
    let mut gsm = manager();
    gsm.update_from_story(LEAVE);
    let updates = gsm.update_from_story("You head to Arasaka Tower.");
    assert!(!updates.location_changed);
    assert_eq!(gsm.map().current_location_id(), "watson_streets");
    let tower = gsm.map().location("arasaka_tower").unwrap();
    assert!(tower.discovered);
    assert!(!tower.unlocked);

    gsm.update_from_story("You arrive at Arasaka Tower.");
    assert_eq!(gsm.map().current_location_id(), "arasaka_tower");
}

#[test]
fn levelling_unlocks_discovered_gated_location() {
    let mut gsm = manager();
    gsm.update_from_story("You head to Dogtown.");
    let dogtown = gsm.map().location("dogtown").unwrap();
    assert!(dogtown.discovered);
    assert!(!dogtown.unlocked);

    gsm.update_from_story("Years of work pay off. You gain 100000 experience.");
    assert!(gsm.character().stats().level >= 15);
    assert!(gsm.map().location("dogtown").unwrap().unlocked);
}

#[test]
fn huge_numbers_with_triggers_saturate() {
    let mut gsm = manager();
    let updates = gsm.update_from_story("You gain 4294967295 experience. You are attacked!");
    assert!(updates.combat_occurred);
    assert_eq!(updates.experience_gained, u32::MAX);
    assert!(gsm.character().stats().level > 50);

    let mut gsm = manager();
    let updates = gsm.update_from_story("You take 4294967295 damage. You are attacked!");
    assert_eq!(updates.damage_taken, u32::MAX);
    assert_eq!(gsm.character().stats().health.current, 0);
    assert!(gsm.memory().key_events().iter().any(|e| e == "Flatlined"));
}

#[test]
fn lost_items_are_removed() {
    let mut gsm = manager();
    assert_eq!(gsm.inventory().item_count("maxdoc"), 2);
    let updates = gsm.update_from_story("In the scramble you drop a maxdoc.");
    assert!(updates.inventory_changed);
    assert_eq!(gsm.inventory().item_count("maxdoc"), 1);
}

#[test]
fn npc_names_are_remembered() {
    let mut gsm = manager();
    gsm.update_from_story("You meet Jackie Welles outside the bar.");
    assert_eq!(
        gsm.memory().npc_relationship("Jackie Welles").as_deref(),
        Some("Met")
    );
    assert!(gsm.context_summary().contains("Jackie Welles"));
}

#[test]
fn quiet_text_changes_nothing() {
    let mut gsm = manager();
    let before = gsm.snapshot();
    let updates = gsm.update_from_story("The weather is nice today.");
    assert!(!updates.has_changes());
    assert_eq!(gsm.snapshot(), before);
}

#[test]
fn subscribers_see_post_update_state() {
    let mut gsm = manager();
    let seen: Rc<RefCell<Vec<i32>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let id = gsm.subscribe(move |snap: &GameSnapshot| {
        sink.borrow_mut().push(snap.stats.health.current);
    });

    gsm.update_from_story("The explosion hits you for 15 damage.");
    gsm.update_from_story("The weather is nice today.");
    assert_eq!(*seen.borrow(), vec![85]);

    assert!(gsm.unsubscribe(id));
    assert!(!gsm.unsubscribe(id));
    gsm.update_from_story("The explosion hits you for 15 damage.");
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn save_load_round_trip() {
    let gsm = played();
    let blob = gsm.save_game_state().unwrap();

    let mut restored = manager();
    assert!(restored.load_game_state(&blob));
    assert_eq!(restored.snapshot(), gsm.snapshot());
    assert_eq!(restored.character_info(), gsm.character_info());
    assert_eq!(restored.memory().story_recap(), gsm.memory().story_recap());
}

#[test]
fn save_blob_layout() {
    let blob = manager().save_game_state().unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    for key in ["character", "map", "inventory", "narrative", "timestamp", "version"] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["version"], SAVE_VERSION);
}

#[test]
fn bad_loads_leave_state_unchanged() {
    let mut gsm = played();
    let before = gsm.snapshot();

    assert!(!gsm.load_game_state("{ not json"));
    assert!(!gsm.load_game_state("{}"));

    let mut value: serde_json::Value =
        serde_json::from_str(&manager().save_game_state().unwrap()).unwrap();
    value["version"] = serde_json::Value::from("0.1.0");
    assert!(!gsm.load_game_state(&value.to_string()));

    value["version"] = serde_json::Value::from(SAVE_VERSION);
    value["map"]["current_location"] = serde_json::Value::from("nowhere");
    assert!(!gsm.load_game_state(&value.to_string()));

    assert_eq!(gsm.snapshot(), before);
}

#[test]
fn reset_starts_over() {
    let mut gsm = played();
    gsm.reset_game_state();
    let fresh = manager();
    let (a, b) = (gsm.snapshot(), fresh.snapshot());
    assert_eq!(a.stats, b.stats);
    assert_eq!(a.slots, b.slots);
    assert_eq!(a.current_location, b.current_location);
    assert_eq!(a.locations, b.locations);
    assert!(gsm.memory().is_empty());
}

mod round_trip {
    use super::*;
    use proptest::prelude::*;

    const PASSAGES: &[&str] = &[
        "You step outside and the rain hits you for 4 damage.",
        "You find a credchip in the gutter.",
        "You head to Kabuki Market.",
        "You meet Judy at Lizzie's Bar.",
        "You are attacked by Maelstrom thugs!",
        "You gain 700 experience.",
        "You drop a maxdoc while running.",
        "You head to Japantown and pay 50 eddies for a ride.",
        "A stranger approaches with a job offer.",
    ];

    proptest! {
        #[test]
        fn any_story_survives_save_and_load(picks in proptest::collection::vec(0..PASSAGES.len(), 0..12)) {
            let mut gsm = manager();
            for i in picks {
                gsm.update_from_story(PASSAGES[i]);
            }
            let blob = gsm.save_game_state().unwrap();
            let mut restored = manager();
            prop_assert!(restored.load_game_state(&blob));
            prop_assert_eq!(restored.snapshot(), gsm.snapshot());
        }
    }
}

mod extreme_numbers {
    use super::*;
    use proptest::prelude::*;

    fn passage(template: usize, n: u32) -> String {
        match template {
            0 => format!("You gain {n} experience. You are attacked!"),
            1 => format!("You take {n} damage. A stranger approaches."),
            2 => format!("You earn {n} eddies and gain {n} street cred. You meet Judy."),
            3 => format!("The blast hits you for {n} damage and you gain {n} xp. You stumble upon a stash."),
            _ => format!("You pay {n} eddies and lose {n} street cred. You are ambushed!"),
        }
    }

    proptest! {
        #[test]
        fn any_number_with_triggers_applies(
            steps in proptest::collection::vec((0usize..5, any::<u32>()), 1..4),
        ) {
            let mut gsm = manager();
            for (template, n) in steps {
                gsm.update_from_story(&passage(template, n));
            }
            let stats = gsm.character().stats();
            prop_assert!(stats.health.current >= 0);
            prop_assert!((0..=100).contains(&stats.cred_rating));
            let blob = gsm.save_game_state().unwrap();
            let mut restored = manager();
            prop_assert!(restored.load_game_state(&blob));
            prop_assert_eq!(restored.snapshot(), gsm.snapshot());
        }
    }
}
