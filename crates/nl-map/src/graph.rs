//! The static Night City graph.

use crate::location::{
    AccessRequirement, District, DangerLevel, Location, MapMarker, MarkerKind,
};

/// Where every new game starts.
pub const START_LOCATION: &str = "apartment_v";

/// Story words that name a location without using its name.
pub const ALIASES: &[(&str, &str)] = &[
    ("afterlife", "afterlife_bar"),
    ("home", "apartment_v"),
    ("your apartment", "apartment_v"),
    ("your place", "apartment_v"),
    ("megabuilding h10", "apartment_v"),
    ("the streets", "watson_streets"),
    ("the market", "kabuki_market"),
    ("ripperdoc", "viktor_clinic"),
    ("vik's", "viktor_clinic"),
    ("the tower", "arasaka_tower"),
    ("the camp", "badlands_camp"),
    ("aldecaldos", "badlands_camp"),
];

/// Undirected edges of the graph.
const EDGES: &[(&str, &str)] = &[
    ("apartment_v", "watson_streets"),
    ("watson_streets", "kabuki_market"),
    ("watson_streets", "lizzies_bar"),
    ("watson_streets", "viktor_clinic"),
    ("watson_streets", "misty_esoterica"),
    ("watson_streets", "afterlife_bar"),
    ("watson_streets", "japantown"),
    ("viktor_clinic", "misty_esoterica"),
    ("kabuki_market", "lizzies_bar"),
    ("japantown", "jig_jig_street"),
    ("japantown", "corpo_plaza"),
    ("corpo_plaza", "arasaka_tower"),
    ("corpo_plaza", "wellsprings"),
    ("wellsprings", "arroyo"),
    ("wellsprings", "pacifica"),
    ("pacifica", "dogtown"),
    ("arroyo", "badlands_camp"),
];

struct Blueprint {
    id: &'static str,
    name: &'static str,
    short: &'static str,
    description: &'static str,
    district: District,
    danger: DangerLevel,
    pos: (i32, i32),
    unlocked: bool,
    fast_travel: bool,
    services: &'static [&'static str],
    npcs: &'static [&'static str],
    access: Option<(Option<i32>, Option<u32>, &'static [&'static str])>,
}

const LOCATIONS: &[Blueprint] = &[
    Blueprint {
        id: "apartment_v",
        name: "V's Apartment",
        short: "apartment",
        description: "A cramped unit in Megabuilding H10.",
        district: District::Watson,
        danger: DangerLevel::Safe,
        pos: (40, 20),
        unlocked: true,
        fast_travel: false,
        services: &["Stash", "Bed"],
        npcs: &[],
        access: None,
    },
    Blueprint {
        id: "watson_streets",
        name: "Watson Streets",
        short: "watson",
        description: "Neon, noodle stands, and Tyger Claw patrols.",
        district: District::Watson,
        danger: DangerLevel::Moderate,
        pos: (42, 24),
        unlocked: true,
        fast_travel: true,
        services: &[],
        npcs: &[],
        access: None,
    },
    Blueprint {
        id: "kabuki_market",
        name: "Kabuki Market",
        short: "kabuki",
        description: "Stalls selling everything from noodles to black-market chrome.",
        district: District::Watson,
        danger: DangerLevel::Moderate,
        pos: (48, 18),
        unlocked: true,
        fast_travel: true,
        services: &["Weapons Vendor", "Netrunner Vendor", "Food"],
        npcs: &[],
        access: None,
    },
    Blueprint {
        id: "lizzies_bar",
        name: "Lizzie's Bar",
        short: "lizzie's",
        description: "Mox-run braindance bar.",
        district: District::Watson,
        danger: DangerLevel::Low,
        pos: (46, 26),
        unlocked: true,
        fast_travel: false,
        services: &["Bar", "Braindance"],
        npcs: &["Judy"],
        access: None,
    },
    Blueprint {
        id: "viktor_clinic",
        name: "Viktor's Clinic",
        short: "viktor's",
        description: "A ripperdoc's back room behind a shuttered arcade.",
        district: District::Watson,
        danger: DangerLevel::Safe,
        pos: (38, 27),
        unlocked: true,
        fast_travel: false,
        services: &["Ripperdoc"],
        npcs: &["Viktor"],
        access: None,
    },
    Blueprint {
        id: "misty_esoterica",
        name: "Misty's Esoterica",
        short: "misty's",
        description: "Crystals, incense, and tarot next door to Viktor.",
        district: District::Watson,
        danger: DangerLevel::Safe,
        pos: (37, 28),
        unlocked: true,
        fast_travel: false,
        services: &["Shop"],
        npcs: &["Misty"],
        access: None,
    },
    Blueprint {
        id: "afterlife_bar",
        name: "The Afterlife",
        short: "afterlife",
        description: "Mercenary bar in an old morgue. Drinks named after dead legends.",
        district: District::Watson,
        danger: DangerLevel::Low,
        pos: (44, 30),
        unlocked: false,
        fast_travel: false,
        services: &["Bar", "Fixer"],
        npcs: &["Rogue", "Claire"],
        access: Some((Some(5), None, &[])),
    },
    Blueprint {
        id: "japantown",
        name: "Japantown",
        short: "japantown",
        description: "Tyger Claw neon over pachinko parlors.",
        district: District::Westbrook,
        danger: DangerLevel::Moderate,
        pos: (60, 40),
        unlocked: false,
        fast_travel: true,
        services: &["Food", "Clothing Vendor"],
        npcs: &[],
        access: Some((None, Some(2), &[])),
    },
    Blueprint {
        id: "jig_jig_street",
        name: "Jig-Jig Street",
        short: "jig-jig",
        description: "Dolls, dealers, and clinics that ask no questions.",
        district: District::Westbrook,
        danger: DangerLevel::High,
        pos: (64, 42),
        unlocked: false,
        fast_travel: false,
        services: &["Ripperdoc", "Bar"],
        npcs: &[],
        access: Some((None, Some(3), &[])),
    },
    Blueprint {
        id: "corpo_plaza",
        name: "Corpo Plaza",
        short: "corpo plaza",
        description: "Glass, security drones, and men in expensive suits.",
        district: District::CityCenter,
        danger: DangerLevel::Low,
        pos: (55, 55),
        unlocked: false,
        fast_travel: true,
        services: &["Clothing Vendor"],
        npcs: &[],
        access: Some((Some(20), None, &[])),
    },
    Blueprint {
        id: "arasaka_tower",
        name: "Arasaka Tower",
        short: "arasaka tower",
        description: "The tallest fortress in Night City.",
        district: District::CityCenter,
        danger: DangerLevel::Restricted,
        pos: (57, 58),
        unlocked: false,
        fast_travel: false,
        services: &[],
        npcs: &[],
        access: Some((None, Some(10), &["arasaka_keycard"])),
    },
    Blueprint {
        id: "wellsprings",
        name: "Wellsprings",
        short: "wellsprings",
        description: "Valentinos murals and quinceañera chrome.",
        district: District::Heywood,
        danger: DangerLevel::Moderate,
        pos: (50, 70),
        unlocked: false,
        fast_travel: true,
        services: &["Food"],
        npcs: &[],
        access: None,
    },
    Blueprint {
        id: "arroyo",
        name: "Arroyo",
        short: "arroyo",
        description: "Factory smoke and Arasaka-owned housing.",
        district: District::SantoDomingo,
        danger: DangerLevel::High,
        pos: (70, 78),
        unlocked: false,
        fast_travel: false,
        services: &["Weapons Vendor"],
        npcs: &[],
        access: None,
    },
    Blueprint {
        id: "pacifica",
        name: "Pacifica",
        short: "pacifica",
        description: "A half-built resort the city gave up on.",
        district: District::Pacifica,
        danger: DangerLevel::Extreme,
        pos: (30, 85),
        unlocked: false,
        fast_travel: false,
        services: &[],
        npcs: &[],
        access: Some((None, Some(5), &[])),
    },
    Blueprint {
        id: "dogtown",
        name: "Dogtown",
        short: "dogtown",
        description: "A walled warlord state inside Pacifica.",
        district: District::Dogtown,
        danger: DangerLevel::Restricted,
        pos: (25, 92),
        unlocked: false,
        fast_travel: false,
        services: &["Black Market"],
        npcs: &[],
        access: Some((None, Some(15), &[])),
    },
    Blueprint {
        id: "badlands_camp",
        name: "Aldecaldos Camp",
        short: "badlands",
        description: "Nomad trucks circled against the desert wind.",
        district: District::Badlands,
        danger: DangerLevel::Moderate,
        pos: (90, 80),
        unlocked: false,
        fast_travel: true,
        services: &["Mechanic"],
        npcs: &["Panam"],
        access: None,
    },
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Build the city with its starting flags: only the start location is
/// discovered.
pub fn night_city() -> Vec<Location> {
    let mut locations: Vec<Location> = LOCATIONS
        .iter()
        .map(|bp| Location {
            id: bp.id.to_string(),
            name: bp.name.to_string(),
            short_name: bp.short.to_string(),
            description: bp.description.to_string(),
            district: bp.district,
            danger_level: bp.danger,
            x: bp.pos.0,
            y: bp.pos.1,
            connections: Vec::new(),
            discovered: bp.id == START_LOCATION,
            unlocked: bp.unlocked,
            fast_travel_point: bp.fast_travel,
            services: strings(bp.services),
            npcs: strings(bp.npcs),
            access: bp
                .access
                .map(|(min_cred, min_level, items)| AccessRequirement {
                    min_cred,
                    min_level,
                    required_items: strings(items),
                }),
        })
        .collect();

    for &(a, b) in EDGES {
        for (from, to) in [(a, b), (b, a)] {
            if let Some(loc) = locations.iter_mut().find(|l| l.id == from) {
                loc.connections.push(to.to_string());
            }
        }
    }
    locations
}

/// Markers placed on a new map.
pub fn starting_markers() -> Vec<MapMarker> {
    vec![
        MapMarker::new(
            "find_a_fixer",
            "afterlife_bar",
            MarkerKind::Quest,
            "Find work at the Afterlife",
        ),
        MapMarker::new(
            "meet_viktor",
            "viktor_clinic",
            MarkerKind::Quest,
            "Get your chrome checked",
        ),
        MapMarker::new(
            "kabuki_vendors",
            "kabuki_market",
            MarkerKind::Vendor,
            "Kabuki stalls",
        ),
        MapMarker::new(
            "braindance_den",
            "lizzies_bar",
            MarkerKind::PointOfInterest,
            "Braindance booths",
        ),
    ]
}
