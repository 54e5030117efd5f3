//! Pattern tables used by the extractor.
//!
//! All patterns are case-insensitive unless noted. Noun phrase captures are
//! lazy and stop at the first clause boundary (punctuation, "and", "but").

use std::sync::LazyLock;

use regex_lite::Regex;

/// Location id the player lands in after leaving any interior.
pub const STREET_LOCATION_ID: &str = "watson_streets";

/// Experience awarded for a skill-improvement phrase with no number.
pub(crate) const GENERIC_EXPERIENCE: u32 = 25;

/// Item nouns that make any noun phrase count as an item.
pub(crate) const ITEM_NOUNS: &[&str] = &[
    "shard", "chip", "credchip", "pistol", "revolver", "rifle", "shotgun", "smg", "gun",
    "blade", "katana", "knife", "grenade", "ammo", "cyberware", "implant", "optics",
    "cyberdeck", "deck", "medkit", "maxdoc", "bounce back", "stim", "inhaler", "jacket",
    "armor", "vest", "keycard", "key", "component", "drive", "scanner", "tool", "drink",
];

/// Leading words that mark a captured phrase as not being an item.
pub(crate) const REJECTED_LEADS: &[&str] = &[
    "yourself", "himself", "herself", "themselves", "it", "them", "him", "her", "you",
    "that", "this", "there", "out", "up", "over", "back", "away", "cover", "damage", "to",
    "better", "ready", "inside", "hold",
];

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("valid regex")
}

pub(crate) static EXPERIENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:gain|gains|gained|earn|earns|earned|receive|receives|received)\s+(\d+)\s*(?:experience|exp|xp)\b",
    )
});

pub(crate) static SKILL_IMPROVEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:your skills? improves?|you learn something new|you feel more (?:experienced|skilled|confident)|you get better at)\b",
    )
});

pub(crate) static DAMAGE_TAKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)\byou\s+(?:take|takes|took|suffer|suffers|suffered|receive|receives|received)\s+(\d+)\s*(?:points?\s+of\s+)?(?:damage|harm|injury|injuries)\b",
    )
});

pub(crate) static DAMAGE_HIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)\b(?:hit|hits|dealt|damaged)\s+(?:you\s+)?for\s+(\d+)\b")
});

pub(crate) static DAMAGE_DEALT_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)\byou\s+(?:deal|dealt|inflict|inflicted|do)\s+(\d+)\s*(?:points?\s+of\s+)?damage\b",
    )
});

pub(crate) static ITEM_FOUND_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:find|finds|found|discover|discovers|discovered|pick up|picks up|picked up|obtain|obtains|obtained|acquire|acquires|acquired|get|gets|got|loot|loots|looted|scavenge|scavenges|scavenged|take|takes|took)\s+(?:(?:a|an|the|some)\s+)?([a-z][a-z0-9 '-]*?)\s*(?:[.,!?;:]|\band\b|\bbut\b|$)",
    )
});

pub(crate) static ITEM_LOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:lose|loses|lost|drop|drops|dropped|break|breaks|broke|destroy|destroys|destroyed|stolen)\s+(?:(?:a|an|the|some|your)\s+)?([a-z][a-z0-9 '-]*?)\s*(?:[.,!?;:]|\band\b|\bbut\b|$)",
    )
});

pub(crate) static LEAVING_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:leave|leaves|leaving|exit|exits|exiting|step outside|steps outside|stepping outside|step out of|steps out of|stepping out of|head outside|go outside|walk outside)\b",
    )
});

pub(crate) static ARRIVAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:enter|enters|entered|arrive at|arrives at|arrived at|go to|goes to|went to|travel to|travels to|traveled to|travelled to|move to|moves to|moved to|head to|heads to|headed to|walk to|walks to|walked to|you're now in|you are now in|you find yourself in)\s+(?:the\s+)?([a-z][a-z0-9 '-]*?)\s*(?:[.,!?;:]|\band\b|\bwhere\b|$)",
    )
});

pub(crate) static COMBAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:attack|attacks|attacked|attacking|fight|fights|fighting|fought|combat|battle|battles|engage|engages|engaged|shoot|shoots|shooting|shot|gunfire|firefight|pistol|rifle|shotgun|katana|blade|blades|knife)\b",
    )
});

pub(crate) static EDDIES_GAINED_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:earn|earns|earned|receive|receives|received|get|gets|got|gain|gains|gained|collect|collects|collected|pocket|pockets|pocketed)\s+(\d+)\s*(?:eddies|eurodollars|eb)\b",
    )
});

pub(crate) static EDDIES_SPENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:pay|pays|paid|spend|spends|spent|lose|loses|lost)\s+(\d+)\s*(?:eddies|eurodollars|eb)\b",
    )
});

pub(crate) static CRED_GAINED_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)\b(?:gain|gains|gained|earn|earns|earned)\s+(\d+)\s*(?:street\s+)?cred\b")
});

pub(crate) static CRED_LOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)\b(?:lose|loses|lost)\s+(\d+)\s*(?:street\s+)?cred\b")
});

// Names keep their case; only the verb is case-insensitive.
pub(crate) static NPC_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"\b(?i:meet|meets|met|talk to|talks to|speak with|speaks with|spoke with|greeted by)\s+([A-Z][A-Za-z'-]+(?:\s+[A-Z][A-Za-z'-]+)?)",
    )
});

pub(crate) static PLOT_RE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)\b(?:gig|gigs|job|contract|mission|heist|bounty)\b"));

pub(crate) static AMBUSH_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:you are attacked|you're attacked|ambush|ambushed|opens fire on you|open fire on you|jumps you|jump you)\b",
    )
});

pub(crate) static SCAVENGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)\b(?:you find an?|you discover an?|you stumble upon)\b")
});

pub(crate) static NPC_ENCOUNTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)\b(?:you meet|a stranger approaches|greets you|you talk to|you speak with)\b",
    )
});

pub(crate) static IMAGE_PROMPT_RE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?s)\[IMAGE_PROMPT:\s*(.*?)\]"));
