//! The bounded narrative log.

use serde::{Deserialize, Serialize};

/// Soft cap and trim size of one list: once a push takes the list past
/// `cap`, only the newest `keep` entries survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound {
    /// Largest length allowed.
    pub cap: usize,
    /// Length after trimming.
    pub keep: usize,
}

/// Bound on key events.
pub const KEY_EVENTS: Bound = Bound { cap: 20, keep: 15 };
/// Bound on character developments.
pub const DEVELOPMENTS: Bound = Bound { cap: 10, keep: 8 };
/// Bound on important choices.
pub const CHOICES: Bound = Bound { cap: 15, keep: 10 };
/// Bound on location history.
pub const LOCATIONS: Bound = Bound { cap: 25, keep: 20 };
/// Bound on plot points.
pub const PLOT_POINTS: Bound = Bound { cap: 10, keep: 8 };

fn push_bounded(list: &mut Vec<String>, entry: &str, bound: Bound) -> bool {
    let entry = entry.trim();
    if entry.is_empty() {
        return false;
    }
    list.push(entry.to_string());
    trim(list, bound);
    true
}

fn trim(list: &mut Vec<String>, bound: Bound) {
    if list.len() > bound.cap {
        let excess = list.len() - bound.keep;
        list.drain(..excess);
    }
}

fn tail(list: &[String], n: usize) -> &[String] {
    &list[list.len().saturating_sub(n)..]
}

/// How the player stands with one NPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcRelationship {
    /// NPC name.
    pub name: String,
    /// Relationship label, e.g. "Met" or "Ally".
    pub relationship: String,
}

/// Rolling story log used to give the narrator continuity.
///
/// Every list keeps insertion order, oldest first. NPC relationships are
/// ordered by last update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeMemory {
    key_events: Vec<String>,
    character_developments: Vec<String>,
    important_choices: Vec<String>,
    location_history: Vec<String>,
    plot_points: Vec<String>,
    npc_relationships: Vec<NpcRelationship>,
}

impl NarrativeMemory {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    // -- Recording -----------------------------------------------------------

    /// Record a key event. Blank text is ignored.
    pub fn add_key_event(&mut self, event: &str) -> bool {
        push_bounded(&mut self.key_events, event, KEY_EVENTS)
    }

    /// Record a change in the character.
    pub fn add_character_development(&mut self, development: &str) -> bool {
        push_bounded(&mut self.character_developments, development, DEVELOPMENTS)
    }

    /// Record a choice the player made.
    pub fn add_important_choice(&mut self, choice: &str) -> bool {
        push_bounded(&mut self.important_choices, choice, CHOICES)
    }

    /// Record a visit. Repeating the latest location is ignored.
    pub fn add_location_visit(&mut self, location: &str) -> bool {
        if self.location_history.last().map(String::as_str) == Some(location.trim()) {
            return false;
        }
        push_bounded(&mut self.location_history, location, LOCATIONS)
    }

    /// Record a plot development.
    pub fn add_plot_point(&mut self, plot: &str) -> bool {
        push_bounded(&mut self.plot_points, plot, PLOT_POINTS)
    }

    /// Set the relationship with an NPC, moving them to the most recent end.
    pub fn set_npc_relationship(&mut self, name: &str, relationship: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.npc_relationships
            .retain(|r| !r.name.eq_ignore_ascii_case(name));
        self.npc_relationships.push(NpcRelationship {
            name: name.to_string(),
            relationship: relationship.trim().to_string(),
        });
    }

    /// Relationship label for an NPC, matched case-insensitively.
    pub fn npc_relationship(&self, name: &str) -> Option<String> {
        self.npc_relationships
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name.trim()))
            .map(|r| r.relationship.clone())
    }

    // -- Accessors -----------------------------------------------------------

    /// Key events, oldest first.
    pub fn key_events(&self) -> Vec<String> {
        self.key_events.clone()
    }

    /// Character developments, oldest first.
    pub fn character_developments(&self) -> Vec<String> {
        self.character_developments.clone()
    }

    /// Important choices, oldest first.
    pub fn important_choices(&self) -> Vec<String> {
        self.important_choices.clone()
    }

    /// Visited locations, oldest first.
    pub fn location_history(&self) -> Vec<String> {
        self.location_history.clone()
    }

    /// Plot points, oldest first.
    pub fn plot_points(&self) -> Vec<String> {
        self.plot_points.clone()
    }

    /// NPC relationships, least recently updated first.
    pub fn npc_relationships(&self) -> Vec<NpcRelationship> {
        self.npc_relationships.clone()
    }

    // -- Rendering -----------------------------------------------------------

    /// Short digest for the narrator's prompt: the last 5 events, 3
    /// choices, 5 NPCs, and 3 plot points. Empty when nothing is recorded.
    pub fn generate_context_summary(&self) -> String {
        let mut lines = Vec::new();
        if !self.key_events.is_empty() {
            lines.push(format!(
                "Recent events: {}",
                tail(&self.key_events, 5).join("; ")
            ));
        }
        if !self.important_choices.is_empty() {
            lines.push(format!(
                "Recent choices: {}",
                tail(&self.important_choices, 3).join("; ")
            ));
        }
        if !self.npc_relationships.is_empty() {
            let start = self.npc_relationships.len().saturating_sub(5);
            let npcs: Vec<String> = self.npc_relationships[start..]
                .iter()
                .map(|r| format!("{} ({})", r.name, r.relationship))
                .collect();
            lines.push(format!("Known NPCs: {}", npcs.join(", ")));
        }
        if !self.plot_points.is_empty() {
            lines.push(format!(
                "Active plot: {}",
                tail(&self.plot_points, 3).join("; ")
            ));
        }
        lines.join("\n")
    }

    /// Full history for display.
    pub fn story_recap(&self) -> String {
        if self.is_empty() {
            return "No story yet.".to_string();
        }
        let mut out = String::new();
        let sections: [(&str, &[String]); 5] = [
            ("Key Events", &self.key_events),
            ("Character Development", &self.character_developments),
            ("Important Choices", &self.important_choices),
            ("Plot", &self.plot_points),
            ("Places Visited", &self.location_history),
        ];
        for (title, entries) in sections {
            if entries.is_empty() {
                continue;
            }
            out.push_str(&format!("== {title} ==\n"));
            for entry in entries {
                out.push_str(&format!("- {entry}\n"));
            }
            out.push('\n');
        }
        if !self.npc_relationships.is_empty() {
            out.push_str("== People ==\n");
            for r in &self.npc_relationships {
                out.push_str(&format!("- {}: {}\n", r.name, r.relationship));
            }
        }
        out.trim_end().to_string()
    }

    // -- Persistence ---------------------------------------------------------

    /// Capture the log.
    pub fn snapshot(&self) -> NarrativeMemory {
        self.clone()
    }

    /// Replace the log. Lists longer than their cap are trimmed to the newer
    /// tail.
    pub fn restore(&mut self, mut snapshot: NarrativeMemory) {
        trim(&mut snapshot.key_events, KEY_EVENTS);
        trim(&mut snapshot.character_developments, DEVELOPMENTS);
        trim(&mut snapshot.important_choices, CHOICES);
        trim(&mut snapshot.location_history, LOCATIONS);
        trim(&mut snapshot.plot_points, PLOT_POINTS);
        *self = snapshot;
    }
}
