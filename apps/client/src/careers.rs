//! Career selection — the bounded, duplicate-free list the user builds before
//! generation, plus the fixed suggestion pool behind "surprise me".

#![allow(dead_code)]

use rand::seq::SliceRandom;

/// Career list capacity.
pub const MAX_CAREERS: usize = 4;
/// Minimum list size required to trigger generation.
pub const MIN_CAREERS: usize = 1;
/// Number of careers a surprise draw puts in the list.
pub const SURPRISE_COUNT: usize = 3;

/// Fixed suggestion pool: a mix of realistic and fictional careers.
pub const SUGGESTED_CAREERS: &[&str] = &[
    // Real careers
    "Astronaut",
    "Chef",
    "Detective",
    "Gardener",
    "CEO",
    "Artist",
    "Doctor",
    "Pilot",
    "Firefighter",
    "Scientist",
    "Architect",
    "Musician",
    "Professional Athlete",
    "Marine Biologist",
    "Archaeologist",
    "Software Engineer",
    "Veterinarian",
    "Fashion Designer",
    "Park Ranger",
    "Chemical Engineer",
    "Product Manager",
    // Fictional / satirical careers
    "Superhero",
    "Wizard",
    "Time Traveler",
    "Dragon Tamer",
    "Space Ranger",
    "Cat Whisperer",
    "Ghost Hunter",
    "Ninja",
    "Pirate",
    "Zombie Apocalypse Survivor",
    "Stunt Artist",
];

/// Result of an attempted insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Exact name already present. The UI ignores this silently.
    Duplicate,
    /// List already holds `MAX_CAREERS` entries.
    Full,
    /// Blank input after trimming.
    Empty,
}

/// Ordered list of distinct career names, capped at `MAX_CAREERS`.
#[derive(Debug, Clone, Default)]
pub struct CareerList {
    entries: Vec<String>,
}

impl CareerList {
    /// Inserts a career at the end of the list. Duplicate detection is a
    /// case-sensitive exact match against existing entries.
    pub fn add(&mut self, name: &str) -> AddOutcome {
        let name = name.trim();
        if name.is_empty() {
            return AddOutcome::Empty;
        }
        if self.entries.iter().any(|c| c == name) {
            return AddOutcome::Duplicate;
        }
        if self.entries.len() >= MAX_CAREERS {
            return AddOutcome::Full;
        }
        self.entries.push(name.to_string());
        AddOutcome::Added
    }

    /// Removes a career by exact name. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|c| c != name);
        self.entries.len() != before
    }

    /// Replaces the whole list with `SURPRISE_COUNT` distinct careers drawn
    /// at random from the suggestion pool.
    pub fn surprise_me(&mut self) {
        let mut rng = rand::thread_rng();
        self.entries = SUGGESTED_CAREERS
            .choose_multiple(&mut rng, SURPRISE_COUNT)
            .map(|s| s.to_string())
            .collect();
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
