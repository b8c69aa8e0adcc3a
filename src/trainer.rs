use crate::pokedex::Pokedex;
use crate::pokemon::Pokemon;
use serde::{Deserialize, Serialize};

/// One slot in a trainer's roster.
///
/// The Pokemon is held as a weak reference: its catalog number plus a name
/// snapshot taken when it was added. Trainers never own Pokemon; resolution
/// back to the full entry always goes through a pokedex.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    number: u32,
    name: String,
    level: u32,
}

impl RosterEntry {
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

/// A trainer with an ordered roster of leveled Pokemon.
#[derive(Debug, Clone, PartialEq)]
pub struct Trainer {
    name: String,
    age: u32,
    roster: Vec<RosterEntry>,
}

impl Trainer {
    pub fn new(name: impl Into<String>, age: u32) -> Trainer {
        Trainer {
            name: name.into(),
            age,
            roster: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_age(&mut self, age: u32) {
        self.age = age;
    }

    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    pub fn total_pokemon(&self) -> usize {
        self.roster.len()
    }

    /// Appends a roster entry. Fails when the trainer already has an entry
    /// for this Pokemon's number.
    pub fn add_pokemon(&mut self, pokemon: &Pokemon, level: u32) -> bool {
        if self.roster.iter().any(|entry| entry.number == pokemon.number()) {
            return false;
        }
        self.roster.push(RosterEntry {
            number: pokemon.number(),
            name: pokemon.name().to_string(),
            level,
        });
        true
    }

    /// Removes the entry for `number`, keeping the remaining order compact.
    pub fn remove_pokemon(&mut self, number: u32) -> bool {
        match self.roster.iter().position(|entry| entry.number == number) {
            Some(index) => {
                self.roster.remove(index);
                true
            }
            None => false,
        }
    }

    /// Resolves a roster entry against the given pokedex. `None` when the
    /// trainer has no such entry or the pokedex no longer does.
    pub fn find_pokemon<'a>(&self, number: u32, pokedex: &'a Pokedex) -> Option<&'a Pokemon> {
        if !self.roster.iter().any(|entry| entry.number == number) {
            return None;
        }
        pokedex.find_by_number(number)
    }

    pub fn pokemon_level(&self, number: u32) -> Option<u32> {
        self.roster
            .iter()
            .find(|entry| entry.number == number)
            .map(|entry| entry.level)
    }

    /// A level-up must increase: fails when `new_level` is below 1 or not
    /// strictly greater than the current level.
    pub fn update_level(&mut self, number: u32, new_level: u32) -> bool {
        if new_level < 1 {
            return false;
        }
        match self.roster.iter_mut().find(|entry| entry.number == number) {
            Some(entry) => {
                if new_level <= entry.level {
                    return false;
                }
                entry.level = new_level;
                true
            }
            None => false,
        }
    }

    /// Full multi-line dump, resolving roster lines against the pokedex.
    /// Entries that no longer resolve fall back to their stored snapshot.
    pub fn details(&self, pokedex: &Pokedex) -> String {
        let mut info = String::from("=== TRAINER ===\n");
        info.push_str(&format!("Name: {}\n", self.name));
        info.push_str(&format!("Age: {} years\n", self.age));
        info.push_str(&format!("Total Pokemon: {}\n", self.total_pokemon()));

        if !self.roster.is_empty() {
            info.push_str("\nTrainer's Pokemon:\n");
            for entry in &self.roster {
                let summary = match pokedex.find_by_number(entry.number) {
                    Some(pokemon) => pokemon.summary(),
                    None => format!("#{} - {}", entry.number, entry.name),
                };
                info.push_str(&format!("- {} (Level {})\n", summary, entry.level));
            }
        }

        info
    }

    /// Snapshot for persistence. Roster entries are persisted by name, not
    /// number.
    pub fn to_record(&self) -> TrainerRecord {
        TrainerRecord {
            name: self.name.clone(),
            age: self.age,
            pokemons: self
                .roster
                .iter()
                .map(|entry| RosterRecord {
                    name: Some(entry.name.clone()),
                    number: None,
                    level: entry.level,
                })
                .collect(),
        }
    }

    /// Rebuild from a persisted record, resolving each roster entry against
    /// the given pokedex: by number when the legacy field is present, else
    /// by name taking the first match. Entries that fail to resolve are
    /// dropped silently.
    pub fn from_record(record: &TrainerRecord, pokedex: &Pokedex) -> Trainer {
        let mut trainer = Trainer::new(record.name.clone(), record.age);

        for roster_record in &record.pokemons {
            let resolved = if let Some(number) = roster_record.number {
                pokedex.find_by_number(number)
            } else if let Some(name) = &roster_record.name {
                pokedex.find_by_name(name).into_iter().next()
            } else {
                None
            };

            if let Some(pokemon) = resolved {
                trainer.roster.push(RosterEntry {
                    number: pokemon.number(),
                    name: pokemon.name().to_string(),
                    level: roster_record.level,
                });
            }
        }

        trainer
    }
}

/// Persisted form of a trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerRecord {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub pokemons: Vec<RosterRecord>,
}

fn default_level() -> u32 {
    1
}

/// Persisted roster entry. Current files carry `{name, level}`; legacy
/// files carry `{number, level}` instead, and both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default = "default_level")]
    pub level: u32,
}
