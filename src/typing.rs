use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of elemental kinds a Pokemon can be cataloged under.
///
/// Each kind fixes the primary type of every Pokemon constructed with it;
/// the weakness/resistance data lives in the static type table below and is
/// looked up by id, so the definitions exist in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Dragon,
    Ghost,
    Bug,
    Fighting,
    Normal,
    Rock,
    Psychic,
    Ground,
    Poison,
    Flying,
}

/// One row of the static type table.
struct TypeDef {
    id: u8,
    kind: ElementKind,
    name: &'static str,
    weaknesses: &'static [&'static str],
    resistances: &'static [&'static str],
}

// Sole source of truth for type weaknesses and resistances. Read-only for
// the life of the process; ids are stable and match the persisted data.
static TYPE_TABLE: [TypeDef; 15] = [
    TypeDef {
        id: 1,
        kind: ElementKind::Fire,
        name: "Fire",
        weaknesses: &["Water", "Ground"],
        resistances: &["Grass", "Ice", "Steel"],
    },
    TypeDef {
        id: 2,
        kind: ElementKind::Water,
        name: "Water",
        weaknesses: &["Grass", "Electric"],
        resistances: &["Fire", "Ground", "Rock"],
    },
    TypeDef {
        id: 3,
        kind: ElementKind::Grass,
        name: "Grass",
        weaknesses: &["Fire", "Ice", "Poison", "Flying", "Bug"],
        resistances: &["Water", "Ground", "Rock", "Electric"],
    },
    TypeDef {
        id: 4,
        kind: ElementKind::Electric,
        name: "Electric",
        weaknesses: &["Ground"],
        resistances: &["Flying", "Water", "Steel"],
    },
    TypeDef {
        id: 5,
        kind: ElementKind::Ice,
        name: "Ice",
        weaknesses: &["Fire", "Fighting", "Rock", "Steel"],
        resistances: &["Grass", "Ground", "Flying", "Dragon"],
    },
    TypeDef {
        id: 6,
        kind: ElementKind::Dragon,
        name: "Dragon",
        weaknesses: &["Ice", "Dragon"],
        resistances: &["Fire", "Water", "Electric", "Grass"],
    },
    TypeDef {
        id: 7,
        kind: ElementKind::Ghost,
        name: "Ghost",
        weaknesses: &["Ghost"],
        resistances: &["Poison", "Bug"],
    },
    TypeDef {
        id: 8,
        kind: ElementKind::Bug,
        name: "Bug",
        weaknesses: &["Fire", "Flying", "Rock"],
        resistances: &["Grass", "Fighting", "Ground"],
    },
    TypeDef {
        id: 9,
        kind: ElementKind::Fighting,
        name: "Fighting",
        weaknesses: &["Flying", "Psychic"],
        resistances: &["Bug", "Rock"],
    },
    TypeDef {
        id: 10,
        kind: ElementKind::Normal,
        name: "Normal",
        weaknesses: &["Fighting"],
        resistances: &[],
    },
    TypeDef {
        id: 11,
        kind: ElementKind::Rock,
        name: "Rock",
        weaknesses: &["Water", "Grass", "Fighting", "Ground"],
        resistances: &["Fire", "Normal", "Flying", "Poison"],
    },
    TypeDef {
        id: 12,
        kind: ElementKind::Psychic,
        name: "Psychic",
        weaknesses: &["Bug", "Ghost"],
        resistances: &["Fighting", "Psychic"],
    },
    TypeDef {
        id: 13,
        kind: ElementKind::Ground,
        name: "Ground",
        weaknesses: &["Water", "Grass", "Ice"],
        resistances: &["Poison", "Rock", "Electric"],
    },
    TypeDef {
        id: 14,
        kind: ElementKind::Poison,
        name: "Poison",
        weaknesses: &["Ground", "Psychic"],
        resistances: &["Grass", "Fighting", "Poison", "Bug"],
    },
    TypeDef {
        id: 15,
        kind: ElementKind::Flying,
        name: "Flying",
        weaknesses: &["Electric", "Ice", "Rock"],
        resistances: &["Grass", "Fighting", "Bug"],
    },
];

impl ElementKind {
    /// All kinds in type-table order (ascending id).
    pub fn all() -> [ElementKind; 15] {
        [
            ElementKind::Fire,
            ElementKind::Water,
            ElementKind::Grass,
            ElementKind::Electric,
            ElementKind::Ice,
            ElementKind::Dragon,
            ElementKind::Ghost,
            ElementKind::Bug,
            ElementKind::Fighting,
            ElementKind::Normal,
            ElementKind::Rock,
            ElementKind::Psychic,
            ElementKind::Ground,
            ElementKind::Poison,
            ElementKind::Flying,
        ]
    }

    /// The kind's id in the static type table.
    pub fn type_id(self) -> u8 {
        self.def().id
    }

    pub fn from_type_id(id: u8) -> Option<ElementKind> {
        TYPE_TABLE.iter().find(|def| def.id == id).map(|def| def.kind)
    }

    /// The type name, e.g. "Fire".
    pub fn name(self) -> &'static str {
        self.def().name
    }

    /// The `classe` tag written to the data file for this kind.
    pub fn discriminator(self) -> &'static str {
        match self {
            ElementKind::Fire => "FirePokemon",
            ElementKind::Water => "WaterPokemon",
            ElementKind::Grass => "GrassPokemon",
            ElementKind::Electric => "ElectricPokemon",
            ElementKind::Ice => "IcePokemon",
            ElementKind::Dragon => "DragonPokemon",
            ElementKind::Ghost => "GhostPokemon",
            ElementKind::Bug => "BugPokemon",
            ElementKind::Fighting => "FightingPokemon",
            ElementKind::Normal => "NormalPokemon",
            ElementKind::Rock => "RockPokemon",
            ElementKind::Psychic => "PsychicPokemon",
            ElementKind::Ground => "GroundPokemon",
            ElementKind::Poison => "PoisonPokemon",
            ElementKind::Flying => "FlyingPokemon",
        }
    }

    /// Reverse discriminator lookup; `None` means an unknown tag, which
    /// loaders treat as a record to skip rather than an error.
    pub fn from_discriminator(tag: &str) -> Option<ElementKind> {
        ElementKind::all()
            .into_iter()
            .find(|kind| kind.discriminator() == tag)
    }

    /// The fixed type definition for this kind.
    ///
    /// A missing table entry is a programming error in the type table and
    /// panics; it is not a user-facing condition.
    pub fn type_info(self) -> TypeInfo {
        TypeInfo::from_id(self.type_id())
            .unwrap_or_else(|| panic!("type table has no entry for {:?}", self))
    }

    fn def(self) -> &'static TypeDef {
        TYPE_TABLE
            .iter()
            .find(|def| def.kind == self)
            .unwrap_or_else(|| panic!("type table has no entry for {:?}", self))
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An elemental type as a value: its name plus which type names it is weak
/// or resistant against. Immutable after construction. Two types are the
/// same type exactly when their names are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    name: String,
    weaknesses: Vec<String>,
    resistances: Vec<String>,
}

impl TypeInfo {
    pub fn new(
        name: impl Into<String>,
        weaknesses: Vec<String>,
        resistances: Vec<String>,
    ) -> TypeInfo {
        TypeInfo {
            name: name.into(),
            weaknesses,
            resistances,
        }
    }

    /// Factory over the static type table. `None` for an unknown id is a
    /// valid "not found" result, not an error.
    pub fn from_id(id: u8) -> Option<TypeInfo> {
        TYPE_TABLE.iter().find(|def| def.id == id).map(|def| TypeInfo {
            name: def.name.to_string(),
            weaknesses: def.weaknesses.iter().map(|w| w.to_string()).collect(),
            resistances: def.resistances.iter().map(|r| r.to_string()).collect(),
        })
    }

    /// Every definition in the table, ordered by id. Intended for menu
    /// enumeration in a frontend.
    pub fn all() -> Vec<(u8, TypeInfo)> {
        TYPE_TABLE
            .iter()
            .map(|def| {
                (
                    def.id,
                    TypeInfo {
                        name: def.name.to_string(),
                        weaknesses: def.weaknesses.iter().map(|w| w.to_string()).collect(),
                        resistances: def.resistances.iter().map(|r| r.to_string()).collect(),
                    },
                )
            })
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weaknesses(&self) -> &[String] {
        &self.weaknesses
    }

    pub fn resistances(&self) -> &[String] {
        &self.resistances
    }

    /// Case-sensitive exact match against the weakness list.
    pub fn is_weak_against(&self, target: &str) -> bool {
        self.weaknesses.iter().any(|w| w == target)
    }

    /// Case-sensitive exact match against the resistance list.
    pub fn is_resistant_against(&self, target: &str) -> bool {
        self.resistances.iter().any(|r| r == target)
    }

    /// Human-readable dump. Weaknesses and resistances are listed only when
    /// non-empty.
    pub fn describe(&self) -> String {
        let mut info = format!("Type: {}\n", self.name);

        if !self.weaknesses.is_empty() {
            info.push_str(&format!("Weak against: {}\n", self.weaknesses.join(", ")));
        }

        if !self.resistances.is_empty() {
            info.push_str(&format!(
                "Resistant against: {}\n",
                self.resistances.join(", ")
            ));
        }

        info
    }
}
