//! Pokedex Catalog Manager
//!
//! A single-user catalog of Pokemon with elemental typing, plus trainers
//! owning leveled instances of cataloged Pokemon. Collections live in
//! memory and write through to flat JSON files on every mutation; a
//! frontend (menu, script, test) drives them through plain calls.

// --- MODULE DECLARATIONS ---
pub mod errors;
pub mod pokedex;
pub mod pokemon;
pub mod storage;
pub mod trainer;
pub mod trainers;
pub mod typing;

// --- PUBLIC API RE-EXPORTS ---
// The most important types, importable straight from the crate root.

// Typing: the closed kind set and the type value object.
pub use typing::{ElementKind, TypeInfo};

// Catalog entries and their persisted forms.
pub use pokemon::{Pokemon, PokemonRecord, TypeRecord};
pub use trainer::{RosterEntry, RosterRecord, Trainer, TrainerRecord};

// Collections.
pub use pokedex::{Pokedex, PokedexStats};
pub use trainers::TrainerRegistry;

// Persistence seams and the stock implementations.
pub use storage::{JsonFileStore, MemoryStore, PokemonStore};
pub use trainers::{MemoryTrainerStore, TrainerFileStore, TrainerStore};

// Persistence-boundary error type.
pub use errors::StorageError;
