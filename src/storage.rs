use crate::errors::StorageError;
use crate::pokemon::{Pokemon, PokemonRecord};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Persistence seam for the pokedex.
///
/// The pokedex writes through this on every mutation. Implementations never
/// let an error escape: a failed save is `false`, a failed load is empty.
pub trait PokemonStore {
    fn save(&self, pokemons: &[&Pokemon]) -> bool;
    fn load(&self) -> Vec<Pokemon>;
    fn exists(&self) -> bool;
    fn wipe(&self) -> bool;
    fn backup(&self) -> bool;
}

/// Whole-file JSON persistence: one pretty-printed array of records.
///
/// Construction creates the parent directory of the data file if absent.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> JsonFileStore {
        let path = path.into();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.is_dir() {
                let _ = fs::create_dir_all(dir);
            }
        }
        JsonFileStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Like `save`, but reports why a write failed.
    pub fn try_save(&self, pokemons: &[&Pokemon]) -> Result<(), StorageError> {
        let records: Vec<PokemonRecord> = pokemons.iter().map(|p| p.to_record()).collect();
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Like `load`, but reports why nothing came back: a missing file, an
    /// unreadable file, and corrupt JSON are distinct outcomes here.
    pub fn try_load(&self) -> Result<Vec<Pokemon>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::Missing(self.path.clone()));
        }

        let contents = fs::read_to_string(&self.path)?;
        let values: Vec<Value> = serde_json::from_str(&contents)?;

        // Best-effort: records that fail to decode or carry an unknown
        // discriminator are skipped, not errors.
        let mut pokemons = Vec::new();
        for value in values {
            let record: PokemonRecord = match serde_json::from_value(value) {
                Ok(record) => record,
                Err(_) => continue,
            };
            if let Some(pokemon) = Pokemon::from_record(&record) {
                pokemons.push(pokemon);
            }
        }

        Ok(pokemons)
    }
}

impl PokemonStore for JsonFileStore {
    fn save(&self, pokemons: &[&Pokemon]) -> bool {
        self.try_save(pokemons).is_ok()
    }

    fn load(&self) -> Vec<Pokemon> {
        self.try_load().unwrap_or_default()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn wipe(&self) -> bool {
        if !self.path.exists() {
            // Already gone counts as success.
            return true;
        }
        fs::remove_file(&self.path).is_ok()
    }

    fn backup(&self) -> bool {
        if !self.path.exists() {
            return false;
        }
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let target = self
            .path
            .with_file_name(format!("backup_pokemons_{}.json", stamp));
        fs::copy(&self.path, target).is_ok()
    }
}

/// In-memory stand-in for tests. Holds the serialized records so loads go
/// through the same record round-trip as the file store.
#[derive(Default)]
pub struct MemoryStore {
    records: RefCell<Vec<PokemonRecord>>,
    saved: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn record_count(&self) -> usize {
        self.records.borrow().len()
    }
}

impl PokemonStore for MemoryStore {
    fn save(&self, pokemons: &[&Pokemon]) -> bool {
        *self.records.borrow_mut() = pokemons.iter().map(|p| p.to_record()).collect();
        self.saved.set(true);
        true
    }

    fn load(&self) -> Vec<Pokemon> {
        self.records
            .borrow()
            .iter()
            .filter_map(Pokemon::from_record)
            .collect()
    }

    fn exists(&self) -> bool {
        self.saved.get()
    }

    fn wipe(&self) -> bool {
        self.records.borrow_mut().clear();
        self.saved.set(false);
        true
    }

    fn backup(&self) -> bool {
        self.saved.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typing::ElementKind;
    use pretty_assertions::assert_eq;

    fn temp_store(tag: &str) -> JsonFileStore {
        let dir = std::env::temp_dir().join(format!(
            "pokedex_storage_{}_{}",
            std::process::id(),
            tag
        ));
        let _ = fs::remove_dir_all(&dir);
        JsonFileStore::new(dir.join("pokemons.json"))
    }

    fn cleanup(store: &JsonFileStore) {
        if let Some(dir) = store.path().parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    fn charmander() -> Pokemon {
        Pokemon::new(ElementKind::Fire, "Charmander", "A lizard", 4, 0.6, 8.5, None)
    }

    fn charizard() -> Pokemon {
        Pokemon::new(
            ElementKind::Fire,
            "Charizard",
            "Spits fire",
            6,
            1.7,
            90.5,
            Some(ElementKind::Flying.type_info()),
        )
    }

    #[test]
    fn test_construction_creates_parent_directory() {
        let store = temp_store("mkdir");
        assert!(store.path().parent().unwrap().is_dir());
        cleanup(&store);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let store = temp_store("round_trip");
        let first = charmander();
        let second = charizard();
        assert!(store.save(&[&first, &second]));
        assert!(store.exists());

        let loaded = store.load();
        assert_eq!(loaded, vec![first, second]);
        cleanup(&store);
    }

    #[test]
    fn test_missing_file_loads_empty_but_is_distinguishable() {
        let store = temp_store("missing");
        assert!(!store.exists());
        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(StorageError::Missing(_))));
        cleanup(&store);
    }

    #[test]
    fn test_corrupt_json_loads_empty_but_is_distinguishable() {
        let store = temp_store("corrupt");
        fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(StorageError::Format(_))));
        cleanup(&store);
    }

    #[test]
    fn test_unknown_discriminator_is_silently_skipped() {
        let store = temp_store("unknown_classe");
        let known = charmander();
        let mut rogue = charizard().to_record();
        rogue.classe = "ShadowPokemon".to_string();
        let json =
            serde_json::to_string_pretty(&vec![known.to_record(), rogue]).unwrap();
        fs::write(store.path(), json).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, vec![known]);
        cleanup(&store);
    }

    #[test]
    fn test_malformed_record_is_silently_skipped() {
        let store = temp_store("malformed");
        let known = charmander();
        let json = format!(
            "[{}, {{\"name\": \"stub\"}}]",
            serde_json::to_string(&known.to_record()).unwrap()
        );
        fs::write(store.path(), json).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, vec![known]);
        cleanup(&store);
    }

    #[test]
    fn test_wipe_removes_file_and_reports_success_when_absent() {
        let store = temp_store("wipe");
        assert!(store.wipe());

        let pokemon = charmander();
        store.save(&[&pokemon]);
        assert!(store.exists());
        assert!(store.wipe());
        assert!(!store.exists());
        cleanup(&store);
    }

    #[test]
    fn test_backup_copies_file_beside_original() {
        let store = temp_store("backup");
        assert!(!store.backup());

        let pokemon = charmander();
        store.save(&[&pokemon]);
        assert!(store.backup());
        assert!(store.exists());

        let dir = store.path().parent().unwrap();
        let backups = fs::read_dir(dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("backup_pokemons_")
            })
            .count();
        assert_eq!(backups, 1);
        cleanup(&store);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(!store.exists());

        let pokemon = charizard();
        assert!(store.save(&[&pokemon]));
        assert!(store.exists());
        assert_eq!(store.load(), vec![pokemon]);

        assert!(store.wipe());
        assert!(!store.exists());
        assert!(store.load().is_empty());
    }
}
