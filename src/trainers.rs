use crate::errors::StorageError;
use crate::pokedex::Pokedex;
use crate::trainer::{Trainer, TrainerRecord};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

/// Persistence seam for the trainer registry. Loading needs a populated
/// pokedex to resolve roster references.
pub trait TrainerStore {
    fn save(&self, trainers: &[Trainer]) -> bool;
    fn load(&self, pokedex: &Pokedex) -> Vec<Trainer>;
    fn exists(&self) -> bool;
}

/// Whole-file JSON persistence for trainers.
pub struct TrainerFileStore {
    path: PathBuf,
}

impl TrainerFileStore {
    pub fn new(path: impl Into<PathBuf>) -> TrainerFileStore {
        let path = path.into();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.is_dir() {
                let _ = fs::create_dir_all(dir);
            }
        }
        TrainerFileStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_save(&self, trainers: &[Trainer]) -> Result<(), StorageError> {
        let records: Vec<TrainerRecord> = trainers.iter().map(|t| t.to_record()).collect();
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn try_load(&self) -> Result<Vec<TrainerRecord>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::Missing(self.path.clone()));
        }
        let contents = fs::read_to_string(&self.path)?;
        let records: Vec<TrainerRecord> = serde_json::from_str(&contents)?;
        Ok(records)
    }
}

impl TrainerStore for TrainerFileStore {
    fn save(&self, trainers: &[Trainer]) -> bool {
        self.try_save(trainers).is_ok()
    }

    fn load(&self, pokedex: &Pokedex) -> Vec<Trainer> {
        self.try_load()
            .unwrap_or_default()
            .iter()
            .map(|record| Trainer::from_record(record, pokedex))
            .collect()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// In-memory stand-in for tests, holding serialized records so loads go
/// through the same reference resolution as the file store.
#[derive(Default)]
pub struct MemoryTrainerStore {
    records: RefCell<Vec<TrainerRecord>>,
}

impl MemoryTrainerStore {
    pub fn new() -> MemoryTrainerStore {
        MemoryTrainerStore::default()
    }

    pub fn with_records(records: Vec<TrainerRecord>) -> MemoryTrainerStore {
        MemoryTrainerStore {
            records: RefCell::new(records),
        }
    }
}

impl TrainerStore for MemoryTrainerStore {
    fn save(&self, trainers: &[Trainer]) -> bool {
        *self.records.borrow_mut() = trainers.iter().map(|t| t.to_record()).collect();
        true
    }

    fn load(&self, pokedex: &Pokedex) -> Vec<Trainer> {
        self.records
            .borrow()
            .iter()
            .map(|record| Trainer::from_record(record, pokedex))
            .collect()
    }

    fn exists(&self) -> bool {
        !self.records.borrow().is_empty()
    }
}

/// Ordered trainer collection with case-insensitive name uniqueness.
///
/// Construction loads immediately, which is why it needs an already
/// populated pokedex. Every mutation writes through to the store.
pub struct TrainerRegistry {
    trainers: Vec<Trainer>,
    store: Box<dyn TrainerStore>,
}

impl TrainerRegistry {
    pub fn new(store: Box<dyn TrainerStore>, pokedex: &Pokedex) -> TrainerRegistry {
        let trainers = store.load(pokedex);
        TrainerRegistry { trainers, store }
    }

    /// Adds a trainer and persists. Fails when a trainer with the same name
    /// (case-insensitive) already exists.
    pub fn add(&mut self, trainer: Trainer) -> bool {
        let name = trainer.name().to_lowercase();
        if self.trainers.iter().any(|t| t.name().to_lowercase() == name) {
            return false;
        }
        self.trainers.push(trainer);
        self.save();
        true
    }

    /// First case-insensitive substring match.
    ///
    /// Substring matching on what is effectively a unique key is a known
    /// sharp edge: an ambiguous fragment can hit an unintended trainer.
    pub fn find_by_name(&self, fragment: &str) -> Option<&Trainer> {
        let fragment = fragment.to_lowercase();
        self.trainers
            .iter()
            .find(|t| t.name().to_lowercase().contains(&fragment))
    }

    /// Mutable variant of `find_by_name`, for roster edits. Callers must
    /// `save` afterwards to persist what they changed.
    pub fn find_by_name_mut(&mut self, fragment: &str) -> Option<&mut Trainer> {
        let fragment = fragment.to_lowercase();
        self.trainers
            .iter_mut()
            .find(|t| t.name().to_lowercase().contains(&fragment))
    }

    pub fn find_by_index(&self, index: usize) -> Option<&Trainer> {
        self.trainers.get(index)
    }

    /// Removes by exact case-insensitive name, compacting the order.
    pub fn remove(&mut self, name: &str) -> bool {
        let name = name.to_lowercase();
        match self
            .trainers
            .iter()
            .position(|t| t.name().to_lowercase() == name)
        {
            Some(index) => {
                self.trainers.remove(index);
                self.save();
                true
            }
            None => false,
        }
    }

    /// Applies the provided fields to the first trainer matching `name`
    /// under `find_by_name` semantics, then persists.
    pub fn update(&mut self, name: &str, new_name: Option<&str>, new_age: Option<u32>) -> bool {
        let trainer = match self.find_by_name_mut(name) {
            Some(trainer) => trainer,
            None => return false,
        };
        if let Some(new_name) = new_name {
            trainer.set_name(new_name);
        }
        if let Some(new_age) = new_age {
            trainer.set_age(new_age);
        }
        self.save();
        true
    }

    pub fn list_all(&self) -> &[Trainer] {
        &self.trainers
    }

    pub fn count(&self) -> usize {
        self.trainers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trainers.is_empty()
    }

    pub fn save(&self) -> bool {
        self.store.save(&self.trainers)
    }
}
