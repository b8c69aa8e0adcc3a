use crate::pokemon::Pokemon;
use crate::storage::PokemonStore;
use std::collections::BTreeMap;

/// The in-memory Pokemon collection, keyed by catalog number.
///
/// Every mutation writes through to the injected store immediately; there is
/// no batching. Iteration order is ascending catalog number.
pub struct Pokedex {
    entries: BTreeMap<u32, Pokemon>,
    store: Box<dyn PokemonStore>,
}

/// Aggregate statistics, computed in a single pass. `heaviest`/`tallest`
/// keep the first-seen entry on ties.
pub struct PokedexStats<'a> {
    pub total: usize,
    pub per_type: BTreeMap<String, usize>,
    pub heaviest: Option<&'a Pokemon>,
    pub tallest: Option<&'a Pokemon>,
}

impl Pokedex {
    /// Creates a pokedex over the given store and immediately loads any
    /// saved data.
    pub fn new(store: Box<dyn PokemonStore>) -> Pokedex {
        let mut pokedex = Pokedex {
            entries: BTreeMap::new(),
            store,
        };
        pokedex.load();
        pokedex
    }

    /// Adds a Pokemon and persists. Fails without overwriting when an entry
    /// with the same number already exists.
    pub fn add(&mut self, pokemon: Pokemon) -> bool {
        if self.entries.contains_key(&pokemon.number()) {
            return false;
        }
        self.entries.insert(pokemon.number(), pokemon);
        self.save();
        true
    }

    pub fn find_by_number(&self, number: u32) -> Option<&Pokemon> {
        self.entries.get(&number)
    }

    /// Case-insensitive substring search over names, in catalog order.
    pub fn find_by_name(&self, fragment: &str) -> Vec<&Pokemon> {
        let fragment = fragment.to_lowercase();
        self.entries
            .values()
            .filter(|pokemon| pokemon.name().to_lowercase().contains(&fragment))
            .collect()
    }

    /// Pokemon whose primary or secondary type name equals `type_name`
    /// exactly.
    pub fn find_by_type(&self, type_name: &str) -> Vec<&Pokemon> {
        self.entries
            .values()
            .filter(|pokemon| {
                pokemon.primary_type().name() == type_name
                    || pokemon
                        .secondary_type()
                        .is_some_and(|secondary| secondary.name() == type_name)
            })
            .collect()
    }

    pub fn list_all(&self) -> Vec<&Pokemon> {
        self.entries.values().collect()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn statistics(&self) -> PokedexStats<'_> {
        let mut stats = PokedexStats {
            total: self.entries.len(),
            per_type: BTreeMap::new(),
            heaviest: None,
            tallest: None,
        };

        let mut max_weight = 0.0_f32;
        let mut max_height = 0.0_f32;

        for pokemon in self.entries.values() {
            // Both types count toward the per-type tally.
            *stats
                .per_type
                .entry(pokemon.primary_type().name().to_string())
                .or_insert(0) += 1;
            if let Some(secondary) = pokemon.secondary_type() {
                *stats.per_type.entry(secondary.name().to_string()).or_insert(0) += 1;
            }

            // Strictly greater, so ties keep the first-seen entry.
            if pokemon.weight() > max_weight {
                max_weight = pokemon.weight();
                stats.heaviest = Some(pokemon);
            }
            if pokemon.height() > max_height {
                max_height = pokemon.height();
                stats.tallest = Some(pokemon);
            }
        }

        stats
    }

    /// Renders the statistics as text, or a fixed message when empty.
    pub fn report(&self) -> String {
        if self.is_empty() {
            return "The Pokedex is empty!\n".to_string();
        }

        let stats = self.statistics();
        let mut report = String::from("=== POKEDEX REPORT ===\n");
        report.push_str(&format!("Total Pokemon: {}\n\n", stats.total));

        report.push_str("Pokemon per type:\n");
        for (type_name, count) in &stats.per_type {
            report.push_str(&format!("- {}: {}\n", type_name, count));
        }

        if let Some(heaviest) = stats.heaviest {
            report.push_str(&format!(
                "\nHeaviest Pokemon: {} ({}kg)\n",
                heaviest.summary(),
                heaviest.weight()
            ));
        }
        if let Some(tallest) = stats.tallest {
            report.push_str(&format!(
                "Tallest Pokemon: {} ({}m)\n",
                tallest.summary(),
                tallest.height()
            ));
        }

        report
    }

    /// Replaces the in-memory state wholesale with whatever the store
    /// yields. The store itself swallows read failures into an empty load,
    /// so this effectively always succeeds.
    pub fn load(&mut self) -> bool {
        let loaded = self.store.load();
        self.entries.clear();
        for pokemon in loaded {
            self.entries.insert(pokemon.number(), pokemon);
        }
        true
    }

    pub fn save(&self) -> bool {
        let pokemons: Vec<&Pokemon> = self.entries.values().collect();
        self.store.save(&pokemons)
    }

    /// Copies the data file aside with a timestamped name. Fails when there
    /// is nothing to back up.
    pub fn backup(&self) -> bool {
        self.store.backup()
    }

    /// Deletes the persisted data and empties the in-memory collection.
    pub fn clear_all(&mut self) -> bool {
        if !self.store.wipe() {
            return false;
        }
        self.entries.clear();
        true
    }

    /// File presence only; says nothing about content validity.
    pub fn has_saved_data(&self) -> bool {
        self.store.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, PokemonStore};
    use crate::typing::ElementKind;
    use pretty_assertions::assert_eq;

    fn empty_pokedex() -> Pokedex {
        Pokedex::new(Box::new(MemoryStore::new()))
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
    fn test_add_rejects_duplicate_number_and_keeps_first() {
        let mut pokedex = empty_pokedex();
        assert!(pokedex.add(charmander()));
        let impostor =
            Pokemon::new(ElementKind::Water, "Impostor", "Not Charmander", 4, 1.0, 1.0, None);
        assert!(!pokedex.add(impostor));

        assert_eq!(pokedex.total(), 1);
        assert_eq!(pokedex.find_by_number(4).unwrap().name(), "Charmander");
    }

    #[test]
    fn test_find_by_name_is_case_insensitive_substring() {
        let mut pokedex = empty_pokedex();
        pokedex.add(charmander());
        pokedex.add(charizard());
        pokedex.add(Pokemon::new(
            ElementKind::Electric,
            "Pikachu",
            "A mouse",
            25,
            0.4,
            6.0,
            None,
        ));

        let hits = pokedex.find_by_name("CHAR");
        let names: Vec<&str> = hits.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Charmander", "Charizard"]);

        assert!(pokedex.find_by_name("zzz").is_empty());
    }

    #[test]
    fn test_find_by_type_matches_primary_and_secondary() {
        let mut pokedex = empty_pokedex();
        pokedex.add(charmander());
        pokedex.add(charizard());

        let fire = pokedex.find_by_type("Fire");
        assert_eq!(fire.len(), 2);

        let flying = pokedex.find_by_type("Flying");
        assert_eq!(flying.len(), 1);
        assert_eq!(flying[0].number(), 6);

        // Exact match only; no substring or case folding here.
        assert!(pokedex.find_by_type("fire").is_empty());
    }

    #[test]
    fn test_statistics_on_empty_pokedex() {
        let pokedex = empty_pokedex();
        let stats = pokedex.statistics();
        assert_eq!(stats.total, 0);
        assert!(stats.per_type.is_empty());
        assert!(stats.heaviest.is_none());
        assert!(stats.tallest.is_none());
        assert_eq!(pokedex.report(), "The Pokedex is empty!\n");
    }

    #[test]
    fn test_statistics_counts_both_types_and_finds_extremes() {
        let mut pokedex = empty_pokedex();
        pokedex.add(charmander());
        pokedex.add(charizard());

        let stats = pokedex.statistics();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.per_type.get("Fire"), Some(&2));
        assert_eq!(stats.per_type.get("Flying"), Some(&1));
        assert_eq!(stats.heaviest.unwrap().number(), 6);
        assert_eq!(stats.tallest.unwrap().number(), 6);
    }

    #[test]
    fn test_statistics_ties_keep_first_seen() {
        let mut pokedex = empty_pokedex();
        pokedex.add(Pokemon::new(
            ElementKind::Normal,
            "Twin A",
            "First",
            1,
            1.0,
            10.0,
            None,
        ));
        pokedex.add(Pokemon::new(
            ElementKind::Normal,
            "Twin B",
            "Second",
            2,
            1.0,
            10.0,
            None,
        ));

        let stats = pokedex.statistics();
        assert_eq!(stats.heaviest.unwrap().name(), "Twin A");
        assert_eq!(stats.tallest.unwrap().name(), "Twin A");
    }

    #[test]
    fn test_report_renders_statistics() {
        let mut pokedex = empty_pokedex();
        pokedex.add(charmander());
        pokedex.add(charizard());

        let report = pokedex.report();
        assert!(report.starts_with("=== POKEDEX REPORT ===\n"));
        assert!(report.contains("Total Pokemon: 2\n"));
        assert!(report.contains("- Fire: 2\n"));
        assert!(report.contains("- Flying: 1\n"));
        assert!(report.contains("Heaviest Pokemon: #6 - Charizard (Fire/Flying) (90.5kg)\n"));
        assert!(report.contains("Tallest Pokemon: #6 - Charizard (Fire/Flying) (1.7m)\n"));
    }

    #[test]
    fn test_add_writes_through_to_store() {
        let mut pokedex = empty_pokedex();
        assert!(!pokedex.has_saved_data());
        pokedex.add(charmander());
        assert!(pokedex.has_saved_data());
    }

    #[test]
    fn test_load_replaces_state_wholesale() {
        let mut pokedex = empty_pokedex();
        pokedex.add(charmander());
        pokedex.add(charizard());

        // Reloading rebuilds the collection from what the store holds; the
        // write-through adds mean that is exactly the two entries.
        assert!(pokedex.load());
        assert_eq!(pokedex.total(), 2);
        assert!(pokedex.find_by_number(4).is_some());
        assert!(pokedex.find_by_number(6).is_some());
    }

    #[test]
    fn test_clear_all_empties_store_and_memory() {
        let mut pokedex = empty_pokedex();
        pokedex.add(charmander());
        assert!(pokedex.clear_all());
        assert!(pokedex.is_empty());
        assert!(!pokedex.has_saved_data());

        // Clearing an already-empty pokedex still succeeds.
        assert!(pokedex.clear_all());
    }

    #[test]
    fn test_construction_loads_saved_data() {
        let store = MemoryStore::new();
        {
            let pokemon = charmander();
            store.save(&[&pokemon]);
        }
        let pokedex = Pokedex::new(Box::new(store));
        assert_eq!(pokedex.total(), 1);
        assert_eq!(pokedex.find_by_number(4).unwrap().name(), "Charmander");
    }
}
