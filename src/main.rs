use pokedex::{
    ElementKind, JsonFileStore, Pokedex, Pokemon, Trainer, TrainerFileStore, TrainerRegistry,
    TypeInfo,
};

fn main() {
    // Example 1: enumerate the type table
    println!("Known types:");
    for (id, info) in TypeInfo::all() {
        println!("  {:2}. {}", id, info.name());
    }
    println!();

    // Example 2: build a pokedex over the default data file
    let mut dex = Pokedex::new(Box::new(JsonFileStore::new("data/pokemons.json")));
    println!(
        "Loaded pokedex with {} entries (saved data: {})",
        dex.total(),
        dex.has_saved_data()
    );

    let charmander = Pokemon::new(
        ElementKind::Fire,
        "Charmander",
        "Prefers hot places. The flame on its tail shows its mood.",
        4,
        0.6,
        8.5,
        None,
    );
    let charizard = Pokemon::new(
        ElementKind::Fire,
        "Charizard",
        "Spits fire hot enough to melt boulders.",
        6,
        1.7,
        90.5,
        Some(ElementKind::Flying.type_info()),
    );
    let pikachu = Pokemon::new(
        ElementKind::Electric,
        "Pikachu",
        "Stores electricity in its cheek pouches.",
        25,
        0.4,
        6.0,
        None,
    );

    for pokemon in [charmander, charizard, pikachu] {
        let summary = pokemon.summary();
        if dex.add(pokemon) {
            println!("Registered {}", summary);
        } else {
            println!("Already registered: {}", summary);
        }
    }
    println!();

    // Example 3: searches
    println!("Search \"char\":");
    for pokemon in dex.find_by_name("char") {
        println!("  {}", pokemon.summary());
    }
    println!("Search type Flying:");
    for pokemon in dex.find_by_type("Flying") {
        println!("  {}", pokemon.summary());
    }
    println!();

    // Example 4: the report
    print!("{}", dex.report());
    println!();

    // Example 5: trainers referencing cataloged Pokemon
    let mut trainers = TrainerRegistry::new(
        Box::new(TrainerFileStore::new("data/trainers.json")),
        &dex,
    );

    let mut ash = Trainer::new("Ash", 10);
    if let Some(pikachu) = dex.find_by_number(25) {
        ash.add_pokemon(pikachu, 12);
    }
    if let Some(charizard) = dex.find_by_number(6) {
        ash.add_pokemon(charizard, 36);
    }

    if trainers.add(ash) {
        println!("Registered trainer Ash");
    } else {
        println!("Trainer Ash already registered");
    }

    if let Some(ash) = trainers.find_by_name("ash") {
        print!("{}", ash.details(&dex));
    }
}
