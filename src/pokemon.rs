use crate::typing::{ElementKind, TypeInfo};
use serde::{Deserialize, Serialize};

/// A cataloged Pokemon.
///
/// The primary type is fixed by `kind` for the life of the value and is
/// always resolved from the static type table; only the secondary type is
/// free. Identity is the catalog number.
#[derive(Debug, Clone, PartialEq)]
pub struct Pokemon {
    kind: ElementKind,
    name: String,
    primary_type: TypeInfo,
    secondary_type: Option<TypeInfo>,
    description: String,
    number: u32,
    height: f32,
    weight: f32,
}

impl Pokemon {
    /// The single constructor for every kind: the tag picks the fixed
    /// primary type, callers cannot override it.
    pub fn new(
        kind: ElementKind,
        name: impl Into<String>,
        description: impl Into<String>,
        number: u32,
        height: f32,
        weight: f32,
        secondary_type: Option<TypeInfo>,
    ) -> Pokemon {
        Pokemon {
            primary_type: kind.type_info(),
            kind,
            name: name.into(),
            secondary_type,
            description: description.into(),
            number,
            height,
            weight,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Catalog number; the stable identity key within a pokedex.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Height in meters.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Weight in kilograms.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn primary_type(&self) -> &TypeInfo {
        &self.primary_type
    }

    pub fn secondary_type(&self) -> Option<&TypeInfo> {
        self.secondary_type.as_ref()
    }

    pub fn has_secondary_type(&self) -> bool {
        self.secondary_type.is_some()
    }

    /// Both types, primary first.
    pub fn types(&self) -> Vec<&TypeInfo> {
        let mut types = vec![&self.primary_type];
        if let Some(secondary) = &self.secondary_type {
            types.push(secondary);
        }
        types
    }

    /// One-line summary: `#6 - Charizard (Fire/Flying)`.
    pub fn summary(&self) -> String {
        let mut types = self.primary_type.name().to_string();
        if let Some(secondary) = &self.secondary_type {
            types.push('/');
            types.push_str(secondary.name());
        }
        format!("#{} - {} ({})", self.number, self.name, types)
    }

    /// Full multi-line dump.
    pub fn details(&self) -> String {
        let mut types = self.primary_type.name().to_string();
        if let Some(secondary) = &self.secondary_type {
            types.push_str(" / ");
            types.push_str(secondary.name());
        }

        let mut info = String::from("=== POKEMON ===\n");
        info.push_str(&format!("Name: {}\n", self.name));
        info.push_str(&format!("Number: #{}\n", self.number));
        info.push_str(&format!("Type(s): {}\n", types));
        info.push_str(&format!("Description: {}\n", self.description));
        info.push_str(&format!("Height: {}m\n", self.height));
        info.push_str(&format!("Weight: {}kg\n", self.weight));
        info
    }

    /// Snapshot for persistence, including the `classe` discriminator and
    /// both type definitions as plain data (not live references).
    pub fn to_record(&self) -> PokemonRecord {
        PokemonRecord {
            name: self.name.clone(),
            description: self.description.clone(),
            id: self.number,
            height: self.height,
            weight: self.weight,
            primary_type: TypeRecord::from(&self.primary_type),
            secondary_type: self.secondary_type.as_ref().map(TypeRecord::from),
            classe: self.kind.discriminator().to_string(),
        }
    }

    /// Rebuild from a persisted record. The primary type is re-derived from
    /// the kind's fixed definition, so a stale primary-type blob in the file
    /// is ignored; only the secondary type is honored from the record.
    /// `None` means the discriminator is unknown and the record should be
    /// skipped.
    pub fn from_record(record: &PokemonRecord) -> Option<Pokemon> {
        let kind = ElementKind::from_discriminator(&record.classe)?;
        let secondary_type = record.secondary_type.clone().map(TypeInfo::from);
        Some(Pokemon::new(
            kind,
            record.name.clone(),
            record.description.clone(),
            record.id,
            record.height,
            record.weight,
            secondary_type,
        ))
    }
}

/// Persisted form of a type definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub name: String,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub resistances: Vec<String>,
}

impl From<&TypeInfo> for TypeRecord {
    fn from(info: &TypeInfo) -> Self {
        TypeRecord {
            name: info.name().to_string(),
            weaknesses: info.weaknesses().to_vec(),
            resistances: info.resistances().to_vec(),
        }
    }
}

impl From<TypeRecord> for TypeInfo {
    fn from(record: TypeRecord) -> Self {
        TypeInfo::new(record.name, record.weaknesses, record.resistances)
    }
}

/// Persisted form of a Pokemon. One JSON object in the data file's array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub name: String,
    pub description: String,
    pub id: u32,
    pub height: f32,
    pub weight: f32,
    #[serde(rename = "primaryType")]
    pub primary_type: TypeRecord,
    #[serde(rename = "secondaryType", default, skip_serializing_if = "Option::is_none")]
    pub secondary_type: Option<TypeRecord>,
    pub classe: String,
}
