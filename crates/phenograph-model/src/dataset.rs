//! Curated character-matrix datasets (translator input).
//!
//! These types are read-only to the translator. Ontology references are
//! carried as [`Term`]s; the matrix refers to taxa, characters and states by
//! zero-based position.

use serde::{Deserialize, Serialize};

/// Reference to an ontology class (entity, quality, unit, taxon name, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Term {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }

    /// The name if present, otherwise the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub curators: Option<String>,
    /// Publication id the matrix was curated from.
    pub publication: Option<String>,
    pub taxa: Vec<Taxon>,
    pub characters: Vec<Character>,
    pub matrix: Vec<MatrixCell>,
}

impl Dataset {
    /// State assigned to `taxon` for `character`, if any.
    ///
    /// Cells pointing outside the dataset resolve to nothing.
    pub fn state_for(&self, taxon: usize, character: usize) -> Option<(usize, &State)> {
        let cell = self
            .matrix
            .iter()
            .find(|c| c.taxon == taxon && c.character == character)?;
        let state = self.characters.get(character)?.states.get(cell.state)?;
        Some((cell.state, state))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxon {
    pub valid_name: Option<Term>,
    /// Name as spelled in the publication.
    pub publication_name: Option<String>,
    pub comment: Option<String>,
    pub specimens: Vec<Specimen>,
}

impl Taxon {
    /// The valid name when it carries a non-blank name.
    pub fn named_valid_name(&self) -> Option<&Term> {
        self.valid_name
            .as_ref()
            .filter(|t| t.name.as_deref().is_some_and(|n| !n.trim().is_empty()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Specimen {
    pub collection_code: Option<Term>,
    pub catalog_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    pub label: Option<String>,
    pub comment: Option<String>,
    pub states: Vec<State>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    pub label: Option<String>,
    pub comment: Option<String>,
    pub phenotypes: Vec<Phenotype>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phenotype {
    pub entity: Option<Term>,
    pub quality: Option<Term>,
    pub related_entity: Option<Term>,
    pub unit: Option<Term>,
    pub measurement: Option<f32>,
    /// Free-text count; may hold qualifiers such as `">3"`.
    pub count: Option<String>,
    pub comment: Option<String>,
}

/// One filled cell of the taxon × character matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub taxon: usize,
    pub character: usize,
    pub state: usize,
}

/// `Some(trimmed-nonblank)` helper used for optional text fields.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
