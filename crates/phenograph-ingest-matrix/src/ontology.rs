//! Ontology reasoning boundary.
//!
//! The translator only needs four questions answered about a class: is it
//! post-composed, what is its genus, what are its differentia, and does it
//! have parents. [`OntologyReasoner`] is that seam; callers with a real
//! reasoner implement it directly.
//!
//! [`InMemoryOntology`] is a small reasoner over explicitly listed classes,
//! loadable from JSON or from OBO flat-file stanzas. It also understands
//! inline post-composition ids such as
//! `ZFA:0000107^OBO_REL:part_of(ZFA:0001161)`, which curation tools emit for
//! terms that were never added to an ontology.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

// ============================================================================
// Reasoner trait
// ============================================================================

pub trait OntologyReasoner {
    /// `true` when the class is defined as genus + differentia.
    fn is_post_composed(&self, class_id: &str) -> bool;

    /// The single genus of a post-composed class.
    fn genus(&self, class_id: &str) -> Option<String>;

    /// `(relation id, filler class id)` pairs of a post-composed class.
    fn differentia(&self, class_id: &str) -> Vec<(String, String)>;

    /// `false` for dangling placeholder ids the ontology does not define.
    fn has_parents(&self, class_id: &str) -> bool;

    fn label(&self, _class_id: &str) -> Option<String> {
        None
    }
}

// ============================================================================
// Ontology types
// ============================================================================

/// JSON form of an ontology: `{ "classes": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ontology {
    pub classes: Vec<OntologyClass>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyClass {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub genus: Option<String>,
    #[serde(default)]
    pub differentia: Vec<DifferentiaLink>,
}

impl OntologyClass {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            parents: Vec::new(),
            genus: None,
            differentia: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parents.push(parent.into());
        self
    }

    pub fn with_genus(mut self, genus: impl Into<String>) -> Self {
        self.genus = Some(genus.into());
        self
    }

    pub fn with_differentium(
        mut self,
        relation: impl Into<String>,
        filler: impl Into<String>,
    ) -> Self {
        self.differentia.push(DifferentiaLink {
            relation: relation.into(),
            filler: filler.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferentiaLink {
    pub relation: String,
    pub filler: String,
}

#[derive(Debug, thiserror::Error)]
pub enum OntologyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Unsupported ontology format: {0}")]
    UnsupportedFormat(String),
}

// ============================================================================
// In-memory reasoner
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct InMemoryOntology {
    classes: HashMap<String, OntologyClass>,
}

impl InMemoryOntology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_classes(classes: impl IntoIterator<Item = OntologyClass>) -> Self {
        let mut ontology = Self::new();
        for class in classes {
            ontology.insert(class);
        }
        ontology
    }

    /// Insert a class, replacing any previous definition with the same id.
    pub fn insert(&mut self, class: OntologyClass) {
        self.classes.insert(class.id.clone(), class);
    }

    pub fn class(&self, id: &str) -> Option<&OntologyClass> {
        self.classes.get(id)
    }

    pub fn classes(&self) -> impl Iterator<Item = &OntologyClass> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn post_composed_count(&self) -> usize {
        self.classes.values().filter(|c| c.genus.is_some()).count()
    }

    /// Load from a file, picking the format from its extension
    /// (`.json` or `.obo`).
    pub fn from_path(path: &Path) -> Result<Self, OntologyError> {
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        let content = std::fs::read_to_string(path)?;
        match ext {
            "json" => Self::from_json_str(&content),
            "obo" => Self::parse_obo(&content),
            _ => Err(OntologyError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, OntologyError> {
        let ontology: Ontology = serde_json::from_str(content)?;
        for (index, class) in ontology.classes.iter().enumerate() {
            if class.id.trim().is_empty() {
                return Err(OntologyError::Parse {
                    line: index + 1,
                    message: "class with an empty id".to_string(),
                });
            }
        }
        Ok(Self::from_classes(ontology.classes))
    }

    /// Parse `[Term]` stanzas of an OBO flat file.
    ///
    /// Recognized tags: `id`, `name`, `is_a`, `intersection_of` (one genus
    /// line plus `relation filler` lines). Other stanzas and tags are ignored.
    pub fn parse_obo(content: &str) -> Result<Self, OntologyError> {
        let mut ontology = Self::new();
        let mut current: Option<OntologyClass> = None;
        let mut in_term = false;

        for (index, raw) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = strip_obo_trailer(raw).trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') {
                if let Some(class) = current.take() {
                    ontology.insert(class);
                }
                in_term = line == "[Term]";
                continue;
            }
            if !in_term {
                continue;
            }

            let Some((tag, value)) = line.split_once(':') else {
                return Err(OntologyError::Parse {
                    line: line_no,
                    message: format!("expected `tag: value`, got `{line}`"),
                });
            };
            let value = value.trim();

            if tag == "id" {
                if current.is_some() {
                    return Err(OntologyError::Parse {
                        line: line_no,
                        message: "duplicate id in stanza".to_string(),
                    });
                }
                current = Some(OntologyClass::new(value));
                continue;
            }

            let Some(class) = current.as_mut() else {
                return Err(OntologyError::Parse {
                    line: line_no,
                    message: format!("`{tag}` before `id`"),
                });
            };
            match tag {
                "name" => class.name = Some(value.to_string()),
                "is_a" => {
                    if let Some(parent) = value.split_whitespace().next() {
                        class.parents.push(parent.to_string());
                    }
                }
                "intersection_of" => {
                    let tokens: Vec<&str> = value.split_whitespace().collect();
                    match tokens.as_slice() {
                        [genus] => {
                            if class.genus.is_some() {
                                return Err(OntologyError::Parse {
                                    line: line_no,
                                    message: format!("{} has more than one genus", class.id),
                                });
                            }
                            class.genus = Some(genus.to_string());
                        }
                        [relation, filler] => {
                            class.differentia.push(DifferentiaLink {
                                relation: relation.to_string(),
                                filler: filler.to_string(),
                            });
                        }
                        _ => {
                            return Err(OntologyError::Parse {
                                line: line_no,
                                message: format!("malformed intersection_of: `{value}`"),
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        if let Some(class) = current.take() {
            ontology.insert(class);
        }
        Ok(ontology)
    }

    fn lookup(&self, class_id: &str) -> Option<OntologyClass> {
        match self.classes.get(class_id) {
            Some(class) => Some(class.clone()),
            None => parse_post_composition(class_id),
        }
    }
}

impl OntologyReasoner for InMemoryOntology {
    fn is_post_composed(&self, class_id: &str) -> bool {
        self.lookup(class_id).is_some_and(|c| c.genus.is_some())
    }

    fn genus(&self, class_id: &str) -> Option<String> {
        self.lookup(class_id)?.genus
    }

    fn differentia(&self, class_id: &str) -> Vec<(String, String)> {
        self.lookup(class_id)
            .map(|c| {
                c.differentia
                    .into_iter()
                    .map(|d| (d.relation, d.filler))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn has_parents(&self, class_id: &str) -> bool {
        self.lookup(class_id).is_some()
    }

    fn label(&self, class_id: &str) -> Option<String> {
        self.classes.get(class_id)?.name.clone()
    }
}

/// Drop OBO trailing comments (`! ...`) and qualifier blocks (`{...}`).
fn strip_obo_trailer(line: &str) -> &str {
    let mut end = line.len();
    let mut prev_ws = true;
    for (i, ch) in line.char_indices() {
        if ch == '!' && prev_ws {
            end = i;
            break;
        }
        prev_ws = ch.is_whitespace();
    }
    let line = line[..end].trim_end();
    if line.ends_with('}') {
        if let Some(pos) = line.rfind(" {") {
            return &line[..pos];
        }
    }
    line
}

/// Parse an inline post-composition id: `genus^rel(filler)^rel(filler)...`.
///
/// Fillers may themselves be post-compositions. Returns `None` for plain ids
/// and malformed expressions.
fn parse_post_composition(expr: &str) -> Option<OntologyClass> {
    let mut segments: Vec<&str> = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    for (i, ch) in expr.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            '^' if depth == 0 => {
                segments.push(&expr[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    segments.push(&expr[start..]);
    if segments.len() < 2 {
        return None;
    }

    let genus = segments[0];
    if genus.is_empty() || genus.contains('(') {
        return None;
    }
    let mut class = OntologyClass::new(expr).with_genus(genus);
    for segment in &segments[1..] {
        let open = segment.find('(')?;
        let filler = segment[open + 1..].strip_suffix(')')?;
        let relation = &segment[..open];
        if relation.is_empty() || filler.is_empty() {
            return None;
        }
        class = class.with_differentium(relation, filler);
    }
    Some(class)
}

// ============================================================================
// Tests
// ============================================================================
