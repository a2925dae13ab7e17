//! Recursive decomposition of ontology classes into compositional
//! descriptions.

use crate::ontology::OntologyReasoner;
use phenograph_model::{CompositionalDescription, Differentium};
use std::collections::HashMap;

pub const DEFAULT_MAX_DECOMPOSITION_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecompositionError {
    #[error("post-composed class {class_id} has no genus")]
    MissingGenus { class_id: String },
    #[error("class {class_id} is defined in terms of itself (via {})", .chain.join(" -> "))]
    Cycle { class_id: String, chain: Vec<String> },
    #[error("decomposition of {class_id} exceeded depth {max_depth}")]
    DepthExceeded { class_id: String, max_depth: usize },
}

/// Turns class ids into [`CompositionalDescription`]s.
///
/// Results are memoized by class id for the lifetime of the decomposer, so
/// shared sub-terms are only resolved once per translation call.
pub struct OntologyClassDecomposer<'r> {
    reasoner: &'r dyn OntologyReasoner,
    max_depth: usize,
    memo: HashMap<String, CompositionalDescription>,
    in_progress: Vec<String>,
}

impl<'r> OntologyClassDecomposer<'r> {
    pub fn new(reasoner: &'r dyn OntologyReasoner) -> Self {
        Self::with_max_depth(reasoner, DEFAULT_MAX_DECOMPOSITION_DEPTH)
    }

    pub fn with_max_depth(reasoner: &'r dyn OntologyReasoner, max_depth: usize) -> Self {
        Self {
            reasoner,
            max_depth,
            memo: HashMap::new(),
            in_progress: Vec::new(),
        }
    }

    pub fn reasoner(&self) -> &'r dyn OntologyReasoner {
        self.reasoner
    }

    /// Number of distinct classes decomposed so far.
    pub fn memoized(&self) -> usize {
        self.memo.len()
    }

    pub fn decompose(
        &mut self,
        class_id: &str,
    ) -> Result<CompositionalDescription, DecompositionError> {
        if let Some(description) = self.memo.get(class_id) {
            return Ok(description.clone());
        }

        if !self.reasoner.is_post_composed(class_id) {
            let atom = CompositionalDescription::atom(class_id);
            self.memo.insert(class_id.to_string(), atom.clone());
            return Ok(atom);
        }

        if self.in_progress.iter().any(|c| c == class_id) {
            let mut chain = self.in_progress.clone();
            chain.push(class_id.to_string());
            return Err(DecompositionError::Cycle {
                class_id: class_id.to_string(),
                chain,
            });
        }
        if self.in_progress.len() >= self.max_depth {
            return Err(DecompositionError::DepthExceeded {
                class_id: class_id.to_string(),
                max_depth: self.max_depth,
            });
        }

        self.in_progress.push(class_id.to_string());
        let result = self.decompose_post_composed(class_id);
        self.in_progress.pop();

        let description = result?;
        self.memo.insert(class_id.to_string(), description.clone());
        Ok(description)
    }

    fn decompose_post_composed(
        &mut self,
        class_id: &str,
    ) -> Result<CompositionalDescription, DecompositionError> {
        let genus_id = self
            .reasoner
            .genus(class_id)
            .ok_or_else(|| DecompositionError::MissingGenus {
                class_id: class_id.to_string(),
            })?;
        let genus = self.decompose(&genus_id)?;

        let mut differentia = Vec::new();
        for (relation, filler) in self.reasoner.differentia(class_id) {
            let filler = self.decompose(&filler)?;
            differentia.push(Differentium::description(relation, filler));
        }

        tracing::trace!(class = class_id, genus = %genus_id, "decomposed post-composed class");
        Ok(CompositionalDescription::named_intersection(
            class_id,
            genus,
            differentia,
        ))
    }
}
