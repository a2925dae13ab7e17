//! Character-matrix ingestion for Phenograph.
//!
//! Turns curated phylogenetic character matrices ([`phenograph_model::Dataset`])
//! into statement graphs:
//!
//! - [`ontology`]: the reasoner seam plus an in-memory ontology (JSON / OBO)
//! - [`decompose`]: post-composed classes → compositional descriptions
//! - [`phenotype`]: EQ phenotypes → content-addressed descriptions
//! - [`bridge`]: the dataset pipeline (metadata, taxa, characters, matrix)
//!
//! Ontology lookups are trusted; dataset records are not. Records that do not
//! meet the minimum shape are skipped and counted, never fatal.

pub mod bridge;
pub mod config;
pub mod decompose;
pub mod error;
pub mod ids;
pub mod ontology;
pub mod phenotype;

pub use bridge::{DatasetTranslator, Translation, TranslationReport};
pub use config::{ConfigError, InstanceIdScheme, TranslatorConfig};
pub use decompose::{DecompositionError, OntologyClassDecomposer, DEFAULT_MAX_DECOMPOSITION_DEPTH};
pub use error::TranslateError;
pub use ids::{IdMinter, InstanceKind};
pub use ontology::{InMemoryOntology, OntologyClass, OntologyError, OntologyReasoner};
pub use phenotype::{synthesize_symmetric, Incomplete, PhenotypeTranslator};
