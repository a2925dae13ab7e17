//! Phenograph data model.
//!
//! - [`graph`]: statement graphs (nodes + structurally deduplicated statements)
//! - [`description`]: compositional (genus + differentia) descriptions
//! - [`digest`]: versioned content ids for synthesized descriptions
//! - [`dataset`]: the curated character-matrix input model
//! - [`vocab`]: relation and type ids emitted into graphs

pub mod dataset;
pub mod description;
pub mod digest;
pub mod graph;
pub mod vocab;

pub use dataset::{Character, Dataset, MatrixCell, Phenotype, Specimen, State, Taxon, Term};
pub use description::{Argument, CompositionalDescription, Differentium};
pub use graph::{
    AliasScope, GraphRecords, LinkStatement, LiteralStatement, Metatype, Node, NodeAlias,
    Statement, StatementGraph, SubLink,
};
