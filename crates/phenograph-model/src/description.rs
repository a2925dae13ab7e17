//! Compositional descriptions (genus + differentia expressions).
//!
//! A description is either an atom referencing an existing class, or an
//! intersection of a genus with zero or more `(relation, argument)`
//! differentia. Intersections built from post-composed ontology classes keep
//! the ontology id; freshly synthesized ones (phenotypes) get a content id
//! from [`crate::digest::description_id_v1`], so structurally identical
//! descriptions collapse to one graph node.

use crate::digest::{description_id_v1, literal_token};
use crate::graph::{LinkStatement, LiteralStatement, Node, StatementGraph};
use crate::vocab;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Argument {
    Description(CompositionalDescription),
    Literal(String),
}

impl Argument {
    /// Token used in canonical forms and content ids.
    pub fn token(&self) -> String {
        match self {
            Argument::Description(description) => description.id().to_string(),
            Argument::Literal(value) => literal_token(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Differentium {
    pub relation: String,
    pub argument: Argument,
}

impl Differentium {
    pub fn description(relation: impl Into<String>, description: CompositionalDescription) -> Self {
        Self {
            relation: relation.into(),
            argument: Argument::Description(description),
        }
    }

    pub fn literal(relation: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            argument: Argument::Literal(value.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompositionalDescription {
    Atom {
        node_id: String,
    },
    Intersection {
        id: String,
        /// `true` when `id` was derived from content rather than taken from
        /// an ontology class.
        generated: bool,
        genus: Box<CompositionalDescription>,
        differentia: Vec<Differentium>,
    },
}

impl CompositionalDescription {
    pub fn atom(node_id: impl Into<String>) -> Self {
        CompositionalDescription::Atom {
            node_id: node_id.into(),
        }
    }

    /// An intersection that already has a stable ontology id.
    pub fn named_intersection(
        id: impl Into<String>,
        genus: CompositionalDescription,
        differentia: Vec<Differentium>,
    ) -> Self {
        CompositionalDescription::Intersection {
            id: id.into(),
            generated: false,
            genus: Box::new(genus),
            differentia,
        }
    }

    /// A freshly synthesized intersection; its id is derived from content.
    pub fn intersection(genus: CompositionalDescription, differentia: Vec<Differentium>) -> Self {
        let id = generate_id(&genus, &differentia);
        CompositionalDescription::Intersection {
            id,
            generated: true,
            genus: Box::new(genus),
            differentia,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            CompositionalDescription::Atom { node_id } => node_id,
            CompositionalDescription::Intersection { id, .. } => id,
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, CompositionalDescription::Atom { .. })
    }

    pub fn genus(&self) -> Option<&CompositionalDescription> {
        match self {
            CompositionalDescription::Atom { .. } => None,
            CompositionalDescription::Intersection { genus, .. } => Some(genus),
        }
    }

    pub fn differentia(&self) -> &[Differentium] {
        match self {
            CompositionalDescription::Atom { .. } => &[],
            CompositionalDescription::Intersection { differentia, .. } => differentia,
        }
    }

    /// Recompute the content id of this description, regardless of how its
    /// stored id was assigned. Atoms return their node id.
    pub fn generate_id(&self) -> String {
        match self {
            CompositionalDescription::Atom { node_id } => node_id.clone(),
            CompositionalDescription::Intersection {
                genus, differentia, ..
            } => generate_id(genus, differentia),
        }
    }

    /// Human-readable canonical expression, e.g.
    /// `PATO:0000411^OBO_REL:inheres_in(ZFA:0001393)`.
    ///
    /// Nested intersections render by id; differentia appear in canonical
    /// (sorted) order.
    pub fn canonical_form(&self) -> String {
        match self {
            CompositionalDescription::Atom { node_id } => node_id.clone(),
            CompositionalDescription::Intersection {
                genus, differentia, ..
            } => {
                let mut out = genus.id().to_string();
                for (relation, token) in canonical_pairs(differentia) {
                    out.push('^');
                    out.push_str(&relation);
                    out.push('(');
                    out.push_str(&token);
                    out.push(')');
                }
                out
            }
        }
    }

    /// Human-readable label such as `"round of fin, towards bone"`.
    ///
    /// `lookup` returns class labels; ids without a label render as the id.
    /// Intersections that already carry an ontology label are not expanded.
    pub fn simple_label(&self, lookup: &dyn Fn(&str) -> Option<String>) -> String {
        match self {
            CompositionalDescription::Atom { node_id } => {
                lookup(node_id).unwrap_or_else(|| node_id.clone())
            }
            CompositionalDescription::Intersection {
                id,
                generated,
                genus,
                differentia,
            } => {
                if !generated {
                    if let Some(label) = lookup(id) {
                        return label;
                    }
                }
                let parts: Vec<String> = differentia
                    .iter()
                    .map(|d| {
                        let target = match &d.argument {
                            Argument::Description(description) => description.simple_label(lookup),
                            Argument::Literal(value) => value.clone(),
                        };
                        format!("{} {}", relation_phrase(&d.relation), target)
                    })
                    .collect();
                let genus_label = genus.simple_label(lookup);
                if parts.is_empty() {
                    genus_label
                } else {
                    format!("{} {}", genus_label, parts.join(", "))
                }
            }
        }
    }

    /// Flatten this description into `graph`.
    ///
    /// Generated intersections become CLASS nodes (labelled when `label` is
    /// given); every intersection contributes an `is_a` link to its genus and
    /// one statement per differentium. Atoms and ontology-named intersections
    /// reference external ids and are not materialized as nodes.
    pub fn register(&self, graph: &mut StatementGraph, label: Option<String>) {
        let CompositionalDescription::Intersection {
            id,
            generated,
            genus,
            differentia,
        } = self
        else {
            return;
        };

        if *generated {
            let mut node = Node::class(id.clone());
            node.label = label;
            graph.add_node(node);
        }
        graph.add_statement(LinkStatement::intersection(
            id.clone(),
            vocab::IS_A_REL_ID,
            genus.id(),
        ));
        genus.register(graph, None);

        for differentium in differentia {
            match &differentium.argument {
                Argument::Description(description) => {
                    graph.add_statement(LinkStatement::intersection(
                        id.clone(),
                        differentium.relation.clone(),
                        description.id(),
                    ));
                    description.register(graph, None);
                }
                Argument::Literal(value) => {
                    graph.add_statement(LiteralStatement::new(
                        id.clone(),
                        differentium.relation.clone(),
                        value.clone(),
                    ));
                }
            }
        }
    }
}

fn canonical_pairs(differentia: &[Differentium]) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = differentia
        .iter()
        .map(|d| (d.relation.clone(), d.argument.token()))
        .collect();
    pairs.sort();
    pairs
}

fn generate_id(genus: &CompositionalDescription, differentia: &[Differentium]) -> String {
    let pairs = canonical_pairs(differentia);
    let borrowed: Vec<(&str, &str)> = pairs
        .iter()
        .map(|(r, t)| (r.as_str(), t.as_str()))
        .collect();
    description_id_v1(genus.id(), &borrowed)
}

/// How a differentia relation reads inside a generated label.
fn relation_phrase(relation: &str) -> &'static str {
    match relation {
        vocab::CONNECTED_TO_REL_ID | "connected_to" => "on",
        vocab::ANTERIOR_TO_REL_ID | "anterior_to" => "anterior to",
        vocab::POSTERIOR_TO_REL_ID | "posterior_to" => "posterior to",
        vocab::ADJACENT_TO_REL_ID | "adjacent_to" => "adjacent to",
        vocab::TOWARDS_REL_ID | "towards" => "towards",
        vocab::HAS_COUNT_REL_ID => "count",
        vocab::HAS_MEASUREMENT_REL_ID => "measuring",
        vocab::HAS_UNIT_REL_ID => "in",
        _ => "of",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Metatype;

    fn eq(quality: &str, entity: &str) -> CompositionalDescription {
        CompositionalDescription::intersection(
            CompositionalDescription::atom(quality),
            vec![Differentium::description(
                vocab::INHERES_IN_REL_ID,
                CompositionalDescription::atom(entity),
            )],
        )
    }

    #[test]
    fn atom_id_is_referenced_node() {
        let atom = CompositionalDescription::atom("ZFA:0000001");
        assert_eq!(atom.id(), "ZFA:0000001");
        assert_eq!(atom.generate_id(), "ZFA:0000001");
    }

    #[test]
    fn identical_content_yields_identical_id() {
        assert_eq!(eq("PATO:1", "ZFA:1").id(), eq("PATO:1", "ZFA:1").id());
        assert_ne!(eq("PATO:1", "ZFA:1").id(), eq("PATO:2", "ZFA:1").id());
        assert_ne!(eq("PATO:1", "ZFA:1").id(), eq("PATO:1", "ZFA:2").id());
    }

    #[test]
    fn named_intersection_keeps_ontology_id() {
        let named = CompositionalDescription::named_intersection(
            "ZFA:post1",
            CompositionalDescription::atom("ZFA:bone"),
            vec![],
        );
        assert_eq!(named.id(), "ZFA:post1");
        assert_ne!(named.generate_id(), "ZFA:post1");
    }

    #[test]
    fn canonical_form_sorts_differentia() {
        let description = CompositionalDescription::intersection(
            CompositionalDescription::atom("Q"),
            vec![
                Differentium::literal("r2", "3"),
                Differentium::description("r1", CompositionalDescription::atom("E")),
            ],
        );
        assert_eq!(description.canonical_form(), "Q^r1(E)^r2(\"3\")");
    }

    #[test]
    fn simple_label_uses_relation_phrases() {
        let description = CompositionalDescription::intersection(
            CompositionalDescription::atom("PATO:round"),
            vec![
                Differentium::description(
                    vocab::INHERES_IN_REL_ID,
                    CompositionalDescription::atom("ZFA:fin"),
                ),
                Differentium::description(
                    vocab::TOWARDS_REL_ID,
                    CompositionalDescription::atom("ZFA:bone"),
                ),
            ],
        );
        let lookup = |id: &str| match id {
            "PATO:round" => Some("round".to_string()),
            "ZFA:fin" => Some("fin".to_string()),
            _ => None,
        };
        assert_eq!(
            description.simple_label(&lookup),
            "round of fin, towards ZFA:bone"
        );
    }

    #[test]
    fn register_materializes_only_generated_intersections() {
        let post_composed = CompositionalDescription::named_intersection(
            "ZFA:post1",
            CompositionalDescription::atom("ZFA:bone"),
            vec![Differentium::description(
                "part_of",
                CompositionalDescription::atom("ZFA:fin"),
            )],
        );
        let phenotype = CompositionalDescription::intersection(
            CompositionalDescription::atom("PATO:1"),
            vec![
                Differentium::description(vocab::INHERES_IN_REL_ID, post_composed),
                Differentium::literal(vocab::HAS_COUNT_REL_ID, "2"),
            ],
        );

        let mut graph = StatementGraph::new();
        phenotype.register(&mut graph, Some("label".to_string()));

        assert_eq!(graph.node_count(), 1);
        let node = graph.node(phenotype.id()).unwrap();
        assert_eq!(node.metatype, Metatype::Class);
        assert_eq!(node.label.as_deref(), Some("label"));

        assert_eq!(graph.objects(phenotype.id(), vocab::IS_A_REL_ID), vec!["PATO:1"]);
        assert_eq!(
            graph.objects(phenotype.id(), vocab::INHERES_IN_REL_ID),
            vec!["ZFA:post1"]
        );
        assert_eq!(graph.objects("ZFA:post1", vocab::IS_A_REL_ID), vec!["ZFA:bone"]);
        assert_eq!(graph.objects("ZFA:post1", "part_of"), vec!["ZFA:fin"]);
        assert_eq!(
            graph.literal_values(phenotype.id(), vocab::HAS_COUNT_REL_ID),
            vec!["2"]
        );
        assert!(graph.links().all(|l| l.intersection));
        assert!(graph
            .dangling_references()
            .iter()
            .all(|id| !id.starts_with(crate::digest::DESCRIPTION_ID_V1_PREFIX)));
    }

    #[test]
    fn serializes_with_kind_tags() {
        let json = serde_json::to_value(eq("PATO:0000411", "ZFA:0001393")).unwrap();
        assert_eq!(json["kind"], "intersection");
        assert_eq!(json["generated"], true);
        assert_eq!(json["genus"]["kind"], "atom");
        assert_eq!(
            json["differentia"][0]["argument"]["description"]["node_id"],
            "ZFA:0001393"
        );
    }
}
