//! Dataset → statement graph translation.
//!
//! One call walks the dataset once, in stage order:
//!
//! 1. metadata (dataset, publication, curators)
//! 2. taxa (taxon classes, OTUs, specimens)
//! 3. characters, states and their phenotype descriptions
//! 4. the annotation matrix (taxon `exhibits` phenotype, per filled cell)
//!
//! All accumulators live in a per-call context, so a single
//! [`DatasetTranslator`] can be reused across datasets.

use crate::config::TranslatorConfig;
use crate::decompose::OntologyClassDecomposer;
use crate::error::Result;
use crate::ids::{IdMinter, InstanceKind};
use crate::ontology::OntologyReasoner;
use crate::phenotype::{synthesize_symmetric, PhenotypeTranslator};
use phenograph_model::dataset::non_blank;
use phenograph_model::vocab;
use phenograph_model::{AliasScope, Dataset, LinkStatement, Node, StatementGraph, Taxon};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

// ============================================================================
// Public API
// ============================================================================

/// Per-call counters. Skipped records show up here instead of as errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationReport {
    pub taxa: usize,
    pub taxa_skipped: usize,
    pub specimens: usize,
    pub specimens_skipped: usize,
    pub characters: usize,
    pub states: usize,
    pub phenotypes: usize,
    pub phenotypes_incomplete: usize,
    pub symmetric_mirrors: usize,
    pub annotations: usize,
    pub cells_skipped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub graph: StatementGraph,
    pub report: TranslationReport,
}

/// Translates curated [`Dataset`]s into [`StatementGraph`]s.
pub struct DatasetTranslator<'r> {
    reasoner: &'r dyn OntologyReasoner,
    config: TranslatorConfig,
}

impl<'r> DatasetTranslator<'r> {
    pub fn new(reasoner: &'r dyn OntologyReasoner) -> Self {
        Self::with_config(reasoner, TranslatorConfig::default())
    }

    pub fn with_config(reasoner: &'r dyn OntologyReasoner, config: TranslatorConfig) -> Self {
        Self { reasoner, config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn translate(&self, dataset: &Dataset) -> Result<StatementGraph> {
        Ok(self.translate_with_report(dataset)?.graph)
    }

    /// Translate `dataset`. A decomposition failure aborts the whole call.
    pub fn translate_with_report(&self, dataset: &Dataset) -> Result<Translation> {
        let mut context = TranslationContext::new(self.reasoner, &self.config, dataset);

        context.translate_metadata();
        context.translate_taxa();
        context.translate_characters()?;
        context.translate_matrix();

        let translation = context.finish();
        tracing::info!(
            nodes = translation.graph.node_count(),
            statements = translation.graph.statement_count(),
            phenotypes = translation.report.phenotypes,
            annotations = translation.report.annotations,
            "dataset translated"
        );
        Ok(translation)
    }
}

// ============================================================================
// Per-call context
// ============================================================================

struct TranslatedTaxon {
    taxon_id: String,
    otu_id: String,
}

struct TranslatedState {
    state_id: String,
    descriptions: Vec<String>,
}

struct TranslationContext<'a, 'r> {
    dataset: &'a Dataset,
    config: &'a TranslatorConfig,
    phenotypes: PhenotypeTranslator<'r>,
    ids: IdMinter,
    graph: StatementGraph,
    report: TranslationReport,
    dataset_id: String,
    /// Keyed by taxon position.
    taxa: BTreeMap<usize, TranslatedTaxon>,
    /// Keyed by (character position, state position).
    states: HashMap<(usize, usize), TranslatedState>,
}

impl<'a, 'r> TranslationContext<'a, 'r> {
    fn new(
        reasoner: &'r dyn OntologyReasoner,
        config: &'a TranslatorConfig,
        dataset: &'a Dataset,
    ) -> Self {
        let decomposer =
            OntologyClassDecomposer::with_max_depth(reasoner, config.max_decomposition_depth);
        let mut ids = IdMinter::new(config.instance_ids.clone());
        let dataset_id = ids.mint(InstanceKind::Dataset);
        Self {
            dataset,
            config,
            phenotypes: PhenotypeTranslator::new(decomposer).with_labels(config.label_descriptions),
            ids,
            graph: StatementGraph::new(),
            report: TranslationReport::default(),
            dataset_id,
            taxa: BTreeMap::new(),
            states: HashMap::new(),
        }
    }

    fn finish(self) -> Translation {
        Translation {
            graph: self.graph,
            report: self.report,
        }
    }

    /// Instance node plus its `instance_of` link.
    fn add_instance(&mut self, id: &str, type_id: &str, label: Option<&str>) {
        let mut node = Node::instance(id).with_source(self.config.source_id.clone());
        if let Some(label) = label {
            node = node.with_label(label);
        }
        self.graph.add_node(node);
        self.graph.add_link(id, vocab::INSTANCE_OF_REL_ID, type_id);
    }

    fn add_comment(&mut self, subject: &str, comment: Option<&str>) {
        if let Some(comment) = non_blank(comment) {
            self.graph
                .add_literal(subject, vocab::HAS_COMMENT_REL_ID, comment);
        }
    }

    // ==================== Stage 1: metadata ====================

    fn translate_metadata(&mut self) {
        let dataset = self.dataset;
        let dataset_id = self.dataset_id.clone();
        self.add_instance(&dataset_id, vocab::DATASET_TYPE_ID, None);

        if let Some(publication) = non_blank(dataset.publication.as_deref()) {
            self.add_instance(publication, vocab::PUBLICATION_TYPE_ID, None);
            self.graph
                .add_link(&dataset_id, vocab::HAS_PUB_REL_ID, publication);
        }
        if let Some(curators) = &dataset.curators {
            self.graph
                .add_literal(&dataset_id, vocab::HAS_CURATORS_REL_ID, curators.as_str());
        }
    }

    // ==================== Stage 2: taxa ====================

    fn translate_taxa(&mut self) {
        let dataset = self.dataset;
        for (index, taxon) in dataset.taxa.iter().enumerate() {
            let Some(valid_name) = taxon.named_valid_name() else {
                tracing::debug!(taxon = index, "taxon without a valid name skipped");
                self.report.taxa_skipped += 1;
                continue;
            };
            let name = valid_name.display_name();

            self.graph
                .add_node(Node::class(valid_name.id.as_str()).with_label(name));

            let publication_name = non_blank(taxon.publication_name.as_deref());
            let otu_id = self.ids.mint(InstanceKind::Otu);
            self.add_instance(&otu_id, vocab::OTU_TYPE_ID, Some(publication_name.unwrap_or(name)));
            if let Some(publication_name) = publication_name.filter(|p| *p != name) {
                tracing::trace!(otu = %otu_id, publication_name, valid_name = name, "OTU alias");
                self.graph.add_alias(&otu_id, name, AliasScope::Related);
            }

            self.graph
                .add_link(&self.dataset_id, vocab::HAS_TU_REL_ID, &otu_id);
            self.graph
                .add_link(&otu_id, vocab::REFERS_TO_TAXON_REL_ID, &valid_name.id);
            self.add_comment(&otu_id, taxon.comment.as_deref());
            self.translate_specimens(&otu_id, taxon);

            self.taxa.insert(
                index,
                TranslatedTaxon {
                    taxon_id: valid_name.id.clone(),
                    otu_id,
                },
            );
            self.report.taxa += 1;
        }
    }

    fn translate_specimens(&mut self, otu_id: &str, taxon: &Taxon) {
        for specimen in &taxon.specimens {
            let (Some(collection), Some(catalog_id)) = (
                specimen.collection_code.as_ref(),
                non_blank(specimen.catalog_id.as_deref()),
            ) else {
                tracing::warn!(otu = %otu_id, "specimen without collection code or catalog id dropped");
                self.report.specimens_skipped += 1;
                continue;
            };

            let specimen_id = self.ids.mint(InstanceKind::Specimen);
            self.add_instance(&specimen_id, vocab::SPECIMEN_TYPE_ID, None);
            self.graph
                .add_link(otu_id, vocab::HAS_SPECIMEN_REL_ID, &specimen_id);
            self.graph.add_link(
                &specimen_id,
                vocab::SPECIMEN_TO_COLLECTION_REL_ID,
                &collection.id,
            );
            self.graph.add_literal(
                &specimen_id,
                vocab::SPECIMEN_TO_CATALOG_ID_REL_ID,
                catalog_id,
            );
            self.report.specimens += 1;
        }
    }

    // ==================== Stage 3: characters ====================

    fn translate_characters(&mut self) -> Result<()> {
        let dataset = self.dataset;
        for (char_index, character) in dataset.characters.iter().enumerate() {
            let character_id = self.ids.mint(InstanceKind::Character);
            self.add_instance(
                &character_id,
                vocab::CHARACTER_TYPE_ID,
                non_blank(character.label.as_deref()),
            );
            self.graph
                .add_link(&self.dataset_id, vocab::HAS_CHARACTER_REL_ID, &character_id);
            self.graph.add_literal(
                &character_id,
                vocab::HAS_NUMBER_REL_ID,
                (char_index + 1).to_string(),
            );
            self.add_comment(&character_id, character.comment.as_deref());
            self.report.characters += 1;

            for (state_index, state) in character.states.iter().enumerate() {
                let state_id = self.ids.mint(InstanceKind::State);
                self.add_instance(&state_id, vocab::STATE_TYPE_ID, non_blank(state.label.as_deref()));
                self.graph
                    .add_link(&character_id, vocab::HAS_STATE_REL_ID, &state_id);
                self.add_comment(&state_id, state.comment.as_deref());
                self.report.states += 1;

                let mirrors =
                    synthesize_symmetric(&state.phenotypes, |q| self.config.is_symmetric(q));
                self.report.symmetric_mirrors += mirrors.len();

                let mut descriptions = Vec::new();
                for phenotype in state.phenotypes.iter().chain(&mirrors) {
                    match self.phenotypes.translate(phenotype, &mut self.graph)? {
                        Some(description) => {
                            self.graph.add_link(
                                &state_id,
                                vocab::HAS_PHENOTYPE_REL_ID,
                                description.id(),
                            );
                            descriptions.push(description.id().to_string());
                            self.report.phenotypes += 1;
                        }
                        None => self.report.phenotypes_incomplete += 1,
                    }
                }

                self.states.insert(
                    (char_index, state_index),
                    TranslatedState {
                        state_id,
                        descriptions,
                    },
                );
            }
        }
        tracing::debug!(
            characters = self.report.characters,
            states = self.report.states,
            phenotypes = self.report.phenotypes,
            "characters translated"
        );
        Ok(())
    }

    // ==================== Stage 4: annotation matrix ====================

    fn translate_matrix(&mut self) {
        let dataset = self.dataset;
        for cell in &dataset.matrix {
            let resolves = dataset.taxa.get(cell.taxon).is_some()
                && dataset
                    .characters
                    .get(cell.character)
                    .is_some_and(|c| cell.state < c.states.len());
            if !resolves {
                tracing::warn!(
                    taxon = cell.taxon,
                    character = cell.character,
                    state = cell.state,
                    "matrix cell out of range"
                );
                self.report.cells_skipped += 1;
            }
        }

        for taxon_index in 0..dataset.taxa.len() {
            let Some(taxon) = self.taxa.get(&taxon_index) else {
                continue;
            };
            let taxon_id = taxon.taxon_id.clone();
            let otu_id = taxon.otu_id.clone();

            for char_index in 0..dataset.characters.len() {
                let Some((state_index, _)) = dataset.state_for(taxon_index, char_index) else {
                    continue;
                };
                let Some(state) = self.states.get(&(char_index, state_index)) else {
                    continue;
                };
                let state_id = state.state_id.clone();
                let descriptions = state.descriptions.clone();

                for description_id in descriptions {
                    let cell_id = self.ids.mint(InstanceKind::Cell);
                    self.add_instance(&cell_id, vocab::CELL_TYPE_ID, None);
                    self.graph
                        .add_link(&cell_id, vocab::CELL_TO_STATE_REL_ID, &state_id);
                    self.graph.add_statement(
                        LinkStatement::new(
                            taxon_id.as_str(),
                            vocab::TAXON_PHENOTYPE_REL_ID,
                            description_id,
                        )
                        .with_sublink(vocab::POSITED_BY_REL_ID, self.dataset_id.as_str())
                        .with_sublink(vocab::ANNOTATION_TO_OTU_REL_ID, otu_id.as_str())
                        .with_sublink(vocab::ANNOTATION_TO_CELL_REL_ID, cell_id),
                    );
                    self.report.annotations += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::{InMemoryOntology, OntologyClass};
    use phenograph_model::{
        Character, MatrixCell, Metatype, Phenotype, Specimen, State, Statement, Term,
    };

    const DANIO: &str = "TTO:1001979";
    const FIN: &str = "ZFA:0001393";
    const BONE: &str = "ZFA:0001514";
    const ROUND: &str = "PATO:0000411";

    fn ontology() -> InMemoryOntology {
        InMemoryOntology::from_classes([
            OntologyClass::new(FIN).named("fin").with_parent("ZFA:0000496"),
            OntologyClass::new(BONE).named("bone element").with_parent("ZFA:0001630"),
            OntologyClass::new(ROUND).named("round").with_parent("PATO:0000052"),
        ])
    }

    fn sequential() -> TranslatorConfig {
        TranslatorConfig::default().with_sequential_ids("t:")
    }

    fn phenotype(entity: &str, quality: &str, related: Option<&str>) -> Phenotype {
        Phenotype {
            entity: Some(Term::new(entity)),
            quality: Some(Term::new(quality)),
            related_entity: related.map(Term::new),
            ..Default::default()
        }
    }

    fn single_state_dataset(taxon: Taxon, phenotypes: Vec<Phenotype>) -> Dataset {
        Dataset {
            taxa: vec![taxon],
            characters: vec![Character {
                label: Some("fin shape".into()),
                states: vec![State {
                    label: Some("present".into()),
                    phenotypes,
                    ..Default::default()
                }],
                ..Default::default()
            }],
            matrix: vec![MatrixCell {
                taxon: 0,
                character: 0,
                state: 0,
            }],
            ..Default::default()
        }
    }

    fn danio() -> Taxon {
        Taxon {
            valid_name: Some(Term::named(DANIO, "Danio rerio")),
            ..Default::default()
        }
    }

    fn annotations(graph: &StatementGraph) -> Vec<&LinkStatement> {
        graph
            .links_with_relation(vocab::TAXON_PHENOTYPE_REL_ID)
            .collect()
    }

    #[test]
    fn danio_rerio_single_annotation() {
        let ontology = ontology();
        let translator = DatasetTranslator::with_config(&ontology, sequential());
        let dataset = single_state_dataset(danio(), vec![phenotype(FIN, ROUND, None)]);
        let Translation { graph, report } = translator.translate_with_report(&dataset).unwrap();

        let dataset_id = "t:dataset-1";
        assert_eq!(
            graph.objects(dataset_id, vocab::INSTANCE_OF_REL_ID),
            vec![vocab::DATASET_TYPE_ID]
        );
        assert!(graph.literal_values(dataset_id, vocab::HAS_CURATORS_REL_ID).is_empty());
        assert!(graph.objects(dataset_id, vocab::HAS_PUB_REL_ID).is_empty());

        let otus = graph.objects(dataset_id, vocab::HAS_TU_REL_ID);
        assert_eq!(otus, vec!["t:otu-1"]);
        assert_eq!(graph.node("t:otu-1").unwrap().label.as_deref(), Some("Danio rerio"));
        assert_eq!(graph.objects("t:otu-1", vocab::REFERS_TO_TAXON_REL_ID), vec![DANIO]);
        assert_eq!(graph.node(DANIO).unwrap().metatype, Metatype::Class);
        assert_eq!(graph.aliases().count(), 0);

        assert_eq!(
            graph.objects(dataset_id, vocab::HAS_CHARACTER_REL_ID),
            vec!["t:character-1"]
        );
        assert_eq!(
            graph.literal_values("t:character-1", vocab::HAS_NUMBER_REL_ID),
            vec!["1"]
        );
        assert_eq!(
            graph.objects("t:character-1", vocab::HAS_STATE_REL_ID),
            vec!["t:state-1"]
        );

        let phenotypes = graph.objects("t:state-1", vocab::HAS_PHENOTYPE_REL_ID);
        assert_eq!(phenotypes.len(), 1);
        let description_id = phenotypes[0];
        assert!(description_id.starts_with("cdsha256:"));
        assert_eq!(graph.objects(description_id, vocab::IS_A_REL_ID), vec![ROUND]);
        assert_eq!(graph.objects(description_id, vocab::INHERES_IN_REL_ID), vec![FIN]);

        let annotations = annotations(&graph);
        assert_eq!(annotations.len(), 1);
        let annotation = annotations[0];
        assert_eq!(annotation.subject, DANIO);
        assert_eq!(annotation.object, description_id);
        assert_eq!(annotation.sublink_target(vocab::POSITED_BY_REL_ID), Some(dataset_id));
        assert_eq!(annotation.sublink_target(vocab::ANNOTATION_TO_OTU_REL_ID), Some("t:otu-1"));
        let cell = annotation.sublink_target(vocab::ANNOTATION_TO_CELL_REL_ID).unwrap();
        assert_eq!(cell, "t:cell-1");
        assert_eq!(graph.objects(cell, vocab::CELL_TO_STATE_REL_ID), vec!["t:state-1"]);
        assert_eq!(graph.objects(cell, vocab::INSTANCE_OF_REL_ID), vec![vocab::CELL_TYPE_ID]);

        assert_eq!(
            report,
            TranslationReport {
                taxa: 1,
                characters: 1,
                states: 1,
                phenotypes: 1,
                annotations: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn empty_valid_name_excludes_taxon_everywhere() {
        let ontology = ontology();
        let translator = DatasetTranslator::with_config(&ontology, sequential());
        let taxon = Taxon {
            valid_name: Some(Term::named(DANIO, "")),
            ..Default::default()
        };
        let dataset = single_state_dataset(taxon, vec![phenotype(FIN, ROUND, None)]);
        let Translation { graph, report } = translator.translate_with_report(&dataset).unwrap();

        assert!(graph.objects("t:dataset-1", vocab::HAS_TU_REL_ID).is_empty());
        assert!(!graph.contains_node(DANIO));
        assert!(annotations(&graph).is_empty());
        assert!(graph.links_with_relation(vocab::CELL_TO_STATE_REL_ID).next().is_none());
        // the phenotype itself is still described
        assert_eq!(graph.objects("t:state-1", vocab::HAS_PHENOTYPE_REL_ID).len(), 1);
        assert_eq!(report.taxa_skipped, 1);
        assert_eq!(report.annotations, 0);
    }

    #[test]
    fn articulated_with_is_mirrored() {
        let ontology = ontology();
        let translator = DatasetTranslator::with_config(&ontology, sequential());
        let dataset = single_state_dataset(
            danio(),
            vec![phenotype(FIN, vocab::ARTICULATED_WITH, Some(BONE))],
        );
        let Translation { graph, report } = translator.translate_with_report(&dataset).unwrap();

        let phenotypes = graph.objects("t:state-1", vocab::HAS_PHENOTYPE_REL_ID);
        assert_eq!(phenotypes.len(), 2);
        let mut pairs: Vec<(Vec<&str>, Vec<&str>)> = phenotypes
            .iter()
            .map(|id| {
                assert_eq!(graph.objects(id, vocab::IS_A_REL_ID), vec![vocab::ARTICULATED_WITH]);
                (
                    graph.objects(id, vocab::INHERES_IN_REL_ID),
                    graph.objects(id, vocab::TOWARDS_REL_ID),
                )
            })
            .collect();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![(vec![FIN], vec![BONE]), (vec![BONE], vec![FIN])]
        );
        assert_eq!(report.symmetric_mirrors, 1);
        assert_eq!(report.annotations, 2);
    }

    #[test]
    fn mirroring_follows_configured_qualities() {
        let ontology = ontology();
        let config = TranslatorConfig {
            symmetric_qualities: Default::default(),
            ..sequential()
        };
        let translator = DatasetTranslator::with_config(&ontology, config);
        let dataset = single_state_dataset(
            danio(),
            vec![phenotype(FIN, vocab::ARTICULATED_WITH, Some(BONE))],
        );
        let Translation { graph, report } = translator.translate_with_report(&dataset).unwrap();

        assert_eq!(report.symmetric_mirrors, 0);
        assert_eq!(graph.objects("t:state-1", vocab::HAS_PHENOTYPE_REL_ID).len(), 1);
    }

    #[test]
    fn publication_curators_and_otu_alias() {
        let ontology = ontology();
        let translator = DatasetTranslator::with_config(&ontology, sequential());
        let taxon = Taxon {
            publication_name: Some("Brachydanio rerio".into()),
            comment: Some("juvenile".into()),
            ..danio()
        };
        let dataset = Dataset {
            curators: Some("Mabee".into()),
            publication: Some("PMID:1234".into()),
            ..single_state_dataset(taxon, vec![])
        };
        let graph = translator.translate(&dataset).unwrap();

        assert_eq!(graph.objects("t:dataset-1", vocab::HAS_PUB_REL_ID), vec!["PMID:1234"]);
        assert_eq!(
            graph.objects("PMID:1234", vocab::INSTANCE_OF_REL_ID),
            vec![vocab::PUBLICATION_TYPE_ID]
        );
        assert_eq!(
            graph.literal_values("t:dataset-1", vocab::HAS_CURATORS_REL_ID),
            vec!["Mabee"]
        );
        assert_eq!(
            graph.node("t:otu-1").unwrap().label.as_deref(),
            Some("Brachydanio rerio")
        );
        let aliases: Vec<_> = graph.aliases().collect();
        assert_eq!(aliases.len(), 1);
        assert_eq!(aliases[0].alias, "Danio rerio");
        assert_eq!(aliases[0].scope, AliasScope::Related);
        assert_eq!(
            graph.literal_values("t:otu-1", vocab::HAS_COMMENT_REL_ID),
            vec!["juvenile"]
        );
    }

    #[test]
    fn specimens_need_collection_and_catalog_id() {
        let ontology = ontology();
        let translator = DatasetTranslator::with_config(&ontology, sequential());
        let taxon = Taxon {
            specimens: vec![
                Specimen {
                    collection_code: Some(Term::named("COLL:UMMZ", "UMMZ")),
                    catalog_id: Some("12345".into()),
                },
                Specimen {
                    collection_code: Some(Term::new("COLL:FMNH")),
                    catalog_id: Some(" ".into()),
                },
                Specimen {
                    collection_code: None,
                    catalog_id: Some("999".into()),
                },
            ],
            ..danio()
        };
        let Translation { graph, report } = translator
            .translate_with_report(&single_state_dataset(taxon, vec![]))
            .unwrap();

        assert_eq!(graph.objects("t:otu-1", vocab::HAS_SPECIMEN_REL_ID), vec!["t:specimen-1"]);
        assert_eq!(
            graph.objects("t:specimen-1", vocab::SPECIMEN_TO_COLLECTION_REL_ID),
            vec!["COLL:UMMZ"]
        );
        assert_eq!(
            graph.literal_values("t:specimen-1", vocab::SPECIMEN_TO_CATALOG_ID_REL_ID),
            vec!["12345"]
        );
        assert_eq!(report.specimens, 1);
        assert_eq!(report.specimens_skipped, 2);
    }

    #[test]
    fn unassigned_and_out_of_range_cells_are_skipped() {
        let ontology = ontology();
        let translator = DatasetTranslator::with_config(&ontology, sequential());
        let mut dataset = single_state_dataset(danio(), vec![phenotype(FIN, ROUND, None)]);
        dataset.matrix = vec![MatrixCell {
            taxon: 0,
            character: 0,
            state: 7,
        }];
        let Translation { graph, report } = translator.translate_with_report(&dataset).unwrap();
        assert!(annotations(&graph).is_empty());
        assert_eq!(report.cells_skipped, 1);

        dataset.matrix.clear();
        let Translation { graph, report } = translator.translate_with_report(&dataset).unwrap();
        assert!(annotations(&graph).is_empty());
        assert_eq!(report.cells_skipped, 0);
    }

    #[test]
    fn incomplete_phenotypes_are_counted_not_linked() {
        let ontology = ontology();
        let translator = DatasetTranslator::with_config(&ontology, sequential());
        let mut incomplete = phenotype(FIN, ROUND, None);
        incomplete.quality = None;
        let Translation { graph, report } = translator
            .translate_with_report(&single_state_dataset(danio(), vec![incomplete]))
            .unwrap();
        assert!(graph.objects("t:state-1", vocab::HAS_PHENOTYPE_REL_ID).is_empty());
        assert_eq!(report.phenotypes_incomplete, 1);
        assert_eq!(report.annotations, 0);
    }

    #[test]
    fn decomposition_failure_aborts() {
        let ontology = InMemoryOntology::from_classes([OntologyClass::new("X:loop")
            .with_genus("X:loop")]);
        let translator = DatasetTranslator::with_config(&ontology, sequential());
        let dataset = single_state_dataset(danio(), vec![phenotype(FIN, "X:loop", None)]);
        assert!(matches!(
            translator.translate(&dataset),
            Err(crate::TranslateError::Decomposition(_))
        ));
    }

    #[test]
    fn source_id_is_stamped_on_instances_only() {
        let ontology = ontology();
        let config = TranslatorConfig {
            source_id: Some("phenoscape".into()),
            ..sequential()
        };
        let translator = DatasetTranslator::with_config(&ontology, config);
        let graph = translator
            .translate(&single_state_dataset(danio(), vec![phenotype(FIN, ROUND, None)]))
            .unwrap();
        for node in graph.nodes() {
            match node.metatype {
                Metatype::Instance => assert_eq!(node.source_id.as_deref(), Some("phenoscape")),
                Metatype::Class => assert_eq!(node.source_id, None),
            }
        }
    }

    #[test]
    fn rerun_with_sequential_ids_is_identical() {
        let ontology = ontology();
        let translator = DatasetTranslator::with_config(&ontology, sequential());
        let dataset = single_state_dataset(
            danio(),
            vec![phenotype(FIN, vocab::ARTICULATED_WITH, Some(BONE))],
        );
        let first = translator.translate(&dataset).unwrap();
        let second = translator.translate(&dataset).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rerun_with_random_ids_keeps_description_ids() {
        let ontology = ontology();
        let translator = DatasetTranslator::new(&ontology);
        let dataset = single_state_dataset(danio(), vec![phenotype(FIN, ROUND, None)]);
        let first = translator.translate(&dataset).unwrap();
        let second = translator.translate(&dataset).unwrap();

        let descriptions = |graph: &StatementGraph| -> Vec<String> {
            graph
                .links_with_relation(vocab::HAS_PHENOTYPE_REL_ID)
                .map(|l| l.object.clone())
                .collect()
        };
        assert_eq!(descriptions(&first), descriptions(&second));
        assert_eq!(first.statement_count(), second.statement_count());
        assert_eq!(first.node_count(), second.node_count());
        assert!(first
            .statements()
            .any(|s| matches!(s, Statement::Link(l) if l.relation == vocab::TAXON_PHENOTYPE_REL_ID)));
    }
}
