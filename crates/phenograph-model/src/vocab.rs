//! Relation and type ids emitted into statement graphs.
//!
//! These are configuration constants, not behavior: consumers match on them
//! when loading a graph into a datastore.

// ============================================================================
// OBO relations
// ============================================================================

pub const INSTANCE_OF_REL_ID: &str = "OBO_REL:instance_of";
pub const IS_A_REL_ID: &str = "OBO_REL:is_a";
pub const INHERES_IN_REL_ID: &str = "OBO_REL:inheres_in";
pub const TOWARDS_REL_ID: &str = "OBO_REL:towards";
pub const CONNECTED_TO_REL_ID: &str = "OBO_REL:connected_to";
pub const ADJACENT_TO_REL_ID: &str = "OBO_REL:adjacent_to";
pub const ANTERIOR_TO_REL_ID: &str = "BSPO:0000096";
pub const POSTERIOR_TO_REL_ID: &str = "BSPO:0000099";

// ============================================================================
// Phenotype literals
// ============================================================================

pub const HAS_COUNT_REL_ID: &str = "PHENOSCAPE:has_count";
pub const HAS_MEASUREMENT_REL_ID: &str = "PHENOSCAPE:has_measurement";
pub const HAS_UNIT_REL_ID: &str = "PHENOSCAPE:has_unit";

// ============================================================================
// Dataset structure
// ============================================================================

pub const HAS_PUB_REL_ID: &str = "PHENOSCAPE:has_publication";
pub const HAS_CURATORS_REL_ID: &str = "PHENOSCAPE:has_curators";
pub const REFERS_TO_TAXON_REL_ID: &str = "PHENOSCAPE:has_taxon";
pub const HAS_TU_REL_ID: &str = "cdao:has_TU";
pub const HAS_CHARACTER_REL_ID: &str = "cdao:has_Character";
pub const HAS_STATE_REL_ID: &str = "cdao:has_Datum";
pub const HAS_PHENOTYPE_REL_ID: &str = "cdao:has_Phenotype";
pub const CELL_TO_STATE_REL_ID: &str = "cdao:has_State";
pub const HAS_COMMENT_REL_ID: &str = "PHENOSCAPE:has_comment";
pub const HAS_NUMBER_REL_ID: &str = "PHENOSCAPE:has_number";

// Specimens (Darwin Core)
pub const HAS_SPECIMEN_REL_ID: &str = "dwc:individualID";
pub const SPECIMEN_TO_COLLECTION_REL_ID: &str = "dwc:collectionID";
pub const SPECIMEN_TO_CATALOG_ID_REL_ID: &str = "dwc:catalogID";

// Annotations
pub const TAXON_PHENOTYPE_REL_ID: &str = "PHENOSCAPE:exhibits";
pub const POSITED_BY_REL_ID: &str = "posited_by";
pub const ANNOTATION_TO_OTU_REL_ID: &str = "PHENOSCAPE:asserted_for_otu";
pub const ANNOTATION_TO_CELL_REL_ID: &str = "PHENOSCAPE:has_source";

// ============================================================================
// Instance types
// ============================================================================

pub const DATASET_TYPE_ID: &str = "cdao:CharacterStateDataMatrix";
pub const PUBLICATION_TYPE_ID: &str = "PHENOSCAPE:Publication";
pub const OTU_TYPE_ID: &str = "cdao:TU";
pub const CHARACTER_TYPE_ID: &str = "cdao:Character";
pub const STATE_TYPE_ID: &str = "cdao:CharacterStateDomain";
pub const CELL_TYPE_ID: &str = "cdao:CharacterStateDatum";
pub const SPECIMEN_TYPE_ID: &str = "PHENOSCAPE:Specimen";

// ============================================================================
// Symmetric relational qualities (PATO)
// ============================================================================

pub const ARTICULATED_WITH: &str = "PATO:0002278";
pub const ASSOCIATED_WITH: &str = "PATO:0001668";
pub const ATTACHED_TO: &str = "PATO:0001667";
pub const DETACHED_FROM: &str = "PATO:0001453";
pub const DISSOCIATED_FROM: &str = "PATO:0001738";
pub const FUSED_WITH: &str = "PATO:0000642";
pub const IN_CONTACT_WITH: &str = "PATO:0001961";
pub const OVERLAP_WITH: &str = "PATO:0001590";
pub const SEPARATED_FROM: &str = "PATO:0001505";
pub const UNFUSED_FROM: &str = "PATO:0000651";
pub const STRUCTURE: &str = "PATO:0000141";

/// Qualities whose meaning is unchanged when entity and related entity swap.
pub const SYMMETRIC_QUALITIES: &[&str] = &[
    ARTICULATED_WITH,
    ASSOCIATED_WITH,
    ATTACHED_TO,
    DETACHED_FROM,
    DISSOCIATED_FROM,
    FUSED_WITH,
    IN_CONTACT_WITH,
    OVERLAP_WITH,
    SEPARATED_FROM,
    UNFUSED_FROM,
    STRUCTURE,
];
