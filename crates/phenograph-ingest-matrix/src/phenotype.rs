//! Phenotype (EQ) descriptions and symmetric-phenotype synthesis.

use crate::decompose::OntologyClassDecomposer;
use crate::error::TranslateError;
use phenograph_model::vocab;
use phenograph_model::{CompositionalDescription, Differentium, Phenotype, StatementGraph};

/// Why a phenotype produced no description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incomplete {
    MissingEntity,
    MissingQuality,
    MeasurementWithoutUnit,
}

impl Incomplete {
    pub fn check(phenotype: &Phenotype) -> Option<Incomplete> {
        if phenotype.entity.is_none() {
            Some(Incomplete::MissingEntity)
        } else if phenotype.quality.is_none() {
            Some(Incomplete::MissingQuality)
        } else if phenotype.measurement.is_some() && phenotype.unit.is_none() {
            Some(Incomplete::MeasurementWithoutUnit)
        } else {
            None
        }
    }
}

/// Builds one [`CompositionalDescription`] per phenotype assertion:
///
/// ```text
/// quality ^ inheres_in(entity) ^ towards(related) ^ has_count("n")
///         ^ has_measurement("m") ^ has_unit("unit")
/// ```
pub struct PhenotypeTranslator<'r> {
    decomposer: OntologyClassDecomposer<'r>,
    label_descriptions: bool,
}

impl<'r> PhenotypeTranslator<'r> {
    pub fn new(decomposer: OntologyClassDecomposer<'r>) -> Self {
        Self {
            decomposer,
            label_descriptions: false,
        }
    }

    pub fn with_labels(mut self, label_descriptions: bool) -> Self {
        self.label_descriptions = label_descriptions;
        self
    }

    /// Translate one phenotype and register its statements in `graph`.
    ///
    /// Returns `Ok(None)` for incomplete phenotypes.
    pub fn translate(
        &mut self,
        phenotype: &Phenotype,
        graph: &mut StatementGraph,
    ) -> Result<Option<CompositionalDescription>, TranslateError> {
        if let Some(reason) = Incomplete::check(phenotype) {
            tracing::debug!(?reason, "phenotype not translated");
            return Ok(None);
        }
        let (Some(entity), Some(quality)) = (&phenotype.entity, &phenotype.quality) else {
            return Ok(None);
        };
        let reasoner = self.decomposer.reasoner();

        let genus = self.decomposer.decompose(&quality.id)?;
        let mut differentia = Vec::new();

        if reasoner.has_parents(&entity.id) {
            let entity = self.decomposer.decompose(&entity.id)?;
            differentia.push(Differentium::description(vocab::INHERES_IN_REL_ID, entity));
        }
        if let Some(related) = &phenotype.related_entity {
            let related = self.decomposer.decompose(&related.id)?;
            differentia.push(Differentium::description(vocab::TOWARDS_REL_ID, related));
        }
        if let Some(count) = phenotype.count.as_deref().filter(|c| !c.trim().is_empty()) {
            differentia.push(Differentium::literal(vocab::HAS_COUNT_REL_ID, count));
        }
        if let (Some(measurement), Some(unit)) = (phenotype.measurement, &phenotype.unit) {
            differentia.push(Differentium::literal(
                vocab::HAS_MEASUREMENT_REL_ID,
                format_measurement(measurement),
            ));
            differentia.push(Differentium::literal(
                vocab::HAS_UNIT_REL_ID,
                unit.display_name(),
            ));
        }

        let description = CompositionalDescription::intersection(genus, differentia);
        let label = self
            .label_descriptions
            .then(|| description.simple_label(&|id: &str| reasoner.label(id)));
        description.register(graph, label);

        tracing::trace!(id = description.id(), form = %description.canonical_form(), "phenotype");
        Ok(Some(description))
    }
}

/// Mirrors of every phenotype whose quality is symmetric and which names both
/// an entity and a related entity. Mirrors swap entity and related entity and
/// copy every other field.
pub fn synthesize_symmetric(
    phenotypes: &[Phenotype],
    is_symmetric: impl Fn(&str) -> bool,
) -> Vec<Phenotype> {
    phenotypes
        .iter()
        .filter(|p| {
            p.entity.is_some()
                && p.related_entity.is_some()
                && p
                    .quality
                    .as_ref()
                    .is_some_and(|q| is_symmetric(&q.id))
        })
        .map(|p| Phenotype {
            entity: p.related_entity.clone(),
            related_entity: p.entity.clone(),
            ..p.clone()
        })
        .collect()
}

/// Render a measurement the way JVM-era datasets print floats: plain decimals
/// with at least one fractional digit inside `[1e-3, 1e7)`, otherwise
/// `<mantissa>E<exponent>` (`1.0E-4`, `2.5E7`).
pub fn format_measurement(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return format!("{value:?}");
    }
    let scientific = format!("{value:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{mantissa}E{exponent}"),
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => scientific,
    }
}
