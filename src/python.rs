use crate::builders::CardTransformer;
use crate::card_groups::ClassificationEngine;
use crate::classes::{PriceTable, SourceCardRecord, SynergyIndex, SynergyRecord};
use crate::providers::ProviderError;
use pyo3::prelude::*;
use std::sync::Arc;

/// Transform a JSON array of Scryfall cards into a JSON array of enriched cards.
///
/// `synergies_json` holds EDHREC rows (`cardWithSynergy`, `mainCard`,
/// `synergy`). Discarded and illegal cards are left out of the result.
#[pyfunction]
#[pyo3(signature = (records_json, synergies_json=None, target_format="commander"))]
pub fn transform_cards(
    py: Python<'_>,
    records_json: &str,
    synergies_json: Option<&str>,
    target_format: &str,
) -> PyResult<String> {
    let records: Vec<SourceCardRecord> =
        serde_json::from_str(records_json).map_err(ProviderError::from)?;
    let synergies = match synergies_json {
        Some(content) => {
            let rows: Vec<SynergyRecord> =
                serde_json::from_str(content).map_err(ProviderError::from)?;
            SynergyIndex::from_records(rows)
        }
        None => SynergyIndex::new(),
    };
    let engine = ClassificationEngine::with_default_lists()
        .map_err(|e| pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))?;

    let transformer = CardTransformer::new(
        Arc::new(PriceTable::from_records(&records)),
        Arc::new(synergies),
        Arc::new(engine),
    )
    .with_target_format(target_format);

    let cards: Vec<_> = py.allow_threads(|| {
        records
            .iter()
            .filter_map(|record| transformer.transform(record, None))
            .collect()
    });

    serde_json::to_string(&cards).map_err(|e| ProviderError::from(e).into())
}

#[pymodule]
fn mtg_cards_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(transform_cards, m)?)?;
    Ok(())
}
