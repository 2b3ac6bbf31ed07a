//! Merging bulk lookup results into variant records

use super::response::{ConsequenceResponse, FrequencyResponse};
use super::AnnotationSource;
use crate::core::{Consequence, ServiceResult, VariantTable};

/// Counts of annotation outcomes over the distinct records
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeStats {
    pub with_frequency: usize,
    pub without_frequency: usize,
    pub known_consequence: usize,
    pub unknown_consequence: usize,
    pub missing_consequence: usize,
}

/// Set external frequency and consequence on every record
///
/// Ids are visited in discovery order. Fields are overwritten, so applying
/// the same responses again leaves the table unchanged.
pub fn apply_annotations(
    table: &mut VariantTable,
    frequencies: &FrequencyResponse,
    consequences: &ConsequenceResponse,
) -> MergeStats {
    let ids = table.ids().to_vec();
    for id in &ids {
        if let Some(record) = table.get_mut(id) {
            record.external_freq = frequencies.allele_freq(id).map(|freq| freq.rounded(3));
            record.consequence = consequences.consequence(id);
        }
    }

    let mut stats = MergeStats::default();
    for record in table.records() {
        if record.external_freq.is_some() {
            stats.with_frequency += 1;
        } else {
            stats.without_frequency += 1;
        }
        match record.consequence {
            Consequence::Known(_) => stats.known_consequence += 1,
            Consequence::Unknown => stats.unknown_consequence += 1,
            Consequence::Missing => stats.missing_consequence += 1,
        }
    }
    stats
}

/// Fetch both lookups for all ids in one round trip each and merge them
///
/// Either lookup failing aborts before any record is touched.
pub fn merge_annotations<S: AnnotationSource + ?Sized>(
    table: &mut VariantTable,
    source: &S,
) -> ServiceResult<MergeStats> {
    let frequencies = source.frequencies(table.ids())?;
    let consequences = source.consequences(table.ids())?;
    log::info!(
        "Lookups returned {} frequency and {} consequence entries for {} ids",
        frequencies.len(),
        consequences.len(),
        table.ids().len()
    );

    Ok(apply_annotations(table, &frequencies, &consequences))
}
