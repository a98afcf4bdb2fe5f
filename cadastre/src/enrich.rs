//! Merging cached reference data into primary records.

use crate::cache::ReferenceCache;
use crate::types::{EnrichedRecord, FieldMap, PrimaryRecord, RelatedCategory};

/// Enriches a primary record with every cached entity it references.
///
/// For each category whose reference code is present on the record and
/// cached, the entity's fields are added under `{prefix}_{field}` names. The
/// merge builds a fresh field map: the primary record's own fields are never
/// removed or renamed, and cached entities are not aliased into the output,
/// so two records referencing the same entity get independent copies.
///
/// Enrichment is best-effort: a record whose codes are absent or uncached is
/// emitted unchanged.
pub async fn enrich_record(cache: &ReferenceCache, record: PrimaryRecord) -> EnrichedRecord {
    let mut prefixed = FieldMap::new();

    for category in RelatedCategory::ALL {
        let Some(code) = record.reference_code(category) else {
            continue;
        };

        let Some(entity) = cache.lookup(category, code).await else {
            continue;
        };

        let prefix = category.prefix();
        for (name, value) in entity.fields() {
            prefixed.insert(format!("{prefix}_{name}"), value.clone());
        }
    }

    let mut fields = record.into_fields();
    fields.append(&mut prefixed);

    EnrichedRecord::new(fields)
}
