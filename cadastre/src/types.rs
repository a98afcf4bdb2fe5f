//! Core data types for the harvest pipeline.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flexible field-name → value mapping used for fetched payloads.
pub type FieldMap = Map<String, Value>;

/// Identity of a single land plot within the index space.
///
/// A plot is addressed by its ward code, the map sheet number within the
/// ward, and the plot number within the sheet. Sheet and plot numbers start
/// at 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlotKey {
    /// Administrative ward code the plot belongs to.
    pub ward_code: String,
    /// Map sheet number within the ward.
    pub sheet_number: u32,
    /// Plot number within the sheet.
    pub plot_number: u32,
}

impl PlotKey {
    /// Creates a new [`PlotKey`].
    pub fn new(ward_code: impl Into<String>, sheet_number: u32, plot_number: u32) -> Self {
        Self {
            ward_code: ward_code.into(),
            sheet_number,
            plot_number,
        }
    }
}

impl fmt::Display for PlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/sheet {}/plot {}",
            self.ward_code, self.sheet_number, self.plot_number
        )
    }
}

/// One of the fixed set of auxiliary entity types a primary record may
/// reference by code.
///
/// Each category knows the field under which a primary record carries its
/// reference code, and the prefix under which the referenced entity's fields
/// are merged during enrichment. Field names come from the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelatedCategory {
    /// Zone planning project ("dự án quy hoạch").
    ZoneProject,
    /// Sub-zone plan ("quy hoạch phân khu").
    SubZonePlan,
    /// Architecture-control area ("khu vực kiến trúc").
    Architecture,
}

impl RelatedCategory {
    /// All categories, in the order they are processed.
    pub const ALL: [RelatedCategory; 3] = [
        RelatedCategory::ZoneProject,
        RelatedCategory::SubZonePlan,
        RelatedCategory::Architecture,
    ];

    /// Field of the primary record holding this category's reference code.
    pub fn code_field(&self) -> &'static str {
        match self {
            RelatedCategory::ZoneProject => "MaDuAnQH",
            RelatedCategory::SubZonePlan => "MaQHPhanKhu",
            RelatedCategory::Architecture => "MaKVKT",
        }
    }

    /// Prefix under which the referenced entity's fields are merged.
    pub fn prefix(&self) -> &'static str {
        match self {
            RelatedCategory::ZoneProject => "DuAnQH",
            RelatedCategory::SubZonePlan => "QHPhanKhu",
            RelatedCategory::Architecture => "KVKT",
        }
    }
}

impl fmt::Display for RelatedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelatedCategory::ZoneProject => "zone-project",
            RelatedCategory::SubZonePlan => "sub-zone-plan",
            RelatedCategory::Architecture => "architecture",
        };
        f.write_str(name)
    }
}

/// Primary record fetched for a [`PlotKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryRecord {
    #[serde(flatten)]
    fields: FieldMap,
}

impl PrimaryRecord {
    /// Wraps a raw field map into a [`PrimaryRecord`].
    pub fn new(fields: FieldMap) -> Self {
        Self { fields }
    }

    /// Returns the record's fields.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Consumes the record, returning its fields.
    pub fn into_fields(self) -> FieldMap {
        self.fields
    }

    /// Returns the reference code for `category`, if present and non-empty.
    ///
    /// Only string codes are meaningful to the related endpoints; other
    /// value types are treated as absent.
    pub fn reference_code(&self, category: RelatedCategory) -> Option<&str> {
        self.fields
            .get(category.code_field())
            .and_then(Value::as_str)
            .filter(|code| !code.is_empty())
    }
}

/// Reference-data entity fetched by `(category, code)`.
///
/// The related endpoints reply with either a single JSON object or an array
/// of objects; only the first element of an array carries usable data, so
/// payloads are normalized to a single field map on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedEntity {
    #[serde(flatten)]
    fields: FieldMap,
}

impl RelatedEntity {
    /// Normalizes a related-endpoint payload into a [`RelatedEntity`].
    ///
    /// Accepts a JSON object or a non-empty array whose first element is an
    /// object. Anything else is treated as "no data".
    pub fn from_payload(payload: Value) -> Option<Self> {
        match payload {
            Value::Object(fields) => Some(Self { fields }),
            Value::Array(mut elements) => {
                if elements.is_empty() {
                    return None;
                }

                match elements.swap_remove(0) {
                    Value::Object(fields) => Some(Self { fields }),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Returns the entity's fields.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

/// A primary record with reference data merged in under category prefixes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    fields: FieldMap,
}

impl EnrichedRecord {
    /// Wraps a merged field map into an [`EnrichedRecord`].
    pub(crate) fn new(fields: FieldMap) -> Self {
        Self { fields }
    }

    /// Returns the record's fields.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

/// Resume state of the index-space walk: the next plot to process.
///
/// Ordered by (ward index, sheet number, plot number), the walk order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Sheet number to resume from.
    pub sheet_number: u32,
    /// Plot number to resume from.
    pub plot_number: u32,
    /// Index of the ward (into the ward universe) to resume from.
    pub ward_index: usize,
}

impl Checkpoint {
    /// Creates a new [`Checkpoint`].
    pub fn new(sheet_number: u32, plot_number: u32, ward_index: usize) -> Self {
        Self {
            sheet_number,
            plot_number,
            ward_index,
        }
    }

    /// The checkpoint as a tuple in walk order.
    fn walk_position(&self) -> (usize, u32, u32) {
        (self.ward_index, self.sheet_number, self.plot_number)
    }
}

impl Default for Checkpoint {
    /// The fixed starting position: first plot of the first sheet of the
    /// first ward.
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

impl PartialOrd for Checkpoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Checkpoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.walk_position().cmp(&other.walk_position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn checkpoints_order_by_ward_then_sheet_then_plot() {
        let a = Checkpoint::new(400, 1000, 0);
        let b = Checkpoint::new(1, 1, 1);
        let c = Checkpoint::new(1, 2, 1);
        let d = Checkpoint::new(2, 1, 1);

        assert!(a < b);
        assert!(b < c);
        assert!(c < d);
    }

    #[test]
    fn default_checkpoint_is_the_walk_origin() {
        assert_eq!(Checkpoint::default(), Checkpoint::new(1, 1, 0));
    }

    #[test]
    fn reference_code_ignores_missing_empty_and_non_string_values() {
        let record = PrimaryRecord::new(
            json!({
                "MaDuAnQH": "DA-01",
                "MaQHPhanKhu": "",
                "MaKVKT": 7,
            })
            .as_object()
            .cloned()
            .unwrap(),
        );

        assert_eq!(
            record.reference_code(RelatedCategory::ZoneProject),
            Some("DA-01")
        );
        assert_eq!(record.reference_code(RelatedCategory::SubZonePlan), None);
        assert_eq!(record.reference_code(RelatedCategory::Architecture), None);
    }

    #[test]
    fn related_entity_normalizes_arrays_to_their_first_element() {
        let entity = RelatedEntity::from_payload(json!([{"TenDuAn": "A"}, {"TenDuAn": "B"}]))
            .expect("non-empty array of objects");
        assert_eq!(entity.fields().get("TenDuAn"), Some(&json!("A")));

        assert!(RelatedEntity::from_payload(json!([])).is_none());
        assert!(RelatedEntity::from_payload(json!("scalar")).is_none());
    }

    #[test]
    fn category_fields_never_collide_across_prefixes() {
        let prefixes: std::collections::HashSet<_> =
            RelatedCategory::ALL.iter().map(|c| c.prefix()).collect();
        assert_eq!(prefixes.len(), RelatedCategory::ALL.len());
    }
}
