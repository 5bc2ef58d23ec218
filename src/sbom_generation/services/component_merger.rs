use crate::sbom_generation::domain::ComponentSet;

/// ComponentMerger service unioning collector outputs by identifier
///
/// Sets are processed in the order given. On an identifier collision the
/// first-seen component is kept and only its missing evidence/description
/// fields are filled from the later one, so merging is deterministic and
/// idempotent: `merge([merge([a, b]), b]) == merge([a, b])`.
pub struct ComponentMerger;

impl ComponentMerger {
    /// Merges fully-formed component sets into one deduplicated set
    pub fn merge(sets: Vec<ComponentSet>) -> ComponentSet {
        let mut merged = ComponentSet::new();
        for set in sets {
            for component in set {
                merged.insert_or_backfill(component);
            }
        }
        merged
    }
}
