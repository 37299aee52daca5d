//! Common-Column Resolver.

use super::unit::RenderingUnit;

/// Columns present in every unit's dataset, in the first unit's order.
pub fn resolve(units: &[RenderingUnit]) -> Vec<String> {
    intersect_columns(units.iter().map(|unit| unit.dataset().columns()))
}

/// Order-preserving intersection of column name lists. Empty input gives an
/// empty result.
pub fn intersect_columns<I>(column_sets: I) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut sets = column_sets.into_iter();
    let Some(mut common) = sets.next() else {
        return Vec::new();
    };
    for columns in sets {
        common.retain(|name| columns.contains(name));
    }
    common
}
