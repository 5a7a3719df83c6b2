/// Pure transformations applied to upstream data.
///
/// Submodules:
/// - `freshness` — drops stations whose last measurement is too old.
/// - `aggregate` — reduces collected readings to one rounded average.

pub mod aggregate;
pub mod freshness;
