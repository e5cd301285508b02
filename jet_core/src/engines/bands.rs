//! Ordered Lookup Bands
//!
//! Needle clips and float levels are discrete hardware settings, so the
//! recommendation tables map a continuous deviation onto a few bands rather
//! than interpolating. A table is a slice of [`Band`]s sorted by descending
//! `min`; the last band has `min = f64::NEG_INFINITY` so every key matches.

use serde::Serialize;

/// One row of a band table: applies when `key >= min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band<T> {
    pub min: f64,
    pub value: T,
}

impl<T> Band<T> {
    pub const fn new(min: f64, value: T) -> Self {
        Band { min, value }
    }
}

/// Catch-all lower bound for the last band of a table
pub const OPEN: f64 = f64::NEG_INFINITY;

/// Return the value of the first band whose `min <= key`.
///
/// Falls back to the last band when nothing matches (only possible for NaN
/// keys, which validation rules out). Returns `None` for an empty table.
///
/// # Example
///
/// ```rust
/// use jet_core::engines::bands::{lookup, Band, OPEN};
///
/// const OFFSETS: &[Band<f64>] = &[Band::new(1.0, -0.2), Band::new(OPEN, 0.0)];
/// assert_eq!(lookup(OFFSETS, 1.5), Some(&-0.2));
/// assert_eq!(lookup(OFFSETS, 0.0), Some(&0.0));
/// ```
pub fn lookup<T>(bands: &[Band<T>], key: f64) -> Option<&T> {
    bands
        .iter()
        .find(|band| key >= band.min)
        .or_else(|| bands.last())
        .map(|band| &band.value)
}

/// Check a table is sorted by strictly descending `min` and ends open.
pub fn is_well_formed<T>(bands: &[Band<T>]) -> bool {
    let descending = bands.windows(2).all(|w| w[0].min > w[1].min);
    let open_ended = bands.last().is_some_and(|b| b.min == OPEN);
    descending && open_ended
}
