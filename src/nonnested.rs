//! # Non-Nested Corrector
//!
//! Raw counts include every occurrence of a motif, also those that sit
//! inside a denser motif on the same nodes: a triangle holds three 3-paths,
//! a K4 holds six diamonds. The non-nested count keeps only occurrences
//! that are not part of anything denser, i.e. induced occurrences.
//!
//! The correction is a fixed linear map. Row `r` of
//! [`NONNESTED_COEFFICIENTS`] gives the weight of every raw entry in the
//! non-nested entry `r`. The weights come from how many copies of each
//! sparser motif a denser one contains. Complete motifs (Triangle, K4) are
//! never nested and map to themselves.

use crate::model::{Motif, MotifVector, PartialMotifVector, MOTIF_COUNT};
use crate::{Error, Result};

/// Inclusion–exclusion weights, rows and columns in `Motif::ALL` order:
/// `Path3, Triangle, Path4, K4, Star4, Cycle4, Diamond, Tadpole`.
pub const NONNESTED_COEFFICIENTS: [[i64; MOTIF_COUNT]; MOTIF_COUNT] = [
    [1, -3, 0, 0, 0, 0, 0, 0],    // Path3
    [0, 1, 0, 0, 0, 0, 0, 0],     // Triangle
    [0, 0, 1, -12, 0, -4, 6, -2], // Path4
    [0, 0, 0, 1, 0, 0, 0, 0],     // K4
    [0, 0, 0, -4, 1, 0, 2, -1],   // Star4
    [0, 0, 0, 3, 0, 1, -1, 0],    // Cycle4
    [0, 0, 0, -6, 0, 0, 1, 0],    // Diamond
    [0, 0, 0, 12, 0, 0, -4, 1],   // Tadpole
];

/// Non-nested counts from exact raw counts.
///
/// A negative entry means the raw vector cannot come from a simple graph
/// and is reported as [`Error::InvariantViolation`].
pub fn to_nonnested(raw: &MotifVector<u64>) -> Result<MotifVector<u64>> {
    let mut out = [0u64; MOTIF_COUNT];
    for motif in Motif::ALL {
        // Every input is known, so every row evaluates.
        out[motif.index()] = corrected(motif, |m| Some(raw[m]))?.unwrap_or_default();
    }
    Ok(MotifVector::new(out))
}

/// Non-nested counts where some raw entries are unknown.
///
/// An entry is computed when every raw entry it depends on is known. With
/// K4 unknown only Path3 and Triangle survive.
pub fn to_nonnested_partial(raw: &PartialMotifVector) -> Result<PartialMotifVector> {
    let mut out = [None; MOTIF_COUNT];
    for motif in Motif::ALL {
        out[motif.index()] = corrected(motif, |m| raw[m])?;
    }
    Ok(MotifVector::new(out))
}

fn corrected(motif: Motif, raw: impl Fn(Motif) -> Option<u64>) -> Result<Option<u64>> {
    let row = &NONNESTED_COEFFICIENTS[motif.index()];
    let mut total: i128 = 0;
    for (input, &weight) in Motif::ALL.iter().zip(row) {
        if weight == 0 {
            continue;
        }
        let Some(value) = raw(*input) else {
            return Ok(None);
        };
        total += i128::from(weight) * i128::from(value);
    }
    u64::try_from(total).map(Some).map_err(|_| Error::InvariantViolation {
        motif,
        detail: format!("non-nested count is {total}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn complete_motifs_pass_through() {
        for motif in [Motif::Triangle, Motif::K4] {
            let row = NONNESTED_COEFFICIENTS[motif.index()];
            for (i, w) in row.iter().enumerate() {
                assert_eq!(*w, i64::from(i == motif.index()));
            }
        }
    }

    #[test]
    fn k4_has_no_nested_sparser_motifs() {
        let raw = MotifVector::new([12, 4, 12, 1, 4, 3, 6, 12]);
        assert_eq!(to_nonnested(&raw).unwrap(), MotifVector::new([0, 4, 0, 1, 0, 0, 0, 0]));
    }

    #[test]
    fn diamond_keeps_only_induced_paths() {
        // K4 minus one edge.
        let raw = MotifVector::new([8, 2, 6, 0, 2, 1, 1, 4]);
        assert_eq!(to_nonnested(&raw).unwrap(), MotifVector::new([2, 2, 0, 0, 0, 0, 1, 0]));
    }

    #[test]
    fn negative_result_is_an_invariant_violation() {
        // One triangle but no 3-paths: impossible.
        let raw = MotifVector::new([0, 1, 0, 0, 0, 0, 0, 0]);
        let err = to_nonnested(&raw).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation { motif: Motif::Path3, .. }));
    }

    #[test]
    fn partial_vectors_drop_dependent_rows() {
        let raw = MotifVector::new([Some(12), Some(4), Some(12), None, Some(4), Some(3), Some(6), Some(12)]);
        let nnest = to_nonnested_partial(&raw).unwrap();
        assert_eq!(nnest, MotifVector::new([Some(0), Some(4), None, None, None, None, None, None]));
    }
}
