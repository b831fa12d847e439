//! Cross-sectional expression helpers.
//!
//! Ranking within a period is the one operation the whole screen is built
//! from, so the tie-break convention lives in a single place.

use polars::prelude::*;

/// Fractional (average) rank of `column` within each `group`.
///
/// Ties share the mean of the positions they occupy, so a period with
/// values `[10, 10, 20]` ranked descending yields `[1.5, 1.5, 3.0]`.
/// With `descending = true`, rank 1 goes to the highest raw value.
/// Null values receive a null rank and stay out of the denominator.
pub fn rank_xsection(column: &str, group: &str, descending: bool) -> Expr {
    col(column)
        .rank(
            RankOptions {
                method: RankMethod::Average,
                descending,
            },
            None,
        )
        .over([col(group)])
}
