//! The modified-line heuristic.
//!
//! A line edited in place shows up in a line diff as one deleted line plus
//! one inserted line. Reporting both would charge the edit twice, so paired
//! additions and removals are re-labelled as modifications:
//! `modified = min(added, removed)`, subtracted from both.
//!
//! This is a coarse approximation. It does not establish which deleted line
//! corresponds to which inserted line, and an unrelated removal elsewhere in
//! the document is paired with an addition just the same. Character and
//! word counts are not reconciled.

use nd_types::DiffStats;

/// Move paired line additions/removals into `lines_modified`.
pub fn reconcile(mut stats: DiffStats) -> DiffStats {
    let modified = stats.lines_added.min(stats.lines_removed);
    stats.lines_modified += modified;
    stats.lines_added -= modified;
    stats.lines_removed -= modified;
    stats
}
