//! Compatibility evaluation over the current base selection.

use tracing::debug;

use crate::selection::Selection;

use super::rules::RULES;
use super::types::CompatibilityReport;

/// Run every rule against the selection.
///
/// Rules whose parts are not all chosen contribute nothing, so an empty or
/// partial selection yields a report with fewer (or no) notes. Never fails.
pub fn check_compatibility(selection: &Selection) -> CompatibilityReport {
    let notes: Vec<_> = RULES
        .iter()
        .filter_map(|rule| rule.evaluate(selection))
        .collect();

    for note in &notes {
        debug!("Compatibility {:?}: {:?} {}", note.rule, note.level, note.message);
    }

    CompatibilityReport::from_notes(notes)
}
