use serde::{Deserialize, Serialize};

/// A derived, display-ready time window. Computed fresh on every read of an
/// item's detail view, never stored back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Verbatim bullet text, or the synthesized "Horario Principal" label.
    pub label: String,
    /// `HH:MM:SS` (or empty for a synthesized entry without an end time).
    pub start_time: String,
    pub end_time: String,
    /// True for at most the first entry.
    pub is_primary: bool,
}
