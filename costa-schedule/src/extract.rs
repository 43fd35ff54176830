//! Schedule extraction from free-text item notes.
//!
//! Admin users record time slots as bullet lines inside the notes field,
//! ideally under a "Horarios disponibles:" header. The underlying need is a
//! structured list-of-windows field on the item; until the data model grows
//! one, this module recovers the windows from text and degrades to defaults
//! wherever structure is missing. It never errors on malformed input.

use anyhow::Result;
use costa_core::CatalogItem;
use regex::Regex;

use crate::types::ScheduleEntry;

const HEADER: &str = "horarios disponibles:";
const DEFAULT_START: &str = "09:00:00";
const DEFAULT_END: &str = "17:00:00";
const PRIMARY_LABEL: &str = "Horario Principal";

/// Strip a leading `•`, `-`, or `*` bullet. Returns the remaining text.
fn bullet_text(line: &str) -> Option<&str> {
    line.trim().strip_prefix(['•', '-', '*']).map(str::trim)
}

pub struct ScheduleExtractor {
    time_re: Regex,
}

impl ScheduleExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            time_re: Regex::new(r"\d{1,2}:\d{2}")?,
        })
    }

    /// Pull the first two `HH:MM` occurrences out of a bullet's text.
    fn explicit_window(&self, text: &str) -> Option<(String, String)> {
        let mut times = self.time_re.find_iter(text);
        let start = times.next()?;
        let end = times.next()?;
        Some((
            format!("{}:00", start.as_str()),
            format!("{}:00", end.as_str()),
        ))
    }

    /// Infer a window from schedule keywords in a bullet's text.
    fn keyword_window(text: &str) -> Option<(&'static str, &'static str)> {
        let lower = text.to_lowercase();
        if lower.contains("mañana") || lower.contains("morning") {
            Some(("09:00:00", "13:00:00"))
        } else if lower.contains("tarde") || lower.contains("afternoon") {
            Some(("14:00:00", "18:00:00"))
        } else if lower.contains("sunset") || lower.contains("puesta") {
            Some(("17:00:00", "20:00:00"))
        } else {
            None
        }
    }

    /// Recover time slots from a notes field.
    ///
    /// Two passes, first match wins:
    /// 1. Bullet lines in the block under a "Horarios disponibles:" header
    ///    (block ends at the first blank line). Explicit `HH:MM` pairs beat
    ///    keyword inference; the first entry otherwise inherits the item
    ///    defaults.
    /// 2. Only when pass 1 finds nothing: bullet lines anywhere in the text,
    ///    with stripped text of 3 chars or fewer dropped as noise. No time
    ///    extraction and no keyword inference here; later entries are fixed
    ///    to the 09:00-17:00 window. The asymmetry with pass 1 mirrors how
    ///    admins have entered data so far and is kept on purpose.
    ///
    /// Source line order is preserved, duplicates are kept, and absent or
    /// empty notes yield an empty list.
    pub fn extract(
        &self,
        notes: Option<&str>,
        default_start: Option<&str>,
        default_end: Option<&str>,
    ) -> Vec<ScheduleEntry> {
        let Some(notes) = notes else {
            return Vec::new();
        };
        if notes.trim().is_empty() {
            return Vec::new();
        }

        let fallback = (
            default_start.unwrap_or(DEFAULT_START).to_string(),
            default_end.unwrap_or(DEFAULT_END).to_string(),
        );

        let mut out = self.structured_pass(notes, &fallback);
        if out.is_empty() {
            out = Self::unstructured_pass(notes, &fallback);
        }
        out
    }

    fn structured_pass(&self, notes: &str, fallback: &(String, String)) -> Vec<ScheduleEntry> {
        let mut lines = notes.lines();
        let found = lines.any(|line| line.to_lowercase().contains(HEADER));
        if !found {
            return Vec::new();
        }

        let mut out = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                break;
            }
            let Some(text) = bullet_text(line) else {
                continue;
            };

            let (start, end) = match self.explicit_window(text) {
                Some(window) => window,
                None if out.is_empty() => fallback.clone(),
                None => match Self::keyword_window(text) {
                    Some((s, e)) => (s.to_string(), e.to_string()),
                    None => fallback.clone(),
                },
            };

            out.push(ScheduleEntry {
                label: text.to_string(),
                start_time: start,
                end_time: end,
                is_primary: out.is_empty(),
            });
        }
        out
    }

    fn unstructured_pass(notes: &str, fallback: &(String, String)) -> Vec<ScheduleEntry> {
        let mut out = Vec::new();
        for line in notes.lines() {
            let Some(text) = bullet_text(line) else {
                continue;
            };
            // Noise filter: "- ok" style fragments carry no schedule.
            if text.chars().count() <= 3 {
                continue;
            }

            let (start, end) = if out.is_empty() {
                fallback.clone()
            } else {
                (DEFAULT_START.to_string(), DEFAULT_END.to_string())
            };

            out.push(ScheduleEntry {
                label: text.to_string(),
                start_time: start,
                end_time: end,
                is_primary: out.is_empty(),
            });
        }
        out
    }

    /// Display list for an item's detail view.
    ///
    /// When extraction comes up empty but the item carries a canonical
    /// schedule, synthesize a single primary entry from it so the view is
    /// never blank for scheduled items. Extracted entries are returned as-is
    /// (the first already being primary), without injecting the canonical
    /// entry on top.
    pub fn schedule_view(&self, item: &CatalogItem) -> Vec<ScheduleEntry> {
        let entries = self.extract(
            item.notes.as_deref(),
            item.schedule_start.as_deref(),
            item.schedule_end.as_deref(),
        );
        if !entries.is_empty() {
            return entries;
        }

        match item.schedule_start.as_deref() {
            Some(start) => vec![ScheduleEntry {
                label: PRIMARY_LABEL.to_string(),
                start_time: start.to_string(),
                end_time: item.schedule_end.clone().unwrap_or_default(),
                is_primary: true,
            }],
            None => Vec::new(),
        }
    }
}
