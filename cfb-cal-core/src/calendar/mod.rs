//! Calendar documents: the unit that gets published as one `.ics` file.

mod publish;
mod scope;

pub use publish::{PlannedDocument, PublishReport, publish};
pub use scope::Scope;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::{CfbError, CfbResult};
use crate::event::CalendarEvent;
use crate::ics::{ParsedCalendar, generate_ics, parse_document};
use crate::utils::write_atomic;

/// A named, ordered set of events.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDocument {
    pub name: String,
    pub events: Vec<CalendarEvent>,
}

impl CalendarDocument {
    /// Build a document from events in any order.
    ///
    /// Events sharing a UID collapse to the last one seen. The result is
    /// ordered by start, ties broken by UID.
    pub fn synthesize(events: impl IntoIterator<Item = CalendarEvent>, name: &str) -> Self {
        let by_uid: BTreeMap<String, CalendarEvent> =
            events.into_iter().map(|e| (e.uid.clone(), e)).collect();

        let mut events: Vec<CalendarEvent> = by_uid.into_values().collect();
        events.sort_by(|a, b| a.document_order(b));

        CalendarDocument {
            name: name.to_string(),
            events,
        }
    }

    pub fn to_ics(&self) -> String {
        generate_ics(self)
    }

    /// Overwrite `path` with this document.
    pub fn write(&self, path: &Path) -> CfbResult<()> {
        write_atomic(path, self.to_ics().as_bytes()).map_err(|e| CfbError::publish(path, e))?;
        debug!(path = %path.display(), events = self.events.len(), "wrote calendar document");
        Ok(())
    }

    /// Read a previously written document.
    pub fn read(path: &Path) -> CfbResult<ParsedCalendar> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CfbError::IcsParse(format!("{}: {e}", path.display())))?;
        parse_document(&content)
    }
}

impl fmt::Display for CalendarDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({} events)", self.name, self.events.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventTime;
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::TempDir;

    fn event(uid: &str, hour: u32) -> CalendarEvent {
        let start = Utc.with_ymd_and_hms(2025, 9, 6, hour, 0, 0).unwrap();
        CalendarEvent {
            uid: uid.to_string(),
            summary: format!("Game {uid}"),
            description: None,
            location: None,
            start: EventTime::DateTime(start),
            end: EventTime::DateTime(start + chrono::Duration::hours(3)),
            reminder: None,
            categories: vec!["College Football".to_string()],
        }
    }

    fn uids(doc: &CalendarDocument) -> Vec<&str> {
        doc.events.iter().map(|e| e.uid.as_str()).collect()
    }

    #[test]
    fn test_synthesize_orders_by_start() {
        let doc = CalendarDocument::synthesize(
            vec![event("c", 20), event("a", 16), event("b", 12)],
            "Test",
        );
        assert_eq!(uids(&doc), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_synthesize_breaks_ties_by_uid() {
        let doc = CalendarDocument::synthesize(
            vec![event("z", 12), event("m", 12), event("a", 12)],
            "Test",
        );
        assert_eq!(uids(&doc), vec!["a", "m", "z"]);
    }

    #[test]
    fn test_all_day_sorts_at_midnight_utc() {
        let mut tbd = event("tbd", 0);
        tbd.start = EventTime::Date(NaiveDate::from_ymd_opt(2025, 9, 6).unwrap());
        tbd.end = EventTime::Date(NaiveDate::from_ymd_opt(2025, 9, 7).unwrap());

        let doc = CalendarDocument::synthesize(vec![event("noon", 12), tbd], "Test");
        assert_eq!(uids(&doc), vec!["tbd", "noon"]);
    }

    #[test]
    fn test_synthesize_collapses_duplicate_uids() {
        let mut updated = event("a", 18);
        updated.summary = "Moved".to_string();

        let doc = CalendarDocument::synthesize(vec![event("a", 12), event("b", 15), updated], "Test");
        assert_eq!(uids(&doc), vec!["b", "a"]);
        assert_eq!(doc.events[1].summary, "Moved");
    }

    #[test]
    fn test_rewrite_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfb_test.ics");

        let first = CalendarDocument::synthesize(vec![event("b", 15), event("a", 12)], "Test");
        first.write(&path).unwrap();
        let before = std::fs::read(&path).unwrap();

        let second = CalendarDocument::synthesize(vec![event("a", 12), event("b", 15)], "Test");
        second.write(&path).unwrap();
        let after = std::fs::read(&path).unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfb_test.ics");

        let doc = CalendarDocument::synthesize(vec![event("a", 12), event("b", 15)], "Saturday");
        doc.write(&path).unwrap();

        let parsed = CalendarDocument::read(&path).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Saturday"));
        assert_eq!(parsed.events.len(), 2);
        assert_eq!(parsed.events[0].uid, "a");
        assert_eq!(parsed.events[0].start, doc.events[0].start);
        assert_eq!(parsed.events[0].end, doc.events[0].end);
        assert_eq!(parsed.events[0].summary, "Game a");
    }

    #[test]
    fn test_written_file_escapes_text_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfb_bowl.ics");

        let mut bowl = event("bowl", 17);
        bowl.summary = "Rose Bowl, Pasadena: Alabama vs Michigan".to_string();
        bowl.description = Some("Week 1, 2025 postseason\nVenue: Rose Bowl".to_string());
        CalendarDocument::synthesize(vec![bowl.clone()], "Bowls, 2025")
            .write(&path)
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap().replace("\r\n ", "");
        let lines: Vec<&str> = raw.split("\r\n").collect();
        assert!(lines.contains(&"X-WR-CALNAME:Bowls\\, 2025"), "{raw}");
        assert!(lines.contains(&"SUMMARY:Rose Bowl\\, Pasadena: Alabama vs Michigan"), "{raw}");
        assert!(
            lines.contains(&"DESCRIPTION:Week 1\\, 2025 postseason\\nVenue: Rose Bowl"),
            "{raw}"
        );

        let parsed = CalendarDocument::read(&path).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Bowls, 2025"));
        assert_eq!(parsed.events[0].summary, bowl.summary);
        assert_eq!(parsed.events[0].description, bowl.description);
    }

    #[test]
    fn test_write_into_unwritable_location_is_publish_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let doc = CalendarDocument::synthesize(vec![event("a", 12)], "Test");
        let err = doc.write(&blocker.join("cfb_test.ics")).unwrap_err();
        assert!(matches!(err, CfbError::Publish { .. }), "got {err:?}");
    }
}
