//! ICS document parsing using the icalendar crate's parser.
//!
//! Used to read back published documents for `status` and in tests.

use chrono::TimeZone;
use chrono_tz::Tz;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::error::{CfbError, CfbResult};
use crate::event::{CalendarEvent, EventTime, Reminder};

/// A published document read back from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCalendar {
    /// X-WR-CALNAME, when present.
    pub name: Option<String>,
    pub events: Vec<CalendarEvent>,
}

/// Parse a whole VCALENDAR into its events.
pub fn parse_document(content: &str) -> CfbResult<ParsedCalendar> {
    let unfolded = unfold(content);
    let calendar =
        read_calendar(&unfolded).map_err(|e| CfbError::IcsParse(format!("Invalid ICS: {e}")))?;

    let name = calendar
        .properties
        .iter()
        .find(|p| p.name == "X-WR-CALNAME")
        .map(|p| p.val.to_string());

    let events = calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .map(parse_vevent)
        .collect::<CfbResult<Vec<_>>>()?;

    Ok(ParsedCalendar { name, events })
}

fn parse_vevent(vevent: &Component) -> CfbResult<CalendarEvent> {
    let uid = vevent
        .find_prop("UID")
        .map(|p| p.val.to_string())
        .ok_or_else(|| CfbError::IcsParse("VEVENT without UID".into()))?;

    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(No title)".to_string());

    let start = required_time(vevent, "DTSTART", &uid)?;
    let end = required_time(vevent, "DTEND", &uid)?;

    let description = vevent
        .find_prop("DESCRIPTION")
        .map(|p| p.val.to_string());
    let location = vevent
        .find_prop("LOCATION")
        .map(|p| p.val.to_string());

    // The parser has already unescaped values, so other producers' comma lists split here.
    let categories = vevent
        .properties
        .iter()
        .filter(|p| p.name == "CATEGORIES")
        .flat_map(|p| p.val.as_ref().split(','))
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    let reminder = vevent
        .components
        .iter()
        .filter(|c| c.name == "VALARM")
        .find_map(|alarm| {
            let trigger = alarm.find_prop("TRIGGER")?.val.as_ref();
            let minutes = parse_trigger_minutes(trigger)?;
            Some(Reminder { minutes })
        });

    Ok(CalendarEvent {
        uid,
        summary,
        description,
        location,
        start,
        end,
        reminder,
        categories,
    })
}

fn required_time(vevent: &Component, name: &str, uid: &str) -> CfbResult<EventTime> {
    let prop = vevent
        .find_prop(name)
        .ok_or_else(|| CfbError::IcsParse(format!("{uid}: missing {name}")))?;
    let dpt = DatePerhapsTime::try_from(prop)
        .map_err(|_| CfbError::IcsParse(format!("{uid}: unreadable {name}")))?;
    to_event_time(dpt).ok_or_else(|| CfbError::IcsParse(format!("{uid}: unknown timezone in {name}")))
}

/// Convert icalendar's DatePerhapsTime to our EventTime, normalizing to UTC.
/// Floating times are read as UTC.
fn to_event_time(dpt: DatePerhapsTime) -> Option<EventTime> {
    match dpt {
        DatePerhapsTime::Date(d) => Some(EventTime::Date(d)),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => Some(EventTime::DateTime(dt)),
            CalendarDateTime::Floating(naive) => Some(EventTime::DateTime(naive.and_utc())),
            CalendarDateTime::WithTimezone { date_time, tzid } => {
                let tz: Tz = tzid.parse().ok()?;
                let local = tz.from_local_datetime(&date_time).earliest()?;
                Some(EventTime::DateTime(local.to_utc()))
            }
        },
    }
}

/// Parse TRIGGER value to minutes before event (-PT30M, -P1D, etc.)
fn parse_trigger_minutes(value: &str) -> Option<i64> {
    let is_before = value.starts_with('-');
    let duration_str = value.trim_start_matches(['-', '+']);

    let duration = iso8601::duration(duration_str).ok()?;
    let std_duration: std::time::Duration = duration.into();
    let minutes = (std_duration.as_secs() / 60) as i64;

    Some(if is_before { minutes } else { -minutes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarDocument;
    use crate::config::CalendarOptions;
    use crate::game::fixtures::the_game;
    use crate::ics::generate_ics;
    use crate::mapper::map_game;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_generate_then_parse_keeps_identity_and_timing() {
        let mut tbd = the_game();
        tbd.id = 401520200;
        tbd.start_time_tbd = true;
        tbd.notes = Some("Big Ten Championship, Indianapolis".to_string());

        let options = CalendarOptions::default();
        let events = vec![map_game(&the_game(), &options), map_game(&tbd, &options)];
        let doc = CalendarDocument {
            name: "CFB Schedule".to_string(),
            events: events.clone(),
        };

        let parsed = parse_document(&generate_ics(&doc)).unwrap();

        assert_eq!(parsed.name.as_deref(), Some("CFB Schedule"));
        assert_eq!(parsed.events.len(), 2);
        for (original, back) in events.iter().zip(&parsed.events) {
            assert_eq!(back.uid, original.uid);
            assert_eq!(back.summary, original.summary);
            assert_eq!(back.start, original.start);
            assert_eq!(back.end, original.end);
            assert_eq!(back.description, original.description);
            assert_eq!(back.location, original.location);
            assert_eq!(back.categories, original.categories);
            assert_eq!(back.reminder, original.reminder);
        }
    }

    #[test]
    fn test_parse_foreign_document() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Other//EN\r\n\
BEGIN:VEVENT\r\n\
UID:abc@example.com\r\n\
DTSTAMP:20250101T000000Z\r\n\
DTSTART;TZID=America/New_York:20250906T120000\r\n\
DTEND;TZID=America/New_York:20250906T150000\r\n\
SUMMARY:Noon kickoff\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
DESCRIPTION:Reminder\r\n\
TRIGGER:-PT30M\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:allday@example.com\r\n\
DTSTAMP:20250101T000000Z\r\n\
DTSTART;VALUE=DATE:20250913\r\n\
DTEND;VALUE=DATE:20250914\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let parsed = parse_document(ics).unwrap();
        assert_eq!(parsed.name, None);
        assert_eq!(parsed.events.len(), 2);

        let timed = &parsed.events[0];
        assert_eq!(
            timed.start,
            EventTime::DateTime(Utc.with_ymd_and_hms(2025, 9, 6, 16, 0, 0).unwrap())
        );
        assert_eq!(timed.reminder, Some(Reminder { minutes: 30 }));

        let all_day = &parsed.events[1];
        assert_eq!(all_day.summary, "(No title)");
        assert_eq!(
            all_day.start,
            EventTime::Date(NaiveDate::from_ymd_opt(2025, 9, 13).unwrap())
        );
    }

    #[test]
    fn test_parse_unescapes_text_and_splits_categories() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
X-WR-CALNAME:SEC\\, Big Ten\r\n\
BEGIN:VEVENT\r\n\
UID:bowl@example.com\r\n\
DTSTART:20260101T170000Z\r\n\
DTEND:20260101T200000Z\r\n\
SUMMARY:Rose Bowl\\, Pasadena\r\n\
DESCRIPTION:Week 1\\, 2025 postseason\\nVenue: Rose Bowl\r\n\
LOCATION:Rose Bowl\\; Pasadena\r\n\
CATEGORIES:College Football,Bowl\r\n\
CATEGORIES:Postseason\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let parsed = parse_document(ics).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("SEC, Big Ten"));

        let event = &parsed.events[0];
        assert_eq!(event.summary, "Rose Bowl, Pasadena");
        assert_eq!(
            event.description.as_deref(),
            Some("Week 1, 2025 postseason\nVenue: Rose Bowl")
        );
        assert_eq!(event.location.as_deref(), Some("Rose Bowl; Pasadena"));
        assert_eq!(event.categories, vec!["College Football", "Bowl", "Postseason"]);
    }

    #[test]
    fn test_missing_dtstart_is_error() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:broken@example.com\r\n\
DTEND:20250906T150000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let err = parse_document(ics).unwrap_err();
        assert!(matches!(err, CfbError::IcsParse(_)), "got {err:?}");
    }

    #[test]
    fn test_parse_trigger_minutes() {
        assert_eq!(parse_trigger_minutes("-PT60M"), Some(60));
        assert_eq!(parse_trigger_minutes("-PT1H"), Some(60));
        assert_eq!(parse_trigger_minutes("-P1D"), Some(1440));
        assert_eq!(parse_trigger_minutes("PT15M"), Some(-15));
    }
}
