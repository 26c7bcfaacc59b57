//! ICS document generation.

use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger, ValueType};

use crate::calendar::CalendarDocument;
use crate::constants::PRODID;
use crate::event::{CalendarEvent, EventTime};

/// Render a whole document as one VCALENDAR.
///
/// Output is a pure function of the document: regenerating an unchanged
/// document yields identical bytes.
pub fn generate_ics(document: &CalendarDocument) -> String {
    let mut cal = Calendar::new();
    cal.append_property(Property::new("METHOD", "PUBLISH"));
    cal.append_property(Property::new("X-WR-CALNAME", &document.name));

    for event in &document.events {
        cal.push(to_vevent(event));
    }

    let cal = cal.done();

    strip_ics_bloat(&cal.to_string())
}

fn to_vevent(event: &CalendarEvent) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.summary);

    // DTSTAMP is required; pin it to the start so output stays reproducible.
    let dtstamp = event.start.sort_key().format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    add_datetime_property(&mut ics_event, "DTSTART", &event.start);
    add_datetime_property(&mut ics_event, "DTEND", &event.end);

    if let Some(ref desc) = event.description {
        ics_event.description(desc);
    }

    if let Some(ref loc) = event.location {
        ics_event.location(loc);
    }

    // One CATEGORIES line per category; a joined list would get its commas escaped.
    for category in &event.categories {
        ics_event.append_multi_property(Property::new("CATEGORIES", category));
    }

    if let Some(ref reminder) = event.reminder {
        let trigger = Trigger::before_start(chrono::Duration::minutes(reminder.minutes));
        let alarm = Alarm::display(&format!("Kickoff: {}", event.summary), trigger);
        ics_event.alarm(alarm);
    }

    ics_event.done()
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with ours
/// - Remove CALSCALE:GREGORIAN (it's the default)
/// - Remove DTSTAMP and UID inside VALARM sections; the crate fills them with
///   the current time and a random id, which would make every sync differ
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Add a datetime property with proper formatting based on EventTime variant
fn add_datetime_property(ics_event: &mut icalendar::Event, name: &str, time: &EventTime) {
    match time {
        EventTime::Date(d) => {
            let mut prop = Property::new(name, d.format("%Y%m%d").to_string());
            prop.append_parameter(ValueType::Date);
            ics_event.append_property(prop);
        }
        EventTime::DateTime(dt) => {
            ics_event.add_property(name, dt.format("%Y%m%dT%H%M%SZ").to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Reminder;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn make_test_event() -> CalendarEvent {
        CalendarEvent {
            uid: "cfb-game-401520145@cfb-cal".to_string(),
            summary: "Ohio State at Michigan (FOX)".to_string(),
            description: Some("Week 14, 2025 regular season\nVenue: Michigan Stadium".to_string()),
            location: Some("Michigan Stadium".to_string()),
            start: EventTime::DateTime(Utc.with_ymd_and_hms(2025, 11, 29, 17, 0, 0).unwrap()),
            end: EventTime::DateTime(Utc.with_ymd_and_hms(2025, 11, 29, 20, 0, 0).unwrap()),
            reminder: Some(Reminder { minutes: 60 }),
            categories: vec!["College Football".to_string(), "Conference".to_string()],
        }
    }

    fn document(events: Vec<CalendarEvent>) -> CalendarDocument {
        CalendarDocument {
            name: "CFB Schedule".to_string(),
            events,
        }
    }

    #[test]
    fn test_generate_has_required_properties() {
        let ics = generate_ics(&document(vec![make_test_event()]));

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.contains("VERSION:2.0"));
        assert!(ics.contains(&format!("PRODID:{PRODID}")));
        assert!(ics.contains("METHOD:PUBLISH"));
        assert!(ics.contains("X-WR-CALNAME:CFB Schedule"));
        assert!(ics.contains("UID:cfb-game-401520145@cfb-cal"));
        assert!(ics.contains("DTSTART:20251129T170000Z"));
        assert!(ics.contains("DTEND:20251129T200000Z"));
        assert!(ics.contains("SUMMARY:Ohio State at Michigan (FOX)"));
        assert!(ics.contains("LOCATION:Michigan Stadium"));
        assert!(ics.contains("CATEGORIES:College Football\r\n"));
        assert!(ics.contains("CATEGORIES:Conference\r\n"));
        assert!(!ics.contains("CALSCALE"));
    }

    #[test]
    fn test_generate_is_reproducible() {
        let doc = document(vec![make_test_event()]);
        assert_eq!(generate_ics(&doc), generate_ics(&doc));
    }

    #[test]
    fn test_alarm_is_minimal() {
        let ics = generate_ics(&document(vec![make_test_event()]));

        assert!(ics.contains("BEGIN:VALARM"), "Should have VALARM");
        assert!(ics.contains("ACTION:DISPLAY"), "Should have ACTION:DISPLAY");
        assert!(ics.contains("TRIGGER"), "Should have TRIGGER");

        let valarm_section: String = ics
            .split("BEGIN:VALARM")
            .nth(1)
            .unwrap()
            .split("END:VALARM")
            .next()
            .unwrap()
            .to_string();
        assert!(
            !valarm_section.contains("UID:"),
            "VALARM should not have UID. Got:\n{}",
            valarm_section
        );
        assert!(
            !valarm_section.contains("DTSTAMP:"),
            "VALARM should not have DTSTAMP. Got:\n{}",
            valarm_section
        );
    }

    #[test]
    fn test_no_alarm_without_reminder() {
        let mut event = make_test_event();
        event.reminder = None;
        let ics = generate_ics(&document(vec![event]));
        assert!(!ics.contains("BEGIN:VALARM"));
    }

    #[test]
    fn test_all_day_event_has_value_date() {
        let mut event = make_test_event();
        event.start = EventTime::Date(NaiveDate::from_ymd_opt(2025, 11, 29).unwrap());
        event.end = EventTime::Date(NaiveDate::from_ymd_opt(2025, 11, 30).unwrap());

        let ics = generate_ics(&document(vec![event]));

        assert!(
            ics.contains("DTSTART;VALUE=DATE:20251129"),
            "DTSTART should have VALUE=DATE parameter. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND;VALUE=DATE:20251130"),
            "DTEND should have VALUE=DATE parameter. ICS:\n{}",
            ics
        );
    }

    fn content_lines(ics: &str) -> Vec<String> {
        ics.replace("\r\n ", "")
            .split("\r\n")
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_text_values_are_escaped_once() {
        let mut event = make_test_event();
        event.summary = "Big Ten Championship, Indianapolis: Ohio State vs Michigan".to_string();
        event.location = Some("Lucas Oil Stadium; Indianapolis".to_string());
        let mut doc = document(vec![event]);
        doc.name = "CFB, Big Ten".to_string();

        let lines = content_lines(&generate_ics(&doc));
        let has = |line: &str| lines.iter().any(|l| l == line);

        assert!(has("X-WR-CALNAME:CFB\\, Big Ten"), "lines: {lines:#?}");
        assert!(has("SUMMARY:Big Ten Championship\\, Indianapolis: Ohio State vs Michigan"));
        assert!(has("DESCRIPTION:Week 14\\, 2025 regular season\\nVenue: Michigan Stadium"));
        assert!(has("LOCATION:Lucas Oil Stadium\\; Indianapolis"));
        assert!(has("CATEGORIES:College Football"));
        assert!(has("CATEGORIES:Conference"));
        assert!(!lines.iter().any(|l| l.contains("\\\\")), "double escaping: {lines:#?}");
    }

    #[test]
    fn test_one_vevent_per_event() {
        let mut second = make_test_event();
        second.uid = "cfb-game-2@cfb-cal".to_string();
        let ics = generate_ics(&document(vec![make_test_event(), second]));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
    }
}
