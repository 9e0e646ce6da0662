mod tests {
    use hometime_composer::{CalendarEvent, parse_agenda, parse_agenda_line};

    const AGENDA: &str = "start_date\tstart_time\tend_date\tend_time\ttitle\n\
        2026-10-19\t10:30\t2026-10-19\t11:15\tDesign review\n\
        2026-10-19\t\t2026-10-20\t\tPublic holiday\n\
        \n\
        2026-10-19\t14:00\t2026-10-19\t14:30\tStandup\n";

    #[test]
    fn test_parse_agenda() {
        let events: Vec<CalendarEvent<'_>> = parse_agenda(AGENDA).collect();
        assert_eq!(
            events,
            [
                CalendarEvent::new(10.5, 11.25).with_title("Design review"),
                CalendarEvent::new(14.0, 14.5).with_title("Standup"),
            ]
        );
    }

    #[test]
    fn test_header_is_skipped() {
        assert_eq!(
            parse_agenda_line("start_date\tstart_time\tend_date\tend_time\ttitle"),
            None
        );
    }

    #[test]
    fn test_all_day_event_is_skipped() {
        assert_eq!(
            parse_agenda_line("2026-10-19\t\t2026-10-20\t\tPublic holiday"),
            None
        );
    }

    #[test]
    fn test_short_line_is_skipped() {
        assert_eq!(parse_agenda_line("2026-10-19\t10:30\t2026-10-19\t11:15"), None);
        assert_eq!(parse_agenda_line("   "), None);
    }

    #[test]
    fn test_bad_time_is_skipped() {
        assert_eq!(
            parse_agenda_line("2026-10-19\tnoon\t2026-10-19\t13:00\tLunch"),
            None
        );
    }

    #[test]
    fn test_title_is_last_column() {
        let event = parse_agenda_line(
            "2026-10-19\t08:05\t2026-10-19\t09:00\thttps://example.invalid/e\tEarly sync\r\n",
        );
        assert_eq!(event.and_then(|e| e.title), Some("Early sync"));
    }

    #[test]
    fn test_missing_title() {
        let event = parse_agenda_line("2026-10-19\t16:00\t2026-10-19\t17:00\t");
        assert_eq!(event, Some(CalendarEvent::new(16.0, 17.0)));
    }

    #[test]
    fn test_contains() {
        let event = CalendarEvent::new(10.0, 11.0);
        assert!(event.contains(10.0));
        assert!(event.contains(11.0));
        assert!(!event.contains(11.5));
    }
}
