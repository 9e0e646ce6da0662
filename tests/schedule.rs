mod tests {
    use hometime_composer::{
        WeekSchedule, Weekday, WorkBounds, is_working, parse_time_of_day, time_of_day,
    };

    #[test]
    fn test_day_off_never_works() {
        let saturday = WorkBounds::new(9.0, 9.0);
        for quarter in 0..96 {
            assert!(!is_working(saturday, f64::from(quarter) / 4.0));
        }
        assert!(!is_working(WorkBounds::OFF, 0.0));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let day = WorkBounds::new(9.0, 17.0);
        assert!(!is_working(day, 8.99));
        assert!(is_working(day, 9.0));
        assert!(is_working(day, 13.0));
        assert!(is_working(day, 17.0));
        assert!(!is_working(day, 17.01));
    }

    #[test]
    fn test_no_wraparound() {
        // A night shift is not special cased; nothing is inside it
        let night = WorkBounds::new(22.0, 6.0);
        assert!(!is_working(night, 23.0));
        assert!(!is_working(night, 3.0));
    }

    #[test]
    fn test_week_schedule() {
        let schedule = WeekSchedule::new().with_weekdays(WorkBounds::new(9.0, 20.0));
        assert_eq!(schedule.for_day(Weekday::Wednesday), WorkBounds::new(9.0, 20.0));
        assert!(schedule.for_day(Weekday::Saturday).is_day_off());
        assert!(schedule.is_working(Weekday::Friday, 19.5));
        assert!(!schedule.is_working(Weekday::Sunday, 12.0));

        let schedule = schedule.with_day(Weekday::Friday, WorkBounds::new(9.0, 13.0));
        assert!(!schedule.is_working(Weekday::Friday, 19.5));
    }

    #[test]
    fn test_weekday_names() {
        for day in Weekday::ALL {
            assert_eq!(Weekday::parse_from_str(day.as_str()), Some(day));
        }
        assert_eq!(Weekday::parse_from_str("caturday"), None);
    }

    #[test]
    fn test_time_of_day() {
        assert_eq!(time_of_day(13, 30), 13.5);
        assert_eq!(time_of_day(9, 0), 9.0);
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("9"), Some(9.0));
        assert_eq!(parse_time_of_day(" 20 "), Some(20.0));
        assert_eq!(parse_time_of_day("9.5"), Some(9.5));
        assert_eq!(parse_time_of_day("09:30"), Some(9.5));
        assert_eq!(parse_time_of_day("17:45"), Some(17.75));
        assert_eq!(parse_time_of_day("24"), Some(24.0));
        assert_eq!(parse_time_of_day("25"), None);
        assert_eq!(parse_time_of_day("-1"), None);
        assert_eq!(parse_time_of_day("9:75"), None);
        assert_eq!(parse_time_of_day("9:5"), None);
        assert_eq!(parse_time_of_day(":30"), None);
        assert_eq!(parse_time_of_day("nine"), None);
        assert_eq!(parse_time_of_day("NaN"), None);
        assert_eq!(parse_time_of_day(""), None);
    }
}
