mod tests {
    use hometime_composer::WorkBounds;
    use hometime_composer::frame_scheduler::{DIMMED_MARKER_LEVEL, DisplayScheduler, TickAction};

    const DAY: WorkBounds = WorkBounds::new(9.0, 17.0);

    #[test]
    fn test_marker_flashes_while_working() {
        let mut scheduler = DisplayScheduler::new();
        assert_eq!(scheduler.tick(DAY, 10.0), TickAction::ShowDay { marker_level: 255 });
        assert_eq!(
            scheduler.tick(DAY, 10.1),
            TickAction::ShowDay {
                marker_level: DIMMED_MARKER_LEVEL
            }
        );
        assert_eq!(scheduler.tick(DAY, 10.2), TickAction::ShowDay { marker_level: 255 });
    }

    #[test]
    fn test_flash_disabled() {
        let mut scheduler = DisplayScheduler::new().with_flash(false);
        for _ in 0..3 {
            assert_eq!(scheduler.tick(DAY, 12.0), TickAction::ShowDay { marker_level: 255 });
        }
    }

    #[test]
    fn test_custom_dimmed_level() {
        let mut scheduler = DisplayScheduler::new().with_dimmed_level(10);
        scheduler.tick(DAY, 12.0);
        assert_eq!(scheduler.tick(DAY, 12.1), TickAction::ShowDay { marker_level: 10 });
    }

    #[test]
    fn test_celebrates_once_after_work() {
        let mut scheduler = DisplayScheduler::new();
        scheduler.tick(DAY, 16.9);
        assert_eq!(scheduler.tick(DAY, 17.1), TickAction::Celebrate);
        assert!(scheduler.has_celebrated());
        assert_eq!(scheduler.tick(DAY, 17.2), TickAction::Idle);
        assert_eq!(scheduler.tick(DAY, 23.9), TickAction::Idle);
    }

    #[test]
    fn test_celebration_rearms_on_next_work_day() {
        let mut scheduler = DisplayScheduler::new();
        assert_eq!(scheduler.tick(DAY, 18.0), TickAction::Celebrate);
        assert!(matches!(scheduler.tick(DAY, 9.5), TickAction::ShowDay { .. }));
        assert!(!scheduler.has_celebrated());
        assert_eq!(scheduler.tick(DAY, 17.5), TickAction::Celebrate);
    }

    #[test]
    fn test_failed_celebration_is_requested_again() {
        let mut scheduler = DisplayScheduler::new();
        assert_eq!(scheduler.tick(DAY, 17.5), TickAction::Celebrate);
        scheduler.celebration_failed();
        assert!(!scheduler.has_celebrated());
        assert_eq!(scheduler.tick(DAY, 17.6), TickAction::Celebrate);
        assert_eq!(scheduler.tick(DAY, 17.7), TickAction::Idle);
    }

    #[test]
    fn test_day_off() {
        let mut scheduler = DisplayScheduler::new();
        assert_eq!(scheduler.tick(WorkBounds::OFF, 12.0), TickAction::Celebrate);
        assert_eq!(scheduler.tick(WorkBounds::OFF, 12.1), TickAction::Idle);
    }
}
