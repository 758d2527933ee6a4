//! Unit tests for clocks and the engine's time arithmetic

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::temporal::{
    legacy_year, premium_window, window_elapsed, Clock, ManualClock, SystemClock,
    PREMIUM_WINDOW_DAYS, SECONDS_PER_YEAR,
};

mod legacy_years {
    use super::*;

    #[test]
    fn test_one_fixed_year_after_epoch() {
        let instant = DateTime::from_timestamp(SECONDS_PER_YEAR, 0).unwrap();
        assert_eq!(legacy_year(instant), 1971);
    }

    #[test]
    fn test_last_second_of_fixed_year() {
        let instant = DateTime::from_timestamp(SECONDS_PER_YEAR - 1, 0).unwrap();
        assert_eq!(legacy_year(instant), 1970);
    }

    #[test]
    fn test_pre_epoch_clamps() {
        let instant = Utc.with_ymd_and_hms(1960, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(legacy_year(instant), 1970);
    }
}

mod premium_windows {
    use super::*;

    #[test]
    fn test_window_is_thirty_days() {
        assert_eq!(PREMIUM_WINDOW_DAYS, 30);
        assert_eq!(premium_window(), Duration::days(30));
    }

    #[test]
    fn test_same_instant_has_not_elapsed() {
        let anchor = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(!window_elapsed(anchor, anchor));
    }

    #[test]
    fn test_thirty_one_days_has_elapsed() {
        let anchor = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(window_elapsed(anchor, anchor + Duration::days(31)));
    }
}

mod clocks {
    use super::*;

    #[test]
    fn test_system_clock_is_close_to_now() {
        let before = Utc::now();
        let now = SystemClock.now();
        assert!(now >= before);
    }

    #[test]
    fn test_manual_clock_set_forward() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::starting_at(start);

        let later = start + Duration::days(400);
        clock.set(later).unwrap();

        assert_eq!(clock.now(), later);
    }

    #[test]
    fn test_manual_clock_shared_through_arc() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = std::sync::Arc::new(ManualClock::starting_at(start));
        let as_dyn: std::sync::Arc<dyn Clock> = clock.clone();

        clock.advance_days(2);

        assert_eq!(as_dyn.now(), start + Duration::days(2));
    }
}
