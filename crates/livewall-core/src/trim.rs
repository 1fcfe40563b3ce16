// crates/livewall-core/src/trim.rs
//
// Trim Planner: probed duration → default trim window.
//
// Clips longer than TRIM_UI_THRESHOLD get a bounded, editable window of
// TRIM_MIN..=TRIM_MAX seconds. Shorter clips are exported whole and the trim
// fields stay hidden. Pure; the same duration always yields the same plan.

/// Shortest default window for a long clip, seconds.
pub const TRIM_MIN: f64 = 5.0;
/// Longest default window for a long clip, seconds.
pub const TRIM_MAX: f64 = 60.0;
/// Durations strictly above this show the trim fields.
pub const TRIM_UI_THRESHOLD: f64 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrimPlan {
    pub start:   f64,
    pub end:     f64,
    /// Whether the trim fields are shown to the user.
    pub visible: bool,
}

/// Truncate (not round) to one decimal place.
///
/// ```
/// use livewall_core::trim::truncate1;
/// assert_eq!(truncate1(45.67), 45.6);
/// assert_eq!(truncate1(62.39), 62.3);
/// assert_eq!(truncate1(7.0),   7.0);
/// ```
pub fn truncate1(v: f64) -> f64 {
    (v * 10.0).floor() / 10.0
}

/// Default trim window for a clip of `duration` seconds.
///
/// A non-finite or negative duration plans as an empty clip.
///
/// ```
/// use livewall_core::trim::plan;
/// let p = plan(125.34);
/// assert_eq!((p.start, p.end, p.visible), (0.0, 60.0, true));
/// let p = plan(45.67);
/// assert_eq!((p.start, p.end, p.visible), (0.0, 45.6, false));
/// ```
pub fn plan(duration: f64) -> TrimPlan {
    let duration = if duration.is_finite() && duration > 0.0 { duration } else { 0.0 };

    if duration > TRIM_UI_THRESHOLD {
        TrimPlan {
            start:   0.0,
            end:     truncate1(duration).clamp(TRIM_MIN, TRIM_MAX),
            visible: true,
        }
    } else {
        TrimPlan {
            start:   0.0,
            end:     truncate1(duration),
            visible: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_clip_is_exported_whole() {
        let p = plan(45.67);
        assert_eq!(p, TrimPlan { start: 0.0, end: 45.6, visible: false });
    }

    #[test]
    fn exactly_sixty_seconds_stays_hidden() {
        let p = plan(60.0);
        assert_eq!(p, TrimPlan { start: 0.0, end: 60.0, visible: false });
    }

    #[test]
    fn just_over_threshold_clamps_to_max() {
        assert_eq!(plan(62.3).end, 60.0);
        assert!(plan(60.05).visible);
        assert_eq!(plan(60.05).end, 60.0);
    }

    #[test]
    fn long_clip_window_is_bounded() {
        for d in [61.0, 90.0, 125.34, 3600.0, 1.0e7] {
            let p = plan(d);
            assert!(p.visible, "duration {d}");
            assert_eq!(p.start, 0.0);
            assert!((TRIM_MIN..=TRIM_MAX).contains(&p.end), "duration {d} → end {}", p.end);
        }
    }

    #[test]
    fn short_durations_truncate_to_one_decimal() {
        for (d, want) in [(0.0, 0.0), (0.09, 0.0), (4.99, 4.9), (12.345, 12.3), (59.99, 59.9)] {
            let p = plan(d);
            assert!(!p.visible);
            assert_eq!(p.end, want, "duration {d}");
        }
    }

    #[test]
    fn garbage_duration_plans_as_empty() {
        assert_eq!(plan(f64::NAN).end, 0.0);
        assert_eq!(plan(-3.0).end, 0.0);
        assert!(!plan(f64::INFINITY).visible);
    }

    #[test]
    fn plan_is_idempotent() {
        assert_eq!(plan(90.0), plan(90.0));
    }
}
