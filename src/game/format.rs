//! Display formatting for large numbers, rates and play time.

const SUFFIXES: &[(f64, &str)] = &[
    (1_000_000_000_000.0, "T"),
    (1_000_000_000.0, "B"),
    (1_000_000.0, "M"),
    (1_000.0, "K"),
];

/// Compact number: `1.5K`, `2.0M`, `3.1T`; plain below a thousand.
pub fn format_number(n: f64) -> String {
    for &(scale, suffix) in SUFFIXES {
        if n >= scale {
            return format!("{:.1}{}", n / scale, suffix);
        }
    }
    if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        format!("{:.1}", n)
    }
}

/// Commits-per-second with two decimals once it reaches the thousands.
pub fn format_cps(cps: f64) -> String {
    if cps >= 1_000_000.0 {
        format!("{:.2}M", cps / 1_000_000.0)
    } else if cps >= 1_000.0 {
        format!("{:.2}K", cps / 1_000.0)
    } else {
        format!("{:.1}", cps)
    }
}

/// Play time as `1h 5m`, `4m 12s` or `9s`.
pub fn format_play_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_format_number_no_panic(n in -1e15f64..1e15) {
            let _ = format_number(n);
        }

        #[test]
        fn prop_small_integers_print_verbatim(n in 0u32..1_000) {
            prop_assert_eq!(format_number(n as f64), n.to_string());
        }

        #[test]
        fn prop_thousands_carry_suffix(n in 1_000.0f64..1e15) {
            let s = format_number(n);
            prop_assert!(s.ends_with(['K', 'M', 'B', 'T']), "got: {}", s);
        }

        #[test]
        fn prop_play_time_under_a_minute_is_seconds_only(secs in 0.0f64..60.0) {
            let s = format_play_time(secs);
            prop_assert_eq!(s, format!("{}s", secs.floor() as u64));
        }

        #[test]
        fn prop_play_time_hours_drop_seconds(secs in 3_600.0f64..1e7) {
            let s = format_play_time(secs);
            prop_assert!(s.contains('h') && !s.ends_with('s'), "got: {}", s);
        }
    }
}
