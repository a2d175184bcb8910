//! Human-readable rendering of minute durations.

/// Minutes in an hour.
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Format a duration in minutes as "X hours and Y minutes".
///
/// The value is rounded to the nearest whole minute first. Negative and
/// non-finite inputs render as zero minutes.
///
/// # Examples
/// ```
/// use tripwise_core::format_minutes;
///
/// assert_eq!(format_minutes(1.0), "1 minute");
/// assert_eq!(format_minutes(45.4), "45 minutes");
/// assert_eq!(format_minutes(120.0), "2 hours");
/// assert_eq!(format_minutes(61.0), "1 hour and 1 minute");
/// assert_eq!(format_minutes(150.0), "2 hours and 30 minutes");
/// ```
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "splitting whole minutes into hours and minutes is integer arithmetic"
)]
#[must_use]
pub fn format_minutes(minutes: f64) -> String {
    let total = whole_minutes(minutes);
    let hours = total / 60;
    let remainder = total % 60;
    match (hours, remainder) {
        (0, m) => plural(m, "minute"),
        (h, 0) => plural(h, "hour"),
        (h, m) => format!("{} and {}", plural(h, "hour"), plural(m, "minute")),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is rounded, finite and non-negative before the cast"
)]
fn whole_minutes(minutes: f64) -> u64 {
    if !minutes.is_finite() || minutes <= 0.0 {
        return 0;
    }
    minutes.round() as u64
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
