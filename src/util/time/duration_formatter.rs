use std::time::Duration;

/// Renders a duration the way humans read uptimes and timings:
/// `1d 2h 3m 4s`, `12.345ms`, `870µs`.
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();

    if total_secs == 0 {
        let micros = duration.as_micros();
        if micros >= 1000 {
            return format!("{:.3}ms", duration.as_secs_f64() * 1000.0);
        }
        return format!("{micros}µs");
    }

    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;

    let mut parts: Vec<String> = Vec::with_capacity(4);
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{seconds}s"));
    }

    parts.join(" ")
}
