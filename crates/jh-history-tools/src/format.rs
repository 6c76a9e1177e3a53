//! Pure response formatters: humanizers and counter-group flattening.

use chrono::{Local, LocalResult, TimeZone};
use serde_json::Value;

/// Render a millisecond epoch timestamp as local calendar time.
///
/// Zero, negative, or unrepresentable values render `"N/A"`; the history
/// server reports 0 for phases that never happened.
pub fn format_timestamp(ms: i64) -> String {
    if ms <= 0 {
        return "N/A".into();
    }
    match Local.timestamp_millis_opt(ms) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
            dt.format("%Y-%m-%d %H:%M:%S").to_string()
        }
        LocalResult::None => "N/A".into(),
    }
}

/// Render a millisecond duration in up to three tiers: seconds below one
/// minute, minutes+seconds below one hour, hours+minutes+seconds above.
/// Integer truncation, not rounding.
pub fn format_duration(ms: i64) -> String {
    if ms <= 0 {
        return "N/A".into();
    }
    let seconds = ms / 1000;
    if seconds < 60 {
        format!("{seconds}s")
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else {
        format!(
            "{}h {}m {}s",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }
}

/// Render a byte count scaled by powers of 1024 through B..PB.
///
/// Negative counts render `"0 B"`. Below 1024 the value is an integer,
/// above it two decimal places.
pub fn format_bytes(bytes: i64) -> String {
    if bytes <= 0 {
        return "0 B".into();
    }
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", value as i64, UNITS[unit])
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

/// Group digits of an integer with commas (counter values get large).
pub fn with_commas(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i % 3) == lead % 3 && i >= lead {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// The three alternative keys counter groups live under, by resource level.
/// One discriminated accessor, tried in priority order.
const GROUP_KEYS: [&str; 3] = ["counterGroup", "taskCounterGroup", "taskAttemptCounterGroup"];

fn counter_groups(data: &Value) -> &[Value] {
    for key in GROUP_KEYS {
        if let Some(groups) = data.get(key).and_then(Value::as_array) {
            return groups;
        }
    }
    &[]
}

/// Flatten a counters payload (job, task, or attempt level) into markdown.
///
/// Group display names drop everything up to the last dot of the fully
/// qualified class name. Counter totals prefer `totalCounterValue`, fall
/// back to `value`, default 0; map/reduce side values are appended
/// parenthetically when both are present.
pub fn format_counters(data: &Value, title: &str) -> String {
    let mut lines = vec![format!("# {title}"), String::new()];

    for group in counter_groups(data) {
        let group_name = group["counterGroupName"].as_str().unwrap_or("Unknown Group");
        let short_name = match group_name.rsplit_once('.') {
            Some((_, tail)) => tail,
            None => group_name,
        };
        lines.push(format!("## {short_name}"));
        lines.push(String::new());

        for counter in group["counter"].as_array().map(Vec::as_slice).unwrap_or(&[]) {
            let name = counter["name"].as_str().unwrap_or("Unknown");
            let total = counter["totalCounterValue"]
                .as_i64()
                .or_else(|| counter["value"].as_i64())
                .unwrap_or(0);
            let map_value = counter["mapCounterValue"].as_i64();
            let reduce_value = counter["reduceCounterValue"].as_i64();

            match (map_value, reduce_value) {
                (Some(m), Some(r)) => lines.push(format!(
                    "- **{name}**: {} (Map: {}, Reduce: {})",
                    with_commas(total),
                    with_commas(m),
                    with_commas(r)
                )),
                _ => lines.push(format!("- **{name}**: {}", with_commas(total))),
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
