/// Clock-style rendering of a second count: `mm:ss`, or `h:mm:ss` past the hour.
pub fn format_elapsed(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", m, s)
    }
}

/// Half-up rounding of a percentage for progress labels.
pub fn round_percent(value: f64) -> u16 {
    value.clamp(0.0, 100.0).round() as u16
}
