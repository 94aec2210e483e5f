use std::sync::OnceLock;

use regex::Regex;

/// Format elapsed seconds as H:MM:SS, hours unpadded.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds as u64;
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    format!("{}:{:02}:{:02}", hours, mins, secs)
}

fn clock_pattern() -> &'static Regex {
    static CLOCK: OnceLock<Regex> = OnceLock::new();
    CLOCK.get_or_init(|| Regex::new(r"\d{1,2}:\d{2}(?::\d{2})?").expect("valid clock pattern"))
}

/// Remove clock-like fragments (H:MM:SS or H:MM) that the model sometimes
/// echoes back into a summary.
pub fn strip_clock_fragments(text: &str) -> String {
    clock_pattern().replace_all(text, "").trim().to_string()
}

/// Assemble the final timecode line for a chunk.
pub fn polish_timecode(start_time: f64, description: &str) -> String {
    let description = strip_clock_fragments(description);
    let description = description.trim_end_matches('.');
    let line = format!("{} - {}", format_timestamp(start_time), description)
        .replace('\n', " ")
        .replace('"', "")
        .replace(" - -", " -");
    line.trim_end_matches('.').to_string()
}
