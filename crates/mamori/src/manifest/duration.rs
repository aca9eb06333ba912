use regex::Regex;
use std::sync::LazyLock;

// Only the time part of an xs:duration is accepted. Live windows expressed in
// days (or larger units) are not supported.
//
// Example: "PT2H", "PT1H30M", "PT7.5S"
static DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+(?:\.\d+)?)H)?(?:(\d+(?:\.\d+)?)M)?(?:(\d+(?:\.\d+)?)S)?$").unwrap()
});

/// Converts an ISO-8601 duration into seconds by summing its hour, minute and
/// second groups.
///
/// Returns `None` for anything that is not a pure time duration.
pub fn iso8601_to_seconds(duration: &str) -> Option<f64> {
    let caps = DURATION_REGEX.captures(duration.trim())?;

    let group = |index: usize| -> Option<f64> {
        match caps.get(index) {
            Some(m) => m.as_str().parse::<f64>().ok(),
            None => Some(0.),
        }
    };

    Some(group(1)? * 3600. + group(2)? * 60. + group(3)?)
}
