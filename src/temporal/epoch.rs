//! Human-readable labels for simulated time.

/// Era names keyed by exclusive upper bound in simulated years. First match wins.
const EPOCHS: [(f64, &str); 7] = [
    (1e3, "Present Era"),
    (1e4, "Holocene"),
    (1e5, "Late Pleistocene"),
    (1e6, "Pleistocene"),
    (1e7, "Neogene"),
    (1e8, "Paleogene"),
    (5e8, "Mesozoic"),
];

const DEEP_TIME_EPOCH: &str = "Paleozoic";

/// Named era for a simulated time.
pub fn epoch_name(time: f64) -> &'static str {
    EPOCHS
        .iter()
        .find(|(limit, _)| time < *limit)
        .map(|(_, name)| *name)
        .unwrap_or(DEEP_TIME_EPOCH)
}

/// Order-of-magnitude description of a simulated time.
///
/// `< 100` → whole years, `< 100_000` → thousands, `< 1_000_000` → millions
/// in tenths of `100_000`, else billions in tenths of `100_000_000`. The two
/// upper tiers are truncated (not rounded) to one decimal.
pub fn time_description(time: f64) -> String {
    let t = if time.is_finite() { time.max(0.0) } else { 0.0 };
    if t < 100.0 {
        format!("{} years", t.floor() as u64)
    } else if t < 100_000.0 {
        format!("{}K years", (t / 1_000.0).floor() as u64)
    } else if t < 1_000_000.0 {
        format!("{:.1}M years", truncate_tenths(t / 100_000.0))
    } else {
        format!("{:.1}B years", truncate_tenths(t / 100_000_000.0))
    }
}

fn truncate_tenths(v: f64) -> f64 {
    (v * 10.0).floor() / 10.0
}
