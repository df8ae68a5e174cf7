/// Round to two decimals, ties to even on the exact decimal value of the
/// float.
///
/// `0.7543 -> 0.75`, `0.125 -> 0.12` (0.125 is exact, so it is a true tie).
pub fn round_score(score: f64) -> f64 {
    let rendered = format!("{:.2}", score);
    rendered.parse().unwrap_or(score)
}

/// Render a score as its two-decimal rounded value with the shortest form
/// that keeps at least one fractional digit: `0.75`, `0.5`, `1.0`, `0.0`.
pub fn format_score(score: f64) -> String {
    // "{:.2}" は最も近い値へ丸める (同距離なら偶数側)
    let mut rendered = format!("{:.2}", score);
    if rendered.contains('.') {
        while rendered.ends_with('0') && !rendered.ends_with(".0") {
            rendered.pop();
        }
    }
    if rendered == "-0.0" {
        rendered.remove(0);
    }
    rendered
}
