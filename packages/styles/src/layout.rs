//! Column width handling for layout containers.
//!
//! Layouts may be authored with relative weights (`"1fr"`, `"2fr"`). Email
//! clients have no equivalent unit, so weights are converted to percentage
//! strings before they reach either renderer.

use tracing::debug;

/// Convert weights to percentages: `weight / sum * 100`, two decimals
pub fn weights_to_percentages(weights: &[f64]) -> Vec<String> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return equal_widths(weights.len());
    }
    weights
        .iter()
        .map(|w| format!("{:.2}%", w / total * 100.0))
        .collect()
}

/// `n` equal percentage widths
pub fn equal_widths(n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    let share = 100.0 / n as f64;
    vec![format!("{:.2}%", share); n]
}

/// Parse `"2fr"` (or a bare number) as a relative weight
fn parse_weight(width: &str) -> Option<f64> {
    let trimmed = width.trim();
    let number = trimmed.strip_suffix("fr").unwrap_or(trimmed).trim();
    number.parse::<f64>().ok().filter(|w| *w >= 0.0 && w.is_finite())
}

/// Normalize authored column widths
///
/// When every entry is a relative weight the list is converted to
/// percentages; otherwise the widths are returned unchanged.
pub fn normalize_column_widths(widths: &[String]) -> Vec<String> {
    let relative = !widths.is_empty()
        && widths
            .iter()
            .all(|w| w.trim().ends_with("fr") && parse_weight(w).is_some());

    if !relative {
        return widths.to_vec();
    }

    let weights: Vec<f64> = widths.iter().filter_map(|w| parse_weight(w)).collect();
    debug!(?weights, "Converting relative column weights to percentages");
    weights_to_percentages(&weights)
}

/// Widths from a `"1:2:1"` pattern, if it parses
pub fn widths_from_pattern(pattern: &str) -> Option<Vec<String>> {
    let weights = pattern
        .split(':')
        .map(parse_weight)
        .collect::<Option<Vec<f64>>>()?;
    if weights.len() < 2 {
        return None;
    }
    Some(weights_to_percentages(&weights))
}

/// Parse a percentage string back into a number
pub fn parse_percentage(width: &str) -> Option<f64> {
    width.trim().strip_suffix('%')?.trim().parse().ok()
}

/// Rescale percentage widths so they sum to 100 again
///
/// Non-percentage entries make the list ambiguous; it is returned as-is.
pub fn rebalance_percentages(widths: &[String]) -> Vec<String> {
    let parsed: Option<Vec<f64>> = widths.iter().map(|w| parse_percentage(w)).collect();
    match parsed {
        Some(values) => weights_to_percentages(&values),
        None => widths.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_weights_to_percentages() {
        assert_eq!(
            weights_to_percentages(&[1.0, 2.0, 1.0]),
            strings(&["25.00%", "50.00%", "25.00%"])
        );
    }

    #[test]
    fn test_normalize_fr_units() {
        assert_eq!(
            normalize_column_widths(&strings(&["1fr", "2fr", "1fr"])),
            strings(&["25.00%", "50.00%", "25.00%"])
        );
        assert_eq!(
            normalize_column_widths(&strings(&["1fr", "2fr"])),
            strings(&["33.33%", "66.67%"])
        );
    }

    #[test]
    fn test_absolute_widths_pass_through() {
        let widths = strings(&["200px", "1fr"]);
        assert_eq!(normalize_column_widths(&widths), widths);
    }

    #[test]
    fn test_pattern() {
        assert_eq!(
            widths_from_pattern("1:2:1"),
            Some(strings(&["25.00%", "50.00%", "25.00%"]))
        );
        assert_eq!(widths_from_pattern("sidebar"), None);
        assert_eq!(widths_from_pattern("3"), None);
    }

    #[test]
    fn test_rebalance_after_removal() {
        assert_eq!(
            rebalance_percentages(&strings(&["25.00%", "25.00%"])),
            strings(&["50.00%", "50.00%"])
        );
    }

    #[test]
    fn test_zero_weights_fall_back_to_equal_split() {
        assert_eq!(weights_to_percentages(&[0.0, 0.0]), strings(&["50.00%", "50.00%"]));
    }
}
