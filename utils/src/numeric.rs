//! Numeric helpers for reported values.

/// Round `value` to `places` decimal places (half away from zero).
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Round to three decimals, the precision every reported figure uses.
pub fn round3(value: f64) -> f64 {
    round_to(value, 3)
}

/// Arithmetic mean, or `None` for an empty sequence.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_three_places() {
        assert_eq!(round3(0.66666), 0.667);
        assert_eq!(round3(0.9), 0.9);
        assert_eq!(round3(1.0), 1.0);
        assert_eq!(round_to(2.345, 1), 2.3);
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([1.0, 2.0, 3.0]), Some(2.0));
    }
}
