pub const RATING_MIN: f32 = 0.5;
pub const RATING_MAX: f32 = 10.0;

/// Ratings move in half-point steps between 0.5 and 10.
pub fn is_valid_rating(value: f32) -> bool {
    if !(RATING_MIN..=RATING_MAX).contains(&value) {
        return false;
    }
    let doubled = value * 2.0;
    (doubled - doubled.round()).abs() < 1e-3
}

/// Backend payloads are parsed tolerantly: an out-of-contract rating is
/// dropped to `None` rather than failing the record.
pub fn normalize_rating(value: Option<f32>) -> Option<f32> {
    value.filter(|v| is_valid_rating(*v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_point_steps_are_valid() {
        assert!(is_valid_rating(0.5));
        assert!(is_valid_rating(7.0));
        assert!(is_valid_rating(7.5));
        assert!(is_valid_rating(10.0));
    }

    #[test]
    fn test_out_of_range_or_off_step_is_invalid() {
        assert!(!is_valid_rating(0.0));
        assert!(!is_valid_rating(0.3));
        assert!(!is_valid_rating(7.25));
        assert!(!is_valid_rating(10.5));
        assert!(!is_valid_rating(-1.0));
    }

    #[test]
    fn test_normalize_rating_drops_invalid() {
        assert_eq!(normalize_rating(Some(8.5)), Some(8.5));
        assert_eq!(normalize_rating(Some(11.0)), None);
        assert_eq!(normalize_rating(None), None);
    }
}
