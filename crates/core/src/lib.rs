#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod time;
pub mod validation;

pub use error::Error;
pub use time::Clock;

/// `part / whole` as a percentage rounded half up; 0 when `whole` is 0.
#[must_use]
pub fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let rounded = (u64::from(part) * 200 + u64::from(whole)) / (u64::from(whole) * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::percent;

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent(3, 4), 75);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(0, 5), 0);
        assert_eq!(percent(5, 5), 100);
    }

    #[test]
    fn percent_of_nothing_is_zero() {
        assert_eq!(percent(0, 0), 0);
    }
}
