//! Id generation for new asset keys.
//!
//! Ids are short time-based integers: the last five digits of the current epoch
//! milliseconds multiplied by a random factor. They are not guaranteed unique; the
//! collision probability within one folder and base name is low enough for upload keys.

use chrono::Utc;
use rand::Rng;

const MILLIS_WINDOW: i64 = 100_000;
const MAX_MULTIPLIER: f64 = 1000.0;

/// Source of fresh numeric ids.
pub trait IdSource {
    fn next_id(&self) -> u64;
}

/// Default [`IdSource`]: time fraction times a random multiplier.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortRandom;

impl IdSource for ShortRandom {
    fn next_id(&self) -> u64 {
        let millis = Utc::now().timestamp_millis().rem_euclid(MILLIS_WINDOW).max(1);
        let multiplier: f64 = rand::rng().random_range(1.0..MAX_MULTIPLIER);
        (millis as f64 * multiplier).floor() as u64
    }
}

/// Produce an id string, prefixed with `prefix` when one is given.
pub fn generate_id(prefix: Option<&str>, ids: &impl IdSource) -> String {
    let id = ids.next_id();
    match prefix {
        Some(prefix) => format!("{}{}", prefix, id),
        None => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u64);

    impl IdSource for Fixed {
        fn next_id(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn short_random_is_positive_and_bounded() {
        for _ in 0..200 {
            let id = ShortRandom.next_id();
            assert!(id >= 1);
            assert!(id < (MILLIS_WINDOW as u64) * (MAX_MULTIPLIER as u64));
        }
    }

    #[test]
    fn prefix_is_prepended() {
        assert_eq!(generate_id(Some("A"), &Fixed(123)), "A123");
        assert_eq!(generate_id(None, &Fixed(123)), "123");
    }
}
