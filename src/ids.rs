//! Collision-free local ids derived from the wall clock.

use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Returns the current epoch milliseconds, bumped past the previously issued id
pub fn next_timestamp_id() -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_ID.compare_exchange_weak(last, next, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_strictly_increase() {
        let ids: Vec<i64> = (0..1000).map(|_| next_timestamp_id()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
