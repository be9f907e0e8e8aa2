/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as record ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at connector scale)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Format a millisecond timestamp the way the Ordable API expects
/// (`%Y-%m-%dT%H:%M`, minute precision, UTC).
pub fn format_expected_time(millis: i64) -> String {
    use chrono::{DateTime, Utc};
    let dt = DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_else(Utc::now);
    dt.format("%Y-%m-%dT%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowflake_ids_are_positive() {
        let id = snowflake_id();
        assert!(id > 0);
        assert!(id < (1i64 << 53), "must stay within JS safe integer range");
    }

    #[test]
    fn expected_time_has_minute_precision() {
        // 2024-01-02 03:04:05 UTC
        let ts = 1_704_164_645_000;
        assert_eq!(format_expected_time(ts), "2024-01-02T03:04");
    }
}
