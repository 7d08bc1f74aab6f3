/// Seconds between the FILETIME epoch (1601-01-01) and the UNIX epoch
/// (1970-01-01).
const EPOCH_GAP_SECS: i64 = 11_644_473_600;

/// FILETIME ticks are 100 ns.
const TICKS_PER_SEC: i64 = 10_000_000;

/// Convert signed seconds plus nanoseconds since the UNIX epoch into a
/// Windows FILETIME.
///
/// The FILETIME domain starts at 1601, so stamps between 1601 and 1970
/// map to values below the UNIX-epoch constant. Sub-second precision is
/// kept at tick granularity.
pub fn windows_time(secs: i64, nanos: u32) -> u64 {
    ((EPOCH_GAP_SECS + secs) * TICKS_PER_SEC + (nanos / 100) as i64) as u64
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
