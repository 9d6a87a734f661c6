use std::time::Duration;

/// Whole milliseconds of `d`, saturating.
pub(crate) fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Awaits `call` for at most `limit`; `Err` carries the limit in milliseconds.
pub(crate) async fn within<T>(limit: Duration, call: impl Future<Output = T>) -> Result<T, u64> {
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| millis(limit))
}
