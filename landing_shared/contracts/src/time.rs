use chrono::{DateTime, SecondsFormat, Utc};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TimeService: Send + Sync + 'static {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

#[cfg(feature = "mock")]
impl MockTimeService {
    pub fn with_now(mut self, time: DateTime<Utc>) -> Self {
        self.expect_now().once().return_const(time);
        self
    }
}

/// Formats `time` as an ISO 8601 timestamp with millisecond precision in UTC,
/// e.g. `2024-07-13T09:41:07.123Z`.
pub fn iso_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn format_iso_timestamp() {
        let time = Utc.with_ymd_and_hms(2024, 7, 13, 9, 41, 7).unwrap()
            + chrono::Duration::milliseconds(123);
        assert_eq!(iso_timestamp(time), "2024-07-13T09:41:07.123Z");
    }
}
