use chrono::{DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Wire format for timestamps: RFC 3339 with exactly three fractional
/// digits, e.g. `2025-06-15T21:59:59.000Z`. The fixed width keeps the
/// store's lexicographic string comparison in agreement with instant order;
/// chrono's default emits variable sub-second precision, under which a
/// whole-second `...59Z` compares greater than `...59.999Z`.
pub fn to_wire(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Serde helpers applying [`to_wire`] to model date fields.
pub mod wire_time {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_wire(at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

/// [`wire_time`] for nullable date fields.
pub mod wire_time_opt {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        at: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match at {
            Some(at) => serializer.serialize_str(&super::to_wire(at)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map(|at| Some(at.with_timezone(&Utc)))
                .map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}

/// The week containing `today`, in the caller's wall-clock terms:
/// Monday 00:00:00.000 through Sunday 23:59:59.999. On a Sunday this steps
/// back six days rather than forward to the next Monday.
pub fn week_window(today: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let back = today.weekday().num_days_from_monday() as i64;
    let monday = today - Duration::days(back);
    let start = monday.and_hms_opt(0, 0, 0).unwrap();
    let end = (monday + Duration::days(6))
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap();
    (start, end)
}

/// Current week's window in local time, converted to UTC for use as an
/// inclusive range filter against stored timestamps.
pub fn current_week_window() -> (DateTime<Utc>, DateTime<Utc>) {
    let (start, end) = week_window(Local::now().date_naive());
    (local_to_utc(start), local_to_utc(end))
}

fn local_to_utc(dt: NaiveDateTime) -> DateTime<Utc> {
    match Local.from_local_datetime(&dt) {
        LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => t.with_timezone(&Utc),
        // A DST gap swallowed the wall-clock instant; read it as UTC.
        LocalResult::None => Utc.from_utc_datetime(&dt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn midweek_reference_date() {
        // Wednesday 2025-06-11.
        let (start, end) = week_window(date(2025, 6, 11));
        assert_eq!(start, date(2025, 6, 9).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(
            end,
            date(2025, 6, 15).and_hms_milli_opt(23, 59, 59, 999).unwrap()
        );
    }

    #[test]
    fn sunday_steps_back_six_days() {
        let (start, end) = week_window(date(2025, 6, 15));
        assert_eq!(start.date(), date(2025, 6, 9));
        assert_eq!(end.date(), date(2025, 6, 15));
    }

    #[test]
    fn monday_starts_its_own_week() {
        let (start, _) = week_window(date(2025, 6, 9));
        assert_eq!(start.date(), date(2025, 6, 9));
    }

    #[test]
    fn wire_format_has_fixed_millisecond_precision() {
        let whole_second = Utc.with_ymd_and_hms(2025, 6, 15, 21, 59, 59).unwrap();
        assert_eq!(to_wire(&whole_second), "2025-06-15T21:59:59.000Z");

        let nanos = whole_second + Duration::nanoseconds(123_456_789);
        assert_eq!(to_wire(&nanos), "2025-06-15T21:59:59.123Z");
    }

    #[test]
    fn wire_strings_order_like_the_instants_they_encode() {
        // A whole-second end date inside the week must not sort past the
        // .999 inclusive boundary under byte-wise comparison.
        let due = Utc.with_ymd_and_hms(2025, 6, 15, 21, 59, 59).unwrap();
        let window_end = Utc.with_ymd_and_hms(2025, 6, 15, 23, 59, 59).unwrap()
            + Duration::milliseconds(999);
        assert!(to_wire(&due) <= to_wire(&window_end));

        let same_second = Utc.with_ymd_and_hms(2025, 6, 15, 23, 59, 59).unwrap();
        assert!(to_wire(&same_second) <= to_wire(&window_end));
        assert!(to_wire(&window_end) > to_wire(&same_second));
    }
}
