use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Calendar-grid arithmetic on plain dates. Weeks start on Sunday.
pub trait NaiveDateExt {
    /// Sunday on or before this date.
    fn week_start(self) -> NaiveDate;
    /// Saturday on or after this date.
    fn week_end(self) -> NaiveDate;
    fn first_of_month(self) -> NaiveDate;
    fn last_of_month(self) -> NaiveDate;
    /// Shift by whole months, clamping the day to the target month's length.
    fn shift_months(self, delta: i32) -> NaiveDate;
    fn midnight(self) -> NaiveDateTime;
    /// 0 for Sunday through 6 for Saturday.
    fn column_from_sunday(self) -> u32;
}

impl NaiveDateExt for NaiveDate {
    fn week_start(self) -> NaiveDate {
        self - chrono::Duration::days(self.column_from_sunday() as i64)
    }

    fn week_end(self) -> NaiveDate {
        self + chrono::Duration::days(6 - self.column_from_sunday() as i64)
    }

    fn first_of_month(self) -> NaiveDate {
        self.with_day(1).unwrap_or(self)
    }

    fn last_of_month(self) -> NaiveDate {
        self.first_of_month()
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(self)
    }

    fn shift_months(self, delta: i32) -> NaiveDate {
        let months = Months::new(delta.unsigned_abs());
        let shifted = if delta >= 0 {
            self.checked_add_months(months)
        } else {
            self.checked_sub_months(months)
        };
        shifted.unwrap_or(self)
    }

    fn midnight(self) -> NaiveDateTime {
        self.and_time(NaiveTime::MIN)
    }

    fn column_from_sunday(self) -> u32 {
        self.weekday().num_days_from_sunday()
    }
}

pub trait NaiveDateTimeExt {
    /// Milliseconds since the epoch, reading the wall-clock value as UTC.
    fn epoch_millis(self) -> i64;
    fn minutes_since_midnight(self) -> u32;
    fn is_midnight(self) -> bool;
}

impl NaiveDateTimeExt for NaiveDateTime {
    fn epoch_millis(self) -> i64 {
        self.and_utc().timestamp_millis()
    }

    fn minutes_since_midnight(self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    fn is_midnight(self) -> bool {
        self.time() == NaiveTime::MIN
    }
}
