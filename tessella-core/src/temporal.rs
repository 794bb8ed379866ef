//! Packed temporal values for XSD date, time, dateTime, and dateTimeStamp
//!
//! All four temporal categories inline their calendar components and the
//! timezone into the 56-bit `ObjectId` payload:
//!
//! ```text
//! bits 38..55  year    (18 bits, biased by +131072)
//! bits 34..37  month   (4 bits)
//! bits 29..33  day     (5 bits)
//! bits 24..28  hour    (5 bits)
//! bits 18..23  minute  (6 bits)
//! bits 12..17  second  (6 bits, whole seconds)
//! bits  0..11  tz      (12 bits: 0 = absent, else minutes-east + 841)
//! ```
//!
//! Comparison is bit comparison on the `ObjectId` (term equality); value
//! ordering across timezones is a query-layer concern.

use crate::error::{EngineError, Result};
use crate::object_id::{
    ObjectId, MASK_DT_DATE, MASK_DT_DATETIME, MASK_DT_DATETIMESTAMP, MASK_DT_TIME,
};
use chrono::{NaiveDate, NaiveTime};
use std::fmt::Write as _;
use tessella_vocab::xsd;

const TZ_BITS: u32 = 12;
const SECOND_SHIFT: u32 = 12;
const MINUTE_SHIFT: u32 = 18;
const HOUR_SHIFT: u32 = 24;
const DAY_SHIFT: u32 = 29;
const MONTH_SHIFT: u32 = 34;
const YEAR_SHIFT: u32 = 38;

const YEAR_BIAS: i64 = 1 << 17;
const TZ_BIAS: i64 = 841;

/// Largest timezone offset XSD allows, in minutes (±14:00).
const TZ_MAX_MINUTES: i32 = 14 * 60;

/// Which temporal category an `ObjectId` carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TemporalKind {
    Date,
    Time,
    DateTime,
    DateTimeStamp,
}

/// Decoded temporal value.
///
/// Produced from a temporal `ObjectId`; renders both the canonical lexical
/// form and the datatype IRI for serialization, and exposes the timezone
/// designator for the TZ built-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateTime {
    kind: TemporalKind,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    /// Minutes east of UTC; `None` when the lexical form had no timezone.
    tz_minutes: Option<i32>,
}

impl DateTime {
    /// Decode a temporal `ObjectId`.
    pub fn from_id(oid: ObjectId) -> Result<Self> {
        let kind = match oid.get_type() {
            MASK_DT_DATE => TemporalKind::Date,
            MASK_DT_TIME => TemporalKind::Time,
            MASK_DT_DATETIME => TemporalKind::DateTime,
            MASK_DT_DATETIMESTAMP => TemporalKind::DateTimeStamp,
            other => {
                return Err(EngineError::TypeTag {
                    tag: (other >> 56) as u8,
                    context: "DateTime::from_id",
                })
            }
        };

        let v = oid.get_value();
        let tz_raw = v & ((1 << TZ_BITS) - 1);
        let tz_minutes = if tz_raw == 0 {
            None
        } else {
            Some((tz_raw as i64 - TZ_BIAS) as i32)
        };

        Ok(Self {
            kind,
            year: (((v >> YEAR_SHIFT) & 0x3FFFF) as i64 - YEAR_BIAS) as i32,
            month: ((v >> MONTH_SHIFT) & 0xF) as u32,
            day: ((v >> DAY_SHIFT) & 0x1F) as u32,
            hour: ((v >> HOUR_SHIFT) & 0x1F) as u32,
            minute: ((v >> MINUTE_SHIFT) & 0x3F) as u32,
            second: ((v >> SECOND_SHIFT) & 0x3F) as u32,
            tz_minutes,
        })
    }

    // ---- Packing ----

    /// Pack an xsd:date.
    pub fn pack_date(year: i32, month: u32, day: u32, tz_minutes: Option<i32>) -> Result<ObjectId> {
        validate_date(year, month, day)?;
        let payload = pack_components(year, month, day, 0, 0, 0, tz_minutes)?;
        Ok(ObjectId(MASK_DT_DATE | payload))
    }

    /// Pack an xsd:time.
    pub fn pack_time(
        hour: u32,
        minute: u32,
        second: u32,
        tz_minutes: Option<i32>,
    ) -> Result<ObjectId> {
        validate_time(hour, minute, second)?;
        let payload = pack_components(0, 0, 0, hour, minute, second, tz_minutes)?;
        Ok(ObjectId(MASK_DT_TIME | payload))
    }

    /// Pack an xsd:dateTime.
    #[allow(clippy::too_many_arguments)]
    pub fn pack_datetime(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        tz_minutes: Option<i32>,
    ) -> Result<ObjectId> {
        validate_date(year, month, day)?;
        validate_time(hour, minute, second)?;
        let payload = pack_components(year, month, day, hour, minute, second, tz_minutes)?;
        Ok(ObjectId(MASK_DT_DATETIME | payload))
    }

    /// Pack an xsd:dateTimeStamp. The timezone is required by the datatype.
    #[allow(clippy::too_many_arguments)]
    pub fn pack_datetime_stamp(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        tz_minutes: i32,
    ) -> Result<ObjectId> {
        validate_date(year, month, day)?;
        validate_time(hour, minute, second)?;
        let payload = pack_components(year, month, day, hour, minute, second, Some(tz_minutes))?;
        Ok(ObjectId(MASK_DT_DATETIMESTAMP | payload))
    }

    // ---- Accessors ----

    pub fn kind(&self) -> TemporalKind {
        self.kind
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    /// The timezone designator: `""` when absent, `"Z"` for UTC, otherwise
    /// `"+HH:MM"` / `"-HH:MM"`.
    pub fn tz_designator(&self) -> String {
        match self.tz_minutes {
            None => String::new(),
            Some(0) => "Z".to_string(),
            Some(minutes) => {
                let sign = if minutes < 0 { '-' } else { '+' };
                let abs = minutes.unsigned_abs();
                format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
        }
    }

    /// Canonical lexical form for the category, timezone designator
    /// appended.
    pub fn value_string(&self) -> String {
        let mut out = String::with_capacity(32);
        match self.kind {
            TemporalKind::Date => self.write_date(&mut out),
            TemporalKind::Time => self.write_time(&mut out),
            TemporalKind::DateTime | TemporalKind::DateTimeStamp => {
                self.write_date(&mut out);
                out.push('T');
                self.write_time(&mut out);
            }
        }
        out.push_str(&self.tz_designator());
        out
    }

    /// Datatype IRI of the category.
    pub fn datatype_iri(&self) -> &'static str {
        match self.kind {
            TemporalKind::Date => xsd::DATE,
            TemporalKind::Time => xsd::TIME,
            TemporalKind::DateTime => xsd::DATE_TIME,
            TemporalKind::DateTimeStamp => xsd::DATE_TIME_STAMP,
        }
    }

    fn write_date(&self, out: &mut String) {
        if self.year < 0 {
            out.push('-');
        }
        let _ = write!(
            out,
            "{:04}-{:02}-{:02}",
            self.year.unsigned_abs(),
            self.month,
            self.day
        );
    }

    fn write_time(&self, out: &mut String) {
        let _ = write!(out, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second);
    }
}

fn validate_date(year: i32, month: u32, day: u32) -> Result<()> {
    if year as i64 >= YEAR_BIAS || (year as i64) < -YEAR_BIAS {
        return Err(EngineError::OutOfRange(format!("year {}", year)));
    }
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| EngineError::OutOfRange(format!("date {}-{}-{}", year, month, day)))?;
    Ok(())
}

fn validate_time(hour: u32, minute: u32, second: u32) -> Result<()> {
    NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| EngineError::OutOfRange(format!("time {}:{}:{}", hour, minute, second)))?;
    Ok(())
}

fn pack_components(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    tz_minutes: Option<i32>,
) -> Result<u64> {
    let tz_raw = match tz_minutes {
        None => 0u64,
        Some(minutes) => {
            if minutes.abs() > TZ_MAX_MINUTES {
                return Err(EngineError::OutOfRange(format!("timezone {} minutes", minutes)));
            }
            (minutes as i64 + TZ_BIAS) as u64
        }
    };

    Ok(((year as i64 + YEAR_BIAS) as u64) << YEAR_SHIFT
        | (month as u64) << MONTH_SHIFT
        | (day as u64) << DAY_SHIFT
        | (hour as u64) << HOUR_SHIFT
        | (minute as u64) << MINUTE_SHIFT
        | (second as u64) << SECOND_SHIFT
        | tz_raw)
}
