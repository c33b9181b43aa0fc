/*
 * civiltime
 * The UTC leap-second table, as data, plus the table-search algorithm
 * that reads the active UTC-minus-TAI offset for a given reading.
 * Grounded on cdatecalc.h's `utc_lookup_table` and `system_utc_offset`.
 */

use core::cmp::Ordering;

use crate::calendar::{CalendarRecord, SystemTag};
use crate::errors::ZoneError;
use crate::interval::Interval;

use super::{tai, OpMode};

/// One row of the table: the UTC instant at which a new `UTC - TAI`
/// offset takes effect, and that offset.
struct LeapRow {
    year: i32,
    month: u8,
    mday: u8,
    hour: u8,
    minute: u8,
    second: u8,
    s: i64,
    ns: i32,
}

impl LeapRow {
    const fn new(
        year: i32,
        month: u8,
        mday: u8,
        hour: u8,
        minute: u8,
        second: u8,
        s: i64,
        ns: i32,
    ) -> Self {
        Self {
            year,
            month,
            mday,
            hour,
            minute,
            second,
            s,
            ns,
        }
    }

    fn when(&self) -> CalendarRecord {
        CalendarRecord::new(
            self.year,
            self.month,
            self.mday,
            self.hour,
            self.minute,
            self.second,
            0,
            SystemTag::Utc,
        )
    }

    fn utc_minus_tai(&self) -> Interval {
        Interval::new(self.s, self.ns)
    }
}

/// Entries below this index are pre-1972 sync points, not leap seconds.
pub(crate) const MIN_LEAP_SECOND_INDEX: usize = 3;

/// Index 0 is a sentinel never read (the search loop starts at 1), kept so
/// the table mirrors the reference's layout. Index 21 (1997-06) is
/// corrected from the reference's transcription bug (`-331` there reads
/// as `-31`); see the Open Question note in DESIGN.md.
const TABLE: [LeapRow; 27] = [
    LeapRow::new(0, 0, 1, 0, 0, 0, 0, 0),
    LeapRow::new(1961, 0, 1, 0, 0, 0, -1, -422_818_000),
    LeapRow::new(1972, 0, 1, 0, 0, 0, -10, 0),
    LeapRow::new(1972, 5, 30, 23, 59, 59, -11, 0),
    LeapRow::new(1972, 11, 31, 23, 59, 59, -12, 0),
    LeapRow::new(1973, 11, 31, 23, 59, 59, -13, 0),
    LeapRow::new(1974, 11, 31, 23, 59, 59, -14, 0),
    LeapRow::new(1975, 11, 31, 23, 59, 59, -15, 0),
    LeapRow::new(1976, 11, 31, 23, 59, 59, -16, 0),
    LeapRow::new(1977, 11, 31, 23, 59, 59, -17, 0),
    LeapRow::new(1978, 11, 31, 23, 59, 59, -18, 0),
    LeapRow::new(1979, 11, 31, 23, 59, 59, -19, 0),
    LeapRow::new(1981, 5, 30, 23, 59, 59, -20, 0),
    LeapRow::new(1982, 5, 30, 23, 59, 59, -21, 0),
    LeapRow::new(1983, 5, 30, 23, 59, 59, -22, 0),
    LeapRow::new(1985, 5, 30, 23, 59, 59, -23, 0),
    LeapRow::new(1987, 11, 31, 23, 59, 59, -24, 0),
    LeapRow::new(1989, 11, 31, 23, 59, 59, -25, 0),
    LeapRow::new(1990, 11, 31, 23, 59, 59, -26, 0),
    LeapRow::new(1992, 5, 30, 23, 59, 59, -27, 0),
    LeapRow::new(1993, 5, 30, 23, 59, 59, -28, 0),
    LeapRow::new(1994, 5, 30, 23, 59, 59, -29, 0),
    LeapRow::new(1995, 11, 31, 23, 59, 59, -30, 0),
    LeapRow::new(1997, 5, 30, 23, 59, 59, -31, 0),
    LeapRow::new(1998, 11, 31, 23, 59, 59, -32, 0),
    LeapRow::new(2005, 11, 31, 23, 59, 59, -33, 0),
    LeapRow::new(2008, 11, 31, 23, 59, 59, -34, 0),
];

fn table() -> &'static [LeapRow] {
    &TABLE
}

/// True iff `candidate` (with `ns` already cleared by the caller) lands
/// exactly on a leap-second row's `when`, i.e. a leap second immediately
/// follows.
pub(crate) fn is_leap_boundary(candidate: &CalendarRecord) -> bool {
    let rows = table();
    for row in &rows[MIN_LEAP_SECOND_INDEX..] {
        match candidate.cmp(&row.when()) {
            Ordering::Equal => return true,
            Ordering::Less => break,
            Ordering::Greater => {}
        }
    }
    false
}

/// Finds the active `UTC - TAI` offset for `src`, which must be tagged
/// TAI or UTC. Handles landing exactly on a table row (the row whose
/// `when` matches applies) and a `second = 60` reading (read as `59` for
/// the lookup).
pub(crate) fn active_offset(src: &CalendarRecord) -> Result<Interval, ZoneError> {
    match src.system {
        SystemTag::Tai | SystemTag::Utc => {}
        _ => return Err(ZoneError::NotMySystem),
    }
    let src_tai = src.system == SystemTag::Tai;

    let mut chosen = Interval::ZERO;
    let rows = table();

    for i in 1..rows.len() {
        let row = &rows[i];
        let mut current_leap = false;

        let utcsrc = if src_tai {
            let off = row.utc_minus_tai();
            let delta = crate::calendar::NaturalFields {
                second: off.seconds() as i32,
                ns: off.nanoseconds() as i64,
                ..Default::default()
            };
            tai::op_untagged(src, delta, OpMode::ZoneAdd, SystemTag::Utc)
        } else {
            *src
        };

        let mut to_cmp = utcsrc;
        to_cmp.ns = 0;
        if to_cmp.second == 60 {
            current_leap = true;
            to_cmp.second = 59;
        }

        match to_cmp.cmp(&row.when()) {
            Ordering::Less => break,
            Ordering::Equal => {
                let is_leap_second = !current_leap
                    && i >= MIN_LEAP_SECOND_INDEX
                    && rows[i - 1].utc_minus_tai() > row.utc_minus_tai();
                if !is_leap_second && utcsrc.ns != 0 {
                    chosen = row.utc_minus_tai();
                }
                break;
            }
            Ordering::Greater => {
                chosen = row.utc_minus_tai();
            }
        }
    }

    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_deltas_never_jump_more_than_a_second_past_the_sync_rows() {
        for i in MIN_LEAP_SECOND_INDEX + 1..TABLE.len() {
            let prev = TABLE[i - 1].utc_minus_tai();
            let cur = TABLE[i].utc_minus_tai();
            let delta = (cur.seconds() - prev.seconds()).abs();
            assert!(
                delta <= 1,
                "row {i} jumps by {delta}s from the previous row (transcription bug?)"
            );
        }
    }

    #[test]
    fn offset_before_1961_is_zero() {
        let c = CalendarRecord::new(1960, 0, 1, 0, 0, 0, 0, SystemTag::Tai);
        assert_eq!(active_offset(&c).unwrap(), Interval::ZERO);
    }

    #[test]
    fn offset_after_1972_harmonisation() {
        let c = CalendarRecord::new(1972, 0, 2, 0, 0, 0, 0, SystemTag::Tai);
        assert_eq!(active_offset(&c).unwrap(), Interval::new(-10, 0));
    }
}
