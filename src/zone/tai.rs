/*
 * civiltime
 * The TAI leaf zone: no discontinuities, just Gregorian normalisation.
 * Grounded on cdatecalc.h's `system_gtai_offset`/`system_gtai_op`/
 * `system_gtai_diff`/`system_gtai_epoch`.
 */

use crate::calendar::{gregorian, CalendarRecord, NaturalFields, SystemTag};
use crate::errors::ZoneError;
use crate::interval::Interval;

use super::OpMode;

/// Always zero: TAI has no discontinuities to correct for.
pub(crate) fn offset(src: &CalendarRecord) -> Result<NaturalFields, ZoneError> {
    if src.system != SystemTag::Tai {
        return Err(ZoneError::NotMySystem);
    }
    Ok(NaturalFields::default())
}

/// Field-wise add/subtract then normalise, checking `src` is tagged TAI.
pub(crate) fn op(
    src: &CalendarRecord,
    delta: NaturalFields,
    mode: OpMode,
) -> Result<CalendarRecord, ZoneError> {
    if src.system != SystemTag::Tai {
        return Err(ZoneError::NotMySystem);
    }
    Ok(op_untagged(src, delta, mode, SystemTag::Tai))
}

/// The same normalisation, but without checking `src.system` and tagging
/// the result `tag` instead of TAI. Higher zones reuse this to drive their
/// own field-wise arithmetic through TAI's normaliser "as if" the systems
/// matched, per §4.2's description of `COMPLEX_ADD`.
pub(crate) fn op_untagged(
    src: &CalendarRecord,
    delta: NaturalFields,
    mode: OpMode,
    tag: SystemTag,
) -> CalendarRecord {
    let base = src.natural();
    let combined = if mode == OpMode::Subtract {
        base.sub(delta)
    } else {
        base.add(delta)
    };
    gregorian::normalize(combined, tag)
}

pub(crate) fn epoch() -> CalendarRecord {
    CalendarRecord::new(1958, 0, 1, 0, 0, 0, 0, SystemTag::Tai)
}

/// Elapsed seconds from `a` to `b`, walking one day at a time.
///
/// Recomputes whether the walking cursor's year is a leap year on every
/// day it steps (via [`gregorian::days_in_month`]), which resolves the
/// specification's note on recomputing leap status exactly when the
/// cursor crosses a year boundary.
pub(crate) fn diff(a: &CalendarRecord, b: &CalendarRecord) -> Result<Interval, ZoneError> {
    if a.system != SystemTag::Tai || b.system != SystemTag::Tai {
        return Err(ZoneError::NotMySystem);
    }
    if a > b {
        let iv = diff(b, a)?;
        return Ok(-iv);
    }
    let (before, after) = (a, b);

    let mut seconds: i64 = 0;
    let mut cur_year = before.year;
    let mut cur_month = before.month as i32;
    let mut cur_day = before.mday as i32;

    while !(cur_year == after.year && cur_month == after.month as i32 && cur_day == after.mday as i32) {
        seconds += 86_400;
        cur_day += 1;
        let days_in = gregorian::days_in_month(cur_year, cur_month);
        if cur_day > days_in {
            cur_day = 1;
            cur_month += 1;
            if cur_month >= 12 {
                cur_month = 0;
                cur_year += 1;
            }
        }
    }

    seconds += 3600 * (after.hour as i64 - before.hour as i64);
    seconds += 60 * (after.minute as i64 - before.minute as i64);
    seconds += after.second as i64 - before.second as i64;
    let ns = after.ns as i64 - before.ns as i64;

    Ok(Interval::new(seconds, ns as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_always_zero() {
        let c = CalendarRecord::new(2000, 0, 1, 0, 0, 0, 0, SystemTag::Tai);
        assert_eq!(offset(&c).unwrap(), NaturalFields::default());
    }

    #[test]
    fn diff_sign_matches_direction() {
        let a = CalendarRecord::new(2000, 0, 1, 0, 0, 0, 0, SystemTag::Tai);
        let b = CalendarRecord::new(2000, 0, 2, 0, 0, 0, 0, SystemTag::Tai);
        assert_eq!(diff(&a, &b).unwrap(), Interval::new(86_400, 0));
        assert_eq!(diff(&b, &a).unwrap(), Interval::new(-86_400, 0));
    }

    #[test]
    fn e3_month_boundary_leap_vs_non_leap() {
        let before = CalendarRecord::new(1975, 1, 28, 23, 59, 0, 0, SystemTag::Tai);
        let after = CalendarRecord::new(1975, 2, 1, 0, 0, 0, 0, SystemTag::Tai);
        assert_eq!(diff(&before, &after).unwrap(), Interval::new(60, 0));

        let before_leap = CalendarRecord::new(1976, 1, 28, 23, 59, 0, 0, SystemTag::Tai);
        let after_leap = CalendarRecord::new(1976, 2, 1, 0, 0, 0, 0, SystemTag::Tai);
        assert_eq!(diff(&before_leap, &after_leap).unwrap(), Interval::new(86_460, 0));
    }
}
