/*
 * civiltime
 * The last-Sunday-in-March/October summer-time overlay on UTC.
 * Grounded on cdatecalc.h's `system_bst_offset`/`system_bst_op`/`is_bst`.
 */

use crate::calendar::{gregorian, CalendarRecord, NaturalFields, SystemTag};
use crate::errors::ZoneError;
use crate::weekday::Weekday;

use super::{negate, utc, OpMode};

const MARCH: u8 = 2;
const OCTOBER: u8 = 9;

/// Whether summer time is in effect for `cal`'s date, per the last
/// Sunday in March (on) / October (off) rule. `cal` may be tagged UTC or
/// Summer; the hour threshold used to decide an in-progress switch on the
/// changeover Sunday differs between the two (UTC 01:00 vs local 02:00).
pub(crate) fn is_active(cal: &CalendarRecord) -> Result<bool, ZoneError> {
    if cal.month < MARCH || cal.month > OCTOBER {
        return Ok(false);
    }
    if cal.month > MARCH && cal.month < OCTOBER {
        return Ok(true);
    }

    let is_march = cal.month == MARCH;

    // March and October both have 31 days.
    if cal.mday < 31 - 7 {
        return Ok(is_march);
    }

    let wday = gregorian::weekday_of(cal.year, cal.month as i32, cal.mday as i32);

    if wday == Weekday::Sunday {
        if cal.system == SystemTag::Utc && cal.hour >= 1 {
            return Ok(is_march);
        }
        if cal.system == SystemTag::Summer && cal.hour >= 2 {
            return Ok(is_march);
        }
        return Ok(!is_march);
    }

    if (7 - wday.as_sunday_index() as i32) <= (31 - cal.mday as i32) {
        return Ok(!is_march);
    }

    Ok(is_march)
}

/// One hour ahead of UTC when active, otherwise zero. `src`'s system is
/// not checked (it may be `Summer`, or the lower, UTC-tagged record
/// `raise` passes through); `is_active` reads the tag itself where it
/// matters.
pub(crate) fn offset(src: &CalendarRecord) -> Result<NaturalFields, ZoneError> {
    let active = is_active(src)?;
    Ok(NaturalFields {
        hour: if active { 1 } else { 0 },
        ..Default::default()
    })
}

/// Sandwich through UTC, same shape as [`super::fixed_offset::op`]. Leap
/// seconds and summer-time transitions never coincide, so the leap-second
/// peel/restore is only needed around the final re-add.
pub(crate) fn op(
    src: &CalendarRecord,
    delta: NaturalFields,
    mode: OpMode,
    as_if_ns: bool,
) -> Result<CalendarRecord, ZoneError> {
    if src.system != SystemTag::Summer {
        return Err(ZoneError::NotMySystem);
    }

    // Same shape as fixed_offset::op: the internal offset records are built
    // fresh here and never carry AS_IF_NS, so knockdown runs normally.
    let diff = offset(src)?;
    let lowered = utc::op(&src.retagged(SystemTag::Utc), negate(diff), OpMode::ComplexAdd, false)?;
    let moved = utc::op(&lowered, delta, mode, as_if_ns)?;

    // `moved` is still UTC-tagged; is_active's Sunday-hour branch must see
    // that, not a Summer tag, so read the offset directly rather than
    // through offset()'s Summer-only check.
    let active = is_active(&moved)?;
    let tgt_diff = NaturalFields {
        hour: if active { 1 } else { 0 },
        ..Default::default()
    };
    let mut tgt = moved;
    let leap_second = tgt.second == 60;
    if leap_second {
        tgt.second -= 1;
    }
    let mut dest = utc::op(&tgt, tgt_diff, OpMode::ComplexAdd, false)?;
    if leap_second {
        dest.second += 1;
    }
    Ok(dest.retagged(SystemTag::Summer))
}
