/*
 * civiltime
 * The UTC zone: TAI plus the leap-second table. The hardest of the five,
 * per §4.2 — source/destination offset comparison, knockdown, and
 * leap-second promotion on the way out.
 * Grounded on cdatecalc.h's `system_utc_offset`/`system_utc_op`.
 */

use crate::calendar::{CalendarRecord, NaturalFields, SystemTag};
use crate::errors::ZoneError;

use super::{knockdown, leap_seconds, tai, OpMode};

pub(crate) fn offset(src: &CalendarRecord) -> Result<NaturalFields, ZoneError> {
    let iv = leap_seconds::active_offset(src)?;
    Ok(NaturalFields {
        second: iv.seconds() as i32,
        ns: iv.nanoseconds() as i64,
        ..Default::default()
    })
}

pub(crate) fn op(
    src: &CalendarRecord,
    delta: NaturalFields,
    mode: OpMode,
    as_if_ns: bool,
) -> Result<CalendarRecord, ZoneError> {
    if src.system != SystemTag::Utc {
        return Err(ZoneError::NotMySystem);
    }

    let complex = mode == OpMode::ComplexAdd;
    let inner_mode = if complex { OpMode::SimpleAdd } else { mode };

    // do_ls stays true throughout the ZONE_ADD case: a zone addition never
    // knows in advance whether it's landed on the wrong side of a leap
    // second, so the search below always runs.
    let mut do_ls = true;
    let tmp = if mode == OpMode::ZoneAdd {
        tai::op_untagged(src, delta, mode, SystemTag::Utc)
    } else {
        let src_diff = offset(src)?;
        let dst_value = tai::op_untagged(src, delta, inner_mode, SystemTag::Utc);
        let dst_diff = offset(&dst_value)?;

        // Source and destination see the same offset: no discontinuity was
        // crossed, so dst_value is already correct and the leap search
        // below is skipped entirely.
        if src_diff == dst_diff {
            return Ok(dst_value);
        }

        let mut adj = dst_diff.sub(src_diff);
        if complex {
            knockdown(&mut adj, &delta, as_if_ns, &mut do_ls);
        }
        tai::op_untagged(&dst_value, adj, inner_mode, SystemTag::Utc)
    };

    if !do_ls {
        return Ok(tmp);
    }

    // tmp may have landed exactly on a leap-second boundary; if so, promote
    // second 59 to the leap second 60 and restore the saved ns. A zone
    // addition has no destination value to compare offsets against, so it
    // has necessarily ended up one second on the wrong side of any leap
    // second it crossed — search one second earlier than everyone else.
    let shift = if mode == OpMode::ZoneAdd { -1 } else { 0 };
    let shifted = tai::op_untagged(
        &tmp,
        NaturalFields { second: shift, ..Default::default() },
        OpMode::SimpleAdd,
        SystemTag::Utc,
    );

    let saved_ns = shifted.ns;
    let mut candidate = shifted;
    candidate.ns = 0;
    if leap_seconds::is_leap_boundary(&candidate) {
        let mut dest = candidate;
        dest.second += 1;
        dest.ns = saved_ns;
        return Ok(dest);
    }

    Ok(tmp)
}

pub(crate) fn epoch() -> CalendarRecord {
    CalendarRecord::new(1972, 0, 1, 0, 0, 0, 0, SystemTag::Utc)
}
