/*
 * civiltime
 * A fixed offset from UTC, in whole minutes. Grounded on cdatecalc.h's
 * `system_utcplus_offset`/`system_utcplus_op`.
 */

use crate::calendar::{CalendarRecord, NaturalFields, SystemTag};
use crate::errors::ZoneError;

use super::{negate, utc, OpMode};

/// The offset is simply `m` minutes, constant regardless of `src`; `src`'s
/// system is not checked (it may be `UtcPlus(m)` itself, or the lower,
/// UTC-tagged record `raise` passes through).
pub(crate) fn offset(m: i16, _src: &CalendarRecord) -> Result<NaturalFields, ZoneError> {
    Ok(NaturalFields {
        minute: m as i32,
        ..Default::default()
    })
}

/// Sandwich: drop to UTC, perform the delta there, climb back.
///
/// Unlike UTC's own `op`, this runs the full subtract/perform/re-add
/// sequence regardless of `mode` — only UTC has a `ZoneAdd` shortcut.
pub(crate) fn op(
    m: i16,
    src: &CalendarRecord,
    delta: NaturalFields,
    mode: OpMode,
    as_if_ns: bool,
) -> Result<CalendarRecord, ZoneError> {
    if src.system != SystemTag::UtcPlus(m) {
        return Err(ZoneError::NotMySystem);
    }

    // The internal subtract/re-add steps use a freshly built zero-or-m-minute
    // offset, which never carries AS_IF_NS, so knockdown runs normally on them.
    let off = offset(m, src)?;
    let lowered = utc::op(&src.retagged(SystemTag::Utc), negate(off), OpMode::ComplexAdd, false)?;
    let moved = utc::op(&lowered, delta, mode, as_if_ns)?;

    let mut tgt = moved;
    let leap_second = tgt.second == 60;
    if leap_second {
        tgt.second -= 1;
    }
    let mut dest = utc::op(&tgt, off, OpMode::ComplexAdd, false)?;
    if leap_second {
        dest.second += 1;
    }
    Ok(dest.retagged(SystemTag::UtcPlus(m)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_constant_minutes() {
        let src = CalendarRecord::new(2000, 0, 1, 0, 0, 0, 0, SystemTag::UtcPlus(-300));
        let off = offset(-300, &src).unwrap();
        assert_eq!(off.minute, -300);
    }

    #[test]
    fn op_round_trips_through_utc() {
        let src = CalendarRecord::new(2000, 0, 1, 12, 0, 0, 0, SystemTag::UtcPlus(60));
        let plus_hour = op(
            60,
            &src,
            NaturalFields { hour: 1, ..Default::default() },
            OpMode::ComplexAdd,
            false,
        )
        .unwrap();
        assert_eq!((plus_hour.year, plus_hour.month, plus_hour.mday, plus_hour.hour), (2000, 0, 1, 13));
        assert_eq!(plus_hour.system, SystemTag::UtcPlus(60));
    }

    #[test]
    fn midnight_boundary_crossing_with_offset() {
        let src = CalendarRecord::new(2000, 0, 1, 23, 30, 0, 0, SystemTag::UtcPlus(60));
        let plus_hour = op(
            60,
            &src,
            NaturalFields { hour: 1, ..Default::default() },
            OpMode::ComplexAdd,
            false,
        )
        .unwrap();
        assert_eq!((plus_hour.year, plus_hour.month, plus_hour.mday, plus_hour.hour, plus_hour.minute), (2000, 0, 2, 0, 30));
    }
}
