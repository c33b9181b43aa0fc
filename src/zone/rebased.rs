/*
 * civiltime
 * A rebased zone: some base zone shifted by a constant, typically
 * irregular, offset — modelling a machine clock with known drift against
 * a human-readable zone. Grounded on cdatecalc.h's `cdc_rebased_*`
 * functions and `cdc_rebased_tai`.
 */

use crate::calendar::{CalendarRecord, NaturalFields, SystemTag};
use crate::errors::ZoneError;

use super::{negate, OpMode, RebasedHandle};

fn check(src: &CalendarRecord) -> Result<(), ZoneError> {
    if src.system != SystemTag::Rebased {
        return Err(ZoneError::NotMySystem);
    }
    Ok(())
}

/// The handle's stored offset, verbatim.
pub(crate) fn offset(h: &RebasedHandle) -> Result<NaturalFields, ZoneError> {
    Ok(h.offset)
}

/// Sandwich through `h.base`, using the handle's own `as_if_ns` flag for
/// the two internal offset-application steps and the caller's `as_if_ns`
/// only for the middle, caller-requested delta.
pub(crate) fn op(
    h: &RebasedHandle,
    src: &CalendarRecord,
    delta: NaturalFields,
    mode: OpMode,
    as_if_ns: bool,
) -> Result<CalendarRecord, ZoneError> {
    check(src)?;

    let base_tag = h.base.system_tag();
    let lowered = h.base.op(
        &src.retagged(base_tag),
        negate(h.offset),
        OpMode::ComplexAdd,
        h.as_if_ns,
    )?;
    let moved = h.base.op(&lowered, delta, mode, as_if_ns)?;

    let mut tgt = moved;
    let leap_second = tgt.second == 60;
    if leap_second {
        tgt.second -= 1;
    }
    let mut dest = h.base.op(&tgt, h.offset, OpMode::ComplexAdd, h.as_if_ns)?;
    if leap_second {
        dest.second += 1;
    }
    Ok(dest.retagged(SystemTag::Rebased))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::Zone;

    fn handle() -> RebasedHandle {
        RebasedHandle {
            offset: NaturalFields {
                hour: -1,
                minute: -14,
                second: -3,
                ..Default::default()
            },
            as_if_ns: true,
            base: Zone::Utc,
        }
    }

    #[test]
    fn offset_is_verbatim() {
        let h = handle();
        assert_eq!(offset(&h).unwrap(), h.offset);
    }

    #[test]
    fn op_shifts_by_the_stored_offset() {
        let h = handle();
        let src = CalendarRecord::new(2000, 0, 1, 12, 0, 0, 0, SystemTag::Rebased);
        let plus_minute = op(
            &h,
            &src,
            NaturalFields { minute: 1, ..Default::default() },
            OpMode::ComplexAdd,
            false,
        )
        .unwrap();
        assert_eq!((plus_minute.hour, plus_minute.minute), (12, 1));
        assert_eq!(plus_minute.system, SystemTag::Rebased);
    }
}
