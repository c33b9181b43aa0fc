/*
 * civiltime
 * Zone-chain drivers: raise, lower, lower_to, bounce, and the rebased-zone
 * constructor. Grounded on cdatecalc.h's `cdc_zone_raise`/`cdc_zone_lower`/
 * `cdc_zone_lower_to`/`cdc_bounce`/`cdc_rebased_tai`.
 *
 * Per the redesign note on disentangling `NotMySystem`: the reference uses
 * `CDC_ERR_NOT_MY_SYSTEM` as an internal control signal inside `raise` to
 * decide whether to recurse further down the chain. Here `raise` instead
 * tests the system tag directly before calling `offset`, so recursion is
 * plain control flow and `NotMySystem` stays an error a caller can act on.
 */

use crate::calendar::{CalendarRecord, NaturalFields, SystemTag};
use crate::errors::ZoneError;
use crate::interval::Interval;

use super::{OpMode, Zone};

/// Raises `src` (in some zone below or at `zone`) up to `zone`, climbing
/// one level per recursive call.
pub fn raise(zone: &Zone, src: &CalendarRecord) -> Result<CalendarRecord, ZoneError> {
    let low = zone.lower();
    let low_tag = low.as_ref().map(Zone::system_tag).unwrap_or_else(|| zone.system_tag());

    let raised_src = if src.system == low_tag {
        *src
    } else {
        match &low {
            Some(l) => raise(l, src)?,
            None => return Err(ZoneError::NotMySystem),
        }
    };

    let dst_offset = zone.offset(&raised_src)?;
    let retagged = raised_src.retagged(zone.system_tag());
    zone.op(&retagged, dst_offset, OpMode::ZoneAdd, false)
}

/// Lowers `src` (tagged `zone`'s system) by exactly one level.
pub fn lower(zone: &Zone, src: &CalendarRecord) -> Result<CalendarRecord, ZoneError> {
    let Some(low) = zone.lower() else {
        return Ok(*src);
    };
    if src.system != zone.system_tag() {
        return Err(ZoneError::NotMySystem);
    }

    let offset = zone.offset(src)?;
    let retagged = src.retagged(low.system_tag());
    low.op(&retagged, super::negate(offset), OpMode::ZoneAdd, false)
}

/// Lowers `src` down the chain from `zone` until reaching `to_system`, or
/// the bottom of the chain if `to_system` is `None`.
pub fn lower_to(
    zone: &Zone,
    src: &CalendarRecord,
    to_system: Option<SystemTag>,
) -> Result<(CalendarRecord, Zone), ZoneError> {
    let mut current = *src;
    let mut cursor = zone.clone();

    loop {
        if Some(current.system) == to_system {
            return Ok((current, cursor));
        }
        let Some(next) = cursor.lower() else {
            if to_system.is_none() {
                return Ok((current, cursor));
            }
            return Err(ZoneError::CannotConvert);
        };
        if current.system == cursor.system_tag() {
            current = lower(&cursor, &current)?;
        }
        cursor = next;
    }
}

/// Lowers `src` all the way down `down_zone`'s chain, then raises the
/// result back up `up_zone`'s chain — converting between two zone chains
/// that share no common ancestor above TAI.
pub fn bounce(down_zone: &Zone, up_zone: &Zone, src: &CalendarRecord) -> Result<CalendarRecord, ZoneError> {
    let (tmp, _) = lower_to(down_zone, src, None)?;
    raise(up_zone, &tmp)
}

/// The elapsed interval between `a` and `b`, both in `zone`'s system.
pub fn diff(zone: &Zone, a: &CalendarRecord, b: &CalendarRecord) -> Result<Interval, ZoneError> {
    zone.diff(a, b)
}

/// Builds a [`Zone::Rebased`] that corrects any future reading from
/// `machine_time`'s system by the constant drift observed between it and
/// `human_time` at calibration: `raise(z, m) == m + (machine_time -
/// lower(human_zone, human_time))` for any `m`, not just `machine_time`
/// itself — a calibration pair fixes a drift rate, it does not make the
/// zone remember that one pair.
///
/// The stored offset is computed once, here, as the elapsed interval
/// between the lowered `human_time` and `machine_time`, and is always
/// tagged "as if nanoseconds" — a rebased offset is a raw clock drift
/// correction, not a calendar quantity subject to knockdown.
pub fn rebased_from_tai(
    human_zone: &Zone,
    human_time: &CalendarRecord,
    machine_time: &CalendarRecord,
) -> Result<Zone, ZoneError> {
    let (c1, lzone) = lower_to(human_zone, human_time, Some(machine_time.system))?;
    let iv = lzone.diff(&c1, machine_time)?;

    let offset = NaturalFields {
        second: iv.seconds() as i32,
        ns: iv.nanoseconds() as i64,
        ..Default::default()
    };

    Ok(Zone::rebased(lzone, offset, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_tai_to_utc_adds_the_leap_offset() {
        let tai = CalendarRecord::new(2000, 0, 1, 0, 0, 32, 0, SystemTag::Tai);
        let utc = raise(&Zone::Utc, &tai).unwrap();
        assert_eq!(utc.system, SystemTag::Utc);
        assert_eq!((utc.hour, utc.minute, utc.second), (0, 0, 0));
    }

    #[test]
    fn lower_then_raise_round_trips() {
        let utc = CalendarRecord::new(2000, 5, 15, 10, 30, 0, 0, SystemTag::Utc);
        let lowered = lower(&Zone::Utc, &utc).unwrap();
        assert_eq!(lowered.system, SystemTag::Tai);
        let raised = raise(&Zone::Utc, &lowered).unwrap();
        assert_eq!(raised, utc);
    }

    #[test]
    fn bounce_between_two_fixed_offsets() {
        let src = CalendarRecord::new(2000, 0, 1, 12, 0, 0, 0, SystemTag::UtcPlus(60));
        let dest = bounce(&Zone::FixedOffset(60), &Zone::FixedOffset(-300), &src).unwrap();
        assert_eq!(dest.system, SystemTag::UtcPlus(-300));
        assert_eq!((dest.hour, dest.minute), (6, 0));
    }

    #[test]
    fn rebased_from_tai_applies_a_constant_drift_to_any_reading() {
        // The machine clock reads 9:45:57 when the true time is 10:00:00,
        // so it lags by 14m3s; rebased_from_tai bakes that lag in as a
        // constant offset, applied to any future machine reading, not just
        // the calibration one (raising 9:45:57 back does not give 10:00:00).
        let human = CalendarRecord::new(2000, 0, 1, 10, 0, 0, 0, SystemTag::Utc);
        let machine = CalendarRecord::new(2000, 0, 1, 9, 45, 57, 0, SystemTag::Utc);
        let z = rebased_from_tai(&Zone::Utc, &human, &machine).unwrap();

        let raised = raise(&z, &machine).unwrap();
        assert_eq!(raised.system, SystemTag::Rebased);
        assert_eq!((raised.hour, raised.minute, raised.second), (9, 31, 54));

        let later_machine = CalendarRecord::new(2000, 0, 1, 10, 45, 57, 0, SystemTag::Utc);
        let raised_later = raise(&z, &later_machine).unwrap();
        assert_eq!((raised_later.hour, raised_later.minute, raised_later.second), (10, 31, 54));
    }

    #[test]
    fn e9_rebased_offset_over_tai() {
        let offset = NaturalFields {
            hour: -1,
            minute: -14,
            second: -3,
            ..Default::default()
        };
        let z = Zone::rebased(Zone::Tai, offset, false);
        let tai = CalendarRecord::new(1980, 0, 1, 0, 0, 0, 0, SystemTag::Tai);
        let raised = raise(&z, &tai).unwrap();
        assert_eq!(raised.system, SystemTag::Rebased);
        assert_eq!(
            (raised.year, raised.month, raised.mday, raised.hour, raised.minute, raised.second),
            (1979, 11, 31, 22, 45, 57)
        );
    }
}
