/*
 * civiltime
 * The capability set and the closed set of zone kinds, dispatched via a
 * tagged enum per the REDESIGN FLAGS note on dynamic dispatch (the zone
 * kinds are a closed set of six, so a match beats a vtable).
 * Grounded on hifitime's TimeScale (a closed tagged enum with match-based
 * dispatch at its conversion sites) and on cdatecalc.h's `cdc_zone_t`
 * vtable, which this flattens into the match arms below.
 */

pub mod drivers;
pub mod fixed_offset;
pub mod leap_seconds;
pub mod rebased;
pub mod summer;
pub mod tai;
pub mod utc;

use crate::calendar::{gregorian, CalendarRecord, NaturalFields, SystemTag};
use crate::errors::ZoneError;
use crate::interval::Interval;
use crate::weekday::Weekday;

/// Which calendar operation [`Zone::op`] performs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpMode {
    /// Field-wise add, no zone-discontinuity correction.
    SimpleAdd,
    /// Field-wise subtract.
    Subtract,
    /// Field-wise add with the zone's full discontinuity handling
    /// (leap-second/summer-time offset changes and knockdown).
    ComplexAdd,
    /// Field-wise add performed while crossing zones during raise/lower;
    /// never knocked down.
    ZoneAdd,
}

/// Day-of-week, day-of-year, and summer-time flag for a calendar record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aux {
    pub wday: Weekday,
    pub yday: i32,
    pub is_dst: bool,
}

/// A rebased zone's handle: a base zone plus the constant offset that
/// defines this zone's civil time relative to it.
#[derive(Clone, Debug)]
pub struct RebasedHandle {
    pub(crate) offset: NaturalFields,
    pub(crate) as_if_ns: bool,
    pub(crate) base: Zone,
}

/// The closed set of time systems, each a node in a chain terminating at
/// [`Zone::Tai`]. Every non-leaf variant's [`Zone::lower`] is cheap to
/// construct (TAI and UTC are zero-sized; a rebased zone clones its base).
#[derive(Clone, Debug)]
pub enum Zone {
    Tai,
    Utc,
    /// Fixed offset from UTC, in minutes, `[-720, 1440]`.
    FixedOffset(i16),
    Summer,
    Rebased(Box<RebasedHandle>),
}

impl Zone {
    /// Builds a rebased zone directly from an explicit offset, per
    /// `cdc_rebased_new`. `rebased_from_tai` is the usual way to derive
    /// `offset` from a calibration pair; this constructor is for callers
    /// that already know the constant drift.
    pub fn rebased(base: Zone, offset: NaturalFields, as_if_ns: bool) -> Zone {
        Self::Rebased(Box::new(RebasedHandle { offset, as_if_ns, base }))
    }

    /// The system tag this zone produces and accepts records in.
    pub fn system_tag(&self) -> SystemTag {
        match self {
            Self::Tai => SystemTag::Tai,
            Self::Utc => SystemTag::Utc,
            Self::FixedOffset(m) => SystemTag::UtcPlus(*m),
            Self::Summer => SystemTag::Summer,
            Self::Rebased(_) => SystemTag::Rebased,
        }
    }

    /// The zone directly below this one in the chain, or `None` at the
    /// TAI leaf.
    pub fn lower(&self) -> Option<Zone> {
        match self {
            Self::Tai => None,
            Self::Utc => Some(Self::Tai),
            Self::FixedOffset(_) => Some(Self::Utc),
            Self::Summer => Some(Self::Utc),
            Self::Rebased(h) => Some(h.base.clone()),
        }
    }

    /// The offset to add to a record in `lower(self)` to get the
    /// corresponding record in `self`.
    pub fn offset(&self, src: &CalendarRecord) -> Result<NaturalFields, ZoneError> {
        match self {
            Self::Tai => tai::offset(src),
            Self::Utc => utc::offset(src),
            Self::FixedOffset(m) => fixed_offset::offset(*m, src),
            Self::Summer => summer::offset(src),
            Self::Rebased(h) => rebased::offset(h),
        }
    }

    /// Performs a calendar operation in `self`.
    pub fn op(
        &self,
        src: &CalendarRecord,
        delta: NaturalFields,
        mode: OpMode,
        as_if_ns: bool,
    ) -> Result<CalendarRecord, ZoneError> {
        match self {
            Self::Tai => tai::op(src, delta, mode),
            Self::Utc => utc::op(src, delta, mode, as_if_ns),
            Self::FixedOffset(m) => fixed_offset::op(*m, src, delta, mode, as_if_ns),
            Self::Summer => summer::op(src, delta, mode, as_if_ns),
            Self::Rebased(h) => rebased::op(h, src, delta, mode, as_if_ns),
        }
    }

    /// Day-of-week, day-of-year, and summer-time flag for `c`.
    ///
    /// Matches the reference: these facts depend only on the date fields,
    /// not on which zone's operation produced them, so no zones other than
    /// [`Zone::Summer`] (which also reports `is_dst`) check `c.system`.
    pub fn aux(&self, c: &CalendarRecord) -> Result<Aux, ZoneError> {
        match self {
            Self::Rebased(h) => h.base.aux(c),
            Self::Summer => {
                let wday = gregorian::weekday_of(c.year, c.month as i32, c.mday as i32);
                let yday = gregorian::day_of_year(c);
                let is_dst = summer::is_active(c)?;
                Ok(Aux { wday, yday, is_dst })
            }
            _ => {
                let wday = gregorian::weekday_of(c.year, c.month as i32, c.mday as i32);
                let yday = gregorian::day_of_year(c);
                Ok(Aux {
                    wday,
                    yday,
                    is_dst: false,
                })
            }
        }
    }

    /// An anchor date for this system.
    pub fn epoch(&self) -> CalendarRecord {
        match self {
            Self::Tai => tai::epoch(),
            Self::Utc | Self::FixedOffset(_) | Self::Summer => utc::epoch(),
            Self::Rebased(h) => h.base.epoch(),
        }
    }

    /// Elapsed interval from `a` to `b`, both in `self`'s system.
    ///
    /// Default implementation: lower both to `lower(self)` and recurse;
    /// the TAI leaf supplies the base case.
    pub fn diff(&self, a: &CalendarRecord, b: &CalendarRecord) -> Result<Interval, ZoneError> {
        if a.system != self.system_tag() || b.system != self.system_tag() {
            return Err(ZoneError::SystemsDoNotMatch);
        }
        match self {
            Self::Tai => tai::diff(a, b),
            _ => {
                let low = self.lower().expect("non-leaf zone always has a lower zone");
                let la = drivers::lower(self, a)?;
                let lb = drivers::lower(self, b)?;
                low.diff(&la, &lb)
            }
        }
    }
}

pub(crate) fn negate(f: NaturalFields) -> NaturalFields {
    NaturalFields {
        year: -f.year,
        month: -f.month,
        mday: -f.mday,
        hour: -f.hour,
        minute: -f.minute,
        second: -f.second,
        ns: -f.ns,
    }
}

/// Zeroes the fields of `adj` below the most-significant non-zero field of
/// `delta` (order: year > month > mday > hour > minute > second > ns),
/// skipped entirely when `as_if_ns` is set.
///
/// Grounded on `do_knockdown` in the C reference, but fixes a gap there:
/// the reference never zeroes `mday` or `minute` (its `go` chain skips
/// straight from `month` to `hour` and from `hour` to `second`), which
/// would let a month-level add leak a sub-day residual. This follows the
/// field order the specification actually names.
pub(crate) fn knockdown(adj: &mut NaturalFields, delta: &NaturalFields, as_if_ns: bool, do_ls: &mut bool) {
    if as_if_ns {
        return;
    }
    let mut go = delta.year != 0;
    if go {
        adj.month = 0;
    }
    go |= delta.month != 0;
    if go {
        adj.mday = 0;
    }
    go |= delta.mday != 0;
    if go {
        adj.hour = 0;
    }
    go |= delta.hour != 0;
    if go {
        adj.minute = 0;
    }
    go |= delta.minute != 0;
    if go {
        adj.second = 0;
        *do_ls = false;
    }
    go |= delta.second != 0;
    if go {
        adj.ns = 0;
    }
}
