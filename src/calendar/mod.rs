/*
 * civiltime
 * Layered zone algebra for leap-second aware civil time.
 * Grounded on hifitime's Epoch/TimeScale module split, and on
 * examples/original_source/cdatecalc.h's cdc_calendar_t / system tags.
 */

pub mod format;
pub mod gregorian;

use core::cmp::Ordering;
use core::ops::BitOr;

#[cfg(feature = "std")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "std")]
use core::str::FromStr;

/// Bit-exact numeric encoding of the orthogonal "tainted" marker, per
/// the external system-tag encoding table.
const TAINTED_BIT: i32 = 1 << 30;

/// Which of the six time systems (TAI leaf plus five zone kinds) a
/// [`CalendarRecord`] is expressed in.
///
/// Numeric encodings match the reference bit-for-bit: `TAI = 0`,
/// `UTC = 2`, `SUMMER = 3`, `OFFSET = 4`, `UTCPLUS(m) = 0x1000 + (m + 720)`,
/// `REBASED = TAINTED | 6`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SystemTag {
    /// The leaf: proleptic Gregorian TAI.
    Tai,
    /// UTC, with leap seconds.
    Utc,
    /// A raw offset, not a civil time in its own right.
    Offset,
    /// A fixed offset of `m` minutes from UTC, `m` in `[-720, 1440]`.
    UtcPlus(i16),
    /// The last-Sunday-in-March/October summer-time overlay.
    Summer,
    /// A rebased zone's output. Always carries the tainted marker.
    Rebased,
    /// Unrecognised system tag (round-tripped from an unknown wire token).
    Unknown,
}

impl SystemTag {
    /// Bit-exact numeric encoding, matching the reference implementation.
    pub const fn code(&self) -> i32 {
        match self {
            Self::Tai => 0,
            Self::Utc => 2,
            Self::Summer => 3,
            Self::Offset => 4,
            Self::UtcPlus(m) => 0x1000 + (*m as i32 + 720),
            Self::Rebased => TAINTED_BIT | 6,
            Self::Unknown => -1,
        }
    }

    /// True for [`SystemTag::Rebased`], the only system that always
    /// carries the orthogonal `TAINTED` marker.
    pub const fn is_tainted(&self) -> bool {
        matches!(self, Self::Rebased)
    }

    /// Decodes the minutes offset encoded by a `UtcPlus` tag's numeric form,
    /// if `code` is in the `UtcPlus` range.
    pub(crate) fn utcplus_from_code(code: i32) -> Option<i16> {
        if (0x1000..=0x1000 + 2160).contains(&code) {
            Some((code - 0x1000 - 720) as i16)
        } else {
            None
        }
    }
}

impl PartialOrd for SystemTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SystemTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code().cmp(&other.code())
    }
}

/// Flags ORed onto a [`CalendarRecord`].
///
/// The only flag defined by the spec is `AS_IF_NS`: set on an *offset*
/// record to indicate its non-zero fields must not trigger the
/// knockdown rule during a `COMPLEX_ADD` (see [`crate::zone::utc`]).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarFlags(u32);

impl CalendarFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Suppresses knockdown of an offset's residual fields.
    pub const AS_IF_NS: Self = Self(1 << 0);

    /// True iff `self` has every bit of `other` set.
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for CalendarFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A structured wall-clock reading: `(year, month, mday, hour, minute,
/// second, ns, system, flags)`.
///
/// A record is *normalised* iff every field lies in its documented range
/// and `(year, month, mday)` names a real Gregorian day; `second = 60` is
/// permitted only immediately before a scheduled leap second.
///
/// `Ord`/`PartialOrd` are lexicographic over all fields in declaration
/// order, including `system` — comparing records of different systems is
/// defined but not meaningful; callers must lower/raise to a common system
/// first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarRecord {
    pub year: i32,
    pub month: u8,
    pub mday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub ns: u32,
    pub system: SystemTag,
    pub flags: CalendarFlags,
}

impl CalendarRecord {
    /// Builds a record with all fields as given and no flags set.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        year: i32,
        month: u8,
        mday: u8,
        hour: u8,
        minute: u8,
        second: u8,
        ns: u32,
        system: SystemTag,
    ) -> Self {
        Self {
            year,
            month,
            mday,
            hour,
            minute,
            second,
            ns,
            system,
            flags: CalendarFlags::NONE,
        }
    }

    /// A record with every field zeroed and the given system tag; used to
    /// build field-wise offsets (deltas), not civil-time readings.
    pub const fn zero(system: SystemTag) -> Self {
        Self {
            year: 0,
            month: 0,
            mday: 0,
            hour: 0,
            minute: 0,
            second: 0,
            ns: 0,
            system,
            flags: CalendarFlags::NONE,
        }
    }

    /// Returns `self` with the given flags added.
    pub const fn with_flags(mut self, flags: CalendarFlags) -> Self {
        self.flags = CalendarFlags(self.flags.0 | flags.0);
        self
    }

    /// Returns `self` retagged to `system`, all other fields unchanged.
    pub const fn retagged(mut self, system: SystemTag) -> Self {
        self.system = system;
        self
    }

    /// Negates every field (used when inverting an offset before entering
    /// a lower zone).
    pub(crate) fn negated(&self) -> NaturalFields {
        NaturalFields {
            year: -self.year,
            month: -(self.month as i32),
            mday: -(self.mday as i32),
            hour: -(self.hour as i32),
            minute: -(self.minute as i32),
            second: -(self.second as i32),
            ns: -(self.ns as i64),
        }
    }

    /// The signed, not-yet-range-checked view of this record's fields,
    /// used as the operand of field-wise add/subtract before
    /// normalisation resolves carries and borrows.
    pub(crate) fn natural(&self) -> NaturalFields {
        NaturalFields {
            year: self.year,
            month: self.month as i32,
            mday: self.mday as i32,
            hour: self.hour as i32,
            minute: self.minute as i32,
            second: self.second as i32,
            ns: self.ns as i64,
        }
    }
}

/// Signed, unnormalised field set. This is the representation field-wise
/// add/subtract and normalisation operate on; [`CalendarRecord`]'s fields
/// are unsigned precisely because a normalised record's fields are always
/// in range, but the intermediate arithmetic is not.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NaturalFields {
    pub year: i32,
    pub month: i32,
    pub mday: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub ns: i64,
}

impl NaturalFields {
    pub(crate) fn add(self, other: Self) -> Self {
        Self {
            year: self.year + other.year,
            month: self.month + other.month,
            mday: self.mday + other.mday,
            hour: self.hour + other.hour,
            minute: self.minute + other.minute,
            second: self.second + other.second,
            ns: self.ns + other.ns,
        }
    }

    pub(crate) fn sub(self, other: Self) -> Self {
        Self {
            year: self.year - other.year,
            month: self.month - other.month,
            mday: self.mday - other.mday,
            hour: self.hour - other.hour,
            minute: self.minute - other.minute,
            second: self.second - other.second,
            ns: self.ns - other.ns,
        }
    }
}

#[cfg(feature = "std")]
impl Serialize for CalendarRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "std")]
impl<'de> Deserialize<'de> for CalendarRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CalendarRecord::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_tag_codes_match_reference() {
        assert_eq!(SystemTag::Tai.code(), 0);
        assert_eq!(SystemTag::Utc.code(), 2);
        assert_eq!(SystemTag::Summer.code(), 3);
        assert_eq!(SystemTag::Offset.code(), 4);
        assert_eq!(SystemTag::UtcPlus(0).code(), 0x1000 + 720);
        assert_eq!(SystemTag::UtcPlus(-720).code(), 0x1000);
        assert_eq!(SystemTag::UtcPlus(1440).code(), 0x1000 + 2160);
        assert_eq!(SystemTag::Rebased.code(), (1 << 30) | 6);
    }

    #[test]
    fn rebased_is_tainted_only() {
        assert!(SystemTag::Rebased.is_tainted());
        assert!(!SystemTag::Utc.is_tainted());
        assert!(!SystemTag::Tai.is_tainted());
    }

    #[test]
    fn lexicographic_ordering_on_fields() {
        let a = CalendarRecord::new(2000, 0, 1, 0, 0, 0, 0, SystemTag::Tai);
        let b = CalendarRecord::new(2000, 0, 1, 0, 0, 1, 0, SystemTag::Tai);
        assert!(a < b);
    }
}
