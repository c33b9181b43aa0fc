/*
 * civiltime
 * Layered zone algebra for leap-second aware civil time: TAI, UTC, fixed
 * offsets, summer time, and rebased machine clocks.
 * Grounded on hifitime's crate-root module layout (mod + pub use per
 * concern, plus a `prelude`), adapted to this crate's smaller surface.
 */
#![cfg_attr(not(feature = "std"), no_std)]

pub mod calendar;
pub mod errors;
pub mod interval;
pub mod weekday;
pub mod zone;

pub use calendar::{CalendarFlags, CalendarRecord, NaturalFields, SystemTag};
pub use errors::{ParseError, ZoneError};
pub use interval::Interval;
pub use weekday::Weekday;
pub use zone::{drivers, Aux, OpMode, RebasedHandle, Zone};

/// The common imports for working with this crate.
pub mod prelude {
    pub use crate::calendar::{CalendarFlags, CalendarRecord, NaturalFields, SystemTag};
    pub use crate::errors::{ParseError, ZoneError};
    pub use crate::interval::Interval;
    pub use crate::weekday::Weekday;
    pub use crate::zone::{drivers, Aux, OpMode, Zone};
}

#[cfg(feature = "std")]
extern crate core;
