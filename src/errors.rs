/*
 * civiltime
 * Layered zone algebra for leap-second aware civil time.
 * Grounded on hifitime's errors.rs (snafu-derived error enums).
 */

use snafu::Snafu;

/// The closed error taxonomy for zone operations, per the numeric encoding
/// table. Every variant carries the same negative code the reference
/// implementation returns, via [`ZoneError::code`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ZoneError {
    /// An unknown or unsupported system tag was requested.
    #[snafu(display("no such system"))]
    NoSuchSystem,
    /// The two endpoints of a `diff` are expressed in different systems.
    #[snafu(display("systems do not match"))]
    SystemsDoNotMatch,
    /// A record's system tag doesn't match the zone it was handed to.
    #[snafu(display("record system does not match this zone"))]
    NotMySystem,
    /// The date falls inside a calendar discontinuity (e.g. the
    /// Julian/Gregorian cutover) and has no well-defined reading.
    #[snafu(display("undefined date"))]
    UndefinedDate,
    /// A zone constructor's delegate construction failed.
    #[snafu(display("zone initialisation failed"))]
    InitFailed,
    /// The system tag is recognised but is not valid in this context.
    #[snafu(display("bad system"))]
    BadSystem,
    /// A calendar field lies outside its permitted range.
    #[snafu(display("invalid argument"))]
    InvalidArgument,
    /// The decision procedure reached a state that should be unreachable.
    #[snafu(display("internal error"))]
    InternalError,
    /// No path exists between the source and target systems.
    #[snafu(display("cannot convert between these systems"))]
    CannotConvert,
}

impl ZoneError {
    /// Bit-exact numeric code, matching the reference implementation.
    pub const fn code(&self) -> i32 {
        match self {
            Self::NoSuchSystem => -4000,
            Self::SystemsDoNotMatch => -3999,
            Self::NotMySystem => -3998,
            Self::UndefinedDate => -3997,
            Self::InitFailed => -3996,
            Self::BadSystem => -3995,
            Self::InvalidArgument => -3994,
            Self::InternalError => -3993,
            Self::CannotConvert => -3992,
        }
    }
}

/// Errors raised while parsing the text wire formats of [`crate::Interval`]
/// and [`crate::CalendarRecord`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ParseError {
    /// An integer field could not be parsed.
    #[snafu(display("could not parse integer field"))]
    ParseIntError,
    /// A field parsed but is out of its valid range.
    #[snafu(display("field value out of range"))]
    ValueError,
    /// The system tag token wasn't recognised.
    #[snafu(display("unknown system tag"))]
    UnknownSystem,
    /// The input didn't match the expected wire-format shape at all.
    #[snafu(display("malformed input: {spot}"))]
    Malformed {
        /// Human-readable description of where parsing gave up.
        spot: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_reference() {
        assert_eq!(ZoneError::NoSuchSystem.code(), -4000);
        assert_eq!(ZoneError::SystemsDoNotMatch.code(), -3999);
        assert_eq!(ZoneError::NotMySystem.code(), -3998);
        assert_eq!(ZoneError::UndefinedDate.code(), -3997);
        assert_eq!(ZoneError::InitFailed.code(), -3996);
        assert_eq!(ZoneError::BadSystem.code(), -3995);
        assert_eq!(ZoneError::InvalidArgument.code(), -3994);
        assert_eq!(ZoneError::InternalError.code(), -3993);
        assert_eq!(ZoneError::CannotConvert.code(), -3992);
    }
}
