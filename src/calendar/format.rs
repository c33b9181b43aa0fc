/*
 * civiltime
 * Text wire format for CalendarRecord: "YYYY-MM-DD hh:mm:ss.NNNNNNNNN SYS[*]".
 * Grounded on hifitime's efmt module (Display/FromStr on a fixed textual
 * shape) but far smaller: the spec's wire format is one fixed shape, not
 * a user-selectable strftime-style token string.
 */

use core::fmt;

#[cfg(feature = "std")]
use core::str::FromStr;

use crate::calendar::{CalendarFlags, CalendarRecord, SystemTag};
use crate::errors::ParseError;

impl fmt::Display for CalendarRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:09} {}",
            self.year,
            self.month + 1,
            self.mday,
            self.hour,
            self.minute,
            self.second,
            self.ns,
            SystemTagDisplay(self.system),
        )?;
        if self.system.is_tainted() {
            write!(f, "*")?;
        }
        Ok(())
    }
}

struct SystemTagDisplay(SystemTag);

impl fmt::Display for SystemTagDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            SystemTag::Tai => f.write_str("TAI"),
            SystemTag::Utc => f.write_str("UTC"),
            SystemTag::Summer => f.write_str("SUMMER"),
            SystemTag::Offset => f.write_str("OFF"),
            SystemTag::Rebased => f.write_str("REBASED"),
            SystemTag::Unknown => f.write_str("UNK"),
            SystemTag::UtcPlus(m) => {
                // Per spec note §9.3: zero is always printed "+0000", never "-0000".
                let (sign, abs_m) = if m < 0 {
                    ('-', -(m as i32))
                } else {
                    ('+', m as i32)
                };
                write!(f, "UTC{sign}{:02}{:02}", abs_m / 60, abs_m % 60)
            }
        }
    }
}

fn parse_system_tag(tok: &str) -> Result<SystemTag, ParseError> {
    match tok {
        "TAI" => return Ok(SystemTag::Tai),
        "UTC" => return Ok(SystemTag::Utc),
        "SUMMER" | "BST" => return Ok(SystemTag::Summer),
        "OFF" => return Ok(SystemTag::Offset),
        "REBASED" => return Ok(SystemTag::Rebased),
        "UNK" => return Ok(SystemTag::Unknown),
        _ => {}
    }
    if let Some(rest) = tok.strip_prefix("UTC") {
        let mut chars = rest.chars();
        let sign = match chars.next() {
            Some('+') => 1i32,
            Some('-') => -1i32,
            _ => return Err(ParseError::UnknownSystem),
        };
        let digits: &str = &rest[1..];
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::UnknownSystem);
        }
        let hh: i32 = digits[0..2].parse().map_err(|_| ParseError::ParseIntError)?;
        let mm: i32 = digits[2..4].parse().map_err(|_| ParseError::ParseIntError)?;
        let minutes = sign * (hh * 60 + mm);
        if !(-720..=1440).contains(&minutes) {
            return Err(ParseError::ValueError);
        }
        return Ok(SystemTag::UtcPlus(minutes as i16));
    }
    Err(ParseError::UnknownSystem)
}

#[cfg(feature = "std")]
impl FromStr for CalendarRecord {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let s = input.trim();
        let (date, rest) = s.split_once(' ').ok_or(ParseError::Malformed {
            spot: "missing date/time separator",
        })?;
        let rest = rest.trim_start();

        let mut date_parts = date.split('-');
        let year_tok = date_parts.next().ok_or(ParseError::Malformed {
            spot: "missing year",
        })?;
        let month_tok = date_parts.next().ok_or(ParseError::Malformed {
            spot: "missing month",
        })?;
        let mday_tok = date_parts.next().ok_or(ParseError::Malformed {
            spot: "missing day",
        })?;
        if date_parts.next().is_some() {
            return Err(ParseError::Malformed {
                spot: "trailing characters in date",
            });
        }

        let year: i32 = year_tok.parse().map_err(|_| ParseError::ParseIntError)?;
        let month: i32 = month_tok.parse().map_err(|_| ParseError::ParseIntError)?;
        let mday: i32 = mday_tok.parse().map_err(|_| ParseError::ParseIntError)?;
        if !(1..=12).contains(&month) {
            return Err(ParseError::ValueError);
        }

        // Scan up to the first non-space after nanoseconds: "hh:mm:ss.NNNNNNNNN".
        let (time_tok, after_time) = rest.split_once(' ').ok_or(ParseError::Malformed {
            spot: "missing system tag",
        })?;
        let mut time_parts = time_tok.split(':');
        let hour_tok = time_parts.next().ok_or(ParseError::Malformed {
            spot: "missing hour",
        })?;
        let minute_tok = time_parts.next().ok_or(ParseError::Malformed {
            spot: "missing minute",
        })?;
        let secfrac_tok = time_parts.next().ok_or(ParseError::Malformed {
            spot: "missing second",
        })?;
        if time_parts.next().is_some() {
            return Err(ParseError::Malformed {
                spot: "trailing characters in time",
            });
        }
        let (second_tok, ns_tok) = secfrac_tok.split_once('.').ok_or(ParseError::Malformed {
            spot: "missing fractional second",
        })?;

        let hour: i32 = hour_tok.parse().map_err(|_| ParseError::ParseIntError)?;
        let minute: i32 = minute_tok.parse().map_err(|_| ParseError::ParseIntError)?;
        let second: i32 = second_tok.parse().map_err(|_| ParseError::ParseIntError)?;
        if ns_tok.len() != 9 || !ns_tok.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::Malformed {
                spot: "nanoseconds field must be exactly 9 digits",
            });
        }
        let ns: u32 = ns_tok.parse().map_err(|_| ParseError::ParseIntError)?;

        if !(0..24).contains(&hour) || !(0..60).contains(&minute) || !(0..=60).contains(&second) {
            return Err(ParseError::ValueError);
        }

        let (sys_tok, tainted_marker) = match after_time.strip_suffix('*') {
            Some(stripped) => (stripped, true),
            None => (after_time, false),
        };
        let system = parse_system_tag(sys_tok.trim())?;
        if tainted_marker != system.is_tainted() {
            return Err(ParseError::Malformed {
                spot: "tainted marker does not match system",
            });
        }

        let flags = CalendarFlags::NONE;

        Ok(CalendarRecord {
            year,
            month: (month - 1) as u8,
            mday: mday as u8,
            hour: hour as u8,
            minute: minute as u8,
            second: second as u8,
            ns,
            system,
            flags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarRecord;

    #[test]
    fn prints_tai() {
        let c = CalendarRecord::new(1958, 0, 1, 0, 0, 0, 0, SystemTag::Tai);
        assert_eq!(c.to_string(), "1958-01-01 00:00:00.000000000 TAI");
    }

    #[test]
    fn prints_leap_second_utc() {
        let c = CalendarRecord::new(1978, 11, 31, 23, 59, 60, 0, SystemTag::Utc);
        assert_eq!(c.to_string(), "1978-12-31 23:59:60.000000000 UTC");
    }

    #[test]
    fn prints_utcplus_zero_with_positive_sign() {
        let c = CalendarRecord::new(2000, 0, 1, 0, 0, 0, 0, SystemTag::UtcPlus(0));
        assert!(c.to_string().ends_with("UTC+0000"));
    }

    #[test]
    fn prints_rebased_with_tainted_marker() {
        let c = CalendarRecord::new(1980, 0, 1, 0, 0, 0, 0, SystemTag::Rebased);
        assert!(c.to_string().ends_with("REBASED*"));
    }

    #[test]
    #[cfg(feature = "std")]
    fn round_trips() {
        let records = [
            CalendarRecord::new(1958, 0, 1, 0, 0, 0, 0, SystemTag::Tai),
            CalendarRecord::new(1978, 11, 31, 23, 59, 60, 0, SystemTag::Utc),
            CalendarRecord::new(2010, 2, 28, 0, 59, 59, 0, SystemTag::UtcPlus(60)),
            CalendarRecord::new(2010, 2, 28, 0, 59, 59, 0, SystemTag::UtcPlus(-60)),
            CalendarRecord::new(1980, 0, 1, 0, 0, 0, 0, SystemTag::Rebased),
        ];
        for c in records {
            let text = c.to_string();
            let parsed: CalendarRecord = text.parse().unwrap();
            assert_eq!(parsed, c, "round trip of {text}");
        }
    }

    #[test]
    #[cfg(feature = "std")]
    fn parses_bst_alias_as_summer() {
        let parsed: CalendarRecord = "2010-03-28 02:00:00.000000000 BST".parse().unwrap();
        assert_eq!(parsed.system, SystemTag::Summer);
    }
}
