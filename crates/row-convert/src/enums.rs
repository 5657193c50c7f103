//! Enumerated symbol conversions.
//!
//! Text is split on `,`; every part is either a member name (matched ignoring
//! case) or an integer, and the parts are OR-ed together. The result is kept
//! only when it is a defined member, or when the type is a flags type and the
//! value decomposes exactly into defined members. Anything else yields the
//! default.
//!
//! [`to_enum`] and [`to_enum_ex`] accept and reject exactly the same inputs.
//! `to_enum` resolves through `Option` and never builds an error; `to_enum_ex`
//! goes through `Result` and builds a descriptive error for every rejection,
//! which makes it measurably slower on bad input but easier to follow when
//! tracing.

use crate::error::ConversionError;
use crate::source::{parse_or, RawValue};

/// A type whose values are named numeric symbols.
///
/// ```rust
/// use row_convert::EnumSymbol;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Color {
///     Red = 1,
///     Green = 2,
/// }
///
/// impl EnumSymbol for Color {
///     const NAME: &'static str = "Color";
///     const MEMBERS: &'static [(&'static str, i64)] = &[("Red", 1), ("Green", 2)];
///
///     fn from_bits(bits: i64) -> Option<Self> {
///         match bits {
///             1 => Some(Color::Red),
///             2 => Some(Color::Green),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(row_convert::to_enum("green", Color::Red), Color::Green);
/// assert_eq!(row_convert::to_enum("5", Color::Red), Color::Red);
/// ```
pub trait EnumSymbol: Sized {
    /// Type name used in diagnostics.
    const NAME: &'static str;

    /// Defined members as `(name, value)` pairs.
    const MEMBERS: &'static [(&'static str, i64)];

    /// Whether members are bit flags that may be combined.
    const FLAGS: bool = false;

    /// Build a value from its numeric representation.
    ///
    /// Only called with values that passed the acceptance rules.
    fn from_bits(bits: i64) -> Option<Self>;
}

fn is_numeric(part: &str) -> bool {
    part.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+')
}

fn member_value<T: EnumSymbol>(name: &str) -> Option<i64> {
    T::MEMBERS
        .iter()
        .find(|(member, _)| member.eq_ignore_ascii_case(name))
        .map(|&(_, value)| value)
}

fn is_defined<T: EnumSymbol>(bits: i64) -> bool {
    T::MEMBERS.iter().any(|&(_, value)| value == bits)
}

/// Greedy decomposition from the largest member down, the way flag values
/// are rendered as names.
fn decomposes_into_flags<T: EnumSymbol>(bits: i64) -> bool {
    if bits == 0 {
        return false;
    }
    let mut values: Vec<i64> = T::MEMBERS
        .iter()
        .map(|&(_, value)| value)
        .filter(|&value| value != 0)
        .collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    let remaining = values.into_iter().fold(bits, |remaining, value| {
        if remaining & value == value {
            remaining & !value
        } else {
            remaining
        }
    });
    remaining == 0
}

fn is_acceptable<T: EnumSymbol>(bits: i64) -> bool {
    is_defined::<T>(bits) || (T::FLAGS && decomposes_into_flags::<T>(bits))
}

fn resolve_part<T: EnumSymbol>(part: &str) -> Option<i64> {
    let part = part.trim();
    if is_numeric(part) {
        part.parse().ok()
    } else {
        member_value::<T>(part)
    }
}

fn resolve<T: EnumSymbol>(text: &str) -> Option<T> {
    let bits = text
        .split(',')
        .try_fold(0i64, |bits, part| Some(bits | resolve_part::<T>(part)?))?;
    if is_acceptable::<T>(bits) {
        T::from_bits(bits)
    } else {
        None
    }
}

/// Convert to an enumerated symbol.
pub fn to_enum<V, T>(value: &V, default: T) -> T
where
    V: RawValue + ?Sized,
    T: EnumSymbol,
{
    match value.raw_text() {
        Some(text) => resolve(&text).unwrap_or(default),
        None => default,
    }
}

fn parse_part<T: EnumSymbol>(part: &str, text: &str) -> Result<i64, ConversionError> {
    let part = part.trim();
    if part.is_empty() {
        return Err(ConversionError::unparseable(text, T::NAME));
    }
    if is_numeric(part) {
        return part
            .parse::<i64>()
            .map_err(|_| ConversionError::unparseable(text, T::NAME));
    }
    member_value::<T>(part).ok_or_else(|| ConversionError::UnknownMember {
        name: part.to_string(),
        enum_name: T::NAME,
        members: T::MEMBERS
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

pub(crate) fn parse_enum<T: EnumSymbol>(text: &str) -> Result<T, ConversionError> {
    let mut bits = 0i64;
    for part in text.split(',') {
        bits |= parse_part::<T>(part, text)?;
    }
    let undefined = || ConversionError::UndefinedEnumValue {
        value: bits,
        enum_name: T::NAME,
    };
    if !is_acceptable::<T>(bits) {
        return Err(undefined());
    }
    T::from_bits(bits).ok_or_else(undefined)
}

/// Convert to an enumerated symbol through the error-reporting parse path.
///
/// Same acceptance rules as [`to_enum`].
pub fn to_enum_ex<V, T>(value: &V, default: T) -> T
where
    V: RawValue + ?Sized,
    T: EnumSymbol,
{
    parse_or(value, default, parse_enum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use row_core::CellValue;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Color {
        Red = 1,
        Green = 2,
    }

    impl EnumSymbol for Color {
        const NAME: &'static str = "Color";
        const MEMBERS: &'static [(&'static str, i64)] = &[("Red", 1), ("Green", 2)];

        fn from_bits(bits: i64) -> Option<Self> {
            match bits {
                1 => Some(Color::Red),
                2 => Some(Color::Green),
                _ => None,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Access(i64);

    impl EnumSymbol for Access {
        const NAME: &'static str = "Access";
        const MEMBERS: &'static [(&'static str, i64)] =
            &[("None", 0), ("Read", 1), ("Write", 2), ("Execute", 4)];
        const FLAGS: bool = true;

        fn from_bits(bits: i64) -> Option<Self> {
            Some(Access(bits))
        }
    }

    /// (input, expected) shared by both conversion paths; `None` means the
    /// default is returned.
    const COLOR_TABLE: &[(&str, Option<Color>)] = &[
        ("Red", Some(Color::Red)),
        ("red", Some(Color::Red)),
        ("GREEN", Some(Color::Green)),
        (" Green ", Some(Color::Green)),
        ("1", Some(Color::Red)),
        ("2", Some(Color::Green)),
        ("5", None),
        ("0", None),
        ("-1", None),
        ("Blue", None),
        ("Red,Green", None),
        ("", None),
        ("   ", None),
        ("Red,", None),
        ("1.5", None),
    ];

    const ACCESS_TABLE: &[(&str, Option<i64>)] = &[
        ("read", Some(1)),
        ("Read,Write", Some(3)),
        ("write, execute", Some(6)),
        ("Read,Write,Execute", Some(7)),
        ("3", Some(3)),
        ("0", Some(0)),
        ("None", Some(0)),
        ("8", None),
        ("9", None),
        ("Read,Bogus", None),
        ("Read,8", None),
    ];

    #[test]
    fn test_color_table_fast_path() {
        for (input, expected) in COLOR_TABLE {
            let fallback = Color::Green;
            let got = to_enum(*input, fallback);
            assert_eq!(got, expected.unwrap_or(fallback), "input: {input:?}");
        }
    }

    #[test]
    fn test_color_table_error_path() {
        for (input, expected) in COLOR_TABLE {
            let fallback = Color::Green;
            let got = to_enum_ex(*input, fallback);
            assert_eq!(got, expected.unwrap_or(fallback), "input: {input:?}");
        }
    }

    #[test]
    fn test_paths_agree_on_rejections() {
        // A default that no accepted input produces makes rejections visible
        for (input, expected) in ACCESS_TABLE {
            let fallback = Access(-99);
            let fast = to_enum(*input, fallback);
            let slow = to_enum_ex(*input, fallback);
            assert_eq!(fast, slow, "input: {input:?}");
            assert_eq!(fast, Access(expected.unwrap_or(-99)), "input: {input:?}");
        }
    }

    #[test]
    fn test_cells() {
        assert_eq!(to_enum(&CellValue::Enum("green".into()), Color::Red), Color::Green);
        assert_eq!(to_enum(&CellValue::Int32(2), Color::Red), Color::Green);
        assert_eq!(to_enum(&CellValue::Null, Color::Green), Color::Green);
        assert_eq!(to_enum_ex(&CellValue::Null, Color::Green), Color::Green);
    }

    #[test]
    fn test_rejections_are_described() {
        let err = parse_enum::<Color>("Blue").unwrap_err();
        assert_eq!(
            err.to_string(),
            "'Blue' is not a member of Color (members: Red, Green)"
        );
        let err = parse_enum::<Color>("5").unwrap_err();
        assert_eq!(err.to_string(), "5 is not a defined value of Color");
        assert_eq!(parse_enum::<Color>("red").unwrap(), Color::Red);
    }
}
