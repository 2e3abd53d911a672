use winnow::ascii::digit1;
use winnow::combinator::opt;
use winnow::token::literal;
use winnow::{Parser, Result};

/// Parses a decimal integer.
///
/// This permits an optional leading minus sign followed by one or more
/// digits. A leading plus sign, a decimal point and values that do not fit
/// in an `i32` are all rejected.
///
/// Examples of valid input:
///
/// - `"42"`
/// - `"-3"`
/// - `"0005000"`
pub fn parse_integer<'s>(input: &mut &'s str) -> Result<i32> {
    (opt(literal("-")), digit1)
        .take()
        .try_map(str::parse)
        .parse_next(input)
}

/// Interprets a whole word as a decimal integer.
///
/// # Returns
///
/// - `Some(value)`: if the entire word is a valid integer.
/// - `None`: otherwise, including when there are trailing characters.
pub fn integer(word: &[u8]) -> Option<i32> {
    let text = core::str::from_utf8(word).ok()?;
    parse_integer.parse(text).ok()
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_integer_examples() {
        let mut input1 = "42";
        let mut input2 = "-3 rest";
        let mut input3 = "+5";
        let mut input4 = "-";
        assert_eq!(Ok(42), parse_integer(&mut input1));
        assert_eq!(Ok(-3), parse_integer(&mut input2));
        assert_eq!(" rest", input2);
        assert!(parse_integer(&mut input3).is_err());
        assert!(parse_integer(&mut input4).is_err());
    }

    #[test]
    fn test_integer_whole_word() {
        assert_eq!(Some(5000), integer(b"5000"));
        assert_eq!(Some(0), integer(b"-0"));
        assert_eq!(None, integer(b"50x"));
        assert_eq!(None, integer(b"null"));
        assert_eq!(None, integer(b""));
        assert_eq!(None, integer(b"1.5"));
        assert_eq!(None, integer(b"99999999999"));
        assert_eq!(None, integer(&[0xff, b'1']));
    }

    proptest! {
        #[test]
        fn test_integer_matches_display(value: i32) {
            let text = format!("{}", value);
            assert_eq!(Some(value), integer(text.as_bytes()));
        }
    }
}
