use itertools::Itertools;

use crate::{
    error::{HuffmanError, Result},
    frequency::FrequencyTable,
};

pub fn serialize(frequencies: &FrequencyTable) -> String {
    frequencies
        .iter_nonzero()
        .map(|(symbol, frequency)| format!("{symbol} {frequency}"))
        .join(" ")
}

pub fn parse(line: &str) -> Result<FrequencyTable> {
    let tokens = line.split_whitespace().collect_vec();
    if tokens.len() % 2 != 0 {
        return Err(HuffmanError::malformed_header(format!(
            "expected symbol and frequency pairs but found {} tokens",
            tokens.len()
        )));
    }

    let mut frequencies = FrequencyTable::default();
    let mut total = 0_u64;
    for (symbol, frequency) in tokens.into_iter().tuples() {
        let symbol = symbol.parse::<u8>().map_err(|err| {
            HuffmanError::malformed_header(format!("invalid symbol {symbol:?}: {err}"))
        })?;
        let frequency = frequency.parse::<u64>().map_err(|err| {
            HuffmanError::malformed_header(format!(
                "invalid frequency {frequency:?} for symbol {symbol}: {err}"
            ))
        })?;

        if frequency == 0 {
            return Err(HuffmanError::malformed_header(format!(
                "symbol {symbol} has a zero frequency"
            )));
        }
        if frequencies.get(symbol) != 0 {
            return Err(HuffmanError::malformed_header(format!(
                "symbol {symbol} appears more than once"
            )));
        }
        // merged weights never exceed the total
        total = total
            .checked_add(frequency)
            .ok_or_else(|| HuffmanError::malformed_header("frequencies overflow"))?;
        frequencies.set(symbol, frequency);
    }

    Ok(frequencies)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{error::HuffmanError, frequency::FrequencyTable};

    use super::{parse, serialize};

    #[test]
    fn test_serialize() {
        let frequencies = FrequencyTable::count(b"aaabbbbcc");
        assert_eq!(serialize(&frequencies), "97 3 98 4 99 2");
    }

    #[test]
    fn test_serialize_single_symbol() {
        assert_eq!(serialize(&FrequencyTable::count(b"aaaa")), "97 4");
    }

    #[test]
    fn test_serialize_includes_line_terminators() {
        assert_eq!(serialize(&FrequencyTable::count(b"a\r\n\n")), "10 2 13 1 97 1");
    }

    #[rstest]
    #[case(b"aaabbbbcc")]
    #[case(b"x")]
    #[case(&[0, 0, 255, 128, 7, 7, 7])]
    #[case(b"Lorem ipsum dolor sit amet,\nconsectetur adipiscing elit.\n")]
    fn test_header_round_trip(#[case] input: &[u8]) {
        let frequencies = FrequencyTable::count(input);
        assert_eq!(parse(&serialize(&frequencies)).unwrap(), frequencies);
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        let frequencies = parse("  97 3\t98 4  99 2 \n").unwrap();
        assert_eq!(frequencies, FrequencyTable::count(b"aaabbbbcc"));
    }

    #[test]
    fn test_parse_accepts_frequencies_summing_to_the_limit() {
        let frequencies = parse("0 9223372036854775807 1 9223372036854775808").unwrap();
        assert_eq!(frequencies.total(), u64::MAX);
    }

    #[rstest]
    #[case("97 3 98")]
    #[case("97")]
    #[case("a 3")]
    #[case("97 three")]
    #[case("256 1")]
    #[case("-1 1")]
    #[case("97 0")]
    #[case("97 -2")]
    #[case("97 1 97 2")]
    #[case("97 18446744073709551615 98 1")]
    #[case("0 9223372036854775808 1 9223372036854775808")]
    fn test_malformed_headers(#[case] line: &str) {
        let result = parse(line);
        assert!(
            matches!(result, Err(HuffmanError::MalformedHeader(_))),
            "{line:?} parsed as {result:?}"
        );
    }
}
