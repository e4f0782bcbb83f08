use nom::bytes::complete::{is_not, tag};
use nom::character::complete::char;
use nom::combinator::{map, opt, rest};
use nom::sequence::{delimited, pair, preceded, separated_pair};
use nom::IResult;

use crate::types::InfoEntry;

/// `KEY` or `KEY=VALUE`; the value runs to the end of input and may contain `=`.
pub(crate) fn info_entry(input: &str) -> IResult<&str, InfoEntry<'_>> {
    map(
        pair(is_not("="), opt(preceded(char('='), rest))),
        |(key, value)| InfoEntry::new(key, value),
    )(input)
}

/// `##key=value`, with or without the trailing line terminator.
pub(crate) fn meta_line(input: &str) -> IResult<&str, (&str, &str)> {
    delimited(
        tag("##"),
        separated_pair(is_not("=\r\n"), char('='), is_not("\r\n")),
        rest,
    )(input)
}
