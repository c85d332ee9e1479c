use std::{
    fs, io,
    num::ParseIntError,
    path::{Path, PathBuf},
};

use miette::GraphicalReportHandler;
use nom::{
    character::complete::{digit1, one_of},
    combinator::{map_res, opt, recognize},
    error::{FromExternalError, ParseError},
    sequence::tuple,
    IResult,
};
use nom_locate::LocatedSpan;
use nom_supreme::{
    error::{ErrorTree, GenericErrorTree},
    final_parser::final_parser,
};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Thanks to FasterThanLime! https://fasterthanli.me/series/advent-of-code-2022/part-11

pub type Span<'a> = LocatedSpan<&'a str>;

/// A line that a parser rejected, labelled at the offset where parsing stopped.
#[derive(thiserror::Error, Debug, miette::Diagnostic)]
#[error("bad input on line {line_number}")]
pub struct BadInput {
    #[source_code]
    src: String,

    #[label("{kind}")]
    bad_bit: miette::SourceSpan,

    kind: String,

    line_number: usize,
}

impl BadInput {
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn offset(&self) -> usize {
        self.bad_bit.offset()
    }

    pub fn line(&self) -> &str {
        &self.src
    }

    pub fn render(&self) -> String {
        let mut s = String::new();
        if GraphicalReportHandler::new()
            .render_report(&mut s, self)
            .is_err()
        {
            s = self.to_string();
        }
        s
    }
}

#[derive(thiserror::Error, Debug)]
#[error("unable to read input file {}", .path.display())]
pub struct FileAccessError {
    path: PathBuf,

    #[source]
    source: io::Error,
}

impl FileAccessError {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Signed base-10 integer, e.g. `42`, `-7` or `+3`.
pub fn parse_number<'a, E>(i: Span<'a>) -> IResult<Span<'a>, i64, E>
where
    E: ParseError<Span<'a>> + FromExternalError<Span<'a>, ParseIntError>,
{
    map_res(
        recognize(tuple((opt(one_of("+-")), digit1))),
        |i: Span<'a>| i.fragment().parse::<i64>(),
    )(i)
}

fn first_failure(tree: &ErrorTree<Span<'_>>) -> Option<(usize, String)> {
    match tree {
        GenericErrorTree::Base { location, kind } => {
            Some((location.location_offset(), kind.to_string()))
        }
        GenericErrorTree::Stack { base, .. } => first_failure(base),
        GenericErrorTree::Alt(alternatives) => alternatives.iter().find_map(first_failure),
    }
}

/// Runs `parse_fun` over the whole of `l`; leftover input counts as a failure.
pub fn parse_line<'a, T, F>(l: &'a str, line_number: usize, parse_fun: F) -> Result<T, BadInput>
where
    F: FnMut(Span<'a>) -> IResult<Span<'a>, T, ErrorTree<Span<'a>>>,
{
    let line_span = Span::new(l);
    let line: Result<_, ErrorTree<Span>> = final_parser(parse_fun)(line_span);
    line.map_err(|e| {
        let (offset, kind) =
            first_failure(&e).unwrap_or_else(|| (0, "unparsable line".to_string()));
        let err = BadInput {
            src: l.to_string(),
            bad_bit: miette::SourceSpan::new(offset.into(), 0.into()),
            kind,
            line_number,
        };
        error!("{}", err.render());
        err
    })
}

pub fn read_input_file(path: impl AsRef<Path>) -> Result<String, FileAccessError> {
    let path = path.as_ref();

    let input = fs::read_to_string(path).map_err(|source| FileAccessError {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = input.len(), "read input file");

    Ok(input)
}

/// Logs go to stderr so stdout only ever carries the answer.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    #[case("42", 42)]
    #[case("-7", -7)]
    #[case("+3", 3)]
    #[case("0", 0)]
    #[case("9223372036854775807", i64::MAX)]
    fn parse_number_ok(#[case] input: &str, #[case] expected: i64) {
        let res = parse_line(input, 1, parse_number);
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), expected);
    }

    #[rstest]
    #[case("abc", 0)]
    #[case("12x", 2)]
    #[case("--1", 1)]
    #[case("1 2", 1)]
    fn parse_number_bad_offset(#[case] input: &str, #[case] offset: usize) {
        let err = parse_line(input, 7, parse_number).unwrap_err();
        assert_eq!(err.line_number(), 7);
        assert_eq!(err.line(), input);
        assert_eq!(err.offset(), offset);
    }

    #[test]
    fn parse_number_out_of_range() {
        let err = parse_line("9223372036854775808", 3, parse_number).unwrap_err();
        assert_eq!(err.line_number(), 3);
        assert_eq!(err.to_string(), "bad input on line 3");
    }

    #[test]
    fn bad_input_render_shows_line() {
        let err = parse_line("12x", 1, parse_number).unwrap_err();
        assert!(err.render().contains("12x"));
    }

    #[test]
    fn read_input_file_ok() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1\n2\n\n3\n").unwrap();

        let res = read_input_file(file.path());
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), "1\n2\n\n3\n");
    }

    #[test]
    fn read_input_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");

        let err = read_input_file(&path).unwrap_err();
        assert_eq!(err.path(), path.as_path());
        assert!(err.to_string().contains("input.txt"));
    }
}
