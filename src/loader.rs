//! Distance table loading.
//!
//! The table is plain text: a header line with the city count `n`,
//! followed by `n` rows of `n` whitespace-separated distances. A row may be
//! prefixed by the city's name; unnamed rows are called `city-<index>`.
//!
//! ```text
//! # three cities
//! 3
//! Paris  0   10  20
//! Lyon   10  0   15
//! Nice   20  15  0
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use crate::cities::CityRegistry;
use crate::error::{Error, Result};
use std::path::Path;

/// Reads and parses a distance table file.
pub fn load_distance_table(path: impl AsRef<Path>) -> Result<CityRegistry> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_distance_table(&text)
}

/// Parses a distance table from text.
pub fn parse_distance_table(text: &str) -> Result<CityRegistry> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

    let (header_line, header) = lines
        .next()
        .ok_or_else(|| Error::input(0, "empty distance table"))?;
    let n: usize = header
        .parse()
        .map_err(|_| Error::input(header_line, format!("expected city count, got '{header}'")))?;
    if n == 0 {
        return Err(Error::input(header_line, "city count must be at least 1"));
    }

    let mut names = Vec::with_capacity(n);
    let mut matrix = Vec::with_capacity(n);
    let mut row_lines = Vec::with_capacity(n);

    for (line_no, line) in lines {
        if matrix.len() == n {
            return Err(Error::input(line_no, format!("unexpected data after {n} rows")));
        }
        let (name, row) = parse_row(line_no, line, n, matrix.len())?;
        names.push(name);
        matrix.push(row);
        row_lines.push(line_no);
    }

    if matrix.len() != n {
        return Err(Error::input(
            text.lines().count(),
            format!("expected {n} rows, found {}", matrix.len()),
        ));
    }

    // Registry errors count rows from 1; point them at the source line.
    CityRegistry::new(names, matrix).map_err(|err| match err {
        Error::InputFormat { line, message } if (1..=n).contains(&line) => Error::InputFormat {
            line: row_lines[line - 1],
            message,
        },
        other => other,
    })
}

fn parse_row(line_no: usize, line: &str, n: usize, row_index: usize) -> Result<(String, Vec<f64>)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let (name, values) = match tokens.split_first() {
        Some((first, rest)) if tokens.len() == n + 1 && first.parse::<f64>().is_err() => {
            (first.to_string(), rest)
        }
        _ => (format!("city-{row_index}"), tokens.as_slice()),
    };

    if values.len() != n {
        return Err(Error::input(
            line_no,
            format!("expected {n} distances, found {}", values.len()),
        ));
    }

    let row = values
        .iter()
        .map(|tok| {
            tok.parse::<f64>()
                .map_err(|_| Error::input(line_no, format!("invalid distance '{tok}'")))
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok((name, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unnamed() {
        let reg = parse_distance_table("3\n0 1 2\n1 0 3\n2 3 0\n").unwrap();
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.name(0), "city-0");
        assert_eq!(reg.distance(2, 1), 3.0);
    }

    #[test]
    fn test_parse_named_with_comments() {
        let text = "# header\n2\n\nParis 0 4.5\n# mid\nLyon 4.5 0\n";
        let reg = parse_distance_table(text).unwrap();
        assert_eq!(reg.names(), &["Paris".to_string(), "Lyon".to_string()]);
        assert_eq!(reg.distance(0, 1), 4.5);
    }

    #[test]
    fn test_bad_header() {
        let err = parse_distance_table("three\n").unwrap_err();
        assert!(matches!(err, Error::InputFormat { line: 1, .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            parse_distance_table("   \n# nothing\n"),
            Err(Error::InputFormat { .. })
        ));
    }

    #[test]
    fn test_wrong_row_width() {
        let err = parse_distance_table("2\n0 1\n1 0 7\n").unwrap_err();
        assert!(matches!(err, Error::InputFormat { line: 3, .. }));
    }

    #[test]
    fn test_invalid_number() {
        let err = parse_distance_table("2\n0 x\n1 0\n").unwrap_err();
        assert!(matches!(err, Error::InputFormat { line: 2, .. }));
    }

    #[test]
    fn test_negative_distance_reports_source_line() {
        let err = parse_distance_table("# header\n\n2\n0 -1\n1 0\n").unwrap_err();
        assert!(matches!(err, Error::InputFormat { line: 4, .. }), "{err}");
    }

    #[test]
    fn test_duplicate_name_reports_source_line() {
        let err = parse_distance_table("3\nA 0 1 1\nB 1 0 1\nA 1 1 0\n").unwrap_err();
        assert!(matches!(err, Error::InputFormat { line: 4, .. }), "{err}");
    }

    #[test]
    fn test_nonzero_diagonal_reports_source_line() {
        let text = "2\n# first row\nParis 0 3\n\n# second row\nLyon 3 1\n";
        let err = parse_distance_table(text).unwrap_err();
        assert!(matches!(err, Error::InputFormat { line: 6, .. }), "{err}");
    }

    #[test]
    fn test_missing_and_extra_rows() {
        assert!(parse_distance_table("3\n0 1 2\n1 0 3\n").is_err());
        assert!(parse_distance_table("1\n0\n0\n").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_distance_table("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
