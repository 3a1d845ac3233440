// src/csv_handler.rs
use crate::data_types::{LoadError, RowRecord, TableData};

/// Parses fetched CSV text into a header schema plus row records.
///
/// Line 0 becomes the schema; every later line is zipped against it, short
/// rows padding with empty strings and extra values dropping off the end.
/// Fields are split on bare commas only: quoted fields containing commas or
/// newlines are not handled, matching the upstream export consumer this
/// viewer replaces.
pub fn parse_csv(text: &str) -> Result<TableData, LoadError> {
    let lines: Vec<&str> = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();

    // A header with no data rows is not a usable table.
    if lines.len() < 2 {
        return Err(LoadError::EmptyOrInvalid);
    }

    let headers = split_fields(lines[0]);
    let rows = lines[1..]
        .iter()
        .map(|line| {
            let values = split_fields(line);
            let mut row = RowRecord::new();
            for (i, header) in headers.iter().enumerate() {
                row.insert(
                    header.clone(),
                    values.get(i).cloned().unwrap_or_default(),
                );
            }
            row
        })
        .collect();

    Ok(TableData { headers, rows })
}

/// Splits one line on commas, stripping surrounding whitespace and double
/// quotes from each field.
fn split_fields(line: &str) -> Vec<String> {
    line.split(',')
        .map(|field| field.trim().trim_matches('"').trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zips_short_rows_against_the_header() {
        let data = parse_csv("a,b,c\n1,2,3\n4,5").expect("parse");
        assert_eq!(data.headers, vec!["a", "b", "c"]);
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0].get("a"), "1");
        assert_eq!(data.rows[0].get("b"), "2");
        assert_eq!(data.rows[0].get("c"), "3");
        assert_eq!(data.rows[1].get("a"), "4");
        assert_eq!(data.rows[1].get("b"), "5");
        assert_eq!(data.rows[1].get("c"), "");
    }

    #[test]
    fn extra_values_beyond_the_header_are_dropped() {
        let data = parse_csv("a,b\n1,2,3").expect("parse");
        assert_eq!(data.headers, vec!["a", "b"]);
        assert_eq!(data.rows[0].get("a"), "1");
        assert_eq!(data.rows[0].get("b"), "2");
    }

    #[test]
    fn header_without_data_rows_is_rejected() {
        assert_eq!(parse_csv("a,b,c"), Err(LoadError::EmptyOrInvalid));
    }

    #[test]
    fn blank_input_is_rejected() {
        assert_eq!(parse_csv(""), Err(LoadError::EmptyOrInvalid));
        assert_eq!(parse_csv("   \n \n\t\n"), Err(LoadError::EmptyOrInvalid));
    }

    #[test]
    fn surrounding_quotes_are_stripped() {
        let data = parse_csv("col1,col2\n\"x\",\"y\"").expect("parse");
        assert_eq!(data.rows[0].get("col1"), "x");
        assert_eq!(data.rows[0].get("col2"), "y");
    }

    #[test]
    fn fields_are_trimmed_and_crlf_payloads_parse() {
        let data = parse_csv("name , score\r\n amara , \"12\" \r\n").expect("parse");
        assert_eq!(data.headers, vec!["name", "score"]);
        assert_eq!(data.rows[0].get("name"), "amara");
        assert_eq!(data.rows[0].get("score"), "12");
    }

    #[test]
    fn interior_blank_lines_are_skipped() {
        let data = parse_csv("a,b\n\n1,2\n   \n3,4\n").expect("parse");
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[1].get("a"), "3");
    }
}
