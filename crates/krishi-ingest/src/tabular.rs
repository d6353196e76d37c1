use crate::IngestError;
use csv::ReaderBuilder;

#[derive(Debug, Clone)]
pub struct TabularFile {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabularFile {
    pub fn require_column(&self, name: &str) -> Result<usize, IngestError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| IngestError(format!("missing expected column: {name}")))
    }
}

pub fn parse_delimited(decoded: &str) -> Result<TabularFile, IngestError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(decoded.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| IngestError(format!("failed to read CSV header: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError(format!("malformed CSV row: {e}")))?;
        rows.push(record.iter().map(ToString::to_string).collect());
    }
    Ok(TabularFile { headers, rows })
}

/// Short rows read as empty cells rather than indexing errors; the reader
/// runs in flexible mode, so trailing fields may be absent.
#[must_use]
pub fn cell<'a>(row: &'a [String], idx: usize) -> &'a str {
    row.get(idx).map_or("", String::as_str)
}

#[must_use]
pub fn optional_text(row: &[String], idx: usize) -> Option<String> {
    let value = cell(row, idx);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub fn parse_required_int(raw: &str, what: &str) -> Result<i64, IngestError> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        if value.is_finite() {
            return Ok(value as i64);
        }
    }
    Err(IngestError(format!("invalid {what}: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_trimmed_before_lookup() {
        let table = parse_delimited("Year , Count\n1995,3\n").expect("parse");
        assert_eq!(table.require_column("Year").expect("year column"), 0);
        assert_eq!(table.require_column("Count").expect("count column"), 1);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let table = parse_delimited("Year\n1995\n").expect("parse");
        let err = table.require_column("Count").expect_err("must fail");
        assert_eq!(err.0, "missing expected column: Count");
    }

    #[test]
    fn quoted_cells_keep_embedded_separators() {
        let table = parse_delimited("a,b\n\"x, y\",z\n").expect("parse");
        assert_eq!(cell(&table.rows[0], 0), "x, y");
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let table = parse_delimited("a,b,c\n1,2\n").expect("parse");
        assert_eq!(cell(&table.rows[0], 2), "");
        assert_eq!(optional_text(&table.rows[0], 2), None);
    }

    #[test]
    fn required_int_accepts_float_shaped_cells() {
        assert_eq!(parse_required_int("2019", "year").expect("int"), 2019);
        assert_eq!(parse_required_int(" 2019.0 ", "year").expect("float"), 2019);
        let err = parse_required_int("unknown", "advisory year").expect_err("must fail");
        assert_eq!(err.0, "invalid advisory year: unknown");
    }
}
