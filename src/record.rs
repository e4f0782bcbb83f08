use itertools::Itertools;
use log::warn;

use crate::error::{Error, Result};
use crate::info::Info;
use crate::types::{SharedHeader, INFO_COLUMN};

/// One data line, with values addressed by the header's column names.
#[derive(Debug, Clone)]
pub struct Record {
    line: usize,
    values: Vec<String>,
    header: SharedHeader,
}

impl Record {
    /// Split a data line (without its terminator) on tabs. Fields past the
    /// last declared column are dropped.
    pub fn from_line(line: usize, text: &str, header: SharedHeader) -> Self {
        let mut values = text.split('\t').map(str::to_owned).collect_vec();
        let declared = header.columns().len();
        if values.len() > declared {
            warn!(
                "line {}: dropping {} fields beyond the {} declared columns",
                line,
                values.len() - declared,
                declared
            );
            values.truncate(declared);
        }
        Self {
            line,
            values,
            header,
        }
    }

    /// 1-based line number in the input.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.header
            .column_position(column)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    pub fn set(&mut self, column: &str, value: String) -> Result<()> {
        match self.header.column_position(column) {
            Some(i) if i < self.values.len() => {
                self.values[i] = value;
                Ok(())
            }
            _ => Err(self.missing(column)),
        }
    }

    pub fn info(&self) -> Result<Info<'_>> {
        let text = self
            .get(INFO_COLUMN)
            .ok_or_else(|| self.missing(INFO_COLUMN))?;
        Info::decode(text)
    }

    /// The record as a tab-separated line in header order, without terminator.
    pub fn to_line(&self) -> Result<String> {
        format_line(self, self.header.columns().as_slice())
    }

    fn missing(&self, column: &str) -> Error {
        Error::MissingColumn {
            column: column.to_owned(),
            expected: self.header.columns().len(),
            found: self.values.len(),
        }
    }
}

/// Join the values of `columns` with tabs. Fails on the first column the
/// record has no value for.
pub fn format_line<S: AsRef<str>>(record: &Record, columns: &[S]) -> Result<String> {
    itertools::process_results(
        columns.iter().map(|column| {
            let column = column.as_ref();
            record.get(column).ok_or_else(|| record.missing(column))
        }),
        |mut values| values.join("\t"),
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reader::read_header;
    use crate::types::InfoEntry;

    const HEADER: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";
    const LINE: &str = "chr1\t12345\t.\tA\tG\t.\tPASS\tAC=10";

    fn header(text: &str) -> SharedHeader {
        SharedHeader::new(read_header(&mut text.as_bytes()).unwrap())
    }

    #[test]
    fn test_format_line() {
        let header = header(HEADER);
        let record = Record::from_line(2, LINE, header.clone());
        let columns = ["#CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "INFO"];
        assert_eq!(format_line(&record, &columns).unwrap(), LINE);
        assert_eq!(record.to_line().unwrap(), LINE);
    }

    #[test]
    fn test_format_line_subset() {
        let record = Record::from_line(2, LINE, header(HEADER));
        assert_eq!(format_line(&record, &["INFO", "#CHROM"]).unwrap(), "AC=10\tchr1");
    }

    #[test]
    fn test_short_row() {
        let record = Record::from_line(2, "chr1\t12345\t.\tA\tG\t.\tPASS", header(HEADER));
        match record.to_line() {
            Err(Error::MissingColumn {
                column,
                expected,
                found,
            }) => {
                assert_eq!(column, "INFO");
                assert_eq!(expected, 8);
                assert_eq!(found, 7);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(record.info().is_err());
    }

    #[test]
    fn test_surplus_fields_dropped() {
        let record = Record::from_line(2, &format!("{}\textra", LINE), header(HEADER));
        assert_eq!(record.to_line().unwrap(), LINE);
    }

    #[test]
    fn test_set_and_info() {
        let mut record = Record::from_line(7, LINE, header(HEADER));
        assert_eq!(record.line(), 7);
        assert_eq!(
            record.info().unwrap().get("AC"),
            Some(InfoEntry::KeyValue("AC", "10"))
        );
        record.set("INFO", "DB".to_owned()).unwrap();
        assert_eq!(record.get("INFO"), Some("DB"));
        assert!(record.set("SAMPLE1", String::new()).is_err());
    }

    #[test]
    fn test_duplicate_column_uses_last_value() {
        let record = Record::from_line(2, "chr1\ta\tb", header("#CHROM\tX\tX\n"));
        assert_eq!(record.get("X"), Some("b"));
        assert_eq!(record.to_line().unwrap(), "chr1\tb\tb");
    }
}
