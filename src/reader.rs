use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::record::Record;
use crate::types::{Header, SharedHeader, CHROM_MARKER};

/// Read lines up to and including the `#CHROM` line.
///
/// The lines are kept exactly as read, terminators included. Column names are
/// the pieces of the `#CHROM` line split on tabs, each trimmed.
pub fn read_header<R: BufRead>(reader: &mut R) -> Result<Header> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(Error::InputFormat(format!(
                "no {} line found after {} header lines",
                CHROM_MARKER,
                lines.len()
            )));
        }
        let is_marker = line.starts_with(CHROM_MARKER);
        lines.push(line);
        if is_marker {
            break;
        }
    }
    let columns = lines
        .last()
        .map(|marker| marker.split('\t').map(|c| c.trim().to_owned()).collect())
        .unwrap_or_default();
    Ok(Header::new(lines, columns))
}

/// Data records of a VCF text stream. The header is read on construction.
pub struct VcfRecords<R: BufRead> {
    header: SharedHeader,
    line_buf: String,
    line_number: usize,
    inner: R,
}

impl<R: BufRead> VcfRecords<R> {
    pub fn header(&self) -> &Header {
        self.header.as_ref()
    }
}

impl VcfRecords<BufReader<Box<dyn Read>>> {
    /// Open a plain-text VCF. Compressed input is rejected.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = match niffler::from_path(path) {
            Ok((reader, format)) => {
                debug!("opened {} ({:?})", path.display(), format);
                reader
            }
            // too short to sniff, so also too short for a header; read_header reports it
            Err(niffler::Error::FileTooShort) => Box::new(File::open(path)?) as Box<dyn Read>,
            Err(source) => {
                return Err(Error::Open {
                    path: path.to_owned(),
                    source,
                })
            }
        };
        Self::new(BufReader::new(reader))
    }

    pub fn from_stdin() -> Result<Self> {
        let stdin: Box<dyn Read> = Box::new(io::stdin());
        Self::new(BufReader::new(stdin))
    }
}

impl<R: BufRead> VcfRecords<R> {
    pub fn new(mut reader: R) -> Result<Self> {
        let header = read_header(&mut reader)?;
        debug!(
            "read {} header lines, {} columns",
            header.lines().len(),
            header.columns().len()
        );
        Ok(Self {
            line_number: header.lines().len(),
            header: SharedHeader::new(header),
            line_buf: String::new(),
            inner: reader,
        })
    }
}

impl<R: BufRead> Iterator for VcfRecords<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line_buf.clear();
            match self.inner.read_line(&mut self.line_buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_number += 1;
            let line = self.line_buf.trim_end_matches(&['\r', '\n'][..]);
            if line.is_empty() {
                trace!("line {}: skipping blank line", self.line_number);
                continue;
            }
            return Some(Ok(Record::from_line(
                self.line_number,
                line,
                self.header.clone(),
            )));
        }
    }
}
