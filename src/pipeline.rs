//! Header pass-through followed by record-at-a-time INFO filtering.

use std::io::{BufRead, Write};

use getset::CopyGetters;
use log::{debug, trace};
use strum::Display;

use crate::error::Result;
use crate::info::encode;
use crate::reader::VcfRecords;
use crate::record::Record;
use crate::types::{InfoAllowList, INFO_COLUMN};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Display)]
pub enum State {
    ReadingHeader,
    StreamingRecords,
}

/// Counts for one run.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Summary {
    records: usize,
    retained_entries: usize,
    dropped_entries: usize,
}

/// Rewrite the INFO column of `record` to the allow-listed entries.
///
/// Returns how many entries were written and how many of the record's keys
/// were dropped. A key listed twice is written twice.
pub fn filter_record(record: &mut Record, allow_list: &InfoAllowList) -> Result<(usize, usize)> {
    let (filtered, retained, dropped) = {
        let info = record.info()?;
        let retained = info.filter(allow_list).count();
        let dropped = info
            .iter()
            .filter(|entry| !allow_list.contains(entry.key()))
            .count();
        (encode(info.filter(allow_list)), retained, dropped)
    };
    record.set(INFO_COLUMN, filtered)?;
    Ok((retained, dropped))
}

pub struct Pipeline<'a> {
    allow_list: &'a InfoAllowList,
    state: State,
}

impl<'a> Pipeline<'a> {
    pub fn new(allow_list: &'a InfoAllowList) -> Self {
        Self {
            allow_list,
            state: State::ReadingHeader,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Read the header from `reader`, write it unchanged, then write each
    /// record with its INFO column filtered. Stops at the first error; lines
    /// written before it stay written.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, writer: W) -> Result<Summary> {
        let records = VcfRecords::new(reader)?;
        self.stream(records, writer)
    }

    /// Like [`Pipeline::run`], for records that are already past their header.
    pub fn stream<R: BufRead, W: Write>(
        &mut self,
        records: VcfRecords<R>,
        mut writer: W,
    ) -> Result<Summary> {
        for line in records.header().lines() {
            writer.write_all(line.as_bytes())?;
        }
        self.transition(State::StreamingRecords);

        let mut summary = Summary::default();
        for record in records {
            let mut record = record?;
            let line = record.line();
            let (retained, dropped) =
                filter_record(&mut record, self.allow_list).map_err(|e| e.at_line(line))?;
            let text = record.to_line().map_err(|e| e.at_line(line))?;
            writeln!(writer, "{}", text)?;
            trace!("line {}: kept {} INFO entries, dropped {}", line, retained, dropped);

            summary.records += 1;
            summary.retained_entries += retained;
            summary.dropped_entries += dropped;
        }
        writer.flush()?;
        Ok(summary)
    }

    fn transition(&mut self, to: State) {
        debug!("{} -> {}", self.state, to);
        self.state = to;
    }
}
