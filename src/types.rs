use std::fmt;
#[cfg(not(feature = "sync"))]
use std::rc::Rc;
#[cfg(feature = "sync")]
use std::sync::Arc;

use getset::Getters;
use indexmap::IndexMap;
use multimap::MultiMap;

use crate::parser;

pub(crate) const CHROM_MARKER: &str = "#CHROM";
pub(crate) const INFO_COLUMN: &str = "INFO";

/// The header as held by a reader and every record it yields.
#[cfg(not(feature = "sync"))]
pub type SharedHeader = Rc<Header>;
#[cfg(feature = "sync")]
pub type SharedHeader = Arc<Header>;

/// One `;`-separated entry of an INFO column.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InfoEntry<'a> {
    /// A key without `=value`, e.g. `DB`.
    Flag(&'a str),
    KeyValue(&'a str, &'a str),
}

impl<'a> InfoEntry<'a> {
    pub(crate) fn new(key: &'a str, value: Option<&'a str>) -> Self {
        match value {
            Some(value) => InfoEntry::KeyValue(key, value),
            None => InfoEntry::Flag(key),
        }
    }

    pub fn key(&self) -> &'a str {
        match *self {
            InfoEntry::Flag(key) | InfoEntry::KeyValue(key, _) => key,
        }
    }

    pub fn value(&self) -> Option<&'a str> {
        match *self {
            InfoEntry::Flag(_) => None,
            InfoEntry::KeyValue(_, value) => Some(value),
        }
    }
}

impl fmt::Display for InfoEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            // an empty value is written like a flag
            InfoEntry::KeyValue(key, value) if !value.is_empty() => write!(f, "{}={}", key, value),
            _ => f.write_str(self.key()),
        }
    }
}

/// The INFO keys to keep, in output order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct InfoAllowList {
    keys: Vec<String>,
}

impl InfoAllowList {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct Header {
    /// Every line up to and including the `#CHROM` line, terminators included.
    lines: Vec<String>,
    columns: Vec<String>,
    /// `##key=value` lines. Structured values such as `<ID=DP,...>` are kept as raw text.
    meta: MultiMap<String, String>,
    #[getset(skip)]
    column_index: IndexMap<String, usize>,
}

impl Header {
    pub(crate) fn new(lines: Vec<String>, columns: Vec<String>) -> Self {
        let meta = lines
            .iter()
            .filter_map(|line| parser::meta_line(line).ok())
            .map(|(_, (key, value))| (key.to_owned(), value.to_owned()))
            .collect();
        // a repeated column name points at its last position
        let column_index = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            lines,
            columns,
            meta,
            column_index,
        }
    }

    /// Position of the value for `column` in a data row.
    pub fn column_position(&self, column: &str) -> Option<usize> {
        self.column_index.get(column).copied()
    }
}
