pub mod error;
pub mod info;
pub(crate) mod parser;
pub mod pipeline;
pub mod reader;
pub mod record;
pub mod types;

pub use error::{Error, Result};
pub use info::{filter_info, Info};
pub use pipeline::{Pipeline, Summary};
pub use reader::{read_header, VcfRecords};
pub use record::{format_line, Record};
pub use types::{Header, InfoAllowList, InfoEntry};
