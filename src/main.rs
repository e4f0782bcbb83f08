use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use vcf_cleanup::{InfoAllowList, Pipeline, VcfRecords};

/// Keep only the listed INFO keys of a VCF file, writing the result to stdout.
#[derive(Parser)]
#[command(name = "clean-up-vcf", version, about, long_about = None)]
struct Cli {
    /// VCF file, or `-` for stdin
    #[arg(long)]
    vcf: PathBuf,

    /// INFO keys to retain, in output order
    #[arg(short = 'i', long = "info", value_name = "KEY", num_args = 1.., required = true)]
    info_fields: Vec<String>,

    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let Cli {
        vcf,
        info_fields,
        verbose,
    } = Cli::parse();
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let allow_list = InfoAllowList::new(info_fields);
    let records = if vcf.as_os_str() == "-" {
        VcfRecords::from_stdin().context("reading VCF header from stdin")?
    } else {
        VcfRecords::from_path(&vcf)
            .with_context(|| format!("reading VCF header from {}", vcf.display()))?
    };

    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());
    let summary = Pipeline::new(&allow_list)
        .stream(records, writer)
        .with_context(|| format!("filtering {}", vcf.display()))?;
    info!(
        "wrote {} records, kept {} INFO entries, dropped {}",
        summary.records(),
        summary.retained_entries(),
        summary.dropped_entries()
    );
    Ok(())
}
