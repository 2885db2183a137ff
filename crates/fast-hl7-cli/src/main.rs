//! fasthl7 - query HL7 v2 messages from files, stdin or MLLP streams

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fast_hl7::{escape, Message};
use fast_hl7_mllp::MllpReader;
use tracing::{debug, Level};

/// Query HL7 v2 messages with dotted paths
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at each path, one `PATH<TAB>VALUE` line per path
    Query {
        #[command(flatten)]
        input: InputArgs,

        /// Decode escape sequences in printed values
        #[arg(short, long)]
        unescape: bool,

        /// Paths such as MSH.10, PID.5.1 or OBX(2).3(1).2
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// List each segment's index, name and field count
    Segments {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Read from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Input is a stream of MLLP frames rather than one raw message
    #[arg(short, long)]
    mllp: bool,
}

impl InputArgs {
    fn open(&self) -> Result<Box<dyn Read>> {
        match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open {}", path.display()))?;
                Ok(Box::new(file))
            }
            None => Ok(Box::new(io::stdin().lock())),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut out = BufWriter::new(io::stdout().lock());

    let count = match &cli.command {
        Commands::Query {
            input,
            unescape,
            paths,
        } => for_each_message(input.open()?, input.mllp, |index, message| {
            if index > 0 {
                writeln!(out)?;
            }
            write_query(&mut out, message, paths, *unescape)
        })?,
        Commands::Segments { input } => {
            for_each_message(input.open()?, input.mllp, |index, message| {
                if index > 0 {
                    writeln!(out)?;
                }
                write_segments(&mut out, message)
            })?
        }
    };

    out.flush().context("Failed to write output")?;
    debug!(messages = count, "done");
    Ok(())
}

/// Parses every message in `source` and hands it to `handle` with its
/// 0-based position. Returns the number of messages seen.
fn for_each_message<R, F>(mut source: R, mllp: bool, mut handle: F) -> Result<usize>
where
    R: Read,
    F: FnMut(usize, &Message<'_>) -> Result<()>,
{
    if !mllp {
        let mut text = String::new();
        source
            .read_to_string(&mut text)
            .context("Failed to read input as UTF-8 text")?;
        let message = Message::parse(text.trim_start()).context("Input is not an HL7 message")?;
        handle(0, &message)?;
        return Ok(1);
    }

    let mut reader = MllpReader::new(source);
    let mut count = 0;
    while let Some(text) = reader.read_message().context("Failed to read MLLP frame")? {
        let message = Message::parse(text)
            .with_context(|| format!("Frame {} is not an HL7 message", count + 1))?;
        handle(count, &message)?;
        count += 1;
    }
    Ok(count)
}

fn write_query<W: Write>(
    out: &mut W,
    message: &Message<'_>,
    paths: &[String],
    unescape: bool,
) -> Result<()> {
    for path in paths {
        let value = message
            .query(path)
            .with_context(|| format!("Query {path} failed"))?;
        if unescape {
            let decoded = escape::unescape(value, &message.delimiters());
            writeln!(out, "{path}\t{decoded}")?;
        } else {
            writeln!(out, "{path}\t{value}")?;
        }
    }
    Ok(())
}

fn write_segments<W: Write>(out: &mut W, message: &Message<'_>) -> Result<()> {
    for (index, segment) in message.segments().enumerate() {
        writeln!(out, "{index}\t{}\t{}", segment.name(), segment.field_count())?;
    }
    Ok(())
}
