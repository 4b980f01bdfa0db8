//! Logger setup for the global `--quiet`, `--verbose` and `--logfile` flags.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target, WriteStyle};
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

/// Writes to stderr and, if set, a log file with ANSI codes stripped. Stdout
/// is left to catalog output.
pub(crate) struct TeeWriter<W> {
    console: W,
    file: Option<File>,
}

impl<W: Write> TeeWriter<W> {
    pub(crate) fn new(console: W, file: Option<File>) -> Self {
        Self { console, file }
    }
}

impl<W: Write> Write for TeeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

fn level_filter(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger.
///
/// Info lines are printed bare so `log::info!` reads as normal program
/// output; warnings and errors get a colored prefix. `--verbose` adds
/// timestamps and debug output from the gameid crates.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let file = logfile.map(File::create).transpose()?;

    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        // Prefix match: also covers gameid_lib and gameid_sony
        .filter_module("gameid", level_filter(quiet, verbose))
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(TeeWriter::new(io::stderr(), file))));

    builder.format(move |buf, record| {
        let level = record.level();
        if verbose {
            let ts = buf.timestamp_millis();
            writeln!(buf, "{} {:<5} {}", ts, level, record.args())
        } else if level <= Level::Warn {
            let tag = match level {
                Level::Error => format!("{}", "error:".if_supports_color(Stderr, |t| t.red())),
                _ => format!("{}", "warning:".if_supports_color(Stderr, |t| t.yellow())),
            };
            writeln!(buf, "{} {}", tag, record.args())
        } else {
            writeln!(buf, "{}", record.args())
        }
    });

    builder
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}

#[cfg(test)]
#[path = "tests/logging_tests.rs"]
mod tests;
