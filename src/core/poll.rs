use anyhow::{Result, anyhow};
use log::warn;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Byte stream supplying newline-terminated input, one line per read.
pub trait LineSource {
    /// Whether buffered input is waiting.
    fn data_ready(&mut self) -> io::Result<bool>;

    /// Raw bytes up to and including the next newline, or whatever
    /// arrived before the read timeout. Empty when nothing arrived.
    fn read_line(&mut self) -> io::Result<Vec<u8>>;
}

/// What to do when a read fails with something other than a timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort the loop and propagate the error.
    Fail,
    /// Log at warn level and keep polling.
    WarnAndContinue,
}

#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    /// Total passes over the source; the only termination condition.
    pub iterations: u32,
    /// Sleep between passes when no input is buffered.
    pub idle_delay: Duration,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    pub iterations_run: u32,
    pub lines_printed: u32,
}

/// Decode one raw line leniently: undecodable bytes become U+FFFD,
/// surrounding whitespace is dropped.
pub fn decode_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).trim().to_string()
}

/// Fixed-budget poll: exactly `iterations` passes, sleeping `idle_delay`
/// on passes with no buffered input. Non-empty decoded lines go to the
/// sink, one per line. Timeouts are never treated as errors.
pub fn run(
    settings: PollSettings,
    policy: ErrorPolicy,
    source: &mut dyn LineSource,
    sink: &mut dyn Write,
) -> Result<PollOutcome> {
    let mut outcome = PollOutcome::default();

    for _ in 0..settings.iterations {
        outcome.iterations_run += 1;

        let step = source.data_ready().and_then(|ready| {
            if ready {
                source.read_line().map(Some)
            } else {
                Ok(None)
            }
        });

        match step {
            Ok(None) => thread::sleep(settings.idle_delay),
            Ok(Some(raw)) => {
                let line = decode_line(&raw);
                if !line.is_empty() {
                    writeln!(sink, "{}", line)
                        .map_err(|e| anyhow!("Failed to write output: {}", e))?;
                    outcome.lines_printed += 1;
                }
            }
            Err(ref e) if e.kind() == io::ErrorKind::TimedOut => {}
            Err(e) => match policy {
                ErrorPolicy::Fail => return Err(anyhow!("Serial read error: {}", e)),
                ErrorPolicy::WarnAndContinue => warn!("Serial read error (continuing): {}", e),
            },
        }
    }

    Ok(outcome)
}
