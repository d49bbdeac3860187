//! Output sinks for forwarding captured test runner output.

use std::io::{self, Write};

/// Destination for lines of captured runner output.
pub trait LineSink {
    /// Forwards one block of output to the sink.
    fn line(&self, text: &str);
}

/// Sink that writes lines to the process standard output.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutSink;

impl LineSink for StdoutSink {
    fn line(&self, text: &str) {
        write_line(io::stdout(), text);
    }
}

fn write_line(mut target: impl Write, text: &str) {
    writeln!(target, "{text}").ok();
}
