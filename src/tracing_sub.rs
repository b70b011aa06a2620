use std::io::{self, Write};
use std::str::FromStr;

use tracing::Level;

use crate::log_buffer::{LogBufferWriter, global_log_buffer};

/// How chatty the library is. Hosts pick one at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogProfile {
    /// Errors only.
    Release,
    /// Warnings and errors.
    #[default]
    Development,
    /// Everything but debug output.
    Editor,
    Trace,
}

impl LogProfile {
    pub fn max_level(self) -> Level {
        match self {
            LogProfile::Release => Level::ERROR,
            LogProfile::Development => Level::WARN,
            LogProfile::Editor => Level::INFO,
            LogProfile::Trace => Level::DEBUG,
        }
    }
}

impl FromStr for LogProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "release" => Ok(LogProfile::Release),
            "development" | "dev" => Ok(LogProfile::Development),
            "editor" => Ok(LogProfile::Editor),
            "trace" | "debug" => Ok(LogProfile::Trace),
            other => Err(format!("unknown log profile `{other}`")),
        }
    }
}

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    Buffer(LogBufferWriter),
    Stderr(io::Stderr),
}

impl DelegatingWriter {
    fn new() -> Self {
        if let Some(handle) = global_log_buffer() {
            DelegatingWriter {
                inner: DelegatingInner::Buffer(handle.writer()),
            }
        } else {
            DelegatingWriter {
                inner: DelegatingInner::Stderr(io::stderr()),
            }
        }
    }
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::Buffer(w) => w.write(buf),
            DelegatingInner::Stderr(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::Buffer(w) => w.flush(),
            DelegatingInner::Stderr(s) => s.flush(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SubscriberMakeWriter;

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter::new()
    }
}

/// Install the global subscriber for `profile`, writing to the log buffer when
/// one is installed and to stderr otherwise. Later calls are no-ops.
pub fn init(profile: LogProfile) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(profile.max_level())
        .with_writer(SubscriberMakeWriter)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}

pub fn init_default() {
    init(LogProfile::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_parse_and_map_to_levels() {
        assert_eq!("Release".parse::<LogProfile>(), Ok(LogProfile::Release));
        assert_eq!(" dev ".parse::<LogProfile>(), Ok(LogProfile::Development));
        assert_eq!(LogProfile::Editor.max_level(), Level::INFO);
        assert!("verbose".parse::<LogProfile>().is_err());
    }
}
