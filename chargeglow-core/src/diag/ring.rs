//! Log ring with levels and timestamps
//!
//! Each line is formatted once on insertion as `HH:MM:SS LEVEL: message`
//! and kept newest-first. Lines are safe to embed in a JSON string: double
//! quotes become single quotes and newlines become spaces.

use core::fmt::{self, Write};

use heapless::{Deque, String};

/// Number of lines kept
pub const LOG_CAPACITY: usize = 20;

/// Maximum bytes per line
pub const LOG_LINE_LEN: usize = 100;

/// Log severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Label written into the line
    pub const fn label(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// One formatted log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub line: String<LOG_LINE_LEN>,
}

impl LogEntry {
    pub fn as_str(&self) -> &str {
        self.line.as_str()
    }
}

/// Writer that sanitizes and silently truncates
struct LineWriter<'a> {
    line: &'a mut String<LOG_LINE_LEN>,
    full: bool,
}

impl Write for LineWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.full {
                break;
            }
            let c = match c {
                '"' => '\'',
                '\n' | '\r' => ' ',
                c => c,
            };
            self.full = self.line.push(c).is_err();
        }
        Ok(())
    }
}

/// Fixed-capacity, newest-first diagnostic log
#[derive(Debug, Clone, Default)]
pub struct LogRing {
    entries: Deque<LogEntry, LOG_CAPACITY>,
    now_ms: u64,
}

impl LogRing {
    pub const fn new() -> Self {
        Self {
            entries: Deque::new(),
            now_ms: 0,
        }
    }

    /// Set the uptime used to stamp the next lines
    pub fn set_clock(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    /// Format and store one line, evicting the oldest when full
    pub fn push(&mut self, level: LogLevel, args: fmt::Arguments<'_>) {
        let secs = self.now_ms / 1000;
        let mut line = String::new();
        let mut w = LineWriter {
            line: &mut line,
            full: false,
        };
        let _ = write!(
            w,
            "{:02}:{:02}:{:02} {}: ",
            (secs / 3600) % 24,
            (secs / 60) % 60,
            secs % 60,
            level.label()
        );
        let _ = w.write_fmt(args);

        #[cfg(feature = "defmt")]
        match level {
            LogLevel::Debug => defmt::debug!("{=str}", line.as_str()),
            LogLevel::Info => defmt::info!("{=str}", line.as_str()),
            LogLevel::Warning => defmt::warn!("{=str}", line.as_str()),
            LogLevel::Error => defmt::error!("{=str}", line.as_str()),
        }

        if self.entries.is_full() {
            self.entries.pop_back();
        }
        // Cannot fail after the eviction above
        let _ = self.entries.push_front(LogEntry { level, line });
    }

    pub fn debug(&mut self, args: fmt::Arguments<'_>) {
        self.push(LogLevel::Debug, args);
    }

    pub fn info(&mut self, args: fmt::Arguments<'_>) {
        self.push(LogLevel::Info, args);
    }

    pub fn warn(&mut self, args: fmt::Arguments<'_>) {
        self.push(LogLevel::Warning, args);
    }

    pub fn error(&mut self, args: fmt::Arguments<'_>) {
        self.push(LogLevel::Error, args);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent line
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// Iterate newest to oldest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + '_ {
        self.entries.iter()
    }

    /// Iterate oldest to newest
    pub fn iter_oldest_first(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries.iter().rev()
    }

    /// Number of stored lines at `level`
    pub fn count(&self, level: LogLevel) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }
}
