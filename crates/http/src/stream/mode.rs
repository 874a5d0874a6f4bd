//! POSIX-style open-mode grammar.
//!
//! A mode is one of `r`, `w`, `a`, `x`, optionally extended with `+` and the
//! binary/text flags `b`/`t`/`e`. Readability and writability are derived
//! once from the mode string and never re-queried:
//!
//! - readable ⇔ the mode begins with `r`, or contains `+`
//! - writable ⇔ the mode begins with `w`, `a` or `x`, or contains `+`

use std::fs::OpenOptions;

use crate::ensure;

use super::error::StreamError;

/// A parsed open mode, remembering the raw string for metadata reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenMode {
    raw: String,
    base: char,
    update: bool,
}

impl OpenMode {
    /// Parses a POSIX mode string.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidMode`] when the mode is neither
    /// readable nor writable by the grammar above.
    pub fn parse(mode: &str) -> Result<Self, StreamError> {
        let mut chars = mode.chars();

        let base = chars.next().ok_or_else(|| StreamError::invalid_mode(mode))?;
        ensure!(matches!(base, 'r' | 'w' | 'a' | 'x'), StreamError::invalid_mode(mode));

        let mut update = false;
        for flag in chars {
            match flag {
                '+' if !update => update = true,
                'b' | 't' | 'e' => {}
                _ => return Err(StreamError::invalid_mode(mode)),
            }
        }

        Ok(Self { raw: mode.to_string(), base, update })
    }

    /// The raw mode string as given to [`parse`](Self::parse).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_readable(&self) -> bool {
        self.base == 'r' || self.update
    }

    pub fn is_writable(&self) -> bool {
        matches!(self.base, 'w' | 'a' | 'x') || self.update
    }

    /// Maps the mode onto the standard open flags.
    pub(crate) fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options.read(self.is_readable());

        match self.base {
            'r' => {
                options.write(self.update);
            }
            'w' => {
                options.write(true).create(true).truncate(true);
            }
            'a' => {
                options.append(true).create(true);
            }
            'x' => {
                options.write(true).create_new(true);
            }
            _ => unreachable!("parse only accepts r/w/a/x"),
        }

        options
    }
}
