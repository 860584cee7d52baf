//! Minimal CSV reading for the reference pools.
//!
//! Pool files are small and line-oriented, so this handles exactly the
//! dialect they use: comma-separated fields, optional double-quote
//! wrapping, `""` as an escaped quote. Embedded newlines are not
//! supported and blank lines are skipped.

use crate::error::{ForgeError, ForgeResult};

/// A parsed pool file: header columns plus data rows.
///
/// Rows keep their 1-based source line number so later validation can
/// point at the offending line.
#[derive(Debug)]
pub struct Table {
    file: String,
    pub header: Vec<String>,
    pub rows: Vec<(usize, Vec<String>)>,
}

impl Table {
    /// Resolves a header column by name.
    pub fn column(&self, name: &str) -> ForgeResult<usize> {
        self.header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ForgeError::PoolFormat {
                file: self.file.clone(),
                line: 1,
                message: format!("missing column '{name}'"),
            })
    }

    /// Builds a format error pointing at a specific data row.
    pub fn bad_row(&self, line: usize, message: impl Into<String>) -> ForgeError {
        ForgeError::PoolFormat {
            file: self.file.clone(),
            line,
            message: message.into(),
        }
    }
}

/// Parses raw CSV text into a [`Table`].
///
/// Every data row must have the same field count as the header.
pub fn parse(raw: &str, file: &str) -> ForgeResult<Table> {
    let fail = |line: usize, message: String| ForgeError::PoolFormat {
        file: file.to_string(),
        line,
        message,
    };

    let mut lines = raw.lines().enumerate();
    let header = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((idx, line)) => break split_line(line).map_err(|m| fail(idx + 1, m))?,
            None => return Err(fail(1, "missing header row".to_string())),
        }
    };

    let mut rows = Vec::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_line(line).map_err(|m| fail(idx + 1, m))?;
        if fields.len() != header.len() {
            return Err(fail(
                idx + 1,
                format!("expected {} fields, found {}", header.len(), fields.len()),
            ));
        }
        rows.push((idx + 1, fields));
    }

    Ok(Table {
        file: file.to_string(),
        header,
        rows,
    })
}

/// Splits one line into fields, honouring double-quote wrapping.
fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' if field.is_empty() => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(field);
    Ok(fields)
}

// ============================================================================
// TESTS
// ============================================================================
