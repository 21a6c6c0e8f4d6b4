//! Whitespace-delimited thermodynamic log tables.
//!
//! The first non-blank line names the columns (an optional leading `#` is
//! ignored); every following non-comment line is one sample with exactly
//! one value per column.

use crate::io::{Format, error::Error};
use std::collections::HashMap;
use std::io::BufRead;

/// Named numeric columns of a thermodynamic log, all of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct LogTable {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    lookup: HashMap<String, usize>,
}

impl LogTable {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn nrows(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.lookup
            .get(name)
            .map(|&idx| self.columns[idx].as_slice())
    }

    /// Like [`column`](Self::column), but a missing column is an error.
    pub fn require(&self, name: &str) -> Result<&[f64], Error> {
        self.column(name).ok_or_else(|| Error::missing_column(name))
    }
}

pub fn read<R: BufRead>(reader: R) -> Result<LogTable, Error> {
    let mut lines = reader.lines().enumerate();

    let (header_line, names) = loop {
        match lines.next() {
            Some((i, line)) => {
                let line = line?;
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                break (i + 1, parse_header(trimmed, i + 1)?);
            }
            None => return Err(Error::parse(Format::HoomdLog, 1, "missing header line")),
        }
    };

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
    let mut last_line = header_line;

    for (i, line) in lines {
        let line = line?;
        let ln = i + 1;
        last_line = ln;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<_> = trimmed.split_whitespace().collect();
        if fields.len() != names.len() {
            return Err(Error::parse(
                Format::HoomdLog,
                ln,
                format!(
                    "row has {} fields but the header declares {} columns",
                    fields.len(),
                    names.len()
                ),
            ));
        }

        for ((field, column), name) in fields.iter().zip(columns.iter_mut()).zip(&names) {
            let value = field.parse::<f64>().map_err(|_| {
                Error::parse(
                    Format::HoomdLog,
                    ln,
                    format!("invalid value '{field}' in column '{name}'"),
                )
            })?;
            column.push(value);
        }
    }

    if columns.first().is_none_or(Vec::is_empty) {
        return Err(Error::parse(
            Format::HoomdLog,
            last_line,
            "log contains a header but no samples",
        ));
    }

    let lookup = names
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.clone(), idx))
        .collect();

    log::debug!(
        "read thermodynamic log: {} columns, {} samples",
        names.len(),
        columns[0].len()
    );

    Ok(LogTable {
        names,
        columns,
        lookup,
    })
}

fn parse_header(line: &str, line_no: usize) -> Result<Vec<String>, Error> {
    let line = line.trim_start_matches('#');
    let names: Vec<String> = line.split_whitespace().map(str::to_string).collect();

    if names.is_empty() {
        return Err(Error::parse(
            Format::HoomdLog,
            line_no,
            "header line names no columns",
        ));
    }

    for (idx, name) in names.iter().enumerate() {
        if names[..idx].contains(name) {
            return Err(Error::parse(
                Format::HoomdLog,
                line_no,
                format!("duplicate column '{name}' in header"),
            ));
        }
    }

    Ok(names)
}
