use model::Outcome;
use std::{
    fmt,
    io::{self, Write},
};

/// Result for one source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub table: String,
    pub outcome: Outcome,
}

impl fmt::Display for TableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = &self.table;
        let hint = self.outcome.hint().unwrap_or_default();
        match self.outcome.comparison() {
            Some(counts) if self.outcome.is_success() => {
                write!(f, "Rows MATCH - {table} - {counts}. ")
            }
            Some(counts) => write!(f, "Rows NOT MATCH - {table} - {counts}. Please {hint}"),
            None => write!(f, "Missing Target Table - {table}. Please {hint}"),
        }
    }
}

/// Two-section comparison report: matching tables, then failing ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    successes: Vec<TableReport>,
    errors: Vec<TableReport>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, table: impl Into<String>, outcome: Outcome) {
        let entry = TableReport {
            table: table.into(),
            outcome,
        };
        if entry.outcome.is_success() {
            self.successes.push(entry);
        } else {
            self.errors.push(entry);
        }
    }

    pub fn successes(&self) -> &[TableReport] {
        &self.successes
    }

    pub fn errors(&self) -> &[TableReport] {
        &self.errors
    }

    /// Number of source tables covered by the report.
    pub fn len(&self) -> usize {
        self.successes.len() + self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when every source table matched.
    pub fn all_match(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_section(out, "Success", &self.successes)?;
        write_section(out, "Error", &self.errors)?;
        out.flush()
    }

    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn write_section<W: Write>(out: &mut W, title: &str, entries: &[TableReport]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, ">>> Table with {title} ({})", entries.len())?;
    for entry in entries {
        writeln!(out, "\t{entry}")?;
    }
    Ok(())
}
