// Table output as aligned text, CSV or JSON.

use std::io::Write;

use anyhow::Context;
use clap::ValueEnum;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

/// A titled grid of display strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Shown instead of the grid when there are no rows.
    pub note: Option<String>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// A table with no grid, only a message.
    pub fn note(title: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            note: Some(note.into()),
            ..Default::default()
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }
}

pub fn write_tables<W: Write>(out: &mut W, tables: &[Table], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for (i, table) in tables.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write_text(out, table)?;
            }
        }
        OutputFormat::Csv => {
            for (i, table) in tables.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write_csv(out, table)?;
            }
        }
        OutputFormat::Json => {
            let value = Value::Array(tables.iter().map(table_json).collect());
            serde_json::to_writer_pretty(&mut *out, &value).context("failed to write JSON")?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_text<W: Write>(out: &mut W, table: &Table) -> anyhow::Result<()> {
    if let Some(title) = &table.title {
        writeln!(out, "{title}")?;
        writeln!(out, "{}", "=".repeat(title.chars().count()))?;
    }
    if table.is_empty() {
        writeln!(out, "{}", table.note.as_deref().unwrap_or("No data"))?;
        return Ok(());
    }

    let widths = table.column_widths();
    let line = |cells: &[String]| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!("{cell:<w$}")
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    if !table.headers.is_empty() {
        writeln!(out, "{}", line(&table.headers))?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(out, "{}", rule.join("  "))?;
    }
    for row in &table.rows {
        writeln!(out, "{}", line(row))?;
    }
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, table: &Table) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(&mut *out);
    if let Some(title) = &table.title {
        writer.write_record([format!("# {title}")])?;
    }
    if table.is_empty() {
        if let Some(note) = &table.note {
            writer.write_record([format!("# {note}")])?;
        }
    } else {
        if !table.headers.is_empty() {
            writer.write_record(&table.headers)?;
        }
        for row in &table.rows {
            writer.write_record(row)?;
        }
    }
    writer.flush().context("failed to write CSV")?;
    Ok(())
}

fn table_json(table: &Table) -> Value {
    let rows = table
        .rows
        .iter()
        .map(|row| {
            let fields: Map<String, Value> = table
                .headers
                .iter()
                .zip(row)
                .map(|(h, v)| (h.clone(), Value::String(v.clone())))
                .collect();
            Value::Object(fields)
        })
        .collect();

    let mut obj = Map::new();
    obj.insert(
        "title".into(),
        table.title.clone().map(Value::String).unwrap_or(Value::Null),
    );
    obj.insert("rows".into(), Value::Array(rows));
    if let Some(note) = &table.note {
        obj.insert("note".into(), Value::String(note.clone()));
    }
    Value::Object(obj)
}
