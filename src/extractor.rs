use std::collections::BTreeMap;

use serde::Serialize;

use crate::encoding;

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

pub const BOOKING_DATE: &str = "bookingDate";
pub const VALUTA_DATE: &str = "valutaDate";
pub const RECEIVER: &str = "receiver";
pub const DESCRIPTION: &str = "description";
pub const SALDO: &str = "saldo";
pub const AMOUNT: &str = "amount";
pub const CURRENCY: &str = "currency";

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Zero-based column positions of the fields we keep from a statement row.
/// Optional columns are left out of the row mapping when unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub booking_date: usize,
    pub valuta_date: Option<usize>,
    pub receiver: usize,
    pub description: usize,
    pub saldo: Option<usize>,
    pub amount: usize,
    pub currency: Option<usize>,
}

impl Default for ColumnLayout {
    /// Layout of the ING "Umsatzanzeige" export:
    /// `Buchung;Wertstellung;Auftraggeber;Buchungstext;Notiz;Verwendungszweck;Saldo;Währung;Betrag;Währung`
    fn default() -> Self {
        Self {
            booking_date: 0,
            valuta_date: Some(1),
            receiver: 2,
            description: 5,
            saldo: Some(6),
            amount: 8,
            currency: Some(9),
        }
    }
}

impl ColumnLayout {
    /// `(position, field name)` pairs for every configured column.
    pub fn columns(&self) -> Vec<(usize, &'static str)> {
        let mut cols = vec![
            (self.booking_date, BOOKING_DATE),
            (self.receiver, RECEIVER),
            (self.description, DESCRIPTION),
            (self.amount, AMOUNT),
        ];
        if let Some(i) = self.valuta_date {
            cols.push((i, VALUTA_DATE));
        }
        if let Some(i) = self.saldo {
            cols.push((i, SALDO));
        }
        if let Some(i) = self.currency {
            cols.push((i, CURRENCY));
        }
        cols.sort_by_key(|(i, _)| *i);
        cols
    }

    /// Rows shorter than this are skipped. Only the required columns count;
    /// a row that stops before an optional column just lacks that field.
    pub fn min_fields(&self) -> usize {
        [self.booking_date, self.receiver, self.description, self.amount]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// How a statement file is laid out: delimiter, header marker and columns.
/// Chosen in code when the parser is built, not read from user settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFormat {
    pub layout: ColumnLayout,
    pub header_marker: String,
    pub delimiter: char,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            layout: ColumnLayout::default(),
            header_marker: "buchung".to_string(),
            delimiter: ';',
        }
    }
}

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// One data line projected onto the configured columns, values untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawRow {
    #[serde(skip)]
    line: usize,
    #[serde(flatten)]
    fields: BTreeMap<String, String>,
}

impl RawRow {
    pub fn new(line: usize, fields: BTreeMap<String, String>) -> Self {
        Self { line, fields }
    }

    /// 1-based line number in the source file.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Copy of this row with an extra derived field.
    pub fn with_field(&self, field: &str, value: String) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(field.to_string(), value);
        Self {
            line: self.line,
            fields,
        }
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

fn line_reader(delimiter: char) -> Option<csv::ReaderBuilder> {
    let delimiter = u8::try_from(delimiter).ok()?;
    let mut builder = csv::ReaderBuilder::new();
    builder.delimiter(delimiter).has_headers(false).flexible(true);
    Some(builder)
}

/// Lazy iterator over the data rows of a statement.
///
/// Everything up to and including the header line is preamble. If no header
/// line exists the iterator is empty.
pub struct Rows<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    /// `None` when the delimiter is not a single byte; nothing parses then.
    reader: Option<csv::ReaderBuilder>,
    columns: Vec<(usize, &'static str)>,
    marker: String,
    min_fields: usize,
    header_found: bool,
}

impl<'a> Rows<'a> {
    fn split_line(&self, line: &str) -> Option<csv::StringRecord> {
        let mut rdr = self.reader.as_ref()?.from_reader(line.as_bytes());
        rdr.records().next()?.ok()
    }

    fn is_header(&self, record: &csv::StringRecord) -> bool {
        record
            .get(0)
            .map_or(false, |first| first.to_lowercase().contains(&self.marker))
    }

    fn project(&self, line_no: usize, record: &csv::StringRecord) -> RawRow {
        let fields = self
            .columns
            .iter()
            .filter_map(|&(i, name)| record.get(i).map(|v| (name.to_string(), v.to_string())))
            .collect();
        RawRow::new(line_no, fields)
    }
}

impl<'a> Iterator for Rows<'a> {
    type Item = RawRow;

    fn next(&mut self) -> Option<RawRow> {
        loop {
            let (idx, line) = self.lines.next()?;
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some(record) = self.split_line(line) else {
                log::debug!("line {line_no}: not parseable as CSV, skipped");
                continue;
            };
            if !self.header_found {
                if self.is_header(&record) {
                    log::debug!("header found on line {line_no}");
                    self.header_found = true;
                }
                continue;
            }
            if record.len() < self.min_fields {
                log::debug!(
                    "line {line_no}: {} fields, need {}, skipped",
                    record.len(),
                    self.min_fields
                );
                continue;
            }
            return Some(self.project(line_no, &record));
        }
    }
}

/// Extract data rows from already-decoded statement text.
pub fn extract<'a>(text: &'a str, format: &CsvFormat) -> Rows<'a> {
    let reader = line_reader(format.delimiter);
    if reader.is_none() {
        log::warn!("delimiter {:?} is not a single byte", format.delimiter);
    }
    Rows {
        lines: text.lines().enumerate(),
        reader,
        columns: format.layout.columns(),
        marker: format.header_marker.to_lowercase(),
        min_fields: format.layout.min_fields(),
        header_found: false,
    }
}

/// Decode raw file bytes and extract all data rows.
pub fn extract_bytes(bytes: &[u8], format: &CsvFormat) -> Vec<RawRow> {
    let (text, enc) = encoding::decode(bytes);
    log::debug!("statement decoded as {}", enc.name());
    let rows: Vec<RawRow> = extract(&text, format).collect();
    if rows.is_empty() {
        log::info!("no data rows found (missing header or empty statement)");
    }
    rows
}
