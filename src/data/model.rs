use std::fmt;
use std::sync::Arc;

use crate::error::OpError;

// ---------------------------------------------------------------------------
// Record – one county (one row of the source file)
// ---------------------------------------------------------------------------

/// A single county row: the dataset header plus this row's raw cell text.
///
/// Values stay as written in the source file; numeric columns are parsed on
/// demand by [`Record::float`] and [`Record::integer`]. A cell the source row
/// did not supply is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Arc<[String]>,
    values: Vec<Option<String>>,
}

impl Record {
    /// Build a record sharing `columns` with the rest of its dataset.
    ///
    /// A row shorter than the header lacks the trailing fields; cells past
    /// the header width are dropped.
    pub fn new(columns: Arc<[String]>, values: Vec<String>) -> Self {
        Self::from_cells(columns, values.into_iter().map(Some).collect())
    }

    /// Like [`Record::new`], but individual cells may be absent.
    pub fn from_cells(columns: Arc<[String]>, mut values: Vec<Option<String>>) -> Self {
        values.resize(columns.len(), None);
        Self { columns, values }
    }

    /// Raw text of the named column, if the row has it.
    pub fn get(&self, field: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == field)?;
        self.values.get(idx)?.as_deref()
    }

    /// `(column, value)` pairs in header order, one per column.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(Option::as_deref))
    }

    /// Parse the named column as a float. `row` only feeds the error message.
    pub fn float(&self, field: &str, row: usize) -> Result<f64, OpError> {
        parse_float(self.require(field, row)?)
    }

    /// Parse the named column as a signed integer.
    pub fn integer(&self, field: &str, row: usize) -> Result<i64, OpError> {
        parse_integer(self.require(field, row)?)
    }

    fn require(&self, field: &str, row: usize) -> Result<&str, OpError> {
        self.get(field).ok_or_else(|| OpError::MissingField {
            field: field.to_string(),
            row,
        })
    }
}

/// Renders as a mapping literal, e.g. `{'County': 'Autauga', 'State': 'AL'}`.
/// Absent cells print as a bare `None`.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.fields().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                Some(value) => write!(f, "{}: {}", quote(key), quote(value))?,
                None => write!(f, "{}: None", quote(key))?,
            }
        }
        f.write_str("}")
    }
}

// ---------------------------------------------------------------------------
// Number coercion
// ---------------------------------------------------------------------------

/// Lenient float parse: surrounding whitespace is ignored, `inf`/`nan` and
/// digit-group underscores (`1_000.5`) accepted.
pub fn parse_float(s: &str) -> Result<f64, OpError> {
    strip_digit_separators(s.trim())
        .and_then(|t| t.parse::<f64>().ok())
        .ok_or_else(|| OpError::NotANumber {
            value: s.to_string(),
            expected: "float",
        })
}

/// Decimal integer parse with optional sign, surrounding whitespace and
/// digit-group underscores.
pub fn parse_integer(s: &str) -> Result<i64, OpError> {
    strip_digit_separators(s.trim())
        .and_then(|t| t.parse::<i64>().ok())
        .ok_or_else(|| OpError::NotANumber {
            value: s.to_string(),
            expected: "integer",
        })
}

/// Drop `_` separators. Each one must sit between two ASCII digits.
fn strip_digit_separators(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    for (i, ch) in s.char_indices() {
        if ch == '_' {
            let before = i.checked_sub(1).and_then(|j| bytes.get(j));
            let after = bytes.get(i + 1);
            match (before, after) {
                (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
                _ => return None,
            }
        } else {
            out.push(ch);
        }
    }
    Some(out)
}

/// Shortest round-trip text for a float that always reads back as a float:
/// `150.0`, `0.1`, `1e+16`, `1.5e-05`, `inf`, `nan`.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let abs = v.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        // Rust prints `1.5e-5`; normalise to a signed, two-digit exponent.
        let sci = format!("{v:e}");
        let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        let (sign, digits) = match exp.strip_prefix('-') {
            Some(d) => ('-', d),
            None => ('+', exp),
        };
        return format!("{mantissa}e{sign}{digits:0>2}");
    }
    let plain = format!("{v}");
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

/// Quote a string the way the display listing shows it.
fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

// ---------------------------------------------------------------------------
// Dataset – an ordered collection of records
// ---------------------------------------------------------------------------

/// The loaded table, or any filtered view of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Column names in file order.
    pub columns: Arc<[String]>,
    /// All records (rows), in file order.
    pub records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from a header and raw rows.
    pub fn from_rows<I>(columns: Vec<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let columns: Arc<[String]> = columns.into();
        let records = rows
            .into_iter()
            .map(|values| Record::new(Arc::clone(&columns), values))
            .collect();
        Dataset { columns, records }
    }

    /// Build a dataset whose rows may leave individual cells absent.
    pub fn from_cells<I>(columns: Vec<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<Option<String>>>,
    {
        let columns: Arc<[String]> = columns.into();
        let records = rows
            .into_iter()
            .map(|cells| Record::from_cells(Arc::clone(&columns), cells))
            .collect();
        Dataset { columns, records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// New dataset holding the records for which `keep` returns `Ok(true)`.
    ///
    /// Stops at the first record whose predicate fails; `self` is never touched.
    pub fn select<F>(&self, mut keep: F) -> Result<Dataset, OpError>
    where
        F: FnMut(usize, &Record) -> Result<bool, OpError>,
    {
        let mut records = Vec::new();
        for (row, record) in self.records.iter().enumerate() {
            if keep(row, record)? {
                records.push(record.clone());
            }
        }
        Ok(Dataset {
            columns: Arc::clone(&self.columns),
            records,
        })
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
