//! Tabular documents: sheets of ragged rows of optional text cells

/// Raw cell content as stored in a source, before string-table resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Absent,
    Direct(String),
    Referenced(usize),
}

impl CellValue {
    /// Resolve against a shared-string table; out-of-range references are absent
    pub fn resolve(self, shared: &[String]) -> Cell {
        let value = match self {
            CellValue::Absent => None,
            CellValue::Direct(text) => Some(text),
            CellValue::Referenced(index) => shared.get(index).cloned(),
        };
        Cell { value }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub value: Option<String>,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            value: Some(text.into()),
        }
    }

    pub fn absent() -> Self {
        Self { value: None }
    }

    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    /// Absent or zero-length
    pub fn is_empty(&self) -> bool {
        self.value.as_deref().map_or(true, str::is_empty)
    }

    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

/// Ordered cells; rows of one sheet may differ in length
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
    /// Exact source text of the record, when the source has a record syntax
    pub source: Option<String>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            source: None,
        }
    }

    pub fn single(text: impl Into<String>) -> Self {
        Self::new(vec![Cell::new(text)])
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// True when `fields` are exactly this row's cell texts, in order
    pub fn matches_fields(&self, fields: &[String]) -> bool {
        self.cells.len() == fields.len()
            && self
                .cells
                .iter()
                .zip(fields)
                .all(|(cell, field)| !cell.is_absent() && cell.text() == field)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Cell::new).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
    /// Set when the sheet could not be read; `rows` then holds one diagnostic row
    pub placeholder: bool,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
            placeholder: false,
        }
    }

    pub fn placeholder(name: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: vec![Row::single(diagnostic)],
            placeholder: true,
        }
    }

    /// Text of the diagnostic row of a placeholder sheet
    pub fn diagnostic(&self) -> Option<&str> {
        if !self.placeholder {
            return None;
        }
        self.rows
            .first()
            .and_then(|row| row.cells.first())
            .map(Cell::text)
    }
}

/// Top-level parsed unit; one sheet for non-spreadsheet sources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub sheets: Vec<Sheet>,
}

impl Document {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn single(sheet: Sheet) -> Self {
        Self {
            sheets: vec![sheet],
        }
    }

    /// Rows of the first sheet, or nothing for an empty document
    pub fn first_rows(&self) -> &[Row] {
        self.sheets
            .first()
            .map(|sheet| sheet.rows.as_slice())
            .unwrap_or(&[])
    }
}
