use serde::Serialize;
use tracing::debug;

use crate::search::SearchSurface;

/// Separator used to flatten a row into its search surface.
pub const ROW_SURFACE_SEPARATOR: &str = " | ";

/// One data line of a TSV source. Cells keep source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row(pub Vec<String>);

impl Row {
    pub fn cells(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, col: usize) -> Option<&str> {
        self.0.get(col).map(String::as_str)
    }
}

impl SearchSurface for Row {
    /// All cells joined with [`ROW_SURFACE_SEPARATOR`].
    fn search_surface(&self) -> String {
        self.0.join(ROW_SURFACE_SEPARATOR)
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Row(iter.into_iter().map(Into::into).collect())
    }
}

/// Parsed tab-separated source: header line plus data rows.
///
/// Rows are not padded or truncated to the header width; see
/// [`Table::ragged_rows`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Parse a TSV blob. Carriage returns are dropped, empty lines skipped,
    /// the first remaining line is the header. No quoting: a tab inside a
    /// field is a column break.
    ///
    /// A blob with no remaining lines yields the empty table.
    pub fn parse(raw: &str) -> Table {
        let cleaned = raw.replace('\r', "");
        let mut lines = cleaned.split('\n').filter(|l| !l.is_empty());

        let Some(header) = lines.next() else {
            debug!(bytes = raw.len(), "tsv source has no lines; using empty table");
            return Table::default();
        };

        let headers = split_cells(header).0;
        let rows: Vec<Row> = lines.map(split_cells).collect();
        debug!(
            columns = headers.len(),
            rows = rows.len(),
            "tsv source parsed"
        );
        Table { headers, rows }
    }

    /// Column count, taken from the header.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there is neither a header nor data.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Indices of rows whose cell count differs from the header.
    pub fn ragged_rows(&self) -> Vec<usize> {
        let width = self.width();
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.len() != width)
            .map(|(i, _)| i)
            .collect()
    }
}

fn split_cells(line: &str) -> Row {
    line.split('\t').collect()
}
