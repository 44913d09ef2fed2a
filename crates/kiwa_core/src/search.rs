use crate::normalizer::normalize;
use crate::table::{Row, Table};

/// Records that can flatten themselves into one searchable string.
pub trait SearchSurface {
    fn search_surface(&self) -> String;
}

/// Keep the records whose normalized projection contains the normalized
/// query, in input order. An empty normalized query keeps everything.
///
/// Pure: `records` is only borrowed and the same inputs always give the
/// same output.
pub fn filter_by_substring<'a, T, F>(records: &'a [T], projector: F, query: &str) -> Vec<&'a T>
where
    F: Fn(&T) -> String,
{
    let nq = normalize(query);
    if nq.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|r| normalize(&projector(*r)).contains(&nq))
        .collect()
}

/// [`filter_by_substring`] using the record's own [`SearchSurface`].
pub fn filter_records<'a, T: SearchSurface>(records: &'a [T], query: &str) -> Vec<&'a T> {
    filter_by_substring(records, T::search_surface, query)
}

/// Rows of `table` matching `query` over all their cells.
pub fn filter_rows<'a>(table: &'a Table, query: &str) -> Vec<&'a Row> {
    filter_records(&table.rows, query)
}
