//! Search core of the Kiwa proposal viewer.
//!
//! Everything here is pure: callers hand in records and a query and get
//! borrowed matches back. Loading, state and display live in the `kiwa`
//! crate.

pub mod directory;
pub mod facet;
pub mod normalizer;
pub mod search;
pub mod table;

pub use directory::DirectoryEntry;
pub use facet::{
    directory_chips, facet_and_filter, filter_directory, section_keys, Facet, FilterState, Group,
    Grouped, SectionCollator,
};
pub use normalizer::normalize;
pub use search::{filter_by_substring, filter_records, filter_rows, SearchSurface};
pub use table::{Row, Table};
