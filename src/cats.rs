//! Reading `id,name,age` records.

use crate::error::DataFileError;
use crate::lines::{self, Parsed, split_fields};
use log::{debug, error};
use std::fmt;
use std::path::Path;

/// One cat as listed in the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatRecord {
    pub id: String,
    pub name: String,
    pub age: i64,
}

impl fmt::Display for CatRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{id: {}, name: {}, age: {}}}", self.id, self.name, self.age)
    }
}

/// Parse a line with exactly three comma-separated fields whose last field
/// is an integer.
pub fn parse_cat_line(line: &str) -> Option<CatRecord> {
    let [id, name, age] = split_fields::<3>(line)?;
    let age = age.trim().parse().ok()?;
    Some(CatRecord {
        id: id.to_string(),
        name: name.to_string(),
        age,
    })
}

/// Read every valid record of the file at `path`, in file order.
pub fn get_cats_info(path: impl AsRef<Path>) -> Result<Parsed<CatRecord>, DataFileError> {
    let path = path.as_ref();
    let parsed = lines::parse_file(path, parse_cat_line)?;
    debug!(
        "{}: {} records, {} malformed",
        path.display(),
        parsed.records.len(),
        parsed.malformed.len()
    );
    Ok(parsed)
}

/// Like [`get_cats_info`], but a file that cannot be read yields no records.
pub fn get_cats_info_or_empty(path: impl AsRef<Path>) -> Parsed<CatRecord> {
    get_cats_info(path).unwrap_or_else(|e| {
        error!("{}", e);
        Parsed::default()
    })
}
