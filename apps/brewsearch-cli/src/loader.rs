//! CSV record loader for the beer catalogue export.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use brewsearch_core::{Error, RecordInput, Result};

/// Column names, in the order their values are composed into text.
pub const FIELDS: [&str; 8] = [
    "productNameBold",
    "productNameThin",
    "categoryLevel1",
    "categoryLevel2",
    "categoryLevel3",
    "categoryLevel4",
    "usage",
    "taste",
];

/// One CSV row. Columns not listed here are ignored; missing ones read as
/// empty text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BeerRow {
    pub product_name_bold: String,
    pub product_name_thin: String,
    pub category_level1: String,
    pub category_level2: String,
    pub category_level3: String,
    pub category_level4: String,
    pub usage: String,
    pub taste: String,
}

impl From<BeerRow> for RecordInput {
    fn from(row: BeerRow) -> Self {
        let values = [
            row.product_name_bold,
            row.product_name_thin,
            row.category_level1,
            row.category_level2,
            row.category_level3,
            row.category_level4,
            row.usage,
            row.taste,
        ];
        FIELDS.into_iter().zip(values).collect()
    }
}

pub fn load_records(path: &Path) -> Result<Vec<RecordInput>> {
    let file = File::open(path).map_err(|e| Error::Load(format!("{}: {}", path.display(), e)))?;
    let records = read_records(file)?;
    debug!(path = %path.display(), rows = records.len(), "records loaded");
    Ok(records)
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<RecordInput>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    rdr.deserialize::<BeerRow>()
        .enumerate()
        .map(|(i, row)| row.map(RecordInput::from).map_err(|e| Error::Load(format!("row {}: {}", i + 1, e))))
        .collect()
}
