// src/report.rs
//! Boundary between a finished crawl and whatever renders it.

use std::path::PathBuf;

use crate::error::Result;
use crate::specs::fields::{LotRecord, headers};

/// Takes the whole crawl result and produces one artifact.
pub trait ReportWriter {
    /// Returns where the report landed.
    fn write(&mut self, records: &[LotRecord]) -> Result<PathBuf>;
}

/// Plain table: fixed headers, one display row per record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn from_records(records: &[LotRecord]) -> Self {
        Self {
            headers: Some(headers()),
            rows: records.iter().map(LotRecord::to_row).collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn header_count(&self) -> usize {
        self.headers.as_ref().map_or(0, Vec::len)
    }
}
