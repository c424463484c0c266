// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::Local;

use crate::config::consts::REPORT_TIMESTAMP;
use crate::config::options::ExportOptions;
use crate::csv::write_table;
use crate::error::Result;
use crate::report::{DataSet, ReportWriter};
use crate::specs::fields::LotRecord;

/// CSV/TSV report under `out_dir`, named `<stem>_<timestamp>.<ext>`.
pub struct DelimitedReport {
    export: ExportOptions,
}

impl DelimitedReport {
    pub fn new(export: ExportOptions) -> Self {
        Self { export }
    }

    /// Write `ds` to a fresh file stamped with `stamp`.
    pub fn write_dataset(&self, ds: &DataSet, stamp: &str) -> Result<PathBuf> {
        let dir = &self.export.out_dir;
        if !dir.as_os_str().is_empty() {
            ensure_directory(dir)?;
        }

        let stem = format!("{}_{stamp}", self.export.file_stem);
        let path = unique_path(dir, &stem, self.export.format.ext());

        let mut out = BufWriter::new(File::create(&path)?);
        write_table(&mut out, ds.headers.as_deref(), &ds.rows, self.export.format.delim())?;
        out.flush()?;
        Ok(path)
    }
}

impl ReportWriter for DelimitedReport {
    fn write(&mut self, records: &[LotRecord]) -> Result<PathBuf> {
        let stamp = Local::now().format(REPORT_TIMESTAMP).to_string();
        self.write_dataset(&DataSet::from_records(records), &stamp)
    }
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::other(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        )));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// `<dir>/<stem>.<ext>`, or `<stem> (N).<ext>` (N from 2) if taken.
pub fn unique_path(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    let first = dir.join(format!("{stem}.{ext}"));
    if !first.exists() {
        return first;
    }
    (2..)
        .map(|n| dir.join(format!("{stem} ({n}).{ext}")))
        .find(|p| !p.exists())
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_path_counts_up() {
        let dir = tempfile::tempdir().unwrap();
        let a = unique_path(dir.path(), "r", "csv");
        assert!(a.ends_with("r.csv"));
        fs::write(&a, "").unwrap();
        let b = unique_path(dir.path(), "r", "csv");
        assert!(b.ends_with("r (2).csv"));
        fs::write(&b, "").unwrap();
        assert!(unique_path(dir.path(), "r", "csv").ends_with("r (3).csv"));
    }

    #[test]
    fn ensure_directory_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let f = dir.path().join("plain");
        fs::write(&f, "x").unwrap();
        assert!(ensure_directory(&f).is_err());
        assert!(ensure_directory(&dir.path().join("a/b")).is_ok());
    }
}
