//! CSV Data Loader Module
//! Reads the acquisitions CSV into a Polars DataFrame with every column kept as text.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Column holding the acquiring company.
pub const PARENT_COMPANY_COL: &str = "Parent Company";
/// Column holding the acquisition year, text until cleaned.
pub const ACQUISITION_YEAR_COL: &str = "Acquisition Year";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {0}")]
    FileNotFound(String),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Required column missing: {0}")]
    MissingColumn(String),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    df: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Load a CSV file using Polars.
    ///
    /// Schema inference is switched off so every column is read as a string;
    /// year values like `"unknown"` must reach the cleaner untouched.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        if !file_path.exists() {
            return Err(LoaderError::FileNotFound(file_path.display().to_string()));
        }

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        Self::require_columns(&df)?;
        debug!(columns = ?df.get_column_names(), "csv header");
        info!(
            path = %file_path.display(),
            rows = df.height(),
            "loaded acquisitions csv"
        );

        Ok(&*self.df.insert(df))
    }

    fn require_columns(df: &DataFrame) -> Result<(), LoaderError> {
        for name in [PARENT_COMPANY_COL, ACQUISITION_YEAR_COL] {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn(name.to_string()));
            }
        }
        Ok(())
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Hand the loaded DataFrame over to the next stage.
    pub fn take_dataframe(&mut self) -> Option<DataFrame> {
        self.df.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        write_bytes(contents.as_bytes())
    }

    fn write_bytes(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let mut loader = DataLoader::new();
        let result = loader.load_csv(Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(LoaderError::FileNotFound(_))));
        assert_eq!(loader.get_row_count(), 0);
    }

    #[test]
    fn test_loads_years_as_text() {
        let file = write_csv(
            "Parent Company,Acquisition Year,Business\n\
             Apple,2001,Music\n\
             Google,unknown,Search\n",
        );
        let mut loader = DataLoader::new();
        let df = loader.load_csv(file.path()).unwrap();

        let years = df.column(ACQUISITION_YEAR_COL).unwrap();
        assert_eq!(years.dtype(), &DataType::String);
        assert_eq!(years.str().unwrap().get(1), Some("unknown"));
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["Parent Company", "Acquisition Year", "Business"]);
        assert_eq!(loader.get_row_count(), 2);
    }

    #[test]
    fn test_missing_required_column() {
        let file = write_csv("Parent Company,Business\nApple,Music\n");
        let mut loader = DataLoader::new();
        let result = loader.load_csv(file.path());
        match result {
            Err(LoaderError::MissingColumn(name)) => assert_eq!(name, ACQUISITION_YEAR_COL),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_take_dataframe_empties_loader() {
        let file = write_csv("Parent Company,Acquisition Year\nApple,2001\n");
        let mut loader = DataLoader::new();
        loader.load_csv(file.path()).unwrap();

        let df = loader.take_dataframe().unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(loader.get_row_count(), 0);
    }

    #[test]
    fn test_malformed_csv_is_csv_error() {
        let ragged = write_csv("Parent Company,Acquisition Year\nApple,2001,extra\n");
        let empty = write_csv("");
        let not_utf8 = write_bytes(b"Parent Company,Acquisition Year\n\xff\xfe,2001\n");

        for file in [&ragged, &empty, &not_utf8] {
            let mut loader = DataLoader::new();
            let result = loader.load_csv(file.path());
            assert!(
                matches!(result, Err(LoaderError::Csv(_))),
                "expected Csv error, got {result:?}"
            );
        }
    }
}
