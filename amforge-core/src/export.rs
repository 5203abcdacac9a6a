use crate::error::AmforgeError;
use csv::Writer;
use serde::Serialize;
use std::{fs, io, path::Path};
use tracing::debug;

/// Writes serializable records as CSV rows, one header line first.
pub struct RecordWriter<W: io::Write> {
    writer: Writer<W>,
    target: String,
}

impl RecordWriter<fs::File> {
    pub fn create(path: &Path) -> Result<Self, AmforgeError> {
        let target = path.display().to_string();
        let file = fs::File::create(path).map_err(|e| AmforgeError::FileIO(target.clone(), e))?;
        Ok(Self {
            writer: Writer::from_writer(file),
            target,
        })
    }
}

impl<W: io::Write> RecordWriter<W> {
    pub fn from_writer(inner: W, target: impl Into<String>) -> Self {
        Self {
            writer: Writer::from_writer(inner),
            target: target.into(),
        }
    }

    pub fn write_all<T: Serialize>(&mut self, records: &[T]) -> Result<(), AmforgeError> {
        for record in records {
            self.writer
                .serialize(record)
                .map_err(|e| AmforgeError::CsvError(self.target.clone(), e))?;
        }
        self.writer
            .flush()
            .map_err(|e| AmforgeError::FileIO(self.target.clone(), e))?;
        debug!(target_file = %self.target, rows = records.len(), "wrote csv records");
        Ok(())
    }

    /// Flushes and hands back the underlying writer.
    pub fn into_inner(self) -> Result<W, AmforgeError> {
        let target = self.target;
        self.writer
            .into_inner()
            .map_err(|e| AmforgeError::FileIO(target, e.into_error()))
    }
}

/// Writes `records` to a CSV file at `path`.
pub fn write_csv_file<T: Serialize>(path: &Path, records: &[T]) -> Result<(), AmforgeError> {
    RecordWriter::create(path)?.write_all(records)
}

/// Writes `value` to `path` as pretty-printed JSON.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), AmforgeError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| AmforgeError::FileIO(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{compare_across_grids, compare_stages, ComparisonRow};
    use crate::report::flatten;
    use amforge_schemas::{grid::GridProfile, parameters::ProcessParameters};

    #[test]
    fn records_serialize_with_header_and_formatted_fields() {
        let params = ProcessParameters::default();
        let germany = GridProfile::new("Germany", 0.4);
        let records = flatten(
            &compare_stages(&params, &germany),
            &compare_across_grids(&params, &[germany.clone()]),
        );

        let mut writer = RecordWriter::from_writer(Vec::new(), "memory");
        writer.write_all(&records).unwrap();
        let csv = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "section,label,standard,am,difference,reduction");
        assert_eq!(lines[1], "Lifecycle (Germany),Material,88.00,70.40,17.60,20.0%");
        assert_eq!(lines.len(), 1 + records.len());
        assert_eq!(lines[6], "Countries,Germany,1893.28,242.76,1650.52,87.2%");
    }

    #[test]
    fn missing_directory_is_reported_as_file_error() {
        let path = Path::new("/nonexistent-amforge-dir/out.csv");
        let err = write_csv_file::<crate::report::ExportRecord>(path, &[]).unwrap_err();
        assert!(matches!(err, AmforgeError::FileIO(p, _) if p.contains("nonexistent-amforge-dir")));
    }

    #[test]
    fn undefined_reduction_is_written_as_json_null() {
        let rows = vec![ComparisonRow {
            country: "Nowhere".to_string(),
            grid_factor: 0.0,
            total_standard: 0.0,
            total_am: 0.0,
            difference: 0.0,
            reduction_percent: None,
        }];
        let path = std::env::temp_dir()
            .join(format!("amforge_export_{}_rows.json", std::process::id()));

        write_json_file(&path, &rows).unwrap();
        let json = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(json.contains("\"reduction_percent\": null"), "{}", json);
        assert!(json.contains("\"country\": \"Nowhere\""));
    }
}
