use std::path::PathBuf;

use equiviz_core::{ClientError, Report, ReportSink};

/// Writes downloaded reports into a directory.
pub struct FileReportSink {
    dir: PathBuf,
}

impl FileReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, report_filename: &str) -> PathBuf {
        self.dir.join(report_filename)
    }
}

impl ReportSink for FileReportSink {
    fn save(&self, report: &Report) -> Result<(), ClientError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| ClientError::Storage(format!("{}: {}", self.dir.display(), e)))?;
        let path = self.path_for(&report.filename);
        std::fs::write(&path, &report.bytes)
            .map_err(|e| ClientError::Storage(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_report_under_its_name() {
        let dir = TempDir::new().unwrap();
        let sink = FileReportSink::new(dir.path().join("reports"));

        sink.save(&Report::new(7, b"%PDF-1.4".to_vec())).unwrap();

        let written = std::fs::read(dir.path().join("reports").join("equipment_report_7.pdf")).unwrap();
        assert_eq!(written, b"%PDF-1.4");
    }

    #[test]
    fn test_unwritable_target_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("taken");
        std::fs::write(&blocker, "file, not a directory").unwrap();
        let sink = FileReportSink::new(&blocker);

        let result = sink.save(&Report::new(1, vec![]));
        assert!(matches!(result, Err(ClientError::Storage(_))));
    }
}
