use crate::core::report::flatten;
use crate::core::request::BatchRequest;
use crate::domain::model::{BatchOutcome, CalcFailure, RenderedOutcome};
use crate::domain::ports::Storage;
use crate::utils::error::{CalcError, Result};
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const JSON_FILENAME: &str = "results.json";
pub const CSV_FILENAME: &str = "results.csv";

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub write_json: bool,
    pub write_csv: bool,
    /// Bundle the outputs into this zip instead of writing them loose.
    pub archive: Option<String>,
    /// Abort on the first failed calculation instead of recording it.
    pub fail_fast: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            write_json: true,
            write_csv: true,
            archive: None,
            fail_fast: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub record_count: usize,
    pub failure_count: usize,
    pub files: Vec<String>,
}

/// Evaluates batch requests and writes the results through a [`Storage`].
pub struct CalcEngine<S: Storage> {
    storage: S,
    options: EngineOptions,
}

impl<S: Storage> CalcEngine<S> {
    pub fn new(storage: S, options: EngineOptions) -> Self {
        Self { storage, options }
    }

    pub fn evaluate(&self, requests: &[BatchRequest]) -> Result<BatchOutcome> {
        let mut outcome = BatchOutcome::default();

        for (index, request) in requests.iter().enumerate() {
            let label = request.display_label();
            tracing::debug!("Evaluating request {} ({})", index + 1, label);

            match request.request.evaluate(request.label.clone()) {
                Ok(record) => {
                    tracing::debug!("✅ {} -> {}", label, record.calculator);
                    outcome.records.push(record);
                }
                Err(e) if self.options.fail_fast => {
                    tracing::error!("❌ Request '{}' failed: {}", label, e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!("⚠️ Skipping request '{}': {}", label, e);
                    outcome.failures.push(CalcFailure {
                        label: request.label.clone(),
                        calculator: request.request.name().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Evaluated {} requests ({} ok, {} failed)",
            requests.len(),
            outcome.records.len(),
            outcome.failures.len()
        );
        Ok(outcome)
    }

    /// Serializes the outcome as pretty JSON and as a long-format CSV
    /// table with one row per output field.
    pub fn render(&self, outcome: &BatchOutcome) -> Result<RenderedOutcome> {
        let json_output = serde_json::to_string_pretty(outcome)?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["label", "calculator", "status", "field", "value"])?;
        for record in &outcome.records {
            let label = record.label.as_deref().unwrap_or("");
            for (field, value) in flatten(&record.output) {
                writer.write_record([
                    label,
                    record.calculator.as_str(),
                    "ok",
                    field.as_str(),
                    value.as_str(),
                ])?;
            }
        }
        for failure in &outcome.failures {
            let label = failure.label.as_deref().unwrap_or("");
            writer.write_record([
                label,
                failure.calculator.as_str(),
                "error",
                "error",
                failure.error.as_str(),
            ])?;
        }
        let csv_bytes = writer
            .into_inner()
            .map_err(|e| CalcError::Io(e.into_error()))?;
        let csv_output = String::from_utf8_lossy(&csv_bytes).into_owned();

        Ok(RenderedOutcome {
            json_output,
            csv_output,
            record_count: outcome.records.len(),
            failure_count: outcome.failures.len(),
        })
    }

    /// Writes the rendered outputs and returns the file names written.
    pub fn load(&self, rendered: &RenderedOutcome) -> Result<Vec<String>> {
        let mut files: Vec<(&str, &[u8])> = Vec::new();
        if self.options.write_json {
            files.push((JSON_FILENAME, rendered.json_output.as_bytes()));
        }
        if self.options.write_csv {
            files.push((CSV_FILENAME, rendered.csv_output.as_bytes()));
        }

        if let Some(archive) = &self.options.archive {
            tracing::debug!("Creating ZIP file with {} files", files.len());
            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for (name, data) in &files {
                    zip.start_file(*name, SimpleFileOptions::default())?;
                    zip.write_all(data)?;
                }
                zip.finish()?.into_inner()
            };

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(archive, &zip_data)?;
            return Ok(vec![archive.clone()]);
        }

        let mut written = Vec::with_capacity(files.len());
        for (name, data) in files {
            self.storage.write_file(name, data)?;
            tracing::debug!("Wrote {} ({} bytes)", name, data.len());
            written.push(name.to_string());
        }
        Ok(written)
    }

    pub fn run(&self, requests: &[BatchRequest]) -> Result<RunSummary> {
        tracing::info!("Starting batch of {} requests", requests.len());

        let outcome = self.evaluate(requests)?;
        let rendered = self.render(&outcome)?;
        let files = self.load(&rendered)?;

        Ok(RunSummary {
            record_count: rendered.record_count,
            failure_count: rendered.failure_count,
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::finance::percentage::{PercentageInput, PercentageMode};
    use crate::core::request::CalcRequest;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl MemoryStorage {
        fn get(&self, path: &str) -> Vec<u8> {
            self.files.borrow().get(path).cloned().unwrap_or_default()
        }
    }

    impl Storage for &MemoryStorage {
        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.borrow_mut().insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn percentage(label: &str, x: f64, y: f64) -> BatchRequest {
        BatchRequest {
            label: Some(label.to_string()),
            request: CalcRequest::Percentage(PercentageInput {
                mode: PercentageMode::WhatPercent,
                x,
                y,
            }),
        }
    }

    #[test]
    fn test_skip_mode_records_failures() {
        let storage = MemoryStorage::default();
        let engine = CalcEngine::new(&storage, EngineOptions::default());
        let requests = vec![percentage("good", 30.0, 150.0), percentage("bad", 1.0, 0.0)];

        let outcome = engine.evaluate(&requests).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].label.as_deref(), Some("bad"));
        assert_eq!(outcome.failures[0].calculator, "percentage");
    }

    #[test]
    fn test_fail_fast_aborts() {
        let storage = MemoryStorage::default();
        let options = EngineOptions {
            fail_fast: true,
            ..EngineOptions::default()
        };
        let engine = CalcEngine::new(&storage, options);
        let requests = vec![percentage("bad", 1.0, 0.0), percentage("good", 30.0, 150.0)];

        assert!(engine.run(&requests).is_err());
        assert!(storage.files.borrow().is_empty());
    }

    #[test]
    fn test_csv_is_long_format() {
        let storage = MemoryStorage::default();
        let engine = CalcEngine::new(&storage, EngineOptions::default());
        let outcome = engine
            .evaluate(&[percentage("share", 30.0, 150.0), percentage("zero", 1.0, 0.0)])
            .unwrap();
        let rendered = engine.render(&outcome).unwrap();

        let mut lines = rendered.csv_output.lines();
        assert_eq!(lines.next(), Some("label,calculator,status,field,value"));
        assert!(rendered.csv_output.contains("share,percentage,ok,result,20\n"));
        assert!(rendered.csv_output.contains("zero,percentage,error,error,"));
    }

    #[test]
    fn test_run_writes_loose_files() {
        let storage = MemoryStorage::default();
        let engine = CalcEngine::new(&storage, EngineOptions::default());
        let summary = engine.run(&[percentage("share", 30.0, 150.0)]).unwrap();

        assert_eq!(summary.files, vec![JSON_FILENAME, CSV_FILENAME]);
        let json = storage.get(JSON_FILENAME);
        let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed["records"][0]["label"], "share");
    }

    #[test]
    fn test_run_with_archive() {
        let storage = MemoryStorage::default();
        let options = EngineOptions {
            write_csv: false,
            archive: Some("bundle.zip".to_string()),
            ..EngineOptions::default()
        };
        let engine = CalcEngine::new(&storage, options);
        let summary = engine.run(&[percentage("share", 30.0, 150.0)]).unwrap();

        assert_eq!(summary.files, vec!["bundle.zip"]);
        let data = storage.get("bundle.zip");
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 1);
        assert!(archive.by_name(JSON_FILENAME).is_ok());
    }
}
