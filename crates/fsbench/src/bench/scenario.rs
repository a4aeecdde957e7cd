//! Real-world scenario: load a handful of small JSON files.
//!
//! Approximates an application reading its configuration at startup. Four
//! documents of different shapes are written concurrently, read back
//! concurrently, parsed one after another, and stat-checked concurrently. Each
//! step completes for all documents before the next begins.

use crate::bench::Timing;
use crate::fs::FileSystem;
use crate::workspace::{Workspace, SCENARIO_FILES};
use anyhow::{Context, Result};
use futures::future::try_join_all;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

const DATA_ITEMS: usize = 100;
const CACHE_ENTRIES: usize = 1000;

#[derive(Serialize)]
struct AppConfig {
    name: &'static str,
    version: &'static str,
    debug: bool,
    port: u16,
}

#[derive(Serialize)]
struct Settings {
    theme: &'static str,
    language: &'static str,
    notifications: bool,
    auto_save_secs: u32,
}

#[derive(Serialize)]
struct DataItem {
    id: usize,
    name: String,
    value: f64,
    tags: [&'static str; 2],
}

#[derive(Serialize)]
struct DataSet {
    items: Vec<DataItem>,
}

#[derive(Serialize)]
struct CacheSnapshot {
    entries: Vec<&'static str>,
}

/// A fixed JSON document written by the scenario.
#[derive(Debug, Clone)]
pub struct ScenarioDocument {
    /// File name inside the workspace.
    pub name: &'static str,
    /// Serialized JSON.
    pub content: String,
}

impl ScenarioDocument {
    /// Build the four scenario documents: config, settings, data, cache.
    pub fn fixtures() -> Result<Vec<ScenarioDocument>> {
        let [config_name, settings_name, data_name, cache_name] = SCENARIO_FILES;

        let config = AppConfig {
            name: "fsbench",
            version: env!("CARGO_PKG_VERSION"),
            debug: false,
            port: 8080,
        };
        let settings = Settings {
            theme: "dark",
            language: "en",
            notifications: true,
            auto_save_secs: 30,
        };
        let data = DataSet {
            items: (0..DATA_ITEMS)
                .map(|id| DataItem {
                    id,
                    name: format!("Item {id}"),
                    value: id as f64 * 1.5,
                    tags: ["bench", "fixture"],
                })
                .collect(),
        };
        let cache = CacheSnapshot {
            entries: vec!["cached-value"; CACHE_ENTRIES],
        };

        Ok(vec![
            Self::new(config_name, &config)?,
            Self::new(settings_name, &settings)?,
            Self::new(data_name, &data)?,
            Self::new(cache_name, &cache)?,
        ])
    }

    fn new<T: Serialize>(name: &'static str, value: &T) -> Result<Self> {
        let content = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize scenario document {name}"))?;
        Ok(Self { name, content })
    }
}

/// Run the write → read → parse → stat sequence once and time all of it.
///
/// A document that fails to parse is a fixture bug and fails the benchmark.
pub async fn bench_scenario<F: FileSystem>(
    fs: &F,
    workspace: &Workspace,
    documents: &[ScenarioDocument],
) -> Result<Timing> {
    let paths: Vec<PathBuf> = documents.iter().map(|doc| workspace.file(doc.name)).collect();

    let start = Instant::now();

    try_join_all(documents.iter().zip(&paths).map(|(doc, path)| async move {
        fs.write_text(path, &doc.content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }))
    .await?;

    let contents = try_join_all(paths.iter().map(|path| async move {
        fs.read_text(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))
    }))
    .await?;

    for (doc, content) in documents.iter().zip(&contents) {
        let value: serde_json::Value = serde_json::from_str(content)
            .with_context(|| format!("Malformed scenario document {}", doc.name))?;
        std::hint::black_box(value);
    }

    try_join_all(paths.iter().map(|path| async move {
        fs.stat(path)
            .await
            .with_context(|| format!("Failed to stat {}", path.display()))
    }))
    .await?;

    let elapsed = start.elapsed();
    tracing::debug!(
        "{}: scenario over {} documents in {:?}",
        fs.name(),
        documents.len(),
        elapsed,
    );

    Ok(Timing::new(elapsed, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{InlineFs, ThreadPoolFs};
    use tempfile::TempDir;

    #[test]
    fn test_fixtures_match_cleanup_names() {
        let documents = ScenarioDocument::fixtures().unwrap();
        let names: Vec<&str> = documents.iter().map(|d| d.name).collect();
        assert_eq!(names, SCENARIO_FILES);
    }

    #[test]
    fn test_fixture_shapes() {
        let documents = ScenarioDocument::fixtures().unwrap();
        let parsed: Vec<serde_json::Value> = documents
            .iter()
            .map(|d| serde_json::from_str(&d.content).unwrap())
            .collect();

        assert!(parsed[0].is_object());
        assert!(parsed[1].is_object());
        assert_eq!(parsed[2]["items"].as_array().map(Vec::len), Some(DATA_ITEMS));
        assert_eq!(parsed[3]["entries"].as_array().map(Vec::len), Some(CACHE_ENTRIES));
        assert_eq!(parsed[3]["entries"][999], "cached-value");
    }

    #[tokio::test]
    async fn test_scenario_files_round_trip_and_cleanup() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let workspace = Workspace::new(temp_dir.path());
        let documents = ScenarioDocument::fixtures().unwrap();

        let timing = bench_scenario(&ThreadPoolFs, &workspace, &documents)
            .await
            .unwrap();
        assert!(timing.total_ms() >= 0.0);

        for name in SCENARIO_FILES {
            let text = std::fs::read_to_string(workspace.file(name)).unwrap();
            assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok(), "{name}");
        }

        workspace.cleanup(&ThreadPoolFs).await;
        for name in SCENARIO_FILES {
            assert!(!workspace.file(name).exists(), "{name} should be removed");
        }
    }

    #[tokio::test]
    async fn test_malformed_document_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let workspace = Workspace::new(temp_dir.path());
        let documents = vec![ScenarioDocument {
            name: "config.json",
            content: "{not json".to_string(),
        }];

        let err = bench_scenario(&InlineFs, &workspace, &documents)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("config.json"), "{err:#}");
    }
}
