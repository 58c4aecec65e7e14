//! Writing generated packets to disk.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::catalog;
use crate::models::service::Service;

/// Writes each `(filename, content)` pair under `dir`, creating it if needed.
/// Returns the written paths in input order.
pub fn write_files(dir: &Path, files: &[(&str, &str)]) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = dir.join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote packet file");
        written.push(path);
    }
    Ok(written)
}

/// Resolves `arg` as a demo service id, falling back to a JSON file path.
pub fn load_service(arg: &str) -> anyhow::Result<Service> {
    if let Some(service) = catalog::find_service(arg) {
        return Ok(service);
    }
    let text = std::fs::read_to_string(arg)
        .with_context(|| format!("'{}' is neither a demo service id nor a readable file", arg))?;
    serde_json::from_str(&text).with_context(|| format!("invalid service JSON in {}", arg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_files_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested/out");
        let paths = write_files(&dir, &[("a.html", "<p>a</p>"), ("b.json", "{}")]).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(std::fs::read_to_string(&paths[1]).unwrap(), "{}");
    }

    #[test]
    fn test_load_service_by_demo_id() {
        let svc = load_service("svc_document_intake").unwrap();
        assert_eq!(svc.name, "Document Intake");
    }

    #[test]
    fn test_load_service_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("service.json");
        std::fs::write(
            &path,
            r#"{"id":"svc_file","name":"From File","workflowNames":["Email Verification"],"estimatedCostPerRun":0.05}"#,
        )
        .unwrap();
        let svc = load_service(path.to_str().unwrap()).unwrap();
        assert_eq!(svc.id, "svc_file");
        assert!(load_service("/definitely/not/here.json").is_err());
    }
}
