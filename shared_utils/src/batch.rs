//! Batch Processing Module
//!
//! Flat (non-recursive) file collection and per-run result aggregation.
//! Files are returned in the order the filesystem yields them.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collects the regular files directly inside `dir` whose extension is in
/// `extensions` (lowercase, without the dot). Subdirectories are not entered.
pub fn collect_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Input directory not found: {}", dir.display());
    }

    let files = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| crate::common_utils::has_extension(e.path(), extensions))
        .map(|e| e.path().to_path_buf())
        .collect();

    Ok(files)
}

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<(PathBuf, String)>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self {
            total: 0,
            succeeded: 0,
            failed: 0,
            errors: Vec::new(),
        }
    }

    pub fn success(&mut self) {
        self.total += 1;
        self.succeeded += 1;
    }

    pub fn fail(&mut self, path: PathBuf, error: String) {
        self.total += 1;
        self.failed += 1;
        self.errors.push((path, error));
    }

    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.succeeded as f64 / self.total as f64) * 100.0
        }
    }
}

impl Default for BatchResult {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_files_filters_by_extension() {
        let temp = TempDir::new().unwrap();
        for name in ["a.jpg", "b.PNG", "c.txt", "d", "e.mp4"] {
            fs::write(temp.path().join(name), b"x").unwrap();
        }

        let mut names: Vec<String> = collect_files(temp.path(), &["jpg", "png"])
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();

        assert_eq!(names, vec!["a.jpg", "b.PNG"]);
    }

    #[test]
    fn test_collect_files_is_not_recursive() {
        let temp = TempDir::new().unwrap();
        let sub = temp.path().join("nested");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("inner.jpg"), b"x").unwrap();
        fs::write(temp.path().join("outer.jpg"), b"x").unwrap();
        // a directory named like an image is not a file
        fs::create_dir(temp.path().join("folder.jpg")).unwrap();

        let files = collect_files(temp.path(), &["jpg"]).unwrap();
        assert_eq!(files, vec![temp.path().join("outer.jpg")]);
    }

    #[test]
    fn test_collect_files_missing_dir_is_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(collect_files(&missing, &["jpg"]).is_err());
    }

    #[test]
    fn test_batch_result_new() {
        let result = BatchResult::new();
        assert_eq!(result.total, 0);
        assert_eq!(result.succeeded, 0);
        assert_eq!(result.failed, 0);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_batch_result_mixed() {
        let mut result = BatchResult::new();
        result.success();
        result.success();
        result.fail(PathBuf::from("broken.jpg"), "Error".to_string());

        assert_eq!(result.total, 3);
        assert_eq!(result.succeeded, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.errors[0].0, PathBuf::from("broken.jpg"));
        assert_eq!(result.total, result.succeeded + result.failed);
    }

    #[test]
    fn test_success_rate() {
        let test_cases = [(10, 0, 100.0), (5, 5, 50.0), (3, 1, 75.0), (0, 10, 0.0), (0, 0, 100.0)];

        for (success, fail, expected) in test_cases {
            let mut result = BatchResult::new();
            for _ in 0..success {
                result.success();
            }
            for i in 0..fail {
                result.fail(PathBuf::from(format!("f{}.mp4", i)), "E".to_string());
            }
            assert!(
                (result.success_rate() - expected).abs() < 0.001,
                "{}s/{}f expected {}%, got {}%",
                success,
                fail,
                expected,
                result.success_rate()
            );
        }
    }
}
