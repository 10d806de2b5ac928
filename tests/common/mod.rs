//! Common test utilities for rendpack integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A test content store plus output directory for integration tests
#[allow(dead_code)]
pub struct TestContent {
    /// Temporary directory
    pub temp: TempDir,
    /// Content store root
    pub content: PathBuf,
    /// Output directory for produced archives
    pub out: PathBuf,
}

#[allow(dead_code)]
impl TestContent {
    /// Create a new test content store with an empty output directory
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let content = temp.path().join("content");
        let out = temp.path().join("out");
        std::fs::create_dir_all(&content).expect("Failed to create content directory");
        std::fs::create_dir_all(&out).expect("Failed to create output directory");
        Self { temp, content, out }
    }

    /// Create an asset directory with the given stored renditions
    pub fn add_asset(&self, name: &str, renditions: &[(&str, &[u8])]) {
        let dir = self.content.join(name).join("renditions");
        std::fs::create_dir_all(&dir).expect("Failed to create renditions directory");
        for (stored_name, bytes) in renditions {
            std::fs::write(dir.join(stored_name), bytes).expect("Failed to write rendition");
        }
    }

    /// Write a rendpack.yaml next to the content store and return its path
    pub fn write_config(&self, yaml: &str) -> PathBuf {
        let path = self.temp.path().join("rendpack.yaml");
        std::fs::write(&path, yaml).expect("Failed to write config");
        path
    }

    /// List file names currently present in the output directory
    pub fn out_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.out)
            .expect("Failed to read output directory")
            .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Read the entry names of a produced archive, in archive order
    pub fn archive_entries(&self, file_name: &str) -> Vec<String> {
        let file = std::fs::File::open(self.out.join(file_name)).expect("Failed to open archive");
        let mut archive = zip::ZipArchive::new(file).expect("Failed to read archive");
        (0..archive.len())
            .map(|i| {
                archive
                    .by_index(i)
                    .expect("Failed to read entry")
                    .name()
                    .to_string()
            })
            .collect()
    }
}
