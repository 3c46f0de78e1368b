//! Reading and writing `.cbw` archives.
//!
//! A `.cbw` file is a zip container with exactly one entry, `manifest.toml`,
//! stored with deflate compression. Writes go through a temporary file in
//! the destination directory and are renamed into place, so a failed write
//! never leaves a partial archive at the output path.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use zip::read::ZipArchive;
use zip::write::{FileOptions, ZipWriter};

use crate::error::ArchiveError;
use crate::manifest::Manifest;

/// Name of the single entry inside a `.cbw` archive.
pub const MANIFEST_ENTRY: &str = "manifest.toml";

/// Writes a manifest as a single-entry `.cbw` archive at `output_path`.
///
/// Creates or overwrites the file at `output_path`. The parent directory
/// must exist and be writable.
pub fn write(manifest: &Manifest, output_path: &Path) -> Result<(), ArchiveError> {
    let manifest_toml = manifest
        .to_toml()
        .map_err(|e| ArchiveError::SerializeError(e.to_string()))?;

    // An empty parent means a bare filename in the current directory.
    let parent = match output_path.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => Path::new("."),
    };

    let temp_file = NamedTempFile::new_in(parent)?;
    let mut zip = ZipWriter::new(temp_file);

    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    zip.start_file(MANIFEST_ENTRY, options)?;
    zip.write_all(manifest_toml.as_bytes())?;

    let temp_file = zip.finish()?;
    temp_file
        .persist(output_path)
        .map_err(|e| ArchiveError::IoError(e.error))?;

    Ok(())
}

/// Reads the manifest back out of a `.cbw` archive.
pub fn read(path: &Path) -> Result<Manifest, ArchiveError> {
    let file = File::open(path)?;
    let mut zip = ZipArchive::new(file)?;

    let mut entry = match zip.by_name(MANIFEST_ENTRY) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Err(ArchiveError::MissingManifest),
        Err(e) => return Err(e.into()),
    };

    let mut text = String::new();
    entry.read_to_string(&mut text)?;

    Manifest::from_toml(&text).map_err(|e| ArchiveError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_manifest() -> Manifest {
        Manifest::new(
            "Test Gallery",
            "e-hentai",
            vec![
                "https://example.com/full/1.jpg".to_string(),
                "https://example.com/full/2.jpg".to_string(),
                "https://example.com/full/3.jpg".to_string(),
            ],
        )
    }

    #[test]
    fn test_write_read_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gallery.cbw");

        let manifest = sample_manifest();
        write(&manifest, &path).unwrap();

        let loaded = read(&path).unwrap();
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn test_archive_has_single_manifest_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gallery.cbw");

        write(&sample_manifest(), &path).unwrap();

        let file = File::open(&path).unwrap();
        let zip = ZipArchive::new(file).unwrap();
        assert_eq!(zip.len(), 1);
        assert_eq!(zip.file_names().collect::<Vec<_>>(), vec![MANIFEST_ENTRY]);
    }

    #[test]
    fn test_empty_url_list_is_valid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.cbw");

        let manifest = Manifest::new("Nothing Resolved", "nhentai", Vec::new());
        write(&manifest, &path).unwrap();

        let loaded = read(&path).unwrap();
        assert!(loaded.pages.urls.is_empty());
    }

    #[test]
    fn test_write_to_missing_directory_fails_cleanly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no/such/dir/gallery.cbw");

        let err = write(&sample_manifest(), &path).unwrap_err();
        assert!(matches!(err, ArchiveError::IoError(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gallery.cbw");

        write(&Manifest::new("First", "e-hentai", Vec::new()), &path).unwrap();
        write(&sample_manifest(), &path).unwrap();

        let loaded = read(&path).unwrap();
        assert_eq!(loaded.meta.title, "Test Gallery");
        assert_eq!(loaded.pages.urls.len(), 3);
    }

    #[test]
    fn test_read_missing_manifest_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bogus.cbw");

        let file = File::create(&path).unwrap();
        let mut zip = ZipWriter::new(file);
        zip.start_file("other.txt", FileOptions::default()).unwrap();
        zip.write_all(b"not a manifest").unwrap();
        zip.finish().unwrap();

        let err = read(&path).unwrap_err();
        assert!(matches!(err, ArchiveError::MissingManifest));
    }
}
