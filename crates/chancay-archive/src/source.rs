//! Archive sources for day files.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use zip::ZipArchive;

use crate::convention::{entry_basename, is_day_entry, normalize_separators};

/// Errors that can occur while enumerating an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The source path is neither a ZIP file nor a directory.
    #[error("Unsupported source: {0} (expected a .zip file or a directory)")]
    UnsupportedSource(PathBuf),

    /// ZIP container error.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A named day-file payload from an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayFile {
    /// Base filename (e.g., `sh600000.day`).
    pub name: String,
    /// Raw binary content.
    pub data: Vec<u8>,
}

/// A source of day files: a ZIP container or an extracted directory tree.
///
/// Both carry the same layout convention, `{market}/lday/*.day` with
/// either separator style; enumeration yields only entries matching it.
#[derive(Debug)]
pub enum DayArchive {
    /// A ZIP container (entry names may be backslash-separated).
    Zip(ZipArchive<File>),
    /// An extracted directory tree rooted at `{root}/{market}/lday/`.
    Dir(PathBuf),
}

impl DayArchive {
    /// Opens a source path, detecting whether it is a ZIP file or a
    /// directory tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is neither, or the ZIP cannot be read.
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        if path.is_file() && path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("zip")) {
            let archive = ZipArchive::new(File::open(path)?)?;
            return Ok(Self::Zip(archive));
        }

        if path.is_dir() {
            return Ok(Self::Dir(path.to_path_buf()));
        }

        Err(ArchiveError::UnsupportedSource(path.to_path_buf()))
    }

    /// Counts day-file entries without reading any payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the container or directories cannot be read.
    pub fn count(&mut self) -> Result<usize, ArchiveError> {
        match self {
            Self::Zip(archive) => Ok(zip_day_indices(archive)?.len()),
            Self::Dir(root) => Ok(dir_day_paths(root)?.len()),
        }
    }

    /// Returns a lazy iterator over day files matching the path
    /// convention. Entry names are resolved up front; payloads are read
    /// one file at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if the container or directories cannot be read.
    pub fn files(&mut self) -> Result<DayFileIter<'_>, ArchiveError> {
        let inner = match self {
            Self::Zip(archive) => {
                let indices = zip_day_indices(archive)?;
                IterInner::Zip {
                    archive,
                    indices: indices.into_iter(),
                }
            }
            Self::Dir(root) => IterInner::Dir {
                paths: dir_day_paths(root)?.into_iter(),
            },
        };
        Ok(DayFileIter { inner })
    }
}

/// Collects the indices of day-file entries in a ZIP container.
fn zip_day_indices(archive: &mut ZipArchive<File>) -> Result<Vec<usize>, ArchiveError> {
    let mut indices = Vec::new();
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        let normalized = normalize_separators(entry.name());
        if is_day_entry(&normalized) {
            indices.push(i);
        }
    }
    Ok(indices)
}

/// Collects day-file paths under `{root}/{market}/lday/` for each market.
fn dir_day_paths(root: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
    let mut paths = Vec::new();

    for market in chancay_instruments::Market::ALL {
        let lday_dir = root.join(market.tag()).join("lday");
        if !lday_dir.is_dir() {
            continue;
        }

        let mut market_paths: Vec<PathBuf> = fs::read_dir(&lday_dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "day"))
            .collect();
        market_paths.sort();
        paths.extend(market_paths);
    }

    Ok(paths)
}

/// Lazy iterator over day files in an archive.
#[derive(Debug)]
pub struct DayFileIter<'a> {
    inner: IterInner<'a>,
}

#[derive(Debug)]
enum IterInner<'a> {
    Zip {
        archive: &'a mut ZipArchive<File>,
        indices: std::vec::IntoIter<usize>,
    },
    Dir {
        paths: std::vec::IntoIter<PathBuf>,
    },
}

impl Iterator for DayFileIter<'_> {
    type Item = Result<DayFile, ArchiveError>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterInner::Zip { archive, indices } => {
                let index = indices.next()?;
                Some(read_zip_entry(archive, index))
            }
            IterInner::Dir { paths } => {
                let path = paths.next()?;
                Some(read_dir_entry(&path))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            IterInner::Zip { indices, .. } => indices.size_hint(),
            IterInner::Dir { paths } => paths.size_hint(),
        }
    }
}

fn read_zip_entry(
    archive: &mut ZipArchive<File>,
    index: usize,
) -> Result<DayFile, ArchiveError> {
    let mut entry = archive.by_index(index)?;
    let normalized = normalize_separators(entry.name());
    let name = entry_basename(&normalized).to_string();

    let mut data = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut data)?;

    Ok(DayFile { name, data })
}

fn read_dir_entry(path: &Path) -> Result<DayFile, ArchiveError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let data = fs::read(path)?;
    Ok(DayFile { name, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

        for (name, data) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }

        writer.finish().unwrap().into_inner()
    }

    fn zip_archive_on_disk(dir: &TempDir, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.path().join("hsjday.zip");
        fs::write(&path, write_zip(entries)).unwrap();
        path
    }

    #[test]
    fn test_open_unsupported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, b"not an archive").unwrap();

        assert!(matches!(
            DayArchive::open(&path),
            Err(ArchiveError::UnsupportedSource(_))
        ));
    }

    #[test]
    fn test_zip_enumeration_filters_convention() {
        let dir = TempDir::new().unwrap();
        let path = zip_archive_on_disk(
            &dir,
            &[
                ("vipdoc/sh/lday/sh600000.day", b"aaaa" as &[u8]),
                ("vipdoc/sz/lday/sz000001.day", b"bbbb"),
                ("vipdoc/sh/minline/sh600000.lc1", b"cccc"),
                ("readme.txt", b"dddd"),
            ],
        );

        let mut archive = DayArchive::open(&path).unwrap();
        assert_eq!(archive.count().unwrap(), 2);

        let files: Vec<_> = archive.files().unwrap().map(|f| f.unwrap()).collect();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["sh600000.day", "sz000001.day"]);
        assert_eq!(files[0].data, b"aaaa");
    }

    #[test]
    fn test_zip_backslash_paths() {
        let dir = TempDir::new().unwrap();
        let path = zip_archive_on_disk(
            &dir,
            &[(r"vipdoc\bj\lday\bj430017.day", b"data" as &[u8])],
        );

        let mut archive = DayArchive::open(&path).unwrap();
        let files: Vec<_> = archive.files().unwrap().map(|f| f.unwrap()).collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "bj430017.day");
    }

    #[test]
    fn test_dir_enumeration() {
        let dir = TempDir::new().unwrap();
        let lday_sh = dir.path().join("sh").join("lday");
        let lday_sz = dir.path().join("sz").join("lday");
        fs::create_dir_all(&lday_sh).unwrap();
        fs::create_dir_all(&lday_sz).unwrap();
        fs::write(lday_sh.join("sh600000.day"), b"aaaa").unwrap();
        fs::write(lday_sh.join("notes.txt"), b"skip").unwrap();
        fs::write(lday_sz.join("sz000001.day"), b"bbbb").unwrap();

        let mut archive = DayArchive::open(dir.path()).unwrap();
        assert_eq!(archive.count().unwrap(), 2);

        let files: Vec<_> = archive.files().unwrap().map(|f| f.unwrap()).collect();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        // Markets enumerate in sh, sz, bj order.
        assert_eq!(names, vec!["sh600000.day", "sz000001.day"]);
    }

    #[test]
    fn test_dir_missing_markets_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sh").join("lday")).unwrap();

        let mut archive = DayArchive::open(dir.path()).unwrap();
        assert_eq!(archive.count().unwrap(), 0);
        assert_eq!(archive.files().unwrap().count(), 0);
    }
}
