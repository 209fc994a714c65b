use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid folder path: {0}")]
    NotADirectory(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Every `*.pdf` file under `root`, recursively, sorted by path.
/// The suffix check is exact: `INVOICE.PDF` is not picked up.
pub fn find_pdfs(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = std::fs::read_dir(&dir)
            .map_err(|source| ScanError::Io { path: dir.clone(), source })?;
        for entry in entries {
            let entry = entry.map_err(|source| ScanError::Io { path: dir.clone(), source })?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|source| ScanError::Io { path: path.clone(), source })?;

            if file_type.is_dir() {
                pending.push(path);
            } else if is_pdf_name(&path) && path.is_file() {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}

fn is_pdf_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_nested_pdfs_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("2024/q1")).unwrap();
        fs::write(root.join("b.pdf"), b"x").unwrap();
        fs::write(root.join("a.pdf"), b"x").unwrap();
        fs::write(root.join("2024/q1/c.pdf"), b"x").unwrap();
        fs::write(root.join("notes.txt"), b"x").unwrap();

        let found = find_pdfs(root).unwrap();
        assert_eq!(
            found,
            vec![root.join("2024/q1/c.pdf"), root.join("a.pdf"), root.join("b.pdf")]
        );
    }

    #[test]
    fn suffix_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("UPPER.PDF"), b"x").unwrap();
        fs::write(dir.path().join("lower.pdf"), b"x").unwrap();

        let found = find_pdfs(dir.path()).unwrap();
        assert_eq!(found, vec![dir.path().join("lower.pdf")]);
    }

    #[test]
    fn directory_named_like_pdf_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("folder.pdf")).unwrap();
        assert!(find_pdfs(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(find_pdfs(&missing), Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn file_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.pdf");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(find_pdfs(&file), Err(ScanError::NotADirectory(_))));
    }
}
