/*
 * native.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * NativeRuntime implementation backed by std::fs.
 */

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::traits::{PathKind, RuntimeResult, SystemRuntime};

/// Runtime with full access to the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    pub fn new() -> Self {
        Self
    }
}

impl SystemRuntime for NativeRuntime {
    fn file_read(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn file_write(&self, path: &Path, contents: &[u8]) -> RuntimeResult<()> {
        Ok(fs::write(path, contents)?)
    }

    fn file_append(&self, path: &Path, contents: &[u8]) -> RuntimeResult<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(contents)?;
        Ok(())
    }

    fn file_copy(&self, src: &Path, dst: &Path) -> RuntimeResult<()> {
        fs::copy(src, dst)?;
        Ok(())
    }

    fn canonicalize(&self, path: &Path) -> RuntimeResult<PathBuf> {
        Ok(fs::canonicalize(path)?)
    }

    fn path_exists(&self, path: &Path, kind: Option<PathKind>) -> RuntimeResult<bool> {
        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        Ok(match kind {
            None => true,
            Some(PathKind::File) => metadata.is_file(),
            Some(PathKind::Directory) => metadata.is_dir(),
        })
    }

    fn dir_create(&self, path: &Path, recursive: bool) -> RuntimeResult<()> {
        if recursive {
            fs::create_dir_all(path)?;
        } else if !path.is_dir() {
            fs::create_dir(path)?;
        }
        Ok(())
    }

    fn cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(std::env::current_dir()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_append() {
        let temp = tempfile::tempdir().unwrap();
        let rt = NativeRuntime::new();
        let path = temp.path().join("log.txt");

        rt.file_write(&path, b"head\n").unwrap();
        rt.file_append(&path, b"one\n").unwrap();
        rt.file_append(&path, b"two\n").unwrap();

        assert_eq!(rt.file_read_string(&path).unwrap(), "head\none\ntwo\n");
    }

    #[test]
    fn test_append_creates_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let rt = NativeRuntime::new();
        let path = temp.path().join("fresh.txt");

        rt.file_append(&path, b"x").unwrap();
        assert!(rt.is_file(&path).unwrap());
    }

    #[test]
    fn test_canonicalize_resolves_parent_components() {
        let temp = tempfile::tempdir().unwrap();
        let rt = NativeRuntime::new();
        rt.dir_create(&temp.path().join("a"), false).unwrap();
        rt.file_write(&temp.path().join("f.txt"), b"x").unwrap();

        let direct = rt.canonicalize(&temp.path().join("f.txt")).unwrap();
        let detour = rt.canonicalize(&temp.path().join("a/../f.txt")).unwrap();
        assert_eq!(direct, detour);
        assert!(rt.canonicalize(&temp.path().join("missing")).is_err());
    }

    #[test]
    fn test_dir_create_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let rt = NativeRuntime::new();
        let dir = temp.path().join("a").join("b");

        rt.dir_create(&dir, true).unwrap();
        rt.dir_create(&dir, true).unwrap();
        assert!(rt.is_dir(&dir).unwrap());

        let single = temp.path().join("single");
        rt.dir_create(&single, false).unwrap();
        rt.dir_create(&single, false).unwrap();
        assert!(rt.is_dir(&single).unwrap());
    }

    #[test]
    fn test_dir_create_below_a_file_fails() {
        let temp = tempfile::tempdir().unwrap();
        let rt = NativeRuntime::new();
        let file = temp.path().join("blocker");
        rt.file_write(&file, b"").unwrap();

        assert!(rt.dir_create(&file.join("child"), true).is_err());
    }

    #[test]
    fn test_path_exists_kinds() {
        let temp = tempfile::tempdir().unwrap();
        let rt = NativeRuntime::new();
        let file = temp.path().join("f.txt");
        rt.file_write(&file, b"1").unwrap();

        assert!(rt.path_exists(&file, None).unwrap());
        assert!(rt.is_file(&file).unwrap());
        assert!(!rt.is_dir(&file).unwrap());
        assert!(rt.is_dir(temp.path()).unwrap());
        assert!(!rt.path_exists(&temp.path().join("missing"), None).unwrap());
    }

    #[test]
    fn test_file_copy() {
        let temp = tempfile::tempdir().unwrap();
        let rt = NativeRuntime::new();
        let src = temp.path().join("src.png");
        let dst = temp.path().join("dst.png");
        rt.file_write(&src, &[0x89, 0x50, 0x4E, 0x47]).unwrap();

        rt.file_copy(&src, &dst).unwrap();
        assert_eq!(rt.file_read(&dst).unwrap(), vec![0x89, 0x50, 0x4E, 0x47]);
    }
}
