// SPDX-License-Identifier: MIT

use super::*;
use std::io::Read;

#[test]
fn acquire_writes_own_pid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nsgod.lock");
    let path = path.to_str().unwrap().to_string();

    let lock = LockFile::acquire(&path).unwrap();

    let mut contents = String::new();
    File::open(&path).unwrap().read_to_string(&mut contents).unwrap();
    assert_eq!(contents.trim(), std::process::id().to_string());

    lock.remove();
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn acquire_fails_when_already_locked() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nsgod.lock");
    let path = path.to_str().unwrap().to_string();

    let _first = LockFile::acquire(&path).unwrap();
    let second = LockFile::acquire(&path);
    assert!(second.is_err());
}
