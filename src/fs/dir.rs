// ── Directory iteration ───────────────────────────────────────────────────────

use std::fs;

use tracing::debug;

use crate::{
    error::{Error, Result},
    native,
};

/// An open directory stream.
///
/// Single pass and not restartable.  `.` and `..` are never reported.
#[derive(Debug)]
pub struct Dir {
    entries: fs::ReadDir,
    path: String,
    done: bool,
}

impl Dir {
    pub fn open(path: &str) -> Result<Dir> {
        debug!(path, "opendir");
        let native_path = native::path("opendir", path)?;
        let entries = fs::read_dir(native_path).map_err(|e| Error::io("opendir", path, e))?;
        Ok(Dir {
            entries,
            path: path.to_owned(),
            done: false,
        })
    }

    /// The path this stream was opened on.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fetch the next entry name.
    ///
    /// `Ok(None)` marks the end of the stream and is returned by every later
    /// call too.  A name that is not valid UTF-8 is reported as an error;
    /// the next call moves on to the following entry.
    pub fn read_entry(&mut self) -> Result<Option<String>> {
        if self.done {
            return Ok(None);
        }
        match self.entries.next() {
            None => {
                self.done = true;
                Ok(None)
            }
            Some(Err(e)) => Err(Error::io("readdir", self.path.as_str(), e)),
            Some(Ok(entry)) => native::to_utf8("readdir", "entry name", entry.file_name()).map(Some),
        }
    }

    pub fn close(self) {
        // The native stream is closed when `entries` drops.
    }
}

impl Iterator for Dir {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_entry().transpose()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn lists_every_entry_once_then_ends() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let names = ["a.txt", "b", "ünï.md"];
        for n in names {
            fs::write(tmp.path().join(n), n).expect("seed");
        }
        fs::create_dir(tmp.path().join("sub")).expect("seed dir");

        let mut dir = Dir::open(tmp.path().to_str().expect("utf8")).expect("opendir");
        let mut seen = BTreeSet::new();
        while let Some(name) = dir.read_entry().expect("readdir") {
            assert!(seen.insert(name.clone()), "{name} repeated");
        }
        assert_eq!(dir.read_entry().expect("after end"), None);

        let expected: BTreeSet<String> = ["a.txt", "b", "ünï.md", "sub"]
            .into_iter()
            .map(str::to_owned)
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn empty_directory_ends_immediately() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = Dir::open(tmp.path().to_str().expect("utf8")).expect("opendir");
        assert_eq!(dir.count(), 0);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_name_errors_and_iteration_continues() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join(OsStr::from_bytes(b"bad\xFF")), b"x").expect("seed bad");
        fs::write(tmp.path().join("ok"), b"x").expect("seed ok");

        let dir = Dir::open(tmp.path().to_str().expect("utf8")).expect("opendir");
        let results: Vec<Result<String>> = dir.collect();
        assert_eq!(results.len(), 2);

        let names: Vec<&str> = results
            .iter()
            .filter_map(|r| r.as_ref().ok())
            .map(String::as_str)
            .collect();
        assert_eq!(names, ["ok"]);

        let errors: Vec<ErrorKind> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(Error::kind)
            .collect();
        assert_eq!(errors, [ErrorKind::InvalidEncoding]);
    }

    #[test]
    fn missing_directory_is_not_found() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let missing = tmp.path().join("nope");
        let err = Dir::open(missing.to_str().expect("utf8")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
