//! Scripted in-memory remote host for comparison tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::Path;

use sshdiff_compare::hash::hash_bytes;
use sshdiff_core::{ChannelError, RemoteChannel};

/// Remote side of a comparison: a map of absolute remote paths to bytes.
///
/// `run` understands only the `sha1sum "<path>" 2>&1` command shape and
/// answers the way coreutils does.
#[derive(Debug, Default)]
pub struct FakeRemote {
    files: HashMap<String, Vec<u8>>,
    denied: HashSet<String>,
    scripted: HashMap<String, String>,
    broken_fetch: HashSet<String>,
    fail_run_after: Option<usize>,
    pub commands: Vec<String>,
    pub fetched: Vec<String>,
    pub logouts: usize,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, bytes: &[u8]) -> Self {
        self.files.insert(path.to_owned(), bytes.to_vec());
        self
    }

    pub fn with_denied(mut self, path: &str) -> Self {
        self.denied.insert(path.to_owned());
        self
    }

    /// Answer probes of `path` with `raw` verbatim.
    pub fn with_script(mut self, path: &str, raw: &str) -> Self {
        self.scripted.insert(path.to_owned(), raw.to_owned());
        self
    }

    pub fn with_broken_fetch(mut self, path: &str) -> Self {
        self.broken_fetch.insert(path.to_owned());
        self
    }

    /// Every `run` after the first `n` fails as a dropped connection.
    pub fn failing_after(mut self, n: usize) -> Self {
        self.fail_run_after = Some(n);
        self
    }

    /// Mirror a whole local tree under `remote_root`.
    pub fn mirroring(mut self, local_root: &Path, remote_root: &str) -> Self {
        let mut pending = vec![local_root.to_path_buf()];
        while let Some(dir) = pending.pop() {
            for entry in std::fs::read_dir(&dir).expect("read local dir") {
                let path = entry.expect("entry").path();
                if path.is_dir() {
                    pending.push(path);
                    continue;
                }
                let relative = path
                    .strip_prefix(local_root)
                    .expect("under root")
                    .to_string_lossy()
                    .replace('\\', "/");
                let remote = format!("{}/{relative}", remote_root.trim_end_matches('/'));
                let bytes = std::fs::read(&path).expect("read local file");
                self.files.insert(remote, bytes);
            }
        }
        self
    }

    /// Paths probed so far, unescaped, in order.
    pub fn probed(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|command| probed_path(command))
            .collect()
    }
}

/// Recover the path from `sha1sum "<escaped>" 2>&1`.
pub fn probed_path(command: &str) -> Option<String> {
    let quoted = command.strip_prefix("sha1sum \"")?.strip_suffix("\" 2>&1")?;
    Some(quoted.replace("\\\"", "\""))
}

impl RemoteChannel for FakeRemote {
    fn run(&mut self, command: &str) -> Result<String, ChannelError> {
        if let Some(limit) = self.fail_run_after {
            if self.commands.len() >= limit {
                return Err(ChannelError::Closed);
            }
        }
        self.commands.push(command.to_owned());

        let Some(path) = probed_path(command) else {
            return Ok(format!("sh: unexpected command: {command}\n"));
        };
        if let Some(raw) = self.scripted.get(&path) {
            return Ok(raw.clone());
        }
        if self.denied.contains(&path) {
            return Ok(format!("sha1sum: {path}: Permission denied\n"));
        }
        match self.files.get(&path) {
            Some(bytes) => Ok(format!("{}  {path}\n", hash_bytes(bytes))),
            None => Ok(format!("sha1sum: {path}: No such file or directory\n")),
        }
    }

    fn fetch(&mut self, remote_path: &str, sink: &mut dyn Write) -> Result<u64, ChannelError> {
        self.fetched.push(remote_path.to_owned());
        if self.broken_fetch.contains(remote_path) {
            return Err(ChannelError::Transfer {
                path: remote_path.to_owned(),
                reason: "scp: connection reset".to_owned(),
            });
        }
        let bytes = self
            .files
            .get(remote_path)
            .ok_or_else(|| ChannelError::Transfer {
                path: remote_path.to_owned(),
                reason: "no such file".to_owned(),
            })?;
        sink.write_all(bytes)?;
        Ok(bytes.len() as u64)
    }

    fn logout(&mut self) -> Result<(), ChannelError> {
        self.logouts += 1;
        Ok(())
    }
}
