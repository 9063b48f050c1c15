//! Domain types for a local/remote tree comparison.
//!
//! Local filesystem locations use `PathBuf`; remote locations are plain
//! `String`s because they only ever travel inside shell commands.

use std::fmt;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A slash-separated path rooted at the comparison root.
///
/// The root itself is the empty path. Segments never contain `/`, `.` or
/// `..`; traversal filters those before calling [`RelativePath::join`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelativePath(String);

impl RelativePath {
    /// The comparison root.
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Extend by one entry name.
    pub fn join(&self, segment: &str) -> Self {
        if self.is_root() {
            Self(segment.to_owned())
        } else {
            Self(format!("{}/{segment}", self.0))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Resolve against a local directory.
    pub fn under_local(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in self.segments() {
            path.push(segment);
        }
        path
    }

    /// Resolve against a remote root: `root + "/" + self`, never doubling the slash.
    pub fn under_remote(&self, root: &str) -> String {
        let root = root.trim_end_matches('/');
        if self.is_root() {
            return if root.is_empty() { "/".to_owned() } else { root.to_owned() };
        }
        format!("{root}/{}", self.0)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        let mut path = Self::root();
        for segment in s.split('/').filter(|s| !s.is_empty() && *s != "." && *s != "..") {
            path = path.join(segment);
        }
        path
    }
}

/// A lowercase 40-hex-digit content digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(String);

impl ContentHash {
    pub const LEN: usize = 40;

    /// Accept exactly 40 lowercase hex digits; anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let valid = s.len() == Self::LEN
            && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        valid.then(|| Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Per-file records
// ---------------------------------------------------------------------------

/// One visited regular file and its local digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub relative_path: RelativePath,
    pub local_hash: ContentHash,
}

impl FileRecord {
    pub fn new(relative_path: RelativePath, local_hash: ContentHash) -> Self {
        Self {
            relative_path,
            local_hash,
        }
    }
}

/// What one remote probe learned about a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteProbeResult {
    Hash(ContentHash),
    NotFound,
    PermissionDenied,
}

/// Classification of a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffOutcome {
    Match,
    Mismatch,
    Missing,
    PermissionIssue,
}

impl DiffOutcome {
    /// `true` for outcomes that count towards `differences`.
    pub fn is_difference(self) -> bool {
        matches!(self, DiffOutcome::Mismatch | DiffOutcome::Missing)
    }
}

// ---------------------------------------------------------------------------
// Tally
// ---------------------------------------------------------------------------

/// Counts accumulated over a whole traversal. Only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTally {
    pub differences: usize,
    pub permission_issues: usize,
}

impl RunTally {
    pub fn record(&mut self, outcome: DiffOutcome) {
        match outcome {
            DiffOutcome::Match => {}
            DiffOutcome::Mismatch | DiffOutcome::Missing => self.differences += 1,
            DiffOutcome::PermissionIssue => self.permission_issues += 1,
        }
    }

    pub fn status(&self) -> RunStatus {
        if self.differences > 0 {
            RunStatus::DifferencesFound
        } else {
            RunStatus::Clean
        }
    }
}

impl AddAssign for RunTally {
    fn add_assign(&mut self, other: Self) {
        self.differences += other.differences;
        self.permission_issues += other.permission_issues;
    }
}

/// Process-level outcome of a run. Permission issues alone stay `Clean`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Clean,
    DifferencesFound,
}

impl RunStatus {
    pub fn exit_code(self) -> u8 {
        match self {
            RunStatus::Clean => 0,
            RunStatus::DifferencesFound => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Traversal context
// ---------------------------------------------------------------------------

/// Immutable settings for one comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalContext {
    pub local_root: PathBuf,
    pub remote_root: String,
    pub diff_mirror_dir: Option<PathBuf>,
    pub verbose: bool,
}

impl TraversalContext {
    /// Context with the remote root at `/`, no mirror, quiet.
    pub fn new(local_root: impl Into<PathBuf>) -> Self {
        Self {
            local_root: local_root.into(),
            remote_root: "/".to_owned(),
            diff_mirror_dir: None,
            verbose: false,
        }
    }

    pub fn with_remote_root(mut self, remote_root: impl Into<String>) -> Self {
        self.remote_root = remote_root.into();
        self
    }

    pub fn with_mirror_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.diff_mirror_dir = dir;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn local_path(&self, relative: &RelativePath) -> PathBuf {
        relative.under_local(&self.local_root)
    }

    pub fn remote_path(&self, relative: &RelativePath) -> String {
        relative.under_remote(&self.remote_root)
    }

    /// Where a divergent file is mirrored, if mirroring is on.
    pub fn mirror_path(&self, relative: &RelativePath) -> Option<PathBuf> {
        self.diff_mirror_dir
            .as_deref()
            .map(|dir| relative.under_local(dir))
    }
}
