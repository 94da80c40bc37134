//! Recursive filesystem walk that builds the size tree.
//!
//! The builder lists one directory at a time, sizes every entry from its
//! metadata without following symbolic links, recurses into subdirectories
//! and sorts each child list largest first before handing the directory back
//! to its parent. The walk is single-threaded and depth-first; very deep trees
//! are bounded only by the call stack.
//!
//! Traversal is best-effort: a directory that cannot be listed, or an entry
//! whose metadata cannot be read, contributes zero bytes and the walk moves on.

use std::{
    fmt, fs, io,
    path::{MAIN_SEPARATOR, Path},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::{
    block_size::{BlockSize, BlockSizeProvider},
    config::ScanOptions,
    tree::{
        exclude::{PathExclusion, PseudoFsExclusion},
        node::Node,
    },
};

/// Counters gathered while building a tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Non-directory entries sized
    pub files: u64,

    /// Directories visited below the root
    pub directories: u64,

    /// Directories that were skipped by the exclusion predicate
    pub excluded: u64,

    /// Entries or directories that could not be read, one message each
    pub errors: Vec<String>,
}

/// Builds a [`Node`] tree for a directory.
pub struct TreeBuilder {
    /// Configuration options for scanning behavior
    scan_options: ScanOptions,

    /// Directories that must not be listed
    exclusion: Box<dyn PathExclusion>,
}

impl fmt::Debug for TreeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeBuilder")
            .field("scan_options", &self.scan_options)
            .finish_non_exhaustive()
    }
}

impl TreeBuilder {
    /// Create a builder that skips the current platform's pseudo-filesystems.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use std::path::Path;
    /// # use scandisk::{SystemBlockSize, config::ScanOptions, tree::TreeBuilder};
    /// let builder = TreeBuilder::new(ScanOptions::default());
    /// let root = builder.scan(Path::new("/home"), &SystemBlockSize);
    /// println!("{root}");
    /// ```
    #[must_use]
    pub fn new(scan_options: ScanOptions) -> Self {
        Self {
            scan_options,
            exclusion: Box::new(PseudoFsExclusion::for_current_platform()),
        }
    }

    /// Replace the exclusion predicate.
    #[must_use]
    pub fn with_exclusion(mut self, exclusion: impl PathExclusion + 'static) -> Self {
        self.exclusion = Box::new(exclusion);
        self
    }

    /// Scan `root`, asking `provider` for the block size once up front unless
    /// the options carry an override.
    #[must_use]
    pub fn scan(&self, root: &Path, provider: &dyn BlockSizeProvider) -> Node {
        self.scan_with_stats(root, provider).0
    }

    /// Like [`scan`](Self::scan), also returning the [`ScanStats`].
    ///
    /// A progress spinner is drawn on stderr unless the options ask for quiet.
    #[must_use]
    pub fn scan_with_stats(
        &self,
        root: &Path,
        provider: &dyn BlockSizeProvider,
    ) -> (Node, ScanStats) {
        let block_size = self
            .scan_options
            .block_size
            .unwrap_or_else(|| provider.block_size_of(root));
        info!(root = %root.display(), %block_size, "scanning");

        let progress = if self.scan_options.quiet {
            ProgressBar::hidden()
        } else {
            Self::spinner()
        };

        let mut walk = Walk {
            exclusion: self.exclusion.as_ref(),
            block_size,
            progress,
            stats: ScanStats::default(),
        };
        let tree = walk.visit_dir(root, root.display().to_string(), 0);

        walk.progress.finish_and_clear();
        info!(
            files = walk.stats.files,
            directories = walk.stats.directories,
            errors = walk.stats.errors.len(),
            size = tree.size,
            "scan complete"
        );

        (tree, walk.stats)
    }

    /// Build the tree for `path` with a fixed block size and no progress output.
    ///
    /// The returned root is named after `path` as given.
    #[must_use]
    pub fn build(&self, path: &Path, block_size: BlockSize) -> Node {
        let mut walk = Walk {
            exclusion: self.exclusion.as_ref(),
            block_size,
            progress: ProgressBar::hidden(),
            stats: ScanStats::default(),
        };
        walk.visit_dir(path, path.display().to_string(), 0)
    }

    fn spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg} {human_pos} entries")
        {
            pb.set_style(style);
        }
        pb.set_message("Scanning...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// State threaded through one recursive walk.
struct Walk<'a> {
    exclusion: &'a dyn PathExclusion,
    block_size: BlockSize,
    progress: ProgressBar,
    stats: ScanStats,
}

impl Walk<'_> {
    /// Build the node for the directory at `path`, displayed as `name`.
    fn visit_dir(&mut self, path: &Path, name: String, depth: usize) -> Node {
        let mut node = Node::directory(name);

        if self.exclusion.is_excluded(path, depth) {
            debug!(path = %path.display(), depth, "excluded");
            self.stats.excluded += 1;
            return node;
        }

        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) => {
                self.record_error(path, &e);
                return node;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.record_error(path, &e);
                    continue;
                }
            };

            let child_path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            self.progress.inc(1);

            let child = match fs::symlink_metadata(&child_path) {
                Ok(meta) if meta.is_dir() => {
                    self.stats.directories += 1;
                    self.visit_dir(&child_path, format!("{name}{MAIN_SEPARATOR}"), depth + 1)
                }
                Ok(meta) => {
                    self.stats.files += 1;
                    Node::file(name, self.block_size.round_up(meta.len()))
                }
                Err(e) => {
                    self.record_error(&child_path, &e);
                    Node::file(name, 0)
                }
            };

            node.push_child(child);
        }

        node.sort_children();
        node
    }

    fn record_error(&mut self, path: &Path, error: &io::Error) {
        debug!(path = %path.display(), %error, "unreadable, counted as 0 bytes");
        self.stats
            .errors
            .push(format!("Error reading {}: {error}", path.display()));
    }
}
