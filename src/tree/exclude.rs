//! Directories the tree builder must not descend into.
//!
//! Some platforms mount synthetic filesystems whose contents are unstable and
//! whose reported sizes are meaningless (`/proc` on Linux). A
//! [`PathExclusion`] is consulted for every directory before it is listed;
//! excluded directories still appear in the tree, with size 0 and no children.

use std::path::{Path, PathBuf};

/// Decides whether a directory should be left unlisted.
///
/// `depth` is 0 for the scan root and grows by one per level. Any
/// `Fn(&Path, usize) -> bool` closure is a valid predicate.
pub trait PathExclusion {
    /// Whether the directory at `path` should be skipped.
    fn is_excluded(&self, path: &Path, depth: usize) -> bool;
}

impl<F> PathExclusion for F
where
    F: Fn(&Path, usize) -> bool,
{
    fn is_excluded(&self, path: &Path, depth: usize) -> bool {
        self(path, depth)
    }
}

/// Lists every directory.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoExclusion;

impl PathExclusion for NoExclusion {
    fn is_excluded(&self, _path: &Path, _depth: usize) -> bool {
        false
    }
}

/// Skips pseudo-filesystems mounted near the top of the tree.
///
/// A directory is excluded when its path lies under one of `mounts`
/// (component-wise, so `/process` is not under `/proc`) and it sits less
/// than `max_depth` levels below the scan root.
#[derive(Clone, Debug)]
pub struct PseudoFsExclusion {
    mounts: Vec<PathBuf>,
    max_depth: usize,
}

impl PseudoFsExclusion {
    /// Only the first two levels are checked: a pseudo-filesystem is mounted
    /// at `/proc`, so it shows up as the root or one of its children.
    pub const DEFAULT_MAX_DEPTH: usize = 2;

    /// Exclude `mounts` for directories shallower than `max_depth`.
    #[must_use]
    pub const fn new(mounts: Vec<PathBuf>, max_depth: usize) -> Self {
        Self { mounts, max_depth }
    }

    /// The pseudo-filesystems of the platform this binary was built for:
    /// `/proc` on Linux, nothing elsewhere.
    #[must_use]
    pub fn for_current_platform() -> Self {
        let mounts = if cfg!(target_os = "linux") {
            vec![PathBuf::from("/proc")]
        } else {
            Vec::new()
        };
        Self::new(mounts, Self::DEFAULT_MAX_DEPTH)
    }

    /// The excluded mount points.
    #[must_use]
    pub fn mounts(&self) -> &[PathBuf] {
        &self.mounts
    }
}

impl Default for PseudoFsExclusion {
    fn default() -> Self {
        Self::for_current_platform()
    }
}

impl PathExclusion for PseudoFsExclusion {
    fn is_excluded(&self, path: &Path, depth: usize) -> bool {
        depth < self.max_depth && self.mounts.iter().any(|mount| path.starts_with(mount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc_exclusion() -> PseudoFsExclusion {
        PseudoFsExclusion::new(vec![PathBuf::from("/proc")], 2)
    }

    #[test]
    fn test_excludes_proc_near_root() {
        let exclusion = proc_exclusion();

        assert!(exclusion.is_excluded(Path::new("/proc"), 0));
        assert!(exclusion.is_excluded(Path::new("/proc"), 1));
        assert!(exclusion.is_excluded(Path::new("/proc/self"), 1));
    }

    #[test]
    fn test_depth_limit() {
        let exclusion = proc_exclusion();

        assert!(!exclusion.is_excluded(Path::new("/proc"), 2));
        assert!(!exclusion.is_excluded(Path::new("/chroot/proc"), 1));
    }

    #[test]
    fn test_component_wise_match() {
        let exclusion = proc_exclusion();

        assert!(!exclusion.is_excluded(Path::new("/process"), 1));
        assert!(!exclusion.is_excluded(Path::new("/usr/proc"), 1));
        assert!(!exclusion.is_excluded(Path::new("proc"), 1));
    }

    #[test]
    fn test_platform_default() {
        let exclusion = PseudoFsExclusion::for_current_platform();

        if cfg!(target_os = "linux") {
            assert_eq!(exclusion.mounts(), &[PathBuf::from("/proc")]);
        } else {
            assert!(exclusion.mounts().is_empty());
        }
    }

    #[test]
    fn test_no_exclusion_and_closures() {
        assert!(!NoExclusion.is_excluded(Path::new("/proc"), 0));

        let only_tmp = |path: &Path, _depth: usize| path.ends_with("tmp");
        assert!(only_tmp.is_excluded(Path::new("/var/tmp"), 5));
        assert!(!only_tmp.is_excluded(Path::new("/var/log"), 5));
    }
}
