//! Filesystem allocation block size.
//!
//! Files occupy whole blocks on disk, so a file's reported size is its byte
//! length rounded up to a multiple of the block size. The block size is looked
//! up once per scan through a [`BlockSizeProvider`] and then passed down the
//! whole traversal unchanged.

use std::{fmt, num::NonZeroU64, path::Path};

use tracing::debug;

/// A non-zero filesystem block size in bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct BlockSize(NonZeroU64);

impl BlockSize {
    /// Block size used whenever the real one cannot be determined.
    pub const DEFAULT: Self = Self(NonZeroU64::new(4096).unwrap());

    /// Create a block size, returning `None` for zero.
    #[must_use]
    pub const fn new(bytes: u64) -> Option<Self> {
        match NonZeroU64::new(bytes) {
            Some(bytes) => Some(Self(bytes)),
            None => None,
        }
    }

    /// The block size in bytes.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// Round a byte length up to the space it occupies in whole blocks.
    ///
    /// An empty file occupies zero blocks. Lengths so large that the rounded
    /// value would overflow saturate at `u64::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use scandisk::BlockSize;
    /// let bs = BlockSize::DEFAULT;
    /// assert_eq!(bs.round_up(0), 0);
    /// assert_eq!(bs.round_up(1), 4096);
    /// assert_eq!(bs.round_up(4097), 8192);
    /// ```
    #[must_use]
    pub const fn round_up(self, len: u64) -> u64 {
        let bs = self.0.get();
        len.div_ceil(bs).saturating_mul(bs)
    }
}

impl Default for BlockSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for BlockSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of the block size for the filesystem holding a path.
pub trait BlockSizeProvider {
    /// Block size of the filesystem that contains `path`.
    ///
    /// Implementations never fail; they fall back to [`BlockSize::DEFAULT`].
    fn block_size_of(&self, path: &Path) -> BlockSize;
}

/// Always reports the same block size, regardless of the path.
///
/// Used for the `--block-size` override and in tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedBlockSize(pub BlockSize);

impl BlockSizeProvider for FixedBlockSize {
    fn block_size_of(&self, _path: &Path) -> BlockSize {
        self.0
    }
}

/// Asks the operating system for the block size.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemBlockSize;

impl BlockSizeProvider for SystemBlockSize {
    fn block_size_of(&self, path: &Path) -> BlockSize {
        match query_block_size(path).and_then(BlockSize::new) {
            Some(block_size) => block_size,
            None => {
                debug!(
                    path = %path.display(),
                    "block size query failed, using {}",
                    BlockSize::DEFAULT
                );
                BlockSize::DEFAULT
            }
        }
    }
}

#[cfg(unix)]
fn query_block_size(path: &Path) -> Option<u64> {
    let stat = nix::sys::statvfs::statvfs(path).ok()?;

    #[allow(clippy::useless_conversion)]
    u64::try_from(stat.block_size()).ok()
}

#[cfg(windows)]
fn query_block_size(path: &Path) -> Option<u64> {
    use std::path::PathBuf;

    use windows::{
        Win32::Storage::FileSystem::GetDiskFreeSpaceW,
        core::{HSTRING, PCWSTR},
    };

    // GetDiskFreeSpaceW wants the volume root (`C:\`), not an arbitrary directory.
    let root: PathBuf = path
        .components()
        .take_while(|c| {
            matches!(
                c,
                std::path::Component::Prefix(_) | std::path::Component::RootDir
            )
        })
        .collect();
    if root.as_os_str().is_empty() {
        return None;
    }

    let mut sectors_per_cluster = 0_u32;
    let mut bytes_per_sector = 0_u32;
    let root = HSTRING::from(root.as_path());

    // SAFETY: the out pointers reference live stack locals for the duration of the call.
    unsafe {
        GetDiskFreeSpaceW(
            PCWSTR(root.as_ptr()),
            Some(&raw mut sectors_per_cluster),
            Some(&raw mut bytes_per_sector),
            None,
            None,
        )
        .ok()?;
    }

    Some(u64::from(sectors_per_cluster) * u64::from(bytes_per_sector))
}

#[cfg(not(any(unix, windows)))]
const fn query_block_size(_path: &Path) -> Option<u64> {
    None
}
