/*
 * Copyright (c) Huawei Technologies Co., Ltd. 2025. All rights reserved.
 * Global Trust Authority is licensed under the Mulan PSL v2.
 * You can use this software according to the terms and conditions of the Mulan PSL v2.
 * You may obtain a copy of Mulan PSL v2 at:
 *     http://license.coscl.org.cn/MulanPSL2
 * THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR
 * PURPOSE.
 * See the Mulan PSL v2 for more details.
 */

use std::path::{Path, PathBuf};
use std::slice;

use log::{debug, error, warn};
use once_cell::unsync::OnceCell;
use walkdir::WalkDir;

use crate::error::{FileListError, Result};
use crate::matcher::PathMatcher;

/// How a [`FileList`] obtains its paths. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Paths are the matches of a one-time directory walk
    TreeWalk,
    /// Paths are supplied and extended by the caller
    Wrapper,
}

#[derive(Debug)]
enum Source {
    TreeWalk {
        matcher: PathMatcher,
        root: PathBuf,
        // empty until the first enumeration, then never recomputed
        cache: OnceCell<Vec<PathBuf>>,
    },
    Wrapper {
        paths: Vec<PathBuf>,
    },
}

/// Collection of file paths, either found by walking a directory tree or
/// wrapped from an explicit list.
///
/// In tree-walk mode the walk happens on the first call to
/// [`result_list`](Self::result_list) (or the first iteration) and its result
/// is cached for the lifetime of the value, even if the filesystem changes
/// afterwards. Matches keep the walk's visitation order; sort externally if
/// determinism is needed.
///
/// `FileList` is meant for a single owner. The lazy cache is not
/// synchronized, so the type is `!Sync`; wrap it in a lock to share it.
#[derive(Debug)]
pub struct FileList {
    source: Source,
}

impl FileList {
    /// Files under the current directory whose path matches `glob`.
    pub fn from_glob(glob: &str) -> Result<Self> {
        Self::from_glob_in(glob, ".")
    }

    /// Files under `dir` whose path matches `glob`.
    ///
    /// # Errors
    ///
    /// * `FileListError::InvalidArgument` if the pattern is empty or `dir` is
    ///   not an existing directory
    /// * `FileListError::InvalidPattern` if the glob does not compile
    pub fn from_glob_in(glob: &str, dir: impl AsRef<Path>) -> Result<Self> {
        Self::tree_walk(PathMatcher::glob(glob)?, dir.as_ref())
    }

    /// Files under the current directory whose path matches `regex`.
    pub fn from_regex(regex: &str) -> Result<Self> {
        Self::from_regex_in(regex, ".")
    }

    /// Files under `dir` whose path matches `regex`; see [`PathMatcher`] for
    /// how unanchored patterns are treated.
    pub fn from_regex_in(regex: &str, dir: impl AsRef<Path>) -> Result<Self> {
        Self::tree_walk(PathMatcher::regex(regex)?, dir.as_ref())
    }

    /// Files under `dir` accepted by an already compiled matcher.
    pub fn with_matcher(matcher: PathMatcher, dir: impl AsRef<Path>) -> Result<Self> {
        Self::tree_walk(matcher, dir.as_ref())
    }

    fn tree_walk(matcher: PathMatcher, dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            error!("not a directory: dir = [{}]", dir.display());
            return Err(FileListError::InvalidArgument(format!("not a directory: {}", dir.display())));
        }
        debug!("using {} for file list: dir = [{}]", matcher, dir.display());
        Ok(FileList {
            source: Source::TreeWalk { matcher, root: dir.to_path_buf(), cache: OnceCell::new() },
        })
    }

    /// Wraps an explicit collection of paths.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        FileList { source: Source::Wrapper { paths: paths.into_iter().map(Into::into).collect() } }
    }

    /// Empty wrapper, to be filled with [`add_path`](Self::add_path).
    pub fn empty() -> Self {
        FileList { source: Source::Wrapper { paths: Vec::new() } }
    }

    pub fn mode(&self) -> ListMode {
        match self.source {
            Source::TreeWalk { .. } => ListMode::TreeWalk,
            Source::Wrapper { .. } => ListMode::Wrapper,
        }
    }

    /// Directory walked in tree-walk mode.
    pub fn root(&self) -> Option<&Path> {
        match &self.source {
            Source::TreeWalk { root, .. } => Some(root.as_path()),
            Source::Wrapper { .. } => None,
        }
    }

    pub fn matcher(&self) -> Option<&PathMatcher> {
        match &self.source {
            Source::TreeWalk { matcher, .. } => Some(matcher),
            Source::Wrapper { .. } => None,
        }
    }

    /// Whether the paths are available without walking. Always true for
    /// wrappers.
    pub fn is_computed(&self) -> bool {
        match &self.source {
            Source::TreeWalk { cache, .. } => cache.get().is_some(),
            Source::Wrapper { .. } => true,
        }
    }

    /// Returns the paths of this list.
    ///
    /// Walks the tree on the first call in tree-walk mode; later calls return
    /// the cached result. In wrapper mode this is a read-only view of the
    /// current paths.
    ///
    /// # Errors
    ///
    /// Returns `FileListError::Io` if the walk cannot start, e.g. the root
    /// was removed or cannot be read. Failures on single entries below the
    /// root are logged and skipped. A failed walk is not cached.
    pub fn result_list(&self) -> Result<&[PathBuf]> {
        match &self.source {
            Source::TreeWalk { matcher, root, cache } => {
                cache.get_or_try_init(|| walk(root, matcher)).map(Vec::as_slice)
            }
            Source::Wrapper { paths } => Ok(paths.as_slice()),
        }
    }

    /// Appends `path` to a wrapper list. Duplicates are kept, so this always
    /// returns `true` on success.
    ///
    /// # Errors
    ///
    /// Returns `FileListError::UnsupportedOperation` in tree-walk mode.
    pub fn add_path(&mut self, path: impl Into<PathBuf>) -> Result<bool> {
        match &mut self.source {
            Source::Wrapper { paths } => {
                paths.push(path.into());
                Ok(true)
            }
            Source::TreeWalk { .. } => {
                error!("add_path called on a tree-walk file list");
                Err(FileListError::UnsupportedOperation("paths can only be added to a wrapper file list"))
            }
        }
    }

    /// Iterates over [`result_list`](Self::result_list).
    ///
    /// Iteration cannot report failures, so an error yields an empty sequence
    /// and is logged instead.
    pub fn iter(&self) -> slice::Iter<'_, PathBuf> {
        match self.result_list() {
            Ok(paths) => paths.iter(),
            Err(e) => {
                error!("error occurred when reading file list: {}", e);
                <&[PathBuf]>::default().iter()
            }
        }
    }

    /// Sorted copy of the result list.
    pub fn sorted(&self) -> Result<Vec<PathBuf>> {
        let mut paths = self.result_list()?.to_vec();
        paths.sort();
        Ok(paths)
    }
}

impl Default for FileList {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a FileList {
    type Item = &'a PathBuf;
    type IntoIter = slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for FileList {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::from_paths(iter)
    }
}

/// Pre-order walk of `root` collecting regular files accepted by `matcher`.
/// Directories are always descended into.
fn walk(root: &Path, matcher: &PathMatcher) -> Result<Vec<PathBuf>> {
    debug!("start traversing directory: dir = [{}] ; pattern = [{}]", root.display(), matcher);
    let mut matched = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                error!("failed to start traversal: dir = [{}] ; error = [{}]", root.display(), e);
                return Err(FileListError::Io(e));
            }
            Err(e) => {
                warn!("failed accessing entry, skipped: path = [{:?}] ; error = [{}]", e.path(), e);
                continue;
            }
        };

        if entry.file_type().is_file() && matcher.matches(entry.path()) {
            debug!("matched file: [{}]", entry.path().display());
            matched.push(entry.into_path());
        }
    }

    debug!(
        "traversal done: dir = [{}] ; pattern = [{}] ; found = [{}]",
        root.display(),
        matcher,
        matched.len()
    );
    Ok(matched)
}
