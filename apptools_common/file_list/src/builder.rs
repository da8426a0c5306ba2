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

use std::path::PathBuf;

use app_traits::InstanceBuilder;

use crate::error::{FileListError, Result};
use crate::file_list::FileList;
use crate::matcher::PathMatcher;

/// Step-by-step construction of a [`FileList`].
///
/// At most one of a glob, a regex or an explicit path list may be given; a
/// root directory only makes sense with a pattern. With nothing set the
/// builder produces an empty wrapper.
///
/// ```
/// use app_traits::InstanceBuilder;
/// use file_list::FileListBuilder;
///
/// let builder = FileListBuilder::new().glob("**/*.toml").root(".");
/// assert!(builder.is_valid());
/// let list = builder.build().unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileListBuilder {
    glob: Option<String>,
    regex: Option<String>,
    root: Option<PathBuf>,
    paths: Option<Vec<PathBuf>>,
}

impl FileListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn glob(mut self, pattern: impl Into<String>) -> Self {
        self.glob = Some(pattern.into());
        self
    }

    pub fn regex(mut self, pattern: impl Into<String>) -> Self {
        self.regex = Some(pattern.into());
        self
    }

    pub fn root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.root = Some(dir.into());
        self
    }

    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    fn matcher(&self) -> Result<Option<PathMatcher>> {
        match (&self.glob, &self.regex, &self.paths) {
            (Some(_), Some(_), _) => {
                Err(FileListError::InvalidArgument("glob and regex patterns are mutually exclusive".to_string()))
            }
            (Some(_), _, Some(_)) | (_, Some(_), Some(_)) => {
                Err(FileListError::InvalidArgument("a pattern cannot be combined with explicit paths".to_string()))
            }
            (Some(glob), None, None) => PathMatcher::glob(glob).map(Some),
            (None, Some(regex), None) => PathMatcher::regex(regex).map(Some),
            (None, None, _) => {
                if self.root.is_some() {
                    return Err(FileListError::InvalidArgument("root directory given without a pattern".to_string()));
                }
                Ok(None)
            }
        }
    }
}

impl InstanceBuilder<FileList> for FileListBuilder {
    type Error = FileListError;

    fn is_valid(&self) -> bool {
        match self.matcher() {
            Ok(Some(_)) => self.root.as_ref().map_or(true, |dir| dir.is_dir()),
            Ok(None) => true,
            Err(_) => false,
        }
    }

    fn build(&self) -> Result<FileList> {
        match self.matcher()? {
            Some(matcher) => {
                let root = self.root.clone().unwrap_or_else(|| PathBuf::from("."));
                FileList::with_matcher(matcher, root)
            }
            None => Ok(FileList::from_paths(self.paths.clone().unwrap_or_default())),
        }
    }
}
