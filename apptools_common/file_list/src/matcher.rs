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

use std::fmt;
use std::path::Path;

use globset::{Glob, GlobMatcher};
use log::debug;
use regex::Regex;

use crate::error::{FileListError, Result};

/// Pattern syntax of a [`PathMatcher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Glob,
    Regex,
}

/// Predicate over full file paths, compiled from glob or regex syntax.
///
/// Glob patterns use `globset` defaults, where `*` also matches `/`, so
/// `*.log` and `**/*.log` both select every `.log` file. Regex patterns use
/// `regex` search semantics against the full path string, not a full match:
/// an anchored pattern only has to match where it is anchored, so
/// `^/srv/data` selects every file below `/srv/data`. A regex that neither
/// starts with `^` nor ends with `$` is taken as a file-name fragment and
/// rewritten to `.*<pattern>$`, so it has to match the end of the path.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    pattern: String,
    kind: MatcherKind,
}

#[derive(Debug, Clone)]
enum MatcherKind {
    Glob(GlobMatcher),
    Regex(Regex),
}

impl PathMatcher {
    pub fn glob(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(FileListError::InvalidArgument("glob pattern is empty".to_string()));
        }
        debug!("using glob-pattern for path matcher: glob = [{}]", pattern);
        let glob = Glob::new(pattern).map_err(|e| FileListError::InvalidPattern(e.to_string()))?;
        Ok(PathMatcher { pattern: pattern.to_string(), kind: MatcherKind::Glob(glob.compile_matcher()) })
    }

    pub fn regex(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(FileListError::InvalidArgument("regex pattern is empty".to_string()));
        }
        debug!("using regex-pattern for path matcher: regex = [{}]", pattern);
        let full = normalize_regex(pattern);
        let regex = Regex::new(&full).map_err(|e| FileListError::InvalidPattern(e.to_string()))?;
        Ok(PathMatcher { pattern: pattern.to_string(), kind: MatcherKind::Regex(regex) })
    }

    pub fn syntax(&self) -> Syntax {
        match self.kind {
            MatcherKind::Glob(_) => Syntax::Glob,
            MatcherKind::Regex(_) => Syntax::Regex,
        }
    }

    /// The pattern as supplied, before any rewriting.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, path: &Path) -> bool {
        match &self.kind {
            MatcherKind::Glob(glob) => glob.is_match(path),
            MatcherKind::Regex(regex) => regex.is_match(&path.to_string_lossy()),
        }
    }
}

impl fmt::Display for PathMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.syntax() {
            Syntax::Glob => write!(f, "glob:{}", self.pattern),
            Syntax::Regex => write!(f, "regex:{}", self.pattern),
        }
    }
}

fn normalize_regex(pattern: &str) -> String {
    if !pattern.starts_with('^') && !pattern.ends_with('$') {
        // file-name fragment, match it against the end of the full path
        format!(".*{}$", pattern)
    } else {
        pattern.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_regex() {
        assert_eq!(normalize_regex(r"\.txt"), r".*\.txt$");
        assert_eq!(normalize_regex(r"\.txt$"), r"\.txt$");
        assert_eq!(normalize_regex(r"^/tmp/.*"), r"^/tmp/.*");
        assert_eq!(normalize_regex(r"^/tmp/a\.txt$"), r"^/tmp/a\.txt$");
    }

    #[test]
    fn test_glob_matches_full_path() {
        let matcher = PathMatcher::glob("**/*.txt").unwrap();
        assert!(matcher.matches(Path::new("/tmp/x/a.txt")));
        assert!(matcher.matches(Path::new("/tmp/x/sub/c.txt")));
        assert!(!matcher.matches(Path::new("/tmp/x/b.log")));
    }

    #[test]
    fn test_glob_star_crosses_separators() {
        let matcher = PathMatcher::glob("*.log").unwrap();
        assert!(matcher.matches(Path::new("/var/log/app/b.log")));
        assert!(!matcher.matches(Path::new("/var/log/app/b.log.1")));
    }

    #[test]
    fn test_glob_classes_and_alternatives() {
        let matcher = PathMatcher::glob("**/report-[0-9].{csv,txt}").unwrap();
        assert!(matcher.matches(Path::new("out/report-3.csv")));
        assert!(matcher.matches(Path::new("out/report-7.txt")));
        assert!(!matcher.matches(Path::new("out/report-x.csv")));
    }

    #[test]
    fn test_regex_fragment_matches_path_suffix() {
        let matcher = PathMatcher::regex(r"b\.log").unwrap();
        assert!(matcher.matches(Path::new("/tmp/x/b.log")));
        assert!(matcher.matches(Path::new("/tmp/x/sub/b.log")));
        assert!(!matcher.matches(Path::new("/tmp/x/b.log.bak")));
    }

    #[test]
    fn test_anchored_regex_used_as_given() {
        let matcher = PathMatcher::regex(r"^/tmp/x/[ab]\.").unwrap();
        assert!(matcher.matches(Path::new("/tmp/x/a.txt")));
        assert!(matcher.matches(Path::new("/tmp/x/b.log")));
        assert!(!matcher.matches(Path::new("/srv/tmp/x/a.txt")));
    }

    #[test]
    fn test_prefix_anchored_regex_selects_subtree() {
        let matcher = PathMatcher::regex(r"^/srv/data").unwrap();
        assert!(matcher.matches(Path::new("/srv/data/a.txt")));
        assert!(matcher.matches(Path::new("/srv/data/deep/b.bin")));
        assert!(!matcher.matches(Path::new("/srv/other/a.txt")));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(PathMatcher::glob("a[b"), Err(FileListError::InvalidPattern(_))));
        assert!(matches!(PathMatcher::regex("(unclosed"), Err(FileListError::InvalidPattern(_))));
        assert!(matches!(PathMatcher::glob(""), Err(FileListError::InvalidArgument(_))));
        assert!(matches!(PathMatcher::regex(""), Err(FileListError::InvalidArgument(_))));
    }

    #[test]
    fn test_display_and_syntax() {
        let matcher = PathMatcher::regex(r"\.rs$").unwrap();
        assert_eq!(matcher.syntax(), Syntax::Regex);
        assert_eq!(matcher.pattern(), r"\.rs$");
        assert_eq!(matcher.to_string(), r"regex:\.rs$");
        assert_eq!(PathMatcher::glob("*.rs").unwrap().to_string(), "glob:*.rs");
    }
}
