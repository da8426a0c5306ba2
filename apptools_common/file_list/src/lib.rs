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

//! Lazily evaluated lists of file paths.
//!
//! A [`FileList`] is either the cached result of a single directory walk
//! filtered by a glob or regex [`PathMatcher`], or a plain wrapper around a
//! caller-managed list of paths.
//!
//! ```no_run
//! use file_list::FileList;
//!
//! let sources = FileList::from_glob_in("**/*.rs", "src").expect("Invalid file list");
//! for path in &sources {
//!     println!("{}", path.display());
//! }
//! ```

pub mod builder;
pub mod error;
pub mod file_list;
pub mod matcher;

pub use builder::FileListBuilder;
pub use error::{FileListError, Result};
pub use file_list::{FileList, ListMode};
pub use matcher::{PathMatcher, Syntax};
