// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::path::PathBuf;

use http::Method;

/// Token used by recursive delete to confirm the intent.
const QUICK_DELETE_CONFIRMATION: &str = "imreallyreallysure";

/// One storage call.
///
/// Each variant carries exactly the inputs its action needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// List a directory, the body is the service's XML listing.
    Dir {
        /// Remote directory.
        path: String,
    },
    /// Disk usage of a directory.
    Du {
        /// Remote directory.
        path: String,
    },
    /// Stat an object.
    Stat {
        /// Remote object.
        path: String,
    },
    /// Download a remote file into a local file.
    Download {
        /// Remote file, must not end with `/`.
        source: String,
        /// Local destination, see [`crate::resolve_destination`].
        destination: Option<PathBuf>,
    },
    /// Create a directory.
    Mkdir {
        /// Remote directory.
        path: String,
    },
    /// Remove an empty directory.
    Rmdir {
        /// Remote directory.
        path: String,
    },
    /// Change the modification time of an object.
    Mtime {
        /// Remote object.
        path: String,
        /// New mtime in unix seconds.
        mtime: i64,
    },
    /// Delete one object or symlink.
    Delete {
        /// Remote object.
        path: String,
    },
    /// Delete a directory tree, needs the privilege on the upload account.
    QuickDelete {
        /// Remote directory.
        path: String,
    },
    /// Rename `target` to `destination`.
    Rename {
        /// Existing remote object.
        target: String,
        /// New remote path.
        destination: String,
    },
    /// Create a symlink at `destination` pointing to `target`.
    Symlink {
        /// Object the link points to.
        target: String,
        /// Path of the link.
        destination: String,
    },
    /// Upload a local regular file.
    Upload {
        /// Local file.
        source: PathBuf,
        /// Remote path, a trailing `/` gets the source file name appended.
        destination: String,
    },
}

/// How the response body is handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePolicy {
    /// Read the whole body as text.
    Text,
    /// Stream a successful body into a local file.
    Materialize(Option<PathBuf>),
}

impl Operation {
    /// List directory.
    pub fn dir(path: impl Into<String>) -> Self {
        Self::Dir { path: path.into() }
    }

    /// Disk usage.
    pub fn du(path: impl Into<String>) -> Self {
        Self::Du { path: path.into() }
    }

    /// Stat object.
    pub fn stat(path: impl Into<String>) -> Self {
        Self::Stat { path: path.into() }
    }

    /// Download `source` to `destination`.
    pub fn download(source: impl Into<String>, destination: Option<PathBuf>) -> Self {
        Self::Download {
            source: source.into(),
            destination,
        }
    }

    /// Make directory.
    pub fn mkdir(path: impl Into<String>) -> Self {
        Self::Mkdir { path: path.into() }
    }

    /// Remove directory.
    pub fn rmdir(path: impl Into<String>) -> Self {
        Self::Rmdir { path: path.into() }
    }

    /// Set mtime.
    pub fn mtime(path: impl Into<String>, mtime: i64) -> Self {
        Self::Mtime {
            path: path.into(),
            mtime,
        }
    }

    /// Delete object.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::Delete { path: path.into() }
    }

    /// Recursive delete.
    pub fn quick_delete(path: impl Into<String>) -> Self {
        Self::QuickDelete { path: path.into() }
    }

    /// Rename object.
    pub fn rename(target: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::Rename {
            target: target.into(),
            destination: destination.into(),
        }
    }

    /// Create symlink.
    pub fn symlink(target: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::Symlink {
            target: target.into(),
            destination: destination.into(),
        }
    }

    /// Upload local file.
    pub fn upload(source: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        Self::Upload {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// HTTP method of this operation.
    pub fn method(&self) -> Method {
        match self {
            Self::Dir { .. } | Self::Du { .. } | Self::Stat { .. } | Self::Download { .. } => {
                Method::GET
            }
            Self::Upload { .. } => Method::PUT,
            Self::Mkdir { .. }
            | Self::Rmdir { .. }
            | Self::Mtime { .. }
            | Self::Delete { .. }
            | Self::QuickDelete { .. }
            | Self::Rename { .. }
            | Self::Symlink { .. } => Method::POST,
        }
    }

    /// Action token, including the action specific parameters.
    pub fn action(&self) -> String {
        match self {
            Self::Dir { .. } => "dir&format=xml".to_string(),
            Self::Du { .. } => "du&format=xml".to_string(),
            Self::Stat { .. } => "stat&format=xml".to_string(),
            Self::Download { .. } => "download".to_string(),
            Self::Mkdir { .. } => "mkdir".to_string(),
            Self::Rmdir { .. } => "rmdir".to_string(),
            Self::Mtime { mtime, .. } => format!("mtime&format=xml&mtime={mtime}"),
            Self::Delete { .. } => "delete".to_string(),
            Self::QuickDelete { .. } => {
                format!("quick-delete&quick-delete={QUICK_DELETE_CONFIRMATION}")
            }
            Self::Rename { destination, .. } => {
                format!("rename&destination={}", query_escape(destination))
            }
            Self::Symlink { target, .. } => format!("symlink&target={}", query_escape(target)),
            Self::Upload { .. } => "upload".to_string(),
        }
    }

    /// Remote path the request is sent to, before canonicalization.
    ///
    /// Rename acts on its target and symlink on the link path.
    pub fn remote_path(&self) -> &str {
        match self {
            Self::Dir { path }
            | Self::Du { path }
            | Self::Stat { path }
            | Self::Mkdir { path }
            | Self::Rmdir { path }
            | Self::Mtime { path, .. }
            | Self::Delete { path }
            | Self::QuickDelete { path } => path,
            Self::Download { source, .. } => source,
            Self::Rename { target, .. } => target,
            Self::Symlink { destination, .. } | Self::Upload { destination, .. } => destination,
        }
    }

    /// Response policy selected by this operation.
    pub fn policy(&self) -> ResponsePolicy {
        match self {
            Self::Download { destination, .. } => ResponsePolicy::Materialize(destination.clone()),
            _ => ResponsePolicy::Text,
        }
    }
}

fn query_escape(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(Operation::dir("/1/d"), Method::GET, "dir&format=xml", "/1/d"; "dir")]
    #[test_case(Operation::du("/1/d"), Method::GET, "du&format=xml", "/1/d"; "du")]
    #[test_case(Operation::stat("/1/f"), Method::GET, "stat&format=xml", "/1/f"; "stat")]
    #[test_case(Operation::download("/1/f", None), Method::GET, "download", "/1/f"; "download")]
    #[test_case(Operation::mkdir("/1/d"), Method::POST, "mkdir", "/1/d"; "mkdir")]
    #[test_case(Operation::rmdir("/1/d"), Method::POST, "rmdir", "/1/d"; "rmdir")]
    #[test_case(Operation::mtime("/1/f", 1700000000), Method::POST, "mtime&format=xml&mtime=1700000000", "/1/f"; "mtime")]
    #[test_case(Operation::delete("/1/f"), Method::POST, "delete", "/1/f"; "delete")]
    #[test_case(Operation::quick_delete("/1/d"), Method::POST, "quick-delete&quick-delete=imreallyreallysure", "/1/d"; "quick delete")]
    #[test_case(Operation::rename("/1/a", "/1/b c"), Method::POST, "rename&destination=%2F1%2Fb+c", "/1/a"; "rename")]
    #[test_case(Operation::symlink("/1/target", "/1/link"), Method::POST, "symlink&target=%2F1%2Ftarget", "/1/link"; "symlink")]
    #[test_case(Operation::upload("local.txt", "/1/f"), Method::PUT, "upload", "/1/f"; "upload")]
    fn test_operation_table(op: Operation, method: Method, action: &str, path: &str) {
        assert_eq!(op.method(), method);
        assert_eq!(op.action(), action);
        assert_eq!(op.remote_path(), path);
    }

    #[test]
    fn test_policy() {
        assert_eq!(Operation::dir("/1/d").policy(), ResponsePolicy::Text);
        assert_eq!(Operation::upload("a", "/1/a").policy(), ResponsePolicy::Text);
        assert_eq!(
            Operation::download("/1/f", Some(PathBuf::from("out"))).policy(),
            ResponsePolicy::Materialize(Some(PathBuf::from("out")))
        );
    }
}
