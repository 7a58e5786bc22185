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

//! Remote path handling.

use std::path::{Path, PathBuf};

use nskit_core::{Error, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

const PLACEHOLDER_ORIGIN: &str = "http://netstorage.invalid/";

/// Bytes escaped before the path reaches the url parser.
///
/// Unescaped, the parser turns `\` into `/` and strips tabs and newlines.
static PATH_ESCAPE_SET: AsciiSet = CONTROLS
    .add(b'\\')
    .add(b'|')
    .add(b'^')
    .add(b'[')
    .add(b']');

/// Canonicalize a caller supplied remote path.
///
/// The path must start with `/`. It is resolved against a placeholder origin
/// so dot segments collapse and unsafe characters get percent-encoded, and the
/// result is the path plus the query if any. The same value is signed and sent.
pub fn canonicalize_path(path: &str) -> Result<String> {
    if !path.starts_with('/') {
        return Err(Error::path_invalid(format!(
            "invalid netstorage path: {path}"
        )));
    }

    let base = Url::parse(PLACEHOLDER_ORIGIN).map_err(|e| {
        Error::unexpected("placeholder origin must be a valid url").with_source(e)
    })?;
    // Only the path part is escaped, the query is kept as given.
    let (raw_path, rest) = match path.find(|c: char| c == '?' || c == '#') {
        Some(idx) => path.split_at(idx),
        None => (path, ""),
    };
    let escaped = format!("{}{rest}", utf8_percent_encode(raw_path, &PATH_ESCAPE_SET));

    let url = base.join(&escaped).map_err(|e| {
        Error::path_invalid(format!("invalid netstorage path: {path}")).with_source(e)
    })?;
    // `//host/x` would be taken as a network path and escape the origin.
    if url.host_str() != base.host_str() {
        return Err(Error::path_invalid(format!(
            "invalid netstorage path: {path}"
        )));
    }

    let mut canonical = url.path().to_string();
    if let Some(query) = url.query() {
        canonical.push('?');
        canonical.push_str(query);
    }
    Ok(canonical)
}

/// Last segment of a remote path.
pub fn base_name(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}

/// Decide where a download is written.
///
/// - no destination: the remote file name in the current directory
/// - an existing directory: the remote file name inside it
/// - anything else: the destination itself
pub async fn resolve_destination(remote: &str, destination: Option<&Path>) -> PathBuf {
    let name = base_name(remote);

    match destination.filter(|d| !d.as_os_str().is_empty()) {
        None => PathBuf::from(name),
        Some(dest) => match tokio::fs::metadata(dest).await {
            Ok(meta) if meta.is_dir() => dest.join(name),
            _ => dest.to_path_buf(),
        },
    }
}
