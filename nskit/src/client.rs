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

use std::path::Path;

use bytes::Bytes;
use http::header::{ACCEPT_ENCODING, CONTENT_LENGTH, USER_AGENT};
use http::StatusCode;
use log::debug;
use nskit_akamai_netstorage::constants::X_AKAMAI_ACS_ACTION;
use nskit_akamai_netstorage::{
    action_header, Config, ConfigCredentialProvider, Credential, EdgercCredentialProvider,
    RequestSigner, StaticCredentialProvider,
};
use nskit_core::{Context, Error, Result, Signer};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

use crate::operation::{Operation, ResponsePolicy};
use crate::path::{canonicalize_path, resolve_destination};
use crate::response::{Response, DOWNLOAD_DONE};

/// Value of the `User-Agent` header.
pub const CLIENT_ID: &str = concat!("nskit-rust/", env!("CARGO_PKG_VERSION"));

/// Client for one NetStorage upload account.
///
/// A client is cheap to clone and safe to share between tasks: every call
/// builds and signs its own request.
#[derive(Debug, Clone)]
pub struct Client {
    hostname: String,
    ssl: bool,
    signer: Signer<Credential>,
    http: reqwest::Client,
}

impl Client {
    /// Create a client from explicit values.
    ///
    /// Fails with [`nskit_core::ErrorKind::ConfigInvalid`] if `hostname`,
    /// `key_name` or `key` is empty.
    pub fn new(hostname: &str, key_name: &str, key: &str, ssl: bool) -> Result<Self> {
        require("hostname", Some(hostname))?;
        require("key name", Some(key_name))?;
        require("key", Some(key))?;

        Ok(Self {
            hostname: hostname.to_string(),
            ssl,
            signer: Signer::new(
                Context::new(),
                StaticCredentialProvider::new(key_name, key),
                RequestSigner::new(),
            ),
            http: reqwest::Client::new(),
        })
    }

    /// Create a client from a [`Config`], unset fields are read from the environment.
    ///
    /// `ssl` defaults to `true`.
    pub fn from_config(config: Config) -> Result<Self> {
        Self::build(crate::default_context(), config)
    }

    /// Create a client from the process environment, falling back to `~/.edgerc`.
    pub async fn from_env() -> Result<Self> {
        Self::from_context(crate::default_context()).await
    }

    /// Create a client from the environment and edgerc file visible through `ctx`.
    ///
    /// Environment values win over the edgerc section.
    pub async fn from_context(ctx: Context) -> Result<Self> {
        let mut config = Config::new().from_env(&ctx);
        if let Some(file) = EdgercCredentialProvider::new().load_config(&ctx).await? {
            config.hostname = config.hostname.or(file.hostname);
            config.key_name = config.key_name.or(file.key_name);
            config.key = config.key.or(file.key);
            config.ssl = config.ssl.or(file.ssl);
        }

        Self::build(ctx, config)
    }

    fn build(ctx: Context, config: Config) -> Result<Self> {
        let config = config.from_env(&ctx);
        let hostname = require("hostname", config.hostname.as_deref())?.to_string();
        require("key name", config.key_name.as_deref())?;
        require("key", config.key.as_deref())?;
        let ssl = config.ssl.unwrap_or(true);

        Ok(Self {
            hostname,
            ssl,
            signer: Signer::new(
                ctx,
                ConfigCredentialProvider::new(config),
                RequestSigner::new(),
            ),
            http: reqwest::Client::new(),
        })
    }

    /// Replace the request signer, e.g. to pin the clock and nonce.
    pub fn with_request_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = self.signer.with_builder(signer);
        self
    }

    /// Replace the http client, e.g. to set timeouts or a proxy.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    fn scheme(&self) -> &'static str {
        if self.ssl {
            "https"
        } else {
            "http"
        }
    }

    /// List a directory.
    pub async fn dir(&self, path: &str) -> Result<Response> {
        self.execute(Operation::dir(path)).await
    }

    /// Disk usage of a directory.
    pub async fn du(&self, path: &str) -> Result<Response> {
        self.execute(Operation::du(path)).await
    }

    /// Stat an object.
    pub async fn stat(&self, path: &str) -> Result<Response> {
        self.execute(Operation::stat(path)).await
    }

    /// Download `source` into a local file.
    pub async fn download(&self, source: &str, destination: Option<&Path>) -> Result<Response> {
        self.execute(Operation::download(
            source,
            destination.map(Path::to_path_buf),
        ))
        .await
    }

    /// Create a directory.
    pub async fn mkdir(&self, path: &str) -> Result<Response> {
        self.execute(Operation::mkdir(path)).await
    }

    /// Remove an empty directory.
    pub async fn rmdir(&self, path: &str) -> Result<Response> {
        self.execute(Operation::rmdir(path)).await
    }

    /// Set the modification time in unix seconds.
    pub async fn mtime(&self, path: &str, mtime: i64) -> Result<Response> {
        self.execute(Operation::mtime(path, mtime)).await
    }

    /// Delete an object or symlink.
    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.execute(Operation::delete(path)).await
    }

    /// Delete a directory tree.
    pub async fn quick_delete(&self, path: &str) -> Result<Response> {
        self.execute(Operation::quick_delete(path)).await
    }

    /// Rename `target` to `destination`.
    pub async fn rename(&self, target: &str, destination: &str) -> Result<Response> {
        self.execute(Operation::rename(target, destination)).await
    }

    /// Create a symlink at `destination` pointing to `target`.
    pub async fn symlink(&self, target: &str, destination: &str) -> Result<Response> {
        self.execute(Operation::symlink(target, destination)).await
    }

    /// Upload a local file to `destination`.
    pub async fn upload(&self, source: impl AsRef<Path>, destination: &str) -> Result<Response> {
        self.execute(Operation::upload(source.as_ref(), destination))
            .await
    }

    /// Run one operation.
    ///
    /// Local validation happens before anything is signed or sent.
    pub async fn execute(&self, op: Operation) -> Result<Response> {
        let (remote, upload) = match &op {
            Operation::Download { source, .. } if source.ends_with('/') => {
                return Err(Error::path_invalid(format!(
                    "cannot download a directory: {source}"
                )));
            }
            Operation::Upload {
                source,
                destination,
            } => {
                canonicalize_path(destination)?;
                let (remote, len) = upload_target(source, destination).await?;
                (remote, Some((source.clone(), len)))
            }
            _ => (op.remote_path().to_string(), None),
        };
        let path = canonicalize_path(&remote)?;

        let body = match upload {
            Some((source, len)) => {
                let file = File::open(&source).await.map_err(|e| {
                    Error::local_io(format!("failed to open {}", source.display())).with_source(e)
                })?;
                Some((file, len))
            }
            None => None,
        };

        let method = op.method();
        let url = format!("{}://{}{}", self.scheme(), self.hostname, path);
        let mut parts = http::Request::builder()
            .method(method.clone())
            .uri(url.as_str())
            .header(X_AKAMAI_ACS_ACTION, action_header(&op.action()))
            .header(ACCEPT_ENCODING, "identity")
            .header(USER_AGENT, CLIENT_ID)
            .body(())?
            .into_parts()
            .0;
        self.signer.sign(&mut parts).await?;

        let mut req = self.http.request(method.clone(), url.as_str()).headers(parts.headers);
        if let Some((file, len)) = body {
            req = req
                .header(CONTENT_LENGTH, len)
                .body(reqwest::Body::wrap_stream(ReaderStream::new(file)));
        }

        debug!("sending {method} {url}");
        let resp = req.send().await.map_err(|e| {
            Error::network(format!("failed to send {method} {url}")).with_source(e)
        })?;
        let status = resp.status();
        let headers = resp.headers().clone();
        debug!("got {status} for {method} {url}");

        let body = match op.policy() {
            ResponsePolicy::Materialize(destination) if status.is_success() => {
                let dest = resolve_destination(&remote, destination.as_deref()).await;
                debug!("writing {url} to {}", dest.display());
                materialize(resp, &dest, status).await?;
                Bytes::from_static(DOWNLOAD_DONE.as_bytes())
            }
            _ => resp.bytes().await.map_err(|e| {
                Error::network(format!("failed to read body of {url} with status {status}"))
                    .with_source(e)
            })?,
        };

        Ok(Response::new(status, headers, body))
    }
}

fn require<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::config_invalid(format!("{name} must not be empty"))),
    }
}

/// Check the upload source and work out the final remote path.
async fn upload_target(source: &Path, destination: &str) -> Result<(String, u64)> {
    let meta = tokio::fs::metadata(source).await.map_err(|e| {
        Error::local_io(format!("failed to stat {}", source.display())).with_source(e)
    })?;
    if !meta.is_file() {
        return Err(Error::path_invalid(format!(
            "upload source is not a regular file: {}",
            source.display()
        )));
    }

    let mut remote = destination.to_string();
    if remote.ends_with('/') {
        if let Some(name) = source.file_name() {
            remote.push_str(&name.to_string_lossy());
        }
    }
    Ok((remote, meta.len()))
}

/// Stream a download body into `dest`.
///
/// A failure part way leaves the partial file in place.
async fn materialize(mut resp: reqwest::Response, dest: &Path, status: StatusCode) -> Result<()> {
    let mut file = File::create(dest).await.map_err(|e| {
        Error::local_io(format!("failed to create {}", dest.display())).with_source(e)
    })?;

    while let Some(chunk) = resp.chunk().await.map_err(|e| {
        Error::network(format!(
            "failed to read download body with status {status} into {}",
            dest.display()
        ))
        .with_source(e)
    })? {
        file.write_all(&chunk).await.map_err(|e| {
            Error::local_io(format!("failed to write {}", dest.display())).with_source(e)
        })?;
    }

    file.flush().await.map_err(|e| {
        Error::local_io(format!("failed to flush {}", dest.display())).with_source(e)
    })?;
    Ok(())
}
