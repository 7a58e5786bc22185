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

//! Client for the Akamai NetStorage HTTP API.
//!
//! Every call is turned into one signed request. Listings and other text
//! answers are returned verbatim, downloads are streamed into a local file
//! and uploads are streamed from one.
//!
//! ```no_run
//! use nskit::Client;
//!
//! # async fn example() -> nskit::Result<()> {
//! let client = Client::new("example-nsu.akamaihd.net", "key-name", "key", true)?;
//!
//! let resp = client.dir("/123456").await?;
//! println!("{}: {}", resp.status(), resp.text());
//!
//! client.upload("hello.txt", "/123456/test/").await?;
//! client.download("/123456/test/hello.txt", None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The signing parts are available under [`netstorage`], the building blocks
//! shared with them are re-exported at the crate root.

pub use nskit_core::*;

/// NetStorage signing: credentials, providers and the request signer.
pub mod netstorage {
    pub use nskit_akamai_netstorage::*;
}

mod client;
pub use client::{Client, CLIENT_ID};

mod operation;
pub use operation::{Operation, ResponsePolicy};

mod path;
pub use path::{base_name, canonicalize_path, resolve_destination};

mod response;
pub use response::{Response, DOWNLOAD_DONE};

/// Context reading files with tokio and the process environment.
pub fn default_context() -> Context {
    Context::new()
        .with_file_read(nskit_file_read_tokio::TokioFileRead)
        .with_env(OsEnv)
}
