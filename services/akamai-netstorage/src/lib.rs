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

//! Akamai NetStorage request signing.
//!
//! ```no_run
//! use nskit_akamai_netstorage::{DefaultCredentialProvider, RequestSigner};
//! use nskit_akamai_netstorage::constants::X_AKAMAI_ACS_ACTION;
//! use nskit_core::{Context, OsEnv, Signer};
//!
//! # async fn example() -> nskit_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());
//!
//! let mut parts = http::Request::get("https://example-nsu.akamaihd.net/123456/dir")
//!     .header(X_AKAMAI_ACS_ACTION, "version=1&action=dir&format=xml")
//!     .body(())?
//!     .into_parts()
//!     .0;
//! signer.sign(&mut parts).await?;
//! # Ok(())
//! # }
//! ```

pub mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod nonce;
pub use nonce::{FixedNonce, NonceSource, RandomNonce};

mod sign_request;
pub use sign_request::{action_header, auth_data, sign, AuthHeaders, RequestSigner};

mod provide_credential;
pub use provide_credential::*;
