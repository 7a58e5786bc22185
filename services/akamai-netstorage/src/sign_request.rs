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

//! NetStorage request signing.
//!
//! Every request carries three headers:
//!
//! ```text
//! X-Akamai-ACS-Action:    version=1&action=<action token>
//! X-Akamai-ACS-Auth-Data: 5, 0.0.0.0, 0.0.0.0, <unix seconds>, <nonce>, <key name>
//! X-Akamai-ACS-Auth-Sign: base64(hmac_sha256(key, string to sign))
//! ```
//!
//! where the string to sign is
//!
//! ```text
//! <auth data><path>\nx-akamai-acs-action:<action header>\n
//! ```
use std::sync::Arc;

use async_trait::async_trait;
use http::HeaderValue;
use log::debug;
use nskit_core::hash::base64_hmac_sha256;
use nskit_core::time::{Clock, DateTime, FixedClock, SystemClock};
use nskit_core::{Context, Error, Result, SignRequest};

use crate::constants::*;
use crate::credential::Credential;
use crate::nonce::{FixedNonce, NonceSource, RandomNonce};

/// The three header values produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// Value of `X-Akamai-ACS-Action`.
    pub action: String,
    /// Value of `X-Akamai-ACS-Auth-Data`.
    pub auth_data: String,
    /// Value of `X-Akamai-ACS-Auth-Sign`.
    pub auth_sign: String,
}

/// RequestSigner that implements NetStorage authentication.
///
/// The clock and nonce source are collaborators so that tests can pin both
/// and compare exact signatures.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    clock: Arc<dyn Clock>,
    nonce: Arc<dyn NonceSource>,
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSigner {
    /// Create a signer reading the system clock and a random nonce.
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            nonce: Arc::new(RandomNonce),
        }
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(self, time: DateTime) -> Self {
        self.with_clock(FixedClock(time))
    }

    /// Replace the nonce source.
    pub fn with_nonce_source(mut self, nonce: impl NonceSource) -> Self {
        self.nonce = Arc::new(nonce);
        self
    }

    /// Specify the nonce.
    ///
    /// Only use this function for testing, a fixed nonce defeats replay protection.
    pub fn with_nonce(self, nonce: u32) -> Self {
        self.with_nonce_source(FixedNonce(nonce))
    }

    /// Build the authentication headers for `action` on the canonical `path`.
    pub fn build_headers(&self, action: &str, path: &str, cred: &Credential) -> AuthHeaders {
        self.headers_for(action_header(action), path, cred)
    }

    fn headers_for(&self, action: String, path: &str, cred: &Credential) -> AuthHeaders {
        let auth_data = auth_data(self.clock.now(), self.nonce.nonce(), &cred.key_name);
        let auth_sign = sign(&action, path, &auth_data, &cred.key);

        AuthHeaders {
            action,
            auth_data,
            auth_sign,
        }
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;

        let action = req
            .headers
            .get(X_AKAMAI_ACS_ACTION)
            .ok_or_else(|| Error::unexpected("request without x-akamai-acs-action header"))?
            .to_str()?
            .to_string();
        let path = req
            .uri
            .path_and_query()
            .map(|v| v.as_str())
            .unwrap_or("/");

        let headers = self.headers_for(action, path, cred);

        req.headers
            .insert(X_AKAMAI_ACS_AUTH_DATA, headers.auth_data.parse()?);
        req.headers.insert(X_AKAMAI_ACS_AUTH_SIGN, {
            let mut value: HeaderValue = headers.auth_sign.parse()?;
            value.set_sensitive(true);

            value
        });

        Ok(())
    }
}

/// Build the `X-Akamai-ACS-Action` value for an action token.
///
/// The token already carries its own parameters, e.g. `dir&format=xml`.
pub fn action_header(action: &str) -> String {
    format!("version={ACTION_VERSION}&action={action}")
}

/// Build the `X-Akamai-ACS-Auth-Data` value.
///
/// The two address fields are always the placeholder address, the service
/// does not check them.
pub fn auth_data(time: DateTime, nonce: u32, key_name: &str) -> String {
    format!(
        "{AUTH_DATA_VERSION}, {AUTH_DATA_PLACEHOLDER_IP}, {AUTH_DATA_PLACEHOLDER_IP}, {}, {nonce}, {key_name}",
        time.timestamp()
    )
}

/// Compute the `X-Akamai-ACS-Auth-Sign` value.
pub fn sign(action_header: &str, path: &str, auth_data: &str, key: &str) -> String {
    let string_to_sign = string_to_sign(action_header, path, auth_data);
    base64_hmac_sha256(key.as_bytes(), string_to_sign.as_bytes())
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// auth data + path + "\n" +
/// "x-akamai-acs-action:" + action header + "\n"
/// ```
fn string_to_sign(action_header: &str, path: &str, auth_data: &str) -> String {
    let s = format!("{auth_data}{path}\n{X_AKAMAI_ACS_ACTION}:{action_header}\n");

    debug!("string to sign: {}", &s);
    s
}
