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

use std::fmt::{Debug, Formatter};

use crate::constants::*;
use nskit_core::{utils::Redact, Context};

/// Config carries all the configuration for a netstorage upload account.
#[derive(Clone, Default)]
pub struct Config {
    /// `hostname` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NETSTORAGE_HOSTNAME`]
    ///
    /// It usually looks like `example-nsu.akamaihd.net`.
    pub hostname: Option<String>,
    /// `key_name` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NETSTORAGE_KEYNAME`]
    pub key_name: Option<String>,
    /// `key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NETSTORAGE_KEY`]
    pub key: Option<String>,
    /// `ssl` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NETSTORAGE_SSL`], `true`/`1`/`on` enable https
    pub ssl: Option<bool>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set hostname
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Set key_name
    pub fn with_key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = Some(key_name.into());
        self
    }

    /// Set key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set ssl
    pub fn with_ssl(mut self, ssl: bool) -> Self {
        self.ssl = Some(ssl);
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(NETSTORAGE_HOSTNAME) {
            self.hostname.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(NETSTORAGE_KEYNAME) {
            self.key_name.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(NETSTORAGE_KEY) {
            self.key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(NETSTORAGE_SSL) {
            self.ssl
                .get_or_insert(matches!(v.to_lowercase().as_str(), "true" | "1" | "on"));
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("hostname", &self.hostname)
            .field("key_name", &self.key_name)
            .field("key", &self.key.as_ref().map(Redact::from))
            .field("ssl", &self.ssl)
            .finish()
    }
}
