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

use nskit_core::{utils::Redact, SigningCredential};

/// Credential for netstorage.
///
/// Both values come from the "Upload Accounts" page of the control center.
#[derive(Clone, Default)]
pub struct Credential {
    /// Upload account key name, sent in clear inside the auth data header.
    pub key_name: String,
    /// Upload account key, used only as the HMAC key.
    pub key: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(key_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            key: key.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("key_name", &self.key_name)
            .field("key", &Redact::from(&self.key))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.key_name.is_empty() && !self.key.is_empty()
    }
}
