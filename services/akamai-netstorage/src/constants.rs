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

// Env values used by netstorage credential providers.
pub const NETSTORAGE_HOSTNAME: &str = "NETSTORAGE_HOSTNAME";
pub const NETSTORAGE_KEYNAME: &str = "NETSTORAGE_KEYNAME";
pub const NETSTORAGE_KEY: &str = "NETSTORAGE_KEY";
pub const NETSTORAGE_SSL: &str = "NETSTORAGE_SSL";
pub const NETSTORAGE_CONFIG_FILE: &str = "NETSTORAGE_CONFIG_FILE";
pub const NETSTORAGE_SECTION: &str = "NETSTORAGE_SECTION";

// Default location of the edgerc credentials file.
pub const DEFAULT_EDGERC_PATH: &str = "~/.edgerc";
pub const DEFAULT_EDGERC_SECTION: &str = "default";

// Headers used in netstorage signing.
pub const X_AKAMAI_ACS_ACTION: &str = "x-akamai-acs-action";
pub const X_AKAMAI_ACS_AUTH_DATA: &str = "x-akamai-acs-auth-data";
pub const X_AKAMAI_ACS_AUTH_SIGN: &str = "x-akamai-acs-auth-sign";

// Fields of the auth data header.
pub const AUTH_DATA_VERSION: u32 = 5;
pub const AUTH_DATA_PLACEHOLDER_IP: &str = "0.0.0.0";
pub const ACTION_VERSION: u32 = 1;

/// Largest nonce value, inclusive.
pub const NONCE_MAX: u32 = 99_999;
