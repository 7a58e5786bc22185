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

use std::fmt::Debug;

use rand::Rng;

use crate::constants::NONCE_MAX;

/// NonceSource provides the freshness value placed in the auth data header.
pub trait NonceSource: Debug + Send + Sync + 'static {
    /// Returns a value in `0..=99999`.
    fn nonce(&self) -> u32;
}

/// RandomNonce draws a new value from the thread local rng on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn nonce(&self) -> u32 {
        rand::thread_rng().gen_range(0..=NONCE_MAX)
    }
}

/// FixedNonce always returns the same value.
///
/// Only useful for tests that need reproducible signatures.
#[derive(Debug, Clone, Copy)]
pub struct FixedNonce(pub u32);

impl NonceSource for FixedNonce {
    fn nonce(&self) -> u32 {
        self.0
    }
}
