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

use async_trait::async_trait;
use ini::Ini;
use log::debug;
use nskit_core::{Context, Error, ProvideCredential, Result};

use crate::constants::*;
use crate::{Config, Credential};

/// EdgercCredentialProvider loads the upload account from an `.edgerc` style INI file.
///
/// ```ini
/// [default]
/// host = example-nsu.akamaihd.net
/// id = nskit-test
/// key = abcdefghij0123456789
/// ```
///
/// The file is `~/.edgerc` unless [`NETSTORAGE_CONFIG_FILE`] or
/// [`EdgercCredentialProvider::with_config_file`] says otherwise. The section
/// follows the same rule with [`NETSTORAGE_SECTION`].
#[derive(Debug, Clone, Default)]
pub struct EdgercCredentialProvider {
    config_file: Option<String>,
    section: Option<String>,
}

impl EdgercCredentialProvider {
    /// Create a new EdgercCredentialProvider with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path to the config file.
    pub fn with_config_file(mut self, path: impl Into<String>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Set the section to read.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Load the whole section as a [`Config`].
    ///
    /// Returns `Ok(None)` if the file or the section does not exist.
    pub async fn load_config(&self, ctx: &Context) -> Result<Option<Config>> {
        let path = self
            .config_file
            .clone()
            .or_else(|| ctx.env_var(NETSTORAGE_CONFIG_FILE))
            .unwrap_or_else(|| DEFAULT_EDGERC_PATH.to_string());
        let section = self
            .section
            .clone()
            .or_else(|| ctx.env_var(NETSTORAGE_SECTION))
            .unwrap_or_else(|| DEFAULT_EDGERC_SECTION.to_string());

        let expanded_path = if path.starts_with('~') {
            match ctx.expand_home_dir(&path) {
                Some(expanded) => expanded,
                None => {
                    debug!("failed to expand homedir for path: {path}");
                    return Ok(None);
                }
            }
        } else {
            path
        };

        let content = match ctx.file_read_as_string(&expanded_path).await {
            Ok(content) => content,
            Err(err) => {
                debug!("failed to read edgerc file {expanded_path}: {err}");
                return Ok(None);
            }
        };

        let conf = Ini::load_from_str(&content).map_err(|e| {
            Error::config_invalid(format!("failed to parse edgerc file {expanded_path}"))
                .with_source(anyhow::Error::new(e))
        })?;

        let Some(props) = conf.section(Some(section.as_str())) else {
            debug!("section {section} not found in edgerc file {expanded_path}");
            return Ok(None);
        };

        let mut config = Config::new();
        config.hostname = props.get("host").map(|v| v.to_string());
        config.key_name = props.get("id").map(|v| v.to_string());
        config.key = props.get("key").map(|v| v.to_string());
        config.ssl = props
            .get("ssl")
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "on"));

        Ok(Some(config))
    }
}

#[async_trait]
impl ProvideCredential for EdgercCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(config) = self.load_config(ctx).await? else {
            return Ok(None);
        };

        match (config.key_name, config.key) {
            (Some(name), Some(key)) => Ok(Some(Credential::new(name, key))),
            _ => Ok(None),
        }
    }
}
