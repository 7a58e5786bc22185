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
use nskit_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

use crate::provide_credential::{EdgercCredentialProvider, EnvCredentialProvider};
use crate::Credential;

/// DefaultCredentialProvider tries the environment first, then the edgerc file.
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new `DefaultCredentialProvider` instance.
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new()
            .push(EnvCredentialProvider::new())
            .push(EdgercCredentialProvider::new());

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Add a credential provider to the front of the default chain.
    pub fn push_front(
        mut self,
        provider: impl ProvideCredential<Credential = Credential> + 'static,
    ) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::provide_credential::StaticCredentialProvider;
    use nskit_core::StaticEnv;
    use nskit_file_read_tokio::TokioFileRead;
    use std::collections::HashMap;

    fn ctx(home: &std::path::Path, envs: HashMap<String, String>) -> Context {
        Context::new().with_file_read(TokioFileRead).with_env(StaticEnv {
            home_dir: Some(home.to_path_buf()),
            envs,
        })
    }

    #[tokio::test]
    async fn test_without_any_source() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let home = tempfile::tempdir()?;
        let x = DefaultCredentialProvider::new()
            .provide_credential(&ctx(home.path(), HashMap::new()))
            .await?;
        assert!(x.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_env_wins_over_edgerc() -> anyhow::Result<()> {
        let home = tempfile::tempdir()?;
        std::fs::write(
            home.path().join(".edgerc"),
            "[default]\nid = from-file\nkey = file-key\n",
        )?;
        let envs = HashMap::from([
            (NETSTORAGE_KEYNAME.to_string(), "from-env".to_string()),
            (NETSTORAGE_KEY.to_string(), "env-key".to_string()),
        ]);

        let x = DefaultCredentialProvider::new()
            .provide_credential(&ctx(home.path(), envs))
            .await?
            .expect("credential must be loaded");
        assert_eq!(x.key_name, "from-env");
        Ok(())
    }

    #[tokio::test]
    async fn test_falls_back_to_edgerc() -> anyhow::Result<()> {
        let home = tempfile::tempdir()?;
        std::fs::write(
            home.path().join(".edgerc"),
            "[default]\nid = from-file\nkey = file-key\n",
        )?;

        let x = DefaultCredentialProvider::new()
            .provide_credential(&ctx(home.path(), HashMap::new()))
            .await?
            .expect("credential must be loaded");
        assert_eq!(x.key_name, "from-file");
        assert_eq!(x.key, "file-key");
        Ok(())
    }

    #[tokio::test]
    async fn test_push_front() -> anyhow::Result<()> {
        let home = tempfile::tempdir()?;

        let x = DefaultCredentialProvider::new()
            .push_front(StaticCredentialProvider::new("static", "static-key"))
            .provide_credential(&ctx(home.path(), HashMap::new()))
            .await?
            .expect("credential must be loaded");
        assert_eq!(x.key_name, "static");
        Ok(())
    }
}
