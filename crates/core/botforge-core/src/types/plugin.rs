//! Plugin (block) types

use super::{Action, OptionsSchema};
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Plugin trait - a block grouping actions that share credentials
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Plugin name (unique identifier)
    fn name(&self) -> &str;

    /// Plugin description
    fn description(&self) -> &str;

    /// Initialize plugin
    async fn init(&self, _config: HashMap<String, String>) -> Result<()> {
        Ok(())
    }

    /// Credentials schema, if the block needs credentials
    fn auth_schema(&self) -> Option<OptionsSchema> {
        None
    }

    /// Options shared by every action of the block
    fn base_options_schema(&self) -> OptionsSchema {
        OptionsSchema::default()
    }

    /// Actions provided by this plugin
    fn actions(&self) -> Vec<Arc<dyn Action>> {
        vec![]
    }

    /// Find an action by name
    fn action(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions().into_iter().find(|a| a.name() == name)
    }
}
