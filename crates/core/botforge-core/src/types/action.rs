//! Action contract between the host and a block

use super::{
    parse_error, ActionLogs, FetcherDefinition, FetcherResult, FileUploader, OptionsSchema,
    VariableStore,
};
use crate::BotforgeError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Host collaborators available while an action runs
#[derive(Clone, Copy)]
pub struct HostContext<'a> {
    /// Session variable store
    pub variables: &'a dyn VariableStore,
    /// Log collector for this invocation
    pub logs: &'a ActionLogs,
    /// Object storage uploader
    pub uploader: &'a dyn FileUploader,
}

/// Everything an action receives for one run, as sent by the host
pub struct RunContext<'a> {
    /// Block credentials, as stored by the host
    pub credentials: serde_json::Value,
    /// Option values, as edited in the form
    pub options: serde_json::Value,
    /// Host collaborators
    pub host: HostContext<'a>,
}

/// Input of a fetcher invocation, as sent by the host
#[derive(Debug, Clone, Default)]
pub struct FetchContext {
    /// Block credentials, if the user selected some
    pub credentials: Option<serde_json::Value>,
    /// Current option values
    pub options: Option<serde_json::Value>,
}

/// Action trait - a user-configurable unit of behavior
#[async_trait]
pub trait Action: Send + Sync {
    /// Display name (unique within a block)
    fn name(&self) -> &str;

    /// Option schema for the form renderer
    fn options_schema(&self) -> OptionsSchema;

    /// Fetchers this action declares
    fn fetchers(&self) -> Vec<FetcherDefinition> {
        vec![]
    }

    /// Ids of the variables this action writes, given its options
    fn set_variable_ids(&self, _options: &serde_json::Value) -> Vec<String> {
        vec![]
    }

    /// Run a fetcher by id
    async fn fetch(&self, fetcher_id: &str, _ctx: FetchContext) -> FetcherResult {
        FetcherResult::unknown_fetcher(fetcher_id, self.name())
    }

    /// Execute the action. Failures are reported through `ctx.host.logs`.
    async fn run(&self, ctx: RunContext<'_>);
}

/// Helper trait for actions with typed credentials and options.
/// Wrap in [`TypedActionWrapper`] to expose it as an [`Action`].
#[async_trait]
pub trait TypedAction: Send + Sync {
    /// Credentials record
    type Credentials: DeserializeOwned + Send + Sync;
    /// Options record
    type Options: DeserializeOwned + Send + Sync;
    /// Subset of the options that fetchers read. Fields outside it are
    /// ignored, so a stale value elsewhere in the form cannot break a dropdown.
    type FetchOptions: DeserializeOwned + Send + Sync;

    /// Display name
    fn name(&self) -> &str;

    /// Option schema, kept in sync with `Options`
    fn options_schema(&self) -> OptionsSchema;

    /// Fetchers this action declares
    fn fetchers(&self) -> Vec<FetcherDefinition> {
        vec![]
    }

    /// Ids of the variables this action writes
    fn set_variable_ids(&self, _options: &Self::Options) -> Vec<String> {
        vec![]
    }

    /// Run a fetcher with parsed inputs. Only ids listed by `fetchers()` reach it.
    async fn fetch(
        &self,
        fetcher_id: &str,
        credentials: Option<Self::Credentials>,
        options: Option<Self::FetchOptions>,
    ) -> FetcherResult;

    /// Execute with parsed inputs
    async fn run(
        &self,
        credentials: Self::Credentials,
        options: Self::Options,
        host: HostContext<'_>,
    );
}

/// Wrapper to convert a TypedAction into an Action
pub struct TypedActionWrapper<T: TypedAction> {
    inner: T,
}

impl<T: TypedAction> TypedActionWrapper<T> {
    /// Wrap a typed action
    pub fn new(action: T) -> Self {
        Self { inner: action }
    }

    /// Wrapped action
    pub fn inner(&self) -> &T {
        &self.inner
    }

    fn parse_options<R: DeserializeOwned>(raw: &serde_json::Value) -> Result<R, BotforgeError> {
        let raw = if raw.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            raw.clone()
        };
        Ok(serde_json::from_value(raw)?)
    }
}

#[async_trait]
impl<T: TypedAction + 'static> Action for TypedActionWrapper<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn options_schema(&self) -> OptionsSchema {
        self.inner.options_schema()
    }

    fn fetchers(&self) -> Vec<FetcherDefinition> {
        self.inner.fetchers()
    }

    fn set_variable_ids(&self, options: &serde_json::Value) -> Vec<String> {
        match Self::parse_options::<T::Options>(options) {
            Ok(options) => self.inner.set_variable_ids(&options),
            Err(_) => vec![],
        }
    }

    async fn fetch(&self, fetcher_id: &str, ctx: FetchContext) -> FetcherResult {
        if !self.inner.fetchers().iter().any(|f| f.id == fetcher_id) {
            return FetcherResult::unknown_fetcher(fetcher_id, self.inner.name());
        }

        // Unparseable credentials mean the block is not configured yet.
        let credentials = ctx
            .credentials
            .and_then(|c| serde_json::from_value::<T::Credentials>(c).ok());

        let options = match ctx.options {
            Some(raw) => match Self::parse_options::<T::FetchOptions>(&raw) {
                Ok(options) => Some(options),
                Err(e) => {
                    return FetcherResult::error(parse_error(
                        &e,
                        &format!("While parsing {} options", self.inner.name()),
                    ))
                }
            },
            None => None,
        };

        self.inner.fetch(fetcher_id, credentials, options).await
    }

    async fn run(&self, ctx: RunContext<'_>) {
        let context = format!("While parsing {} options", self.inner.name());

        let options = match Self::parse_options::<T::Options>(&ctx.options) {
            Ok(options) => options,
            Err(e) => return ctx.host.logs.add(parse_error(&e, &context)),
        };

        let credentials = match serde_json::from_value::<T::Credentials>(ctx.credentials) {
            Ok(credentials) => credentials,
            Err(e) => {
                return ctx.host.logs.add(parse_error(
                    &BotforgeError::from(e),
                    &format!("While parsing {} credentials", self.inner.name()),
                ))
            }
        };

        self.inner.run(credentials, options, ctx.host).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryUploader;
    use crate::types::{OptionField, SessionVariables, VariableUpdate};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct EchoCredentials {
        token: String,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct EchoOptions {
        text: Option<String>,
        target_variable_id: Option<String>,
    }

    #[derive(Deserialize)]
    struct EchoFetchOptions {
        text: Option<String>,
    }

    struct EchoAction;

    #[async_trait]
    impl TypedAction for EchoAction {
        type Credentials = EchoCredentials;
        type Options = EchoOptions;
        type FetchOptions = EchoFetchOptions;

        fn name(&self) -> &str {
            "Echo"
        }

        fn options_schema(&self) -> OptionsSchema {
            OptionsSchema::new(vec![
                OptionField::string("text"),
                OptionField::string("targetVariableId"),
            ])
        }

        fn fetchers(&self) -> Vec<FetcherDefinition> {
            vec![FetcherDefinition::new("fetchEcho", ["text"])]
        }

        fn set_variable_ids(&self, options: &EchoOptions) -> Vec<String> {
            options.target_variable_id.iter().cloned().collect()
        }

        async fn fetch(
            &self,
            _fetcher_id: &str,
            credentials: Option<EchoCredentials>,
            options: Option<EchoFetchOptions>,
        ) -> FetcherResult {
            match credentials {
                None => FetcherResult::empty(),
                Some(c) => FetcherResult::data(vec![
                    c.token,
                    options.and_then(|o| o.text).unwrap_or_default(),
                ]),
            }
        }

        async fn run(
            &self,
            credentials: EchoCredentials,
            options: EchoOptions,
            host: HostContext<'_>,
        ) {
            let Some(id) = options.target_variable_id else {
                return host.logs.add("Echo target is empty");
            };
            let value = format!("{}:{}", credentials.token, options.text.unwrap_or_default());
            host.variables.set(vec![VariableUpdate::new(id, value)]);
        }
    }

    #[tokio::test]
    async fn test_wrapper_runs_typed_action() {
        let action = TypedActionWrapper::new(EchoAction);
        let variables = SessionVariables::new();
        let logs = ActionLogs::new();
        let uploader = MemoryUploader::new("https://files.test");

        action
            .run(RunContext {
                credentials: serde_json::json!({ "token": "t" }),
                options: serde_json::json!({ "text": "hi", "targetVariableId": "v" }),
                host: HostContext {
                    variables: &variables,
                    logs: &logs,
                    uploader: &uploader,
                },
            })
            .await;

        assert!(logs.is_empty());
        assert_eq!(variables.get("v"), Some(serde_json::json!("t:hi")));
    }

    #[tokio::test]
    async fn test_wrapper_logs_bad_options() {
        let action = TypedActionWrapper::new(EchoAction);
        let variables = SessionVariables::new();
        let logs = ActionLogs::new();
        let uploader = MemoryUploader::new("https://files.test");

        action
            .run(RunContext {
                credentials: serde_json::json!({ "token": "t" }),
                options: serde_json::json!({ "text": 42 }),
                host: HostContext {
                    variables: &variables,
                    logs: &logs,
                    uploader: &uploader,
                },
            })
            .await;

        let entries = logs.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description, "While parsing Echo options");
        assert!(variables.history().is_empty());
    }

    #[tokio::test]
    async fn test_wrapper_fetch_dispatch() {
        let action = TypedActionWrapper::new(EchoAction);

        let unknown = action.fetch("nope", FetchContext::default()).await;
        assert!(unknown.error_entry().is_some());

        let unconfigured = action
            .fetch(
                "fetchEcho",
                FetchContext {
                    credentials: Some(serde_json::json!({})),
                    options: None,
                },
            )
            .await;
        assert_eq!(unconfigured.values(), Some(&[][..]));

        let configured = action
            .fetch(
                "fetchEcho",
                FetchContext {
                    credentials: Some(serde_json::json!({ "token": "t" })),
                    options: Some(serde_json::json!({ "text": "x" })),
                },
            )
            .await;
        assert_eq!(
            configured.values(),
            Some(&["t".to_string(), "x".to_string()][..])
        );
    }

    #[tokio::test]
    async fn test_fetch_ignores_fields_outside_fetch_options() {
        let action = TypedActionWrapper::new(EchoAction);

        let result = action
            .fetch(
                "fetchEcho",
                FetchContext {
                    credentials: Some(serde_json::json!({ "token": "t" })),
                    options: Some(serde_json::json!({ "text": "x", "targetVariableId": 42 })),
                },
            )
            .await;
        assert_eq!(
            result.values(),
            Some(&["t".to_string(), "x".to_string()][..])
        );

        let broken = action
            .fetch(
                "fetchEcho",
                FetchContext {
                    credentials: Some(serde_json::json!({ "token": "t" })),
                    options: Some(serde_json::json!({ "text": 42 })),
                },
            )
            .await;
        assert_eq!(
            broken.error_entry().unwrap().description,
            "While parsing Echo options"
        );
    }

    #[test]
    fn test_set_variable_ids_from_raw_options() {
        let action = TypedActionWrapper::new(EchoAction);
        assert_eq!(
            action.set_variable_ids(&serde_json::json!({ "targetVariableId": "v9" })),
            vec!["v9".to_string()]
        );
        assert!(action.set_variable_ids(&serde_json::json!({})).is_empty());
        assert!(action.set_variable_ids(&serde_json::Value::Null).is_empty());
    }
}
