//! Resolution pipeline
//!
//! Fans one name out into six independent lookups (address plus five text
//! records), joins them all, and normalizes the results into a [`RecordSet`].

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::client::{NameService, ResolverHandle};
use crate::config::EnsQrConfig;
use crate::error::Result;
use crate::namehash::{namehash, normalize, Node};
use crate::records::{Field, FieldValue, RecordSet, ResolutionOutcome};

/// Resolves names into record sets through a [`NameService`]
pub struct ResolutionPipeline<S> {
    service: Arc<S>,
    config: EnsQrConfig,
}

impl<S> Clone for ResolutionPipeline<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            config: self.config.clone(),
        }
    }
}

impl<S: NameService> ResolutionPipeline<S> {
    /// Create a pipeline over `service`
    pub fn new(service: S, config: EnsQrConfig) -> Self {
        Self {
            service: Arc::new(service),
            config,
        }
    }

    /// Underlying name service
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Resolve `name` into an outcome
    ///
    /// Individual lookup failures degrade to "not found" for that field only.
    /// An invalid name is the only error returned.
    pub async fn resolve(&self, name: &str) -> Result<ResolutionOutcome> {
        let name = normalize(name)?;
        let name = name.as_str();
        let node = namehash(name)?;
        info!("Resolving {} ({})", name, node);

        let (address, twitter, telegram, github, email, url) = tokio::join!(
            self.lookup_address(&node),
            self.lookup_text(&node, Field::Twitter),
            self.lookup_text(&node, Field::Telegram),
            self.lookup_text(&node, Field::Github),
            self.lookup_text(&node, Field::Email),
            self.lookup_text(&node, Field::Url),
        );

        let values = [
            FieldValue::from_address(address),
            FieldValue::from_text(twitter),
            FieldValue::from_text(telegram),
            FieldValue::from_text(github),
            FieldValue::from_text(email),
            FieldValue::from_text(url),
        ];

        if values.iter().all(|value| !value.is_found()) {
            info!("No records found for {}", name);
            return Ok(ResolutionOutcome::NothingFound);
        }

        let records = RecordSet::new(name, values, self.config.dweb_link(name));
        debug!("Resolved {}: {:?}", name, records);
        Ok(ResolutionOutcome::Found(records))
    }

    /// Resolve several names concurrently, keeping input order
    pub async fn resolve_batch(&self, names: &[String]) -> Vec<Result<ResolutionOutcome>> {
        join_all(names.iter().map(|name| self.resolve(name))).await
    }

    async fn lookup_address(&self, node: &Node) -> String {
        let result: Result<String> = async {
            let resolver = self.service.resolver(node).await?;
            resolver.address(node).await
        }
        .await;

        result.unwrap_or_else(|e| {
            warn!("Error fetching address for {}: {}", node, e);
            String::new()
        })
    }

    async fn lookup_text(&self, node: &Node, field: Field) -> String {
        let Some(key) = field.record_key() else {
            return String::new();
        };

        let result: Result<String> = async {
            let resolver = self.service.resolver(node).await?;
            resolver.text(node, key).await
        }
        .await;

        result.unwrap_or_else(|e| {
            warn!("Error fetching {} record for {}: {}", key, node, e);
            String::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnsQrError;
    use async_trait::async_trait;

    /// Answers every text key with the key itself and a fixed address
    struct EchoService;

    struct EchoResolver;

    #[async_trait]
    impl NameService for EchoService {
        type Resolver = EchoResolver;

        async fn resolver(&self, _node: &Node) -> Result<EchoResolver> {
            Ok(EchoResolver)
        }
    }

    #[async_trait]
    impl ResolverHandle for EchoResolver {
        async fn address(&self, _node: &Node) -> Result<String> {
            Ok("0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb".to_string())
        }

        async fn text(&self, _node: &Node, key: &str) -> Result<String> {
            Ok(key.to_string())
        }
    }

    #[tokio::test]
    async fn test_each_field_gets_its_own_key() {
        let pipeline = ResolutionPipeline::new(EchoService, EnsQrConfig::default());
        let outcome = pipeline.resolve("foo.eth").await.unwrap();
        let records = outcome.record_set().unwrap();

        for field in Field::TEXT {
            assert_eq!(
                records.value(field).and_then(FieldValue::as_found),
                field.record_key()
            );
        }
    }

    #[tokio::test]
    async fn test_invalid_name_is_an_error() {
        let pipeline = ResolutionPipeline::new(EchoService, EnsQrConfig::default());
        assert!(matches!(pipeline.resolve("").await, Err(EnsQrError::InvalidName(_))));
        assert!(matches!(pipeline.resolve("a..eth").await, Err(EnsQrError::InvalidName(_))));
    }

    #[tokio::test]
    async fn test_padded_and_mixed_case_names_are_normalized() {
        let pipeline = ResolutionPipeline::new(EchoService, EnsQrConfig::default());

        for input in [" foo.eth", "foo.eth ", "\tFoo.ETH\n"] {
            let outcome = pipeline.resolve(input).await.unwrap();
            let records = outcome.record_set().unwrap();
            assert_eq!(records.name(), "foo.eth");
            assert_eq!(records.dweb_link(), Some("https://foo.eth.limo"));

            let items = crate::display::derive_items(records);
            assert_eq!(
                items.iter().last().map(|item| item.payload.as_str()),
                Some("https://foo.eth.limo")
            );
        }
    }

    #[tokio::test]
    async fn test_resolve_batch_keeps_order() {
        let pipeline = ResolutionPipeline::new(EchoService, EnsQrConfig::default());
        let names = vec!["foo.eth".to_string(), "".to_string(), "foo.xyz".to_string()];
        let results = pipeline.resolve_batch(&names).await;

        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].as_ref().unwrap().record_set().unwrap().dweb_link(),
            Some("https://foo.eth.limo")
        );
        assert!(results[1].is_err());
        assert_eq!(
            results[2].as_ref().unwrap().record_set().unwrap().dweb_link(),
            None
        );
    }
}
