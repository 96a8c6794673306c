use crate::error::CollectError;
use async_trait::async_trait;
use connectors::ConnectionFactory;
use engine_config::{Properties, SideKeys};
use model::{CountMap, Side};
use tracing::{debug, info, warn};

/// Anything that can produce the row counts of one side.
#[async_trait]
pub trait CountSource: Send + Sync {
    async fn collect(&self, side: Side) -> Result<CountMap, CollectError>;
}

/// Runs each side's configured counting query against its database.
pub struct RowCountCollector<'a> {
    properties: &'a Properties,
    factory: ConnectionFactory<'a>,
}

impl<'a> RowCountCollector<'a> {
    pub fn new(properties: &'a Properties) -> Self {
        Self {
            properties,
            factory: ConnectionFactory::new(properties),
        }
    }

    /// Checks every key needed to collect `sides` before any connection is
    /// opened. Missing keys from all sides are reported together.
    pub fn preflight(&self, sides: &[Side]) -> Result<(), CollectError> {
        let keys: Vec<SideKeys> = sides.iter().map(|side| SideKeys::for_side(*side)).collect();
        let required = keys.iter().flat_map(|keys| {
            keys.connection()
                .into_iter()
                .chain(std::iter::once(keys.query.as_str()))
        });
        self.properties.require(required)?;
        Ok(())
    }
}

#[async_trait]
impl CountSource for RowCountCollector<'_> {
    async fn collect(&self, side: Side) -> Result<CountMap, CollectError> {
        let keys = SideKeys::for_side(side);
        let query = self.properties.require_one(&keys.query)?;

        let mut conn = self.factory.open(side).await?;
        debug!("Running counting query on {side} ({})", conn.kind());
        let result = conn.table_counts(query).await;

        if let Err(err) = conn.close().await {
            warn!(%err, "Failed to close {side} connection cleanly");
        }

        let counts = result.map_err(|source| CollectError::Query { side, source })?;

        let mut map = CountMap::new();
        for count in counts {
            if let Some(previous) = map.insert(count.table_name.clone(), count.table_rows) {
                debug!(
                    "Table {} listed twice on {side}, replacing {previous} with {}",
                    count.table_name, count.table_rows
                );
            }
        }

        info!("Collected row counts for {} tables on {side}", map.len());
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_config::ConfigError;

    fn complete_side(side: &str) -> Vec<(String, String)> {
        ["driver", "url", "username", "password", "query"]
            .iter()
            .map(|key| (format!("{side}.db.{key}"), "x".to_string()))
            .collect()
    }

    #[test]
    fn test_preflight_passes_with_complete_config() {
        let props: Properties = complete_side("source")
            .into_iter()
            .chain(complete_side("target"))
            .collect();

        let collector = RowCountCollector::new(&props);
        assert!(collector.preflight(&Side::ALL).is_ok());
    }

    #[test]
    fn test_preflight_lists_missing_keys_of_all_sides() {
        let props: Properties = complete_side("source")
            .into_iter()
            .chain(complete_side("target"))
            .filter(|(key, _)| key != "target.db.url" && key != "target.db.password")
            .filter(|(key, _)| key != "source.db.query")
            .collect();

        let collector = RowCountCollector::new(&props);
        match collector.preflight(&Side::ALL) {
            Err(CollectError::Config(ConfigError::Incomplete { missing })) => {
                assert_eq!(
                    missing,
                    vec!["source.db.query", "target.db.url", "target.db.password"]
                );
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_preflight_only_checks_requested_sides() {
        let props: Properties = complete_side("source").into_iter().collect();
        let collector = RowCountCollector::new(&props);
        assert!(collector.preflight(&[Side::Source]).is_ok());
        assert!(collector.preflight(&[Side::Target]).is_err());
    }

    #[tokio::test]
    async fn test_collect_requires_query_key() {
        let props: Properties = complete_side("target")
            .into_iter()
            .filter(|(key, _)| key != "target.db.query")
            .collect();

        let err = RowCountCollector::new(&props)
            .collect(Side::Target)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Properties target.db.query not set in application.properties file."
        );
    }
}
