use crate::{
    error::ConnectorError,
    sql::base::{
        adapter::{ConnectParams, DatabaseKind},
        connection::DbConnection,
    },
};
use engine_config::{Properties, SideKeys};
use model::Side;
use tracing::{debug, info};

/// Opens connections from the side-scoped keys of the configuration.
///
/// Connections are not pooled; every call to [`ConnectionFactory::open`]
/// returns a fresh one owned by the caller.
#[derive(Clone, Copy)]
pub struct ConnectionFactory<'a> {
    properties: &'a Properties,
}

impl<'a> ConnectionFactory<'a> {
    pub fn new(properties: &'a Properties) -> Self {
        Self { properties }
    }

    /// Resolves the driver and credentials for `side` without connecting.
    pub fn params(&self, side: Side) -> Result<(DatabaseKind, ConnectParams), ConnectorError> {
        let keys = SideKeys::for_side(side);
        self.properties.require(keys.connection())?;

        let driver = self.properties.require_one(&keys.driver)?;
        let url = self.properties.require_one(&keys.url)?;
        let kind = DatabaseKind::resolve(url, driver).ok_or_else(|| {
            ConnectorError::UnsupportedDriver {
                side,
                driver: driver.to_string(),
            }
        })?;

        let params = ConnectParams {
            url: kind.normalize_url(url),
            username: self.properties.require_one(&keys.username)?.to_string(),
            password: self.properties.require_one(&keys.password)?.to_string(),
        };
        Ok((kind, params))
    }

    pub async fn open(&self, side: Side) -> Result<DbConnection, ConnectorError> {
        let (kind, params) = self.params(side)?;
        info!("Connecting to {side} database ({kind})");
        debug!(?params, "Connection parameters for {side}");

        let conn = DbConnection::connect(kind, &params)
            .await
            .map_err(|e| ConnectorError::connect(side, e))?;

        info!("Connected to {side} database");
        Ok(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_config::ConfigError;

    fn properties(entries: &[(&str, &str)]) -> Properties {
        entries.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn test_params_apply_credentials_and_normalize_url() {
        let props = properties(&[
            ("source.db.driver", "org.mariadb.jdbc.Driver"),
            ("source.db.url", "jdbc:mariadb://db:3306/shop"),
            ("source.db.username", "reader"),
            ("source.db.password", "secret"),
        ]);

        let (kind, params) = ConnectionFactory::new(&props).params(Side::Source).unwrap();
        assert_eq!(kind, DatabaseKind::MySql);
        assert_eq!(params.url, "mysql://db:3306/shop");
        assert_eq!(params.username, "reader");
        assert_eq!(params.password, "secret");
    }

    #[tokio::test]
    async fn test_open_reports_all_missing_keys() {
        let props = properties(&[
            ("target.db.driver", "org.postgresql.Driver"),
            ("target.db.username", "writer"),
        ]);

        let err = ConnectionFactory::new(&props)
            .open(Side::Target)
            .await
            .err()
            .unwrap();

        match err {
            ConnectorError::Config(ConfigError::Incomplete { missing }) => {
                assert_eq!(missing, vec!["target.db.url", "target.db.password"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_open_rejects_unknown_driver() {
        let props = properties(&[
            ("source.db.driver", "oracle.jdbc.OracleDriver"),
            ("source.db.url", "jdbc:oracle:thin:@db:1521/shop"),
            ("source.db.username", "reader"),
            ("source.db.password", "secret"),
        ]);

        let err = ConnectionFactory::new(&props)
            .open(Side::Source)
            .await
            .err()
            .unwrap();

        assert!(matches!(
            err,
            ConnectorError::UnsupportedDriver {
                side: Side::Source,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "Unsupported driver `oracle.jdbc.OracleDriver` for database source"
        );
    }

    #[tokio::test]
    async fn test_open_reports_unparseable_url_as_connect_error() {
        let props = properties(&[
            ("source.db.driver", "mysql"),
            ("source.db.url", "mysql://db:notaport/shop"),
            ("source.db.username", "reader"),
            ("source.db.password", "secret"),
        ]);

        let err = ConnectionFactory::new(&props)
            .open(Side::Source)
            .await
            .err()
            .unwrap();

        assert!(matches!(
            err,
            ConnectorError::Connect {
                side: Side::Source,
                source: crate::DbError::InvalidUrl(_),
            }
        ));
    }
}
