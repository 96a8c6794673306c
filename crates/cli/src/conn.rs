use crate::error::CliError;
use connectors::{ConnectionFactory, ConnectorError};
use engine_config::Properties;
use model::Side;
use std::io::Write;
use tracing::{debug, error, info, warn};

/// Opens, pings and closes the connection for `side`, printing a single
/// result line. Driver error details go to the log only.
pub async fn test_connection<W: Write>(
    properties: &Properties,
    side: Side,
    out: &mut W,
) -> Result<(), CliError> {
    let factory = ConnectionFactory::new(properties);

    match ping(&factory, side).await {
        Ok(()) => {
            info!("Ping to {side} database succeeded");
            writeln!(out, "Connected successfully to database {side}.")?;
            Ok(())
        }
        Err(ConnectorError::Config(err)) => Err(CliError::Config(err)),
        Err(err) => {
            error!("Ping to {side} database failed");
            debug!(%err, "Connection test failure detail");
            writeln!(out, "Unable to connect to database {side}.")?;
            Err(CliError::ConnectionTest(side))
        }
    }
}

async fn ping(factory: &ConnectionFactory<'_>, side: Side) -> Result<(), ConnectorError> {
    let mut conn = factory.open(side).await?;
    let result = conn
        .ping()
        .await
        .map_err(|e| ConnectorError::connect(side, e));

    if let Err(err) = conn.close().await {
        warn!(%err, "Failed to close {side} connection cleanly");
    }
    result
}
