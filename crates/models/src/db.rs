use anyhow::Result;
use configs::DatabaseConfig;
use mongodb::Client;

/// Build a MongoDB client from the database configuration.
///
/// The driver maintains its own connection pool; a handle checked out for
/// an operation is returned to the pool when the operation finishes,
/// whatever its exit path.
pub async fn connect(cfg: &DatabaseConfig) -> Result<Client> {
    let client = Client::with_uri_str(&cfg.uri).await?;
    Ok(client)
}
