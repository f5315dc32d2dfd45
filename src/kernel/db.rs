use {
    crate::config::server::Options,
    anyhow::anyhow,
    mongodb::{
        bson::doc,
        Client,
    },
};

pub type DB = mongodb::Database;

/// Connects to the document store and verifies the connection with a ping.
///
/// The server must not come up against a store it cannot reach, so any
/// failure here propagates to the caller and terminates startup.
pub async fn connect(options: &Options) -> anyhow::Result<DB> {
    tracing::info!(uri = %options.masked_mongo_uri(), "Connecting to store...");

    let client = Client::with_uri_str(options.mongo_uri())
        .await
        .map_err(|err| anyhow!("Failed to connect to store: {:?}", err))?;
    let db = client.database(&options.mongodb_db);

    db.run_command(doc! { "ping": 1 })
        .await
        .map_err(|err| anyhow!("Failed to ping store: {:?}", err))?;

    tracing::info!(database = %options.mongodb_db, "Connected to store");
    Ok(db)
}
