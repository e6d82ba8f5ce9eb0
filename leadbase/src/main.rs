use std::sync::Arc;

use lb_api_rest::{
    context::{ApiRestAssetCtx, ApiRestCtx, ApiRestDaoCtx},
    ApiRestServer,
};
use lb_asset::{AssetPipeline, AssetStorage, ScratchSweeper};
use lb_dao::Db;
use lb_db_sqlite::db::SqliteDb;
use tokio_util::sync::CancellationToken;

mod config_path;

#[tokio::main]
async fn main() {
    let config_path = config_path::get();
    let config = match lb_config::from_path(&config_path) {
        Ok(config) => config,
        Err(err) => lb_log::panic(
            None,
            format!("[Leadbase] Failed to read config {config_path}: {err}"),
        ),
    };

    lb_log::init(config.log().display_level(), config.log().level_filter());

    lb_log::info(Some("🚀"), "[Leadbase] Starting");

    let sqlite = config.db().sqlite();
    let db = match SqliteDb::new(
        sqlite.path(),
        sqlite.max_connections(),
        sqlite.busy_timeout_ms(),
    )
    .await
    {
        Ok(db) => Arc::new(Db::SqliteDb(db)),
        Err(err) => lb_log::panic(
            None,
            format!("[Leadbase] Initializing database failed: {err}"),
        ),
    };

    let storage = match AssetStorage::new(config.upload().path()) {
        Ok(storage) => storage,
        Err(err) => lb_log::panic(
            None,
            format!("[Leadbase] Preparing upload directories failed: {err}"),
        ),
    };

    let scratch_sweeper = ScratchSweeper::new(&storage);

    let api_rest_server = ApiRestServer::new(
        config.app().mode(),
        config.api().rest().host(),
        config.api().rest().port(),
        config.api().rest().allowed_origin(),
        ApiRestCtx::new(
            ApiRestDaoCtx::new(db),
            ApiRestAssetCtx::new(AssetPipeline::new(storage)),
        ),
    );

    let cancel_token = CancellationToken::new();

    let scratch_sweeper = scratch_sweeper.run(cancel_token.clone());
    let result = api_rest_server.run(cancel_token.clone()).await;

    cancel_token.cancel();
    if let Err(err) = scratch_sweeper.await {
        lb_log::warn(None, format!("[Leadbase] Scratch sweeper stopped abnormally: {err}"));
    }

    match result {
        Ok(_) => lb_log::info(Some("👋"), "[Leadbase] Turned off"),
        Err(err) => lb_log::warn(
            Some("👋"),
            format!("[Leadbase] Turned off with error: {err}"),
        ),
    }
}
