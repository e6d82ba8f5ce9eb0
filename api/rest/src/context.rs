use std::sync::Arc;

use lb_asset::AssetPipeline;
use lb_dao::Db;

pub struct ApiRestCtx {
    dao: ApiRestDaoCtx,
    asset: ApiRestAssetCtx,
}

impl ApiRestCtx {
    pub fn new(dao: ApiRestDaoCtx, asset: ApiRestAssetCtx) -> Self {
        Self { dao, asset }
    }

    pub fn dao(&self) -> &ApiRestDaoCtx {
        &self.dao
    }

    pub fn asset(&self) -> &ApiRestAssetCtx {
        &self.asset
    }
}

pub struct ApiRestDaoCtx {
    db: Arc<Db>,
}

impl ApiRestDaoCtx {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }
}

pub struct ApiRestAssetCtx {
    pipeline: AssetPipeline,
}

impl ApiRestAssetCtx {
    pub fn new(pipeline: AssetPipeline) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &AssetPipeline {
        &self.pipeline
    }
}
