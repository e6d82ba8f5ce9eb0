//! Image asset handling for content records: upload staging, the fixed-size
//! cover crop and the create / replace / delete flows that keep exactly one
//! finalized file per record.

pub mod kind;
pub mod pipeline;
pub mod staging;
pub mod storage;
pub mod sweeper;
pub mod transform;

pub use kind::AssetKind;
pub use pipeline::{AssetOwner, AssetPipeline};
pub use staging::{InboundFile, StagedUpload};
pub use storage::AssetStorage;
pub use sweeper::ScratchSweeper;
