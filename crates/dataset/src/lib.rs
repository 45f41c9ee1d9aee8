pub mod cancel;
pub mod series;
pub mod world;

pub use cancel::CancelToken;
pub use series::SeriesBuilder;
pub use world::{
    build_world_dataset, WorldDataset, WorldOptions, WorldSnapshot, DEFAULT_WORKERS,
    SNAPSHOT_EVERY,
};
