pub mod storage;

pub use storage::save_artifact;
