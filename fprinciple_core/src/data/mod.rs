//! Per-epoch data containers and the 1-D target generator.

pub mod encoding;
pub mod low_dim;
pub mod snapshot;

pub use encoding::one_hot;
pub use low_dim::{generate, linspace, low_dim_data, square_wave, LowDimData};
pub use snapshot::{EpochSnapshot, SnapshotBuffer};
