mod ensure;
mod resolve;

pub use ensure::{ensure_dirs, remove_partition};
pub use resolve::{config_dir, data_dir, partition_dir, partitions_dir};
