pub mod pool_loader;

pub use pool_loader::{fetch_pool, load_all_pools, load_pool, load_pool_file, PoolSource};
