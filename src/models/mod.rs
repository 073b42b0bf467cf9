pub mod loaders;
pub mod pool;
pub mod question;
pub mod question_id;

pub use loaders::{load_all_pools, load_pool, PoolSource};
pub use pool::{Group, Period, Pool, RawQuestion, Subelement};
pub use question::{NormalizedQuestion, QuestionSlot};
