pub mod observer;
pub mod pool_summary;
pub mod question_lookup;

pub use observer::{LookupObserver, NoopObserver, TracingObserver};
pub use pool_summary::PoolSummary;
pub use question_lookup::{lookup_by_ids, LookupOptions, LookupResult, QuestionLookup};
