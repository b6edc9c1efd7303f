pub mod classify;
pub mod coerce;
pub mod dedup;
pub mod extract;
pub mod key_pool;
pub mod links;
pub mod normalize;
pub mod pipeline;
pub mod prompts;
pub mod research;
pub mod schema;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;
pub mod vocab;

pub use classify::ExaClassifier;
pub use extract::OpenAiExtractor;
pub use key_pool::KeyPool;
pub use pipeline::{InvestorPipeline, PipelineOutcome, INPUT_REQUIRED};
pub use research::ResearchService;
pub use store::{InvestorRecord, PgInvestorStore};
