// Common test utilities and fake backends

pub mod fakes;

// Re-export commonly used items
// Note: These may appear unused in some test crates
#[allow(unused_imports)]
pub use fakes::{FailingKnowledge, FailingModel, FailingSearch, ScriptedModel, StaticSearch};
#[allow(unused_imports)]
pub use helpers::{
    create_default_test_services, create_test_services, create_test_services_with_store,
    long_report, sample_results, test_config,
};
