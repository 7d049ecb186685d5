pub mod fixtures;
pub mod scenarios;
pub mod test_env;

// Re-export key testing utilities
pub use firmbuilder_lib::testing::MockNetworkProvider;
pub use test_env::{HermeticSessionBuilder, TestEnvironment};
