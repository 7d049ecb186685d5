//! Test support shared by unit tests and the end-to-end crate
//!
//! Exported under the `test-utils` feature so `firmbuilder-tests` can drive
//! the pipeline without touching the network.

pub mod filesystem;
pub mod network;

pub use filesystem::TempDirFixture;
pub use network::MockNetworkProvider;
