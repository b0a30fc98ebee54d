mod executor;

pub use executor::{FailingExecutor, RecordingExecutor};
