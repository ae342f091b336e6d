pub mod test_flow;
pub mod test_session;

pub use test_flow::TestFlow;
pub use test_session::{SessionState, TestSession};
