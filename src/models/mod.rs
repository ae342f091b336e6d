pub mod loaders;
pub mod question;
pub mod result;
pub mod start;

pub use loaders::load_start_request;
pub use question::{ErrorBody, QuestionType, TestAnswer, TestQuestion, TestQuestionsResponse};
pub use result::{QuestionResult, TestResult};
pub use start::{Discipline, StartedTest, TestStartRequest};
