use serde::{Deserialize, Serialize};

/// 单个题目的评分结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: i64,
    pub content: String,
    pub correct_answers: Vec<String>,
    pub selected_answers: Vec<String>,
    pub is_correct: bool,
}

/// 测试评分结果
///
/// 由服务端计算，客户端不做任何本地评分
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// 得分（0-100）
    pub score: f64,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub question_results: Vec<QuestionResult>,
}

impl std::fmt::Display for TestResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "得分 {:.0}% (答对 {}/{})",
            self.score, self.correct_answers, self.total_questions
        )
    }
}
