use serde::{Deserialize, Serialize};

/// 题目类型
///
/// 单选题的选择集合最多只有一个答案，多选题没有上限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "SINGLE_CHOICE")]
    SingleChoice,
    #[serde(rename = "MULTIPLE_CHOICE")]
    MultipleChoice,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::SingleChoice => write!(f, "单选"),
            QuestionType::MultipleChoice => write!(f, "多选"),
        }
    }
}

/// 测试题目
///
/// 服务端已经合并并打乱了候选答案，客户端在拿到结果前
/// 不知道哪些答案是正确的
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestQuestion {
    pub id: i64,
    pub content: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub answers: Vec<String>,
}

impl std::fmt::Display for TestQuestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 截断题目内容以便显示（最多80个字符）
        let content_preview = if self.content.chars().count() > 80 {
            self.content.chars().take(80).collect::<String>() + "..."
        } else {
            self.content.clone()
        };
        write!(f, "[{}] {} ({})", self.id, content_preview, self.question_type)
    }
}

/// 题目列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestQuestionsResponse {
    pub questions: Vec<TestQuestion>,
}

/// 单个题目的作答
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAnswer {
    pub question_id: i64,
    pub selected_answers: Vec<String>,
}

/// 服务端错误响应体
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}
