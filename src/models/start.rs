use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, StartError};

/// 学科
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discipline {
    pub id: i64,
    pub name: String,
    pub professor: String,
}

impl std::fmt::Display for Discipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.professor)
    }
}

/// 开始测试请求
///
/// 服务端根据选中的学科随机抽取题目组卷
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStartRequest {
    pub student_name: String,
    pub student_email: String,
    #[serde(default)]
    pub included_discipline_ids: Vec<i64>,
    #[serde(default)]
    pub excluded_discipline_ids: Vec<i64>,
    pub number_of_questions: u32,
}

impl TestStartRequest {
    /// 校验请求内容
    ///
    /// 规则与服务端一致：姓名非空、邮箱格式合法、
    /// 题目数量在 [1, 50] 之间、至少选择一个学科
    pub fn validate(&self) -> AppResult<()> {
        if self.student_name.trim().is_empty() {
            return Err(AppError::Start(StartError::EmptyStudentName));
        }

        let email_re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .map_err(|e| AppError::Other(format!("邮箱正则编译失败: {}", e)))?;
        if !email_re.is_match(&self.student_email) {
            return Err(AppError::Start(StartError::InvalidEmail {
                email: self.student_email.clone(),
            }));
        }

        if self.number_of_questions < 1 || self.number_of_questions > 50 {
            return Err(AppError::Start(StartError::QuestionCountOutOfRange {
                count: self.number_of_questions,
            }));
        }

        if self.included_discipline_ids.is_empty() {
            return Err(AppError::Start(StartError::NoDisciplines));
        }

        Ok(())
    }
}

/// 服务端创建的测试
///
/// 只关心后续流程需要的 id，其余字段忽略
#[derive(Debug, Clone, Deserialize)]
pub struct StartedTest {
    pub id: i64,
}
