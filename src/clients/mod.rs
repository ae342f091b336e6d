//! API 客户端模块
//!
//! 负责所有与考试系统后端的交互

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{TestAnswer, TestQuestion, TestResult};

pub mod exam_client;

pub use exam_client::ExamClient;

/// 考试系统协作方契约
///
/// 会话流程层只依赖这两个操作：取题和交卷。
/// 正确性和评分完全由服务端计算
#[async_trait]
pub trait ExamApi {
    /// 获取指定测试的题目列表（顺序在一次会话内稳定）
    async fn fetch_test_questions(&self, test_id: i64) -> AppResult<Vec<TestQuestion>>;

    /// 提交作答并获取评分结果
    async fn submit_test_answers(
        &self,
        test_id: i64,
        answers: &[TestAnswer],
    ) -> AppResult<TestResult>;
}
