//! 答题流程 - 流程层
//!
//! 核心职责：围绕纯状态机的 TestSession，编排一次答题尝试
//! 中仅有的两次网络交互：
//! 1. 取题 → 进入答题状态（失败即放弃本次尝试）
//! 2. 交卷 → 成功进入终态 / 失败回到答题状态（可重试）

use tracing::{info, warn};

use crate::clients::ExamApi;
use crate::error::AppResult;
use crate::workflow::test_session::TestSession;

/// 答题流程
///
/// - 不持有任何会话状态，只依赖协作方契约（ExamApi）
/// - 取题和交卷之外不产生任何副作用
pub struct TestFlow<C: ExamApi> {
    client: C,
}

impl<C: ExamApi> TestFlow<C> {
    /// 创建新的答题流程
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// 加载会话：取题并进入答题状态
    ///
    /// 取题失败或题目为空时直接返回错误，由调用方决定
    /// 如何向用户反馈；流程内部不做重试
    pub async fn load_session(&self, test_id: i64) -> AppResult<TestSession> {
        let mut session = TestSession::new(test_id);

        info!("[测试 {}] 🔍 正在获取题目...", test_id);

        let questions = self.client.fetch_test_questions(test_id).await?;
        session.load_questions(questions)?;

        info!(
            "[测试 {}] ✓ 获取到 {} 道题",
            test_id,
            session.questions().len()
        );

        Ok(session)
    }

    /// 提交会话
    ///
    /// 构建载荷、发起唯一的一次网络调用；
    /// 失败时会话回到答题状态，所有已作答的选择保持不变
    pub async fn submit(&self, session: &mut TestSession) -> AppResult<()> {
        let test_id = session.test_id();
        let answers = session.begin_submit()?;

        info!(
            "[测试 {}] 📤 正在交卷 (已作答 {}/{})...",
            test_id,
            answers.iter().filter(|a| !a.selected_answers.is_empty()).count(),
            answers.len()
        );

        match self.client.submit_test_answers(test_id, &answers).await {
            Ok(result) => {
                info!("[测试 {}] ✓ 交卷成功: {}", test_id, result);
                session.complete_submit(result)?;
                Ok(())
            }
            Err(e) => {
                warn!("[测试 {}] ⚠️ 交卷失败: {}", test_id, e);
                session.fail_submit();
                Err(e)
            }
        }
    }
}
