/// 考试系统 API 客户端
///
/// 封装所有与考试系统 REST API 相关的调用逻辑
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::clients::ExamApi;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{
    Discipline, ErrorBody, StartedTest, TestAnswer, TestQuestion, TestQuestionsResponse,
    TestResult, TestStartRequest,
};

/// 考试系统 API 客户端
pub struct ExamClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExamClient {
    /// 创建新的考试系统客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 获取学科列表
    ///
    /// # 返回
    /// 返回全部学科，开始测试时默认全选
    pub async fn get_disciplines(&self) -> AppResult<Vec<Discipline>> {
        let endpoint = self.endpoint_url("disciplines");
        let response = self.http.get(&endpoint).send().await?;
        Self::parse_response(response, &endpoint).await
    }

    /// 开始一次测试
    ///
    /// # 参数
    /// - `request`: 开始测试请求（学生信息、学科、题目数量）
    ///
    /// # 返回
    /// 返回服务端创建的测试，其 id 用于后续取题和交卷
    pub async fn start_test(&self, request: &TestStartRequest) -> AppResult<StartedTest> {
        let endpoint = self.endpoint_url("tests");

        debug!("开始测试 Payload: {}", serde_json::to_string(request)?);

        let response = self.http.post(&endpoint).json(request).send().await?;
        Self::parse_response(response, &endpoint).await
    }

    /// 获取测试题目
    ///
    /// # 参数
    /// - `test_id`: 测试ID
    ///
    /// # 返回
    /// 返回按出题顺序排列的题目列表
    pub async fn get_test_questions(&self, test_id: i64) -> AppResult<Vec<TestQuestion>> {
        let endpoint = self.endpoint_url(&format!("tests/{}/questions", test_id));
        let response = self.http.get(&endpoint).send().await?;
        let body: TestQuestionsResponse = Self::parse_response(response, &endpoint).await?;

        debug!("测试 {} 共 {} 道题", test_id, body.questions.len());

        Ok(body.questions)
    }

    /// 提交测试作答
    ///
    /// # 参数
    /// - `test_id`: 测试ID
    /// - `answers`: 每道题一条作答记录，顺序与题目一致
    ///
    /// # 返回
    /// 返回服务端计算的评分结果
    pub async fn submit_test(
        &self,
        test_id: i64,
        answers: &[TestAnswer],
    ) -> AppResult<TestResult> {
        let endpoint = self.endpoint_url(&format!("tests/{}/submit", test_id));

        debug!("交卷 Payload: {}", serde_json::to_string(answers)?);

        let response = self.http.post(&endpoint).json(answers).send().await?;
        Self::parse_response(response, &endpoint).await
    }

    /// 构建完整的接口地址
    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// 解析 API 响应
    ///
    /// 非 2xx 时尝试读取服务端错误体 `{ "message": ... }`
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
        endpoint: &str,
    ) -> AppResult<T> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);
            return Err(AppError::bad_response(endpoint, status.as_u16(), message));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| AppError::json_parse_failed(endpoint, e))
    }
}

#[async_trait]
impl ExamApi for ExamClient {
    async fn fetch_test_questions(&self, test_id: i64) -> AppResult<Vec<TestQuestion>> {
        self.get_test_questions(test_id).await
    }

    async fn submit_test_answers(
        &self,
        test_id: i64,
        answers: &[TestAnswer],
    ) -> AppResult<TestResult> {
        self.submit_test(test_id, answers).await
    }
}
