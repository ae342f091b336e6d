use std::path::Path;

use tokio::fs;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::start::TestStartRequest;

/// 从 TOML 文件加载开始测试请求
pub async fn load_start_request(path: &Path) -> AppResult<TestStartRequest> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let request: TestStartRequest = toml::from_str(&content)
        .map_err(|e| AppError::toml_parse_failed(path.display().to_string(), e))?;

    info!(
        "✓ 已从 {} 加载测试请求: {} ({} 道题)",
        path.display(),
        request.student_name,
        request.number_of_questions
    );

    Ok(request)
}
