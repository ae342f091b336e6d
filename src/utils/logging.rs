use anyhow::Result;
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs;

use regex::Regex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::TestResult;

/// 初始化日志
///
/// 默认级别 info，可通过 RUST_LOG 环境变量覆盖
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n测试作答日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 在线测试作答模式");
    info!("🌐 API 地址: {}", config.api_base_url);
    info!("{}", "=".repeat(60));
}

/// 记录题目加载信息
///
/// # 参数
/// - `test_id`: 测试ID
/// - `total`: 题目总数
pub fn log_questions_loaded(test_id: i64, total: usize) {
    info!("✓ 测试 {} 共 {} 道题", test_id, total);
    info!("💡 输入选项编号作答，n/p 切换题目，s 交卷\n");
}

/// 打印最终评分结果
///
/// # 参数
/// - `result`: 服务端返回的评分结果
pub fn print_result_summary(result: &TestResult) {
    info!("\n{}", "=".repeat(60));
    info!("📊 测试结果");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 得分: {:.0}%", result.score);
    info!(
        "答对题目: {} / {}",
        result.correct_answers, result.total_questions
    );
    info!("{}", "─".repeat(60));

    for (i, qr) in result.question_results.iter().enumerate() {
        let mark = if qr.is_correct { "✓" } else { "✗" };
        info!(
            "{} 第 {} 题: {}",
            mark,
            i + 1,
            truncate_text(&strip_html_tags(&qr.content), 60)
        );
        info!("   你的答案: {}", format_answers(&qr.selected_answers));
        if !qr.is_correct {
            info!("   正确答案: {}", format_answers(&qr.correct_answers));
        }
    }

    info!("{}", "=".repeat(60));
}

/// 格式化答案列表用于显示
pub fn format_answers(answers: &[String]) -> String {
    if answers.is_empty() {
        "（未作答）".to_string()
    } else {
        answers.join("、")
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

/// 去除题目内容中的 HTML 标签，便于终端显示
pub fn strip_html_tags(text: &str) -> String {
    match Regex::new(r"<[^>]+>") {
        Ok(re) => re.replace_all(text, "").to_string(),
        Err(_) => text.to_string(),
    }
}
