//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责应用生命周期和用户交互，是整个程序的"指挥中心"。
//!
//! ### `app` - 应用生命周期
//! - 初始化（日志文件、API 客户端）
//! - 获取开始测试请求（TOML 文件或交互输入）
//! - 创建测试、加载会话、输出最终结果
//!
//! ### `test_runner` - 交互式答题驱动
//! - 渲染当前题目和选项
//! - 解析用户命令并转发给 TestSession
//! - 交卷失败时保持会话可重试
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (一次程序运行)
//!     ↓
//! orchestrator::TestRunner (一次答题过程)
//!     ↓
//! workflow::TestFlow (取题 / 交卷)
//!     ↓
//! workflow::TestSession (纯状态机)
//!     ↓
//! clients::ExamClient (HTTP)
//! ```

pub mod app;
pub mod test_runner;

pub use app::App;
pub use test_runner::{parse_command, render_question, Command, TestRunner};
