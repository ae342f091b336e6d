//! # Take Test Submit
//!
//! 一个用于在线作答并提交测试的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 数据结构与序列化（题目、作答、评分结果、开始请求）
//! - `loaders/` - 从 TOML 文件加载开始测试请求
//!
//! ### ② 客户端层（Clients）
//! - `clients/` - 描述"后端能做什么"，持有全部网络 I/O
//! - `ExamApi` - 协作方契约（取题 / 交卷）
//! - `ExamClient` - reqwest 实现
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次答题"的完整状态与流程
//! - `TestSession` - 纯状态机（选择规则、导航、提交状态）
//! - `TestFlow` - 流程编排（取题 → 作答 → 交卷）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用生命周期，管理配置和客户端
//! - `orchestrator/test_runner` - 终端交互驱动
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{ExamApi, ExamClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{
    Discipline, QuestionType, TestAnswer, TestQuestion, TestResult, TestStartRequest,
};
pub use orchestrator::App;
pub use workflow::{SessionState, TestFlow, TestSession};
