//! 应用生命周期
//!
//! 初始化（日志、客户端）→ 获取开始测试请求 → 创建测试
//! → 加载会话 → 交互答题 → 输出结果

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{error, info, warn};

use crate::clients::ExamClient;
use crate::config::Config;
use crate::models::{load_start_request, TestStartRequest};
use crate::orchestrator::test_runner::TestRunner;
use crate::utils::logging;
use crate::workflow::TestFlow;

/// 应用主结构
pub struct App {
    config: Config,
    client: ExamClient,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(&config);

        let client = ExamClient::new(&config)?;

        Ok(Self { config, client })
    }

    /// 运行应用主逻辑
    pub async fn run(self) -> Result<()> {
        // 获取并校验开始测试请求
        let request = self.acquire_start_request().await?;
        request.validate()?;

        // 创建测试
        let started = self.client.start_test(&request).await?;
        info!("✓ 测试已创建 (id={})", started.id);

        let App { config, client } = self;
        let flow = TestFlow::new(client);

        // 加载会话；取题失败或题目为空时放弃本次尝试
        let session = match flow.load_session(started.id).await {
            Ok(session) => session,
            Err(e) => {
                error!("❌ 无法开始测试: {}", e);
                return Err(e.into());
            }
        };

        logging::log_questions_loaded(started.id, session.questions().len());

        // 交互答题
        let runner = TestRunner::new(&config);
        let session = runner.run(&flow, session).await?;

        // 输出结果
        match session.result() {
            Some(result) => {
                logging::print_result_summary(result);
                info!("\n日志已保存至: {}", config.output_log_file);
            }
            None => {
                warn!("测试未完成，本次作答已丢弃");
            }
        }

        Ok(())
    }

    /// 获取开始测试请求
    ///
    /// 优先读取 TOML 请求文件，文件不存在时进入交互模式
    async fn acquire_start_request(&self) -> Result<TestStartRequest> {
        let path = Path::new(&self.config.request_file);

        if path.exists() {
            Ok(load_start_request(path).await?)
        } else {
            info!(
                "📋 未找到请求文件 {}，进入交互模式",
                self.config.request_file
            );
            self.prompt_start_request().await
        }
    }

    /// 交互式构建开始测试请求
    ///
    /// 与原有界面一致：默认选中全部学科
    async fn prompt_start_request(&self) -> Result<TestStartRequest> {
        let disciplines = self.client.get_disciplines().await?;

        if disciplines.is_empty() {
            bail!("服务端没有任何学科，无法开始测试");
        }

        println!("\n可选学科（默认全选）:");
        for discipline in &disciplines {
            println!("  - {}", discipline);
        }
        println!();

        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        let student_name = prompt_line(&mut lines, "学生姓名: ").await?;
        let student_email = prompt_line(&mut lines, "邮箱: ").await?;
        let count_input = prompt_line(&mut lines, "题目数量 (默认 10): ").await?;

        let number_of_questions = if count_input.trim().is_empty() {
            10
        } else {
            match count_input.trim().parse() {
                Ok(n) => n,
                Err(_) => {
                    warn!("无法解析题目数量 '{}'，使用默认值 10", count_input.trim());
                    10
                }
            }
        };

        Ok(TestStartRequest {
            student_name: student_name.trim().to_string(),
            student_email: student_email.trim().to_string(),
            included_discipline_ids: disciplines.iter().map(|d| d.id).collect(),
            excluded_discipline_ids: Vec::new(),
            number_of_questions,
        })
    }
}

/// 打印提示并读取一行输入
async fn prompt_line(lines: &mut Lines<BufReader<Stdin>>, prompt: &str) -> Result<String> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    match lines.next_line().await? {
        Some(line) => Ok(line),
        None => bail!("输入结束"),
    }
}
