//! 单次测试的交互式驱动
//!
//! 负责终端渲染和命令解析，把用户输入翻译成会话操作；
//! 所有状态转移规则都在 TestSession 内，这里不做任何判断

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::clients::ExamApi;
use crate::config::Config;
use crate::utils::logging::{strip_html_tags, truncate_text};
use crate::workflow::{TestFlow, TestSession};

/// 用户命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 选择第 n 个选项（从1开始）
    Select(usize),
    /// 下一题
    Next,
    /// 上一题
    Previous,
    /// 交卷
    Submit,
    /// 放弃测试
    Quit,
    /// 显示帮助
    Help,
    /// 无法识别的输入
    Unknown(String),
}

/// 解析用户输入
///
/// 空输入视为"下一题"，数字视为选项编号
pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    match trimmed {
        "" | "n" | "next" => Command::Next,
        "p" | "prev" | "previous" => Command::Previous,
        "s" | "submit" => Command::Submit,
        "q" | "quit" => Command::Quit,
        "h" | "help" | "?" => Command::Help,
        other => match other.parse::<usize>() {
            Ok(n) => Command::Select(n),
            Err(_) => Command::Unknown(other.to_string()),
        },
    }
}

/// 渲染当前题目
///
/// 返回多行文本：进度、题干、带选中标记的选项列表、操作提示
pub fn render_question(session: &TestSession) -> String {
    let question = match session.current_question() {
        Some(q) => q,
        None => return String::new(),
    };

    let mut lines = Vec::new();

    lines.push("".to_string());
    lines.push("─".repeat(60));
    lines.push(format!(
        "第 {} / {} 题 [{}] (进度 {:.0}%)",
        session.current_index() + 1,
        session.questions().len(),
        question.question_type,
        session.progress()
    ));
    lines.push("─".repeat(60));
    lines.push(strip_html_tags(&question.content));
    lines.push("".to_string());

    let selected = session.selected_for(question.id);
    for (i, answer) in question.answers.iter().enumerate() {
        let mark = if selected.iter().any(|a| a == answer) {
            "[x]"
        } else {
            "[ ]"
        };
        lines.push(format!("  {} {}. {}", mark, i + 1, answer));
    }

    lines.push("".to_string());
    if session.is_last_question() {
        lines.push("输入选项编号作答，p 上一题，s 交卷，q 放弃".to_string());
    } else {
        lines.push("输入选项编号作答，n 下一题，p 上一题，q 放弃".to_string());
    }

    lines.join("\n")
}

/// 交互式答题驱动
pub struct TestRunner {
    verbose_logging: bool,
}

impl TestRunner {
    /// 创建新的答题驱动
    pub fn new(config: &Config) -> Self {
        Self {
            verbose_logging: config.verbose_logging,
        }
    }

    /// 驱动一次完整的答题过程
    ///
    /// 循环渲染当前题目并执行用户命令，直到交卷成功或用户放弃。
    /// 交卷失败时会话保持在答题状态，可以继续修改答案后重试
    pub async fn run<C: ExamApi>(
        &self,
        flow: &TestFlow<C>,
        mut session: TestSession,
    ) -> Result<TestSession> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        loop {
            println!("{}", render_question(&session));
            print!("> ");
            std::io::stdout().flush()?;

            let line = match lines.next_line().await? {
                Some(line) => line,
                // 输入流关闭视为放弃
                None => {
                    warn!("输入结束，放弃本次测试");
                    return Ok(session);
                }
            };

            match parse_command(&line) {
                Command::Select(n) => self.select_option(&mut session, n),
                Command::Next => {
                    if session.is_last_question() {
                        info!("已是最后一题，输入 s 交卷");
                    } else {
                        session.go_next();
                    }
                }
                Command::Previous => {
                    if session.is_first_question() {
                        info!("已是第一题");
                    } else {
                        session.go_previous();
                    }
                }
                Command::Submit => {
                    match flow.submit(&mut session).await {
                        Ok(()) => return Ok(session),
                        // 会话已回到答题状态，继续循环即可重试
                        Err(_) => {
                            warn!("交卷失败，已作答的选择保持不变，可再次输入 s 重试");
                        }
                    }
                }
                Command::Quit => {
                    info!("已放弃本次测试");
                    return Ok(session);
                }
                Command::Help => self.print_help(),
                Command::Unknown(input) => {
                    warn!("无法识别的输入: {} (输入 h 查看帮助)", input);
                }
            }
        }
    }

    /// 选择当前题目的第 n 个选项
    fn select_option(&self, session: &mut TestSession, n: usize) {
        let (question_id, answer) = match session.current_question() {
            Some(question) => {
                if n == 0 || n > question.answers.len() {
                    warn!(
                        "选项编号 {} 超出范围 [1, {}]",
                        n,
                        question.answers.len()
                    );
                    return;
                }
                (question.id, question.answers[n - 1].clone())
            }
            None => return,
        };

        session.select_answer(question_id, &answer);

        if self.verbose_logging {
            info!(
                "已选择: {} (题目 {})",
                truncate_text(&answer, 40),
                question_id
            );
        }
    }

    fn print_help(&self) {
        println!();
        println!("  1..9      选择/取消对应编号的选项（单选题自动替换）");
        println!("  n 或 回车  下一题");
        println!("  p         上一题");
        println!("  s         交卷（未作答的题目按空答案提交）");
        println!("  q         放弃测试");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuestionType, TestQuestion};

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("3"), Command::Select(3));
        assert_eq!(parse_command(" n "), Command::Next);
        assert_eq!(parse_command(""), Command::Next);
        assert_eq!(parse_command("p"), Command::Previous);
        assert_eq!(parse_command("s"), Command::Submit);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("abc"), Command::Unknown("abc".to_string()));
    }

    #[test]
    fn test_render_question_shows_selection_markers() {
        let mut session = TestSession::new(1);
        session
            .load_questions(vec![TestQuestion {
                id: 1,
                content: "<p>首都是哪里？</p>".to_string(),
                question_type: QuestionType::SingleChoice,
                answers: vec!["北京".to_string(), "上海".to_string()],
            }])
            .unwrap();
        session.select_answer(1, "北京");

        let rendered = render_question(&session);

        assert!(rendered.contains("首都是哪里？"));
        assert!(!rendered.contains("<p>"));
        assert!(rendered.contains("[x] 1. 北京"));
        assert!(rendered.contains("[ ] 2. 上海"));
        // 只有一题，应提示交卷
        assert!(rendered.contains("s 交卷"));
    }
}
