//! 测试会话状态机
//!
//! 管理一次答题过程中的全部本地状态：
//! 题目列表、当前题目位置、每道题的选择集合、提交状态。
//!
//! 状态流转：
//! Loading → InProgress → Submitting → Completed
//!                ↑            |
//!                └────────────┘ (提交失败可重试)
//!
//! 本模块不做任何网络调用，纯内存状态转移，
//! 由 `TestFlow` 负责与服务端交互

use std::collections::HashMap;

use tracing::warn;

use crate::error::{AppError, AppResult, SessionError};
use crate::models::{QuestionType, TestAnswer, TestQuestion, TestResult};

/// 会话状态
#[derive(Debug, Clone)]
pub enum SessionState {
    /// 题目尚未加载
    Loading,
    /// 答题进行中
    InProgress,
    /// 提交请求进行中（同一会话最多一次）
    Submitting,
    /// 已完成，持有服务端评分结果
    Completed(TestResult),
}

impl SessionState {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, SessionState::InProgress)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SessionState::Submitting)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SessionState::Completed(_))
    }
}

/// 测试会话
///
/// 一次答题尝试的聚合：题目、当前位置、选择集合。
/// 不变量：题目非空时 `0 <= current_index < questions.len()`；
/// `selections` 的键只会是已加载题目的 id
#[derive(Debug)]
pub struct TestSession {
    test_id: i64,
    questions: Vec<TestQuestion>,
    current_index: usize,
    selections: HashMap<i64, Vec<String>>,
    state: SessionState,
}

impl TestSession {
    /// 创建新的测试会话（题目待加载）
    pub fn new(test_id: i64) -> Self {
        Self {
            test_id,
            questions: Vec::new(),
            current_index: 0,
            selections: HashMap::new(),
            state: SessionState::Loading,
        }
    }

    /// 加载题目，进入答题状态
    ///
    /// 空题目列表是合法的服务端响应，但对会话而言是终止性失败
    pub fn load_questions(&mut self, questions: Vec<TestQuestion>) -> AppResult<()> {
        if !matches!(self.state, SessionState::Loading) {
            return Err(AppError::Session(SessionError::AlreadyLoaded));
        }

        if questions.is_empty() {
            return Err(AppError::Session(SessionError::NoQuestions {
                test_id: self.test_id,
            }));
        }

        self.questions = questions;
        self.current_index = 0;
        self.state = SessionState::InProgress;
        Ok(())
    }

    /// 选择或取消一个答案
    ///
    /// 单选题：无条件替换为唯一选中项；
    /// 多选题：切换该答案的选中状态。
    /// 未知题目 id 属于防御性分支，记录日志后忽略，不会中断会话
    pub fn select_answer(&mut self, question_id: i64, answer: &str) {
        if !self.state.is_in_progress() {
            warn!("当前状态不允许作答，忽略选择 (题目 {})", question_id);
            return;
        }

        let question_type = match self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .map(|q| q.question_type)
        {
            Some(t) => t,
            None => {
                warn!("题目 {} 不在本次会话中，忽略选择", question_id);
                return;
            }
        };

        let selected = self.selections.entry(question_id).or_default();

        match question_type {
            QuestionType::SingleChoice => {
                selected.clear();
                selected.push(answer.to_string());
            }
            QuestionType::MultipleChoice => {
                if let Some(pos) = selected.iter().position(|a| a == answer) {
                    selected.remove(pos);
                } else {
                    selected.push(answer.to_string());
                }
            }
        }
    }

    /// 前往下一题（最后一题时不动）
    pub fn go_next(&mut self) {
        if !self.questions.is_empty() && self.current_index < self.questions.len() - 1 {
            self.current_index += 1;
        }
    }

    /// 返回上一题（第一题时不动）
    pub fn go_previous(&mut self) {
        if self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    /// 开始提交，构建提交载荷
    ///
    /// 每道已加载的题目对应一条记录，顺序与题目一致，
    /// 未作答的题目提交空选择集合。
    /// 同一会话最多允许一次在途提交，重复调用会被拒绝
    pub fn begin_submit(&mut self) -> AppResult<Vec<TestAnswer>> {
        match self.state {
            SessionState::Loading => {
                return Err(AppError::Session(SessionError::NotLoaded));
            }
            SessionState::Submitting => {
                return Err(AppError::Session(SessionError::SubmissionInFlight));
            }
            SessionState::Completed(_) => {
                return Err(AppError::Session(SessionError::AlreadyCompleted));
            }
            SessionState::InProgress => {}
        }

        let answers = self
            .questions
            .iter()
            .map(|question| TestAnswer {
                question_id: question.id,
                selected_answers: self
                    .selections
                    .get(&question.id)
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect();

        self.state = SessionState::Submitting;
        Ok(answers)
    }

    /// 提交成功，进入终态
    pub fn complete_submit(&mut self, result: TestResult) -> AppResult<()> {
        if !self.state.is_submitting() {
            return Err(AppError::Session(SessionError::NoSubmissionInFlight));
        }
        self.state = SessionState::Completed(result);
        Ok(())
    }

    /// 提交失败，回到答题状态
    ///
    /// 已作答的选择和当前题目位置保持不变，用户可以重试
    pub fn fail_submit(&mut self) {
        if self.state.is_submitting() {
            self.state = SessionState::InProgress;
        } else {
            warn!("没有在途提交，忽略 fail_submit");
        }
    }

    // ========== 只读访问 ==========

    pub fn test_id(&self) -> i64 {
        self.test_id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn questions(&self) -> &[TestQuestion] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// 当前题目（题目未加载时为 None）
    pub fn current_question(&self) -> Option<&TestQuestion> {
        self.questions.get(self.current_index)
    }

    /// 某道题当前的选择集合
    pub fn selected_for(&self, question_id: i64) -> &[String] {
        self.selections
            .get(&question_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// 答题进度百分比
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            0.0
        } else {
            (self.current_index + 1) as f64 / self.questions.len() as f64 * 100.0
        }
    }

    pub fn is_first_question(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.current_index == self.questions.len() - 1
    }

    /// 已作答（选择集合非空）的题目数量
    pub fn answered_count(&self) -> usize {
        self.selections.values().filter(|v| !v.is_empty()).count()
    }

    /// 评分结果（仅完成后可用）
    pub fn result(&self) -> Option<&TestResult> {
        match &self.state {
            SessionState::Completed(result) => Some(result),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;

    fn question(id: i64, question_type: QuestionType, answers: &[&str]) -> TestQuestion {
        TestQuestion {
            id,
            content: format!("题目 {}", id),
            question_type,
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// 创建测试用的会话：q1 单选 [A,B]，q2 多选 [C,D,E]，q3 单选 [F,G]
    fn loaded_session() -> TestSession {
        let mut session = TestSession::new(42);
        session
            .load_questions(vec![
                question(1, QuestionType::SingleChoice, &["A", "B"]),
                question(2, QuestionType::MultipleChoice, &["C", "D", "E"]),
                question(3, QuestionType::SingleChoice, &["F", "G"]),
            ])
            .unwrap();
        session
    }

    fn result_fixture() -> TestResult {
        TestResult {
            score: 100.0,
            total_questions: 3,
            correct_answers: 3,
            question_results: Vec::new(),
        }
    }

    #[test]
    fn test_index_stays_clamped() {
        let mut session = loaded_session();

        // 越过末尾
        for _ in 0..10 {
            session.go_next();
        }
        assert_eq!(session.current_index(), 2);
        assert!(session.is_last_question());

        // 越过开头
        for _ in 0..10 {
            session.go_previous();
        }
        assert_eq!(session.current_index(), 0);
        assert!(session.is_first_question());

        // 任意往返序列仍在范围内
        for step in 0..100 {
            if step % 3 == 0 {
                session.go_previous();
            } else {
                session.go_next();
            }
            assert!(session.current_index() < session.questions().len());
        }
    }

    #[test]
    fn test_single_choice_replaces_selection() {
        let mut session = loaded_session();

        session.select_answer(1, "A");
        assert_eq!(session.selected_for(1), ["A"]);

        // 再选另一个答案会替换，而不是追加
        session.select_answer(1, "B");
        assert_eq!(session.selected_for(1), ["B"]);

        session.select_answer(1, "B");
        assert_eq!(session.selected_for(1), ["B"]);
    }

    #[test]
    fn test_multiple_choice_toggles_selection() {
        let mut session = loaded_session();

        session.select_answer(2, "C");
        session.select_answer(2, "D");
        assert_eq!(session.selected_for(2), ["C", "D"]);

        // 再次选择同一答案会取消
        session.select_answer(2, "C");
        assert_eq!(session.selected_for(2), ["D"]);

        // 两次切换回到原状
        session.select_answer(2, "E");
        session.select_answer(2, "E");
        assert_eq!(session.selected_for(2), ["D"]);
    }

    #[test]
    fn test_double_toggle_leaves_empty_selection() {
        let mut session = loaded_session();

        session.select_answer(2, "C");
        session.select_answer(2, "C");
        assert!(session.selected_for(2).is_empty());

        // 未作答的题目提交空集合
        let answers = session.begin_submit().unwrap();
        assert_eq!(answers[1].selected_answers, Vec::<String>::new());
    }

    #[test]
    fn test_unknown_question_is_ignored() {
        let mut session = loaded_session();

        session.select_answer(999, "A");

        assert_eq!(session.answered_count(), 0);
        assert!(session.state().is_in_progress());
    }

    #[test]
    fn test_submit_payload_covers_all_questions_in_order() {
        let mut session = loaded_session();

        session.select_answer(1, "A");
        session.select_answer(2, "C");
        session.select_answer(2, "D");
        // q3 从未作答

        let answers = session.begin_submit().unwrap();

        assert_eq!(answers.len(), 3);
        assert_eq!(
            answers,
            vec![
                TestAnswer {
                    question_id: 1,
                    selected_answers: vec!["A".to_string()],
                },
                TestAnswer {
                    question_id: 2,
                    selected_answers: vec!["C".to_string(), "D".to_string()],
                },
                TestAnswer {
                    question_id: 3,
                    selected_answers: Vec::new(),
                },
            ]
        );
        assert!(session.state().is_submitting());
    }

    #[test]
    fn test_second_submit_while_in_flight_is_rejected() {
        let mut session = loaded_session();

        session.begin_submit().unwrap();

        let err = session.begin_submit().unwrap_err();
        assert!(matches!(
            err,
            AppError::Session(SessionError::SubmissionInFlight)
        ));
    }

    #[test]
    fn test_failed_submit_keeps_selections_and_index() {
        let mut session = loaded_session();

        session.select_answer(1, "A");
        session.select_answer(2, "C");
        session.go_next();
        assert_eq!(session.current_index(), 1);

        session.begin_submit().unwrap();
        session.fail_submit();

        assert!(session.state().is_in_progress());
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.selected_for(1), ["A"]);
        assert_eq!(session.selected_for(2), ["C"]);

        // 失败后可以重试，载荷不变
        let answers = session.begin_submit().unwrap();
        assert_eq!(answers[0].selected_answers, ["A"]);
        assert_eq!(answers[1].selected_answers, ["C"]);
    }

    #[test]
    fn test_complete_submit_reaches_terminal_state() {
        let mut session = loaded_session();

        session.begin_submit().unwrap();
        session.complete_submit(result_fixture()).unwrap();

        assert!(session.state().is_completed());
        assert_eq!(session.result().unwrap().correct_answers, 3);

        // 终态之后不允许再次提交
        let err = session.begin_submit().unwrap_err();
        assert!(matches!(
            err,
            AppError::Session(SessionError::AlreadyCompleted)
        ));
    }

    #[test]
    fn test_empty_question_list_never_reaches_in_progress() {
        let mut session = TestSession::new(7);

        let err = session.load_questions(Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            AppError::Session(SessionError::NoQuestions { test_id: 7 })
        ));
        assert!(!session.state().is_in_progress());

        // 未加载时不能提交
        let err = session.begin_submit().unwrap_err();
        assert!(matches!(err, AppError::Session(SessionError::NotLoaded)));
    }

    #[test]
    fn test_questions_cannot_be_loaded_twice() {
        let mut session = loaded_session();

        let err = session
            .load_questions(vec![question(9, QuestionType::SingleChoice, &["X"])])
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Session(SessionError::AlreadyLoaded)
        ));
        assert_eq!(session.questions().len(), 3);
    }

    #[test]
    fn test_progress_percentage() {
        let mut session = loaded_session();

        assert!((session.progress() - 33.33).abs() < 0.34);
        session.go_next();
        assert!((session.progress() - 66.67).abs() < 0.34);
        session.go_next();
        assert!((session.progress() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_full_run_payload_scenario() {
        // 端到端场景：q1 选 A，q2 选 C 和 D，q3 从未作答
        let mut session = loaded_session();

        session.select_answer(1, "A");
        session.go_next();
        session.select_answer(2, "C");
        session.select_answer(2, "D");
        session.go_next();
        session.go_next();

        let answers = session.begin_submit().unwrap();
        let expected: Vec<(i64, Vec<&str>)> =
            vec![(1, vec!["A"]), (2, vec!["C", "D"]), (3, vec![])];

        for (answer, (id, selected)) in answers.iter().zip(expected) {
            assert_eq!(answer.question_id, id);
            assert_eq!(answer.selected_answers, selected);
        }
    }
}
