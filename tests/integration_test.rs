//! 真实后端集成测试
//!
//! 需要考试系统后端运行在 EXAM_API_BASE_URL（默认 http://localhost:8080/api）

use take_test_submit::clients::ExamClient;
use take_test_submit::models::TestStartRequest;
use take_test_submit::utils::logging;
use take_test_submit::workflow::TestFlow;
use take_test_submit::Config;

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_get_disciplines() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    let client = ExamClient::new(&config).expect("创建客户端失败");

    let disciplines = client.get_disciplines().await.expect("获取学科失败");
    println!("找到 {} 个学科", disciplines.len());
}

#[tokio::test]
#[ignore]
async fn test_full_test_run() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    let client = ExamClient::new(&config).expect("创建客户端失败");

    // 获取学科，默认全选
    let disciplines = client.get_disciplines().await.expect("获取学科失败");
    assert!(!disciplines.is_empty(), "服务端应该至少有一个学科");

    // 创建测试
    let request = TestStartRequest {
        student_name: "集成测试".to_string(),
        student_email: "integration@test.local".to_string(),
        included_discipline_ids: disciplines.iter().map(|d| d.id).collect(),
        excluded_discipline_ids: Vec::new(),
        number_of_questions: 5,
    };
    request.validate().expect("请求校验失败");

    let started = client.start_test(&request).await.expect("创建测试失败");
    println!("测试已创建: id={}", started.id);

    // 取题并作答：每道题选第一个选项
    let flow = TestFlow::new(client);
    let mut session = flow.load_session(started.id).await.expect("加载会话失败");

    let picks: Vec<(i64, String)> = session
        .questions()
        .iter()
        .map(|q| (q.id, q.answers[0].clone()))
        .collect();
    for (question_id, answer) in picks {
        session.select_answer(question_id, &answer);
    }

    // 交卷
    flow.submit(&mut session).await.expect("交卷失败");

    let result = session.result().expect("应该有评分结果");
    println!("得分: {:.0}%", result.score);
    assert_eq!(result.total_questions as usize, session.questions().len());
}
