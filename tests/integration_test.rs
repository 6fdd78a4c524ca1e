use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use wiki_quiz::infrastructure::{ChatModel, FetchedPage, PageFetcher};
use wiki_quiz::services::AiQuizGenerator;
use wiki_quiz::utils::logging;
use wiki_quiz::{generate_fallback, Config, QuizError, QuizFlow, QuizStore};

const URL: &str = "https://en.wikipedia.org/wiki/Ada_Lovelace";

struct FakeWikipedia {
    html: String,
}

#[async_trait]
impl PageFetcher for FakeWikipedia {
    async fn get(&self, _url: &str) -> Result<FetchedPage> {
        Ok(FetchedPage {
            status: 200,
            body: self.html.clone(),
        })
    }
}

enum ModelBehaviour {
    Reply(String),
    Fail,
}

struct FakeModel {
    behaviour: ModelBehaviour,
    calls: AtomicUsize,
}

impl FakeModel {
    fn new(behaviour: ModelBehaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ChatModel for FakeModel {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            ModelBehaviour::Reply(text) => Ok(text.clone()),
            ModelBehaviour::Fail => anyhow::bail!("connection reset by peer"),
        }
    }
}

fn paragraphs() -> Vec<String> {
    vec![
        "Augusta Ada King, Countess of Lovelace was an English mathematician and writer, chiefly known for her work on Charles Babbage's proposed mechanical general-purpose computer.".to_string(),
        "She was the first to recognise that the machine had applications beyond pure calculation, and is often regarded as the first computer programmer in history.".to_string(),
        "Lovelace was the only legitimate child of poet Lord Byron and reformer Anne Isabella Milbanke, and her interest in mathematics was encouraged by her mother.".to_string(),
    ]
}

fn article_html() -> String {
    let body: String = paragraphs()
        .iter()
        .map(|p| format!("<p>{}</p><p>[edit]</p>", p))
        .collect();
    format!(
        r#"<html><body><nav><p>Jump to navigation and other links that are long enough to count</p></nav>
<h1 id="firstHeading" class="firstHeading">Ada Lovelace</h1>
<div id="mw-content-text">{}</div></body></html>"#,
        body
    )
}

fn ai_reply(count: usize) -> String {
    let questions: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"question":"Question {i}?","options":["Babbage","Byron","Turing","Newton"],"correct_answer":"Babbage","explanation":"From the text.","difficulty":"{}"}}"#,
                ["easy", "medium", "hard"][i % 3]
            )
        })
        .collect();
    format!(
        "```json\n{{\"summary\":\"Ada Lovelace was a mathematician. She wrote the first program.\",\"questions\":[{}],\"related_topics\":[\"Charles Babbage\",\"Analytical Engine\",\"Lord Byron\",\"Computer programming\",\"Mathematics\"]}}\n```",
        questions.join(",")
    )
}

fn flow_with(model: Option<Arc<FakeModel>>) -> QuizFlow {
    let fetcher = Arc::new(FakeWikipedia {
        html: article_html(),
    });
    let model = model.map(|m| m as Arc<dyn ChatModel>);
    QuizFlow::with_parts(fetcher, Box::new(AiQuizGenerator::new(model)))
}

#[tokio::test]
async fn test_ai_path_used_when_model_replies() {
    logging::init(false);

    let model = FakeModel::new(ModelBehaviour::Reply(ai_reply(5)));
    let outcome = flow_with(Some(model.clone())).run(URL, 5).await.unwrap();

    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.title(), "Ada Lovelace");
    assert_eq!(outcome.article.content, paragraphs().join("\n\n"));
    assert_eq!(outcome.quiz.questions.len(), 5);
    assert_eq!(outcome.quiz.questions[0].correct_answer, "Babbage");
    assert_eq!(outcome.quiz.related_topics.len(), 5);
}

#[tokio::test]
async fn test_model_error_falls_back_without_escaping() {
    let model = FakeModel::new(ModelBehaviour::Fail);
    let outcome = flow_with(Some(model.clone())).run(URL, 5).await.unwrap();

    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.quiz.questions.len(), 5);
    for q in &outcome.quiz.questions {
        assert_eq!(q.options.len(), 4);
        q.check_structure().unwrap();
    }

    let fallback_only = flow_with(None).run(URL, 5).await.unwrap();
    assert_eq!(outcome.quiz, fallback_only.quiz);
}

#[tokio::test]
async fn test_malformed_model_output_falls_back() {
    let model = FakeModel::new(ModelBehaviour::Reply("```json\n{\"questions\": []}\n```".to_string()));
    let outcome = flow_with(Some(model)).run(URL, 7).await.unwrap();

    assert_eq!(
        outcome.quiz,
        generate_fallback(&outcome.article.content, "Ada Lovelace", 7)
    );
}

#[tokio::test]
async fn test_wrong_question_count_from_model_falls_back() {
    let model = FakeModel::new(ModelBehaviour::Reply(ai_reply(3)));
    let outcome = flow_with(Some(model)).run(URL, 6).await.unwrap();

    assert_eq!(outcome.quiz.questions.len(), 6);
    assert_eq!(
        outcome.quiz.questions[0].correct_answer,
        "Information from paragraph 1"
    );
}

#[tokio::test]
async fn test_page_without_content_container() {
    let fetcher = Arc::new(FakeWikipedia {
        html: r#"<html><body><h1 class="firstHeading">Empty</h1></body></html>"#.to_string(),
    });
    let flow = QuizFlow::with_parts(fetcher, Box::new(AiQuizGenerator::new(None)));

    let err = flow.run(URL, 5).await.unwrap_err();
    assert!(matches!(err, QuizError::Parse { .. }));
    assert_eq!(err.kind(), "ParseError");
}

#[tokio::test]
async fn test_flow_result_is_persisted_and_reloaded() {
    let folder = std::env::temp_dir().join(format!("wiki_quiz_it_{}", std::process::id()));
    let store = QuizStore::new(&folder);

    let outcome = flow_with(None).run(URL, 5).await.unwrap();
    let record = store.save(URL, &outcome.article, &outcome.quiz).await.unwrap();

    assert_eq!(store.load_quiz(record.id).await.unwrap(), outcome.quiz);
    assert!(store
        .list()
        .await
        .unwrap()
        .iter()
        .any(|s| s.id == record.id && s.title == "Ada Lovelace"));

    let _ = std::fs::remove_dir_all(&folder);
}

#[tokio::test]
#[ignore] // 需要网络和 GEMINI_API_KEY：cargo test -- --ignored
async fn test_live_generation() {
    logging::init(true);

    let config = Config::from_env();
    let flow = QuizFlow::new(&config).expect("创建流程失败");

    let outcome = flow
        .run("https://en.wikipedia.org/wiki/Alan_Turing", 5)
        .await
        .expect("生成测验失败");

    assert_eq!(outcome.quiz.questions.len(), 5);
    println!("{}", serde_json::to_string_pretty(&outcome.quiz).unwrap());
}
