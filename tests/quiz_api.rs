use axum_test::TestServer;
use serde_json::Value;
use tempfile::TempDir;

use jyutping_notebook::config::QuizSettings;
use jyutping_notebook::db::{self, DbPool};
use jyutping_notebook::domain::Word;
use jyutping_notebook::handlers;
use jyutping_notebook::state::AppState;

const NUMBERS: [(&str, &str); 12] = [
  ("jat1", "one"),
  ("ji6", "two"),
  ("saam1", "three"),
  ("sei3", "four"),
  ("ng5", "five"),
  ("luk6", "six"),
  ("cat1", "seven"),
  ("baat3", "eight"),
  ("gau2", "nine"),
  ("sap6", "ten"),
  ("sap6 jat1", "eleven"),
  ("sap6 ji6", "twelve"),
];

fn word(topic_id: i64, jyutping: &str, english: &str) -> Word {
  Word {
    id: 0,
    topic_id,
    jyutping: jyutping.to_string(),
    english: english.to_string(),
    cantonese: None,
    notes: String::new(),
    loc: 1,
    audio_file: None,
  }
}

fn test_server(pool: DbPool) -> TestServer {
  let app = handlers::router(AppState::new(pool, QuizSettings::default()));
  TestServer::new(app).unwrap()
}

fn empty_pool(temp: &TempDir) -> DbPool {
  db::init_db(&temp.path().join("jyutping.db")).unwrap()
}

fn numbers_pool(temp: &TempDir) -> DbPool {
  let pool = empty_pool(temp);
  {
    let conn = pool.lock().unwrap();
    let topic = db::insert_topic(&conn, "Numbers", 1, None).unwrap();
    for (jyutping, english) in NUMBERS {
      db::insert_word(&conn, &word(topic, jyutping, english)).unwrap();
    }
  }
  pool
}

#[tokio::test]
async fn test_quiz_of_ten_from_words() {
  let temp = TempDir::new().unwrap();
  let server = test_server(numbers_pool(&temp));

  let response = server
    .get("/quiz")
    .add_query_param("question_count", 10)
    .add_query_param("include_audio", false)
    .await;
  response.assert_status_ok();

  let body: Value = response.json();
  let questions = body["questions"].as_array().unwrap();
  assert_eq!(questions.len(), 10);

  // One topic and no sentences leave only translation questions
  for question in questions {
    let question_type = question["question_type"].as_str().unwrap();
    assert!(
      ["jyutping_to_english", "english_to_jyutping", "english_to_jyutping_text"]
        .contains(&question_type),
      "unexpected {}",
      question_type
    );
  }
}

#[tokio::test]
async fn test_quiz_from_starter_content() {
  let temp = TempDir::new().unwrap();
  let pool = empty_pool(&temp);
  db::seed_starter_content(&pool.lock().unwrap()).unwrap();
  let server = test_server(pool);

  let response = server.get("/quiz").add_query_param("question_count", 10).await;
  response.assert_status_ok();
  let body: Value = response.json();
  assert_eq!(body["questions"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_invalid_question_count() {
  let temp = TempDir::new().unwrap();
  let server = test_server(numbers_pool(&temp));

  let response = server.get("/quiz").add_query_param("question_count", 7).await;
  response.assert_status_bad_request();
  let body: Value = response.json();
  assert_eq!(body["error"], "Please choose a quiz length of 10, 25, 50.");
}

#[tokio::test]
async fn test_not_enough_items() {
  let temp = TempDir::new().unwrap();
  let server = test_server(numbers_pool(&temp));

  let response = server.get("/quiz").add_query_param("question_count", 25).await;
  response.assert_status_bad_request();
  let body: Value = response.json();
  assert!(body["error"].as_str().unwrap().contains("not have enough words"));
}

#[tokio::test]
async fn test_missing_question_count() {
  let temp = TempDir::new().unwrap();
  let server = test_server(numbers_pool(&temp));

  let response = server.get("/quiz").await;
  response.assert_status_bad_request();
}

#[tokio::test]
async fn test_generation_failure() {
  let temp = TempDir::new().unwrap();
  let pool = empty_pool(&temp);
  {
    // Ten transcriptions of one gloss can never be told apart
    let conn = pool.lock().unwrap();
    let topic = db::insert_topic(&conn, "Rice", 1, None).unwrap();
    for (jyutping, _) in NUMBERS.iter().take(10) {
      db::insert_word(&conn, &word(topic, jyutping, "rice")).unwrap();
    }
  }
  let server = test_server(pool);

  let response = server
    .get("/quiz")
    .add_query_param("question_count", 10)
    .add_query_param("include_audio", false)
    .await;
  response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
  let body: Value = response.json();
  assert!(body["error"].as_str().unwrap().contains("add more words"));
}
