//! Tests for loading question banks from files and HTTP.

use std::io::Write;
use std::sync::Arc;

use axum::{Json, Router, http::header, routing::get};
use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_millions::{
    FileSource, GameController, HttpSource, OptionLabel, QuestionSource, TOTAL_QUESTIONS,
};

const TOML_BANK: &str = r#"
[[questions]]
prompt = "Largest planet?"
correct = "B"
options = { A = "Mars", B = "Jupiter", C = "Venus", D = "Earth" }

[[questions]]
prompt = "Chemical symbol for water?"
correct = "a"
options = { A = "H2O", B = "CO2", C = "O2", D = "NaCl" }

[[questions]]
prompt = "  largest PLANET?  "
correct = "C"
options = { A = "1", B = "2", C = "3", D = "4" }
"#;

fn sheet(count: usize) -> String {
    let mut sheet = String::from("Pergunta,Opção A,Opção B,Opção C,Opção D,Resposta Certa\n");
    for i in 0..count {
        sheet.push_str(&format!("Sheet question {i}?,w,x,y,z,C\n"));
    }
    sheet
}

fn bank_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Create temp file");
    file.write_all(content.as_bytes()).expect("Write bank");
    file
}

fn json_bank(count: usize) -> serde_json::Value {
    let questions: Vec<_> = (0..count)
        .map(|i| {
            serde_json::json!({
                "prompt": format!("Remote question {i}?"),
                "correct": "D",
                "options": {"A": "w", "B": "x", "C": "y", "D": "z"}
            })
        })
        .collect();
    serde_json::json!({ "questions": questions })
}

#[tokio::test]
async fn test_toml_file_drops_duplicate_prompts() {
    let file = bank_file(".toml", TOML_BANK);
    let pool = FileSource::new(file.path()).fetch_pool().await.unwrap();

    assert_eq!(pool.len(), 2);
    assert_eq!(*pool.questions()[0].correct(), OptionLabel::B);
    assert_eq!(*pool.questions()[1].correct(), OptionLabel::A);
}

#[tokio::test]
async fn test_json_file_bare_array() {
    let bank = json_bank(12);
    let file = bank_file(".json", &bank["questions"].to_string());
    let pool = FileSource::new(file.path()).fetch_pool().await.unwrap();
    assert_eq!(pool.len(), 12);
}

#[tokio::test]
async fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileSource::new(dir.path().join("absent.toml"));
    let err = source.fetch_pool().await.unwrap_err();
    assert!(err.message.contains("Failed to read question bank"));
}

#[tokio::test]
async fn test_malformed_bank_is_an_error() {
    let file = bank_file(".toml", "[[questions]]\nprompt = 3\n");
    assert!(FileSource::new(file.path()).fetch_pool().await.is_err());
}

#[tokio::test]
async fn test_shipped_bank_can_start_a_game() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/questions.toml");
    let pool = FileSource::new(path).fetch_pool().await.unwrap();
    assert!(pool.len() > TOTAL_QUESTIONS);

    let controller = GameController::start(Arc::new(pool), StdRng::seed_from_u64(1));
    assert!(controller.is_ok());
}

#[tokio::test]
async fn test_http_source_fetches_json_bank() {
    let app = Router::new().route("/bank.json", get(|| async { Json(json_bank(15)) }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let source = HttpSource::new(format!("http://{addr}/bank.json"));
    let pool = source.fetch_pool().await.unwrap();
    assert_eq!(pool.len(), 15);

    let missing = HttpSource::new(format!("http://{addr}/nope.json"));
    assert!(missing.fetch_pool().await.is_err());
}

#[tokio::test]
async fn test_csv_sheet_file() {
    let file = bank_file(".csv", &sheet(12));
    let pool = FileSource::new(file.path()).fetch_pool().await.unwrap();
    assert_eq!(pool.len(), 12);
    assert_eq!(*pool.questions()[0].correct(), OptionLabel::C);
}

#[tokio::test]
async fn test_csv_sheet_missing_column() {
    let file = bank_file(
        ".csv",
        "Pergunta,Opção A,Opção B,Opção C,Opção D\nQ?,1,2,3,4\n",
    );
    let err = FileSource::new(file.path()).fetch_pool().await.unwrap_err();
    assert!(err.message.contains("Resposta Certa"));
}

#[tokio::test]
async fn test_http_source_fetches_published_sheet() {
    let app = Router::new()
        .route(
            "/pub",
            get(|| async { ([(header::CONTENT_TYPE, "text/csv")], sheet(14)) }),
        )
        .route("/export", get(|| async { sheet(13) }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let by_header = HttpSource::new(format!("http://{addr}/pub?gid=0"));
    assert_eq!(by_header.fetch_pool().await.unwrap().len(), 14);

    let by_query = HttpSource::new(format!("http://{addr}/export?single=true&output=csv"));
    assert_eq!(by_query.fetch_pool().await.unwrap().len(), 13);
}
