//! End-to-end engine scenarios driven by a deterministic in-process
//! model provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use strata_backend::core::errors::ApiError;
use strata_backend::llm::{ChatMessage, ModelProvider, Role};
use strata_backend::rag::RagEngine;

const CANNED_ANSWER: &str = "Plain-language summary for the strata council.";

/// Maps text onto keyword-count vectors so similarity is reproducible
/// without a real embedding model. The trailing bias keeps keyword-free
/// text off the origin.
fn fake_embedding(text: &str) -> Vec<f32> {
    let lower = text.to_lowercase();
    let mut vector: Vec<f32> = ["balcony", "parkade", "rainscreen", "maintenance"]
        .iter()
        .map(|term| lower.matches(term).count() as f32)
        .collect();
    vector.push(1.0);
    vector
}

#[derive(Default)]
struct MockProvider {
    chats: Mutex<Vec<Vec<ChatMessage>>>,
    embed_calls: AtomicUsize,
}

impl MockProvider {
    fn last_chat(&self) -> Vec<ChatMessage> {
        self.chats
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no chat call recorded")
    }

    fn chat_count(&self) -> usize {
        self.chats.lock().unwrap().len()
    }

    fn embed_call_count(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn health_check(&self) -> Result<bool, ApiError> {
        Ok(true)
    }

    async fn chat(&self, messages: &[ChatMessage], _model_id: &str) -> Result<String, ApiError> {
        self.chats.lock().unwrap().push(messages.to_vec());
        Ok(CANNED_ANSWER.to_string())
    }

    async fn embed(&self, inputs: &[String], _model_id: &str) -> Result<Vec<Vec<f32>>, ApiError> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        Ok(inputs.iter().map(|text| fake_embedding(text)).collect())
    }
}

async fn engine_with_mock() -> (Arc<MockProvider>, RagEngine) {
    let mock = Arc::new(MockProvider::default());
    let engine = RagEngine::new(mock.clone(), "embed-test", "chat-test")
        .await
        .expect("engine should seed from the mock");
    (mock, engine)
}

#[tokio::test]
async fn construction_seeds_the_base_pool() {
    let (mock, engine) = engine_with_mock().await;
    assert_eq!(engine.base_len(), 4);
    assert_eq!(engine.report_len(), 0);
    // One batched call for the whole catalog.
    assert_eq!(mock.embed_call_count(), 1);
}

#[tokio::test]
async fn empty_report_ingests_as_inert() {
    let (mock, engine) = engine_with_mock().await;

    let report_id = engine
        .ingest_report("empty.pdf", "")
        .await
        .expect("empty ingestion is legal");

    assert!(!report_id.is_empty());
    assert_eq!(engine.report_len(), 0);
    // Seeding aside, no embedding call was made for zero chunks.
    assert_eq!(mock.embed_call_count(), 1);

    let whitespace_id = engine
        .ingest_report("blank.pdf", "   \n\t  ")
        .await
        .expect("whitespace-only ingestion is legal");
    assert_ne!(report_id, whitespace_id);
    assert_eq!(engine.report_len(), 0);
}

#[tokio::test]
async fn three_thousand_chars_become_three_stored_chunks() {
    let (_mock, engine) = engine_with_mock().await;

    let text = "balcony ".repeat(375);
    assert_eq!(text.len(), 3000);

    let report_id = engine
        .ingest_report("inspection.pdf", &text)
        .await
        .expect("ingestion should succeed");

    assert_eq!(engine.report_len(), 3);

    // All three chunks are retrievable under the new report id and come
    // back ahead of the base results.
    let answer = engine
        .answer("balcony condition?", &[], Some(&report_id))
        .await
        .expect("answer should succeed");

    assert_eq!(answer.sources.len(), 5);
    for source in &answer.sources[..3] {
        assert!(source.contains("inspection.pdf"));
        assert!(source.contains(&format!("report_id={}", report_id)));
    }
    for source in &answer.sources[3..] {
        assert!(source.contains("(id=kb-"));
    }
}

#[tokio::test]
async fn unscoped_question_uses_base_knowledge_only() {
    let (mock, engine) = engine_with_mock().await;

    engine
        .ingest_report("inspection.pdf", &"balcony ".repeat(375))
        .await
        .expect("ingestion should succeed");

    let answer = engine
        .answer("How long do balcony membranes last?", &[], None)
        .await
        .expect("answer should succeed");

    assert_eq!(answer.text, CANNED_ANSWER);
    assert!(answer.sources.len() <= 2);
    assert!(answer.sources.iter().all(|s| s.contains("(id=kb-")));

    // The assembled context never cites the uploaded file.
    let messages = mock.last_chat();
    let user_message = &messages.last().expect("user message").content;
    assert!(user_message.contains("[Source: "));
    assert!(!user_message.contains("inspection.pdf"));
}

#[tokio::test]
async fn scoping_to_a_chunkless_report_still_answers() {
    let (mock, engine) = engine_with_mock().await;

    // A report id that exists but owns no chunks.
    let inert_id = engine
        .ingest_report("empty.pdf", "")
        .await
        .expect("empty ingestion is legal");

    let answer = engine
        .answer("Is hairline parkade cracking serious?", &[], Some(&inert_id))
        .await
        .expect("answer should succeed");

    // Base results only, generation still ran.
    assert!(!answer.sources.is_empty());
    assert!(answer.sources.len() <= 2);
    assert!(answer.sources.iter().all(|s| s.contains("(id=kb-")));
    assert_eq!(answer.text, CANNED_ANSWER);
    assert_eq!(mock.chat_count(), 1);
}

#[tokio::test]
async fn report_scope_never_leaks_across_reports() {
    let (_mock, engine) = engine_with_mock().await;

    let balcony_report = engine
        .ingest_report("balcony.pdf", &"balcony membrane leak. ".repeat(20))
        .await
        .expect("ingestion should succeed");
    let parkade_report = engine
        .ingest_report("parkade.pdf", &"parkade slab crack. ".repeat(20))
        .await
        .expect("ingestion should succeed");

    let answer = engine
        .answer("What about the parkade?", &[], Some(&parkade_report))
        .await
        .expect("answer should succeed");

    for source in &answer.sources {
        assert!(!source.contains(&balcony_report));
        assert!(!source.contains("balcony.pdf"));
    }
    assert!(answer
        .sources
        .iter()
        .any(|s| s.contains(&format!("report_id={}", parkade_report))));
}

#[tokio::test]
async fn sources_align_with_context_blocks() {
    let (mock, engine) = engine_with_mock().await;

    let report_id = engine
        .ingest_report("audit.pdf", &"rainscreen assessment. ".repeat(30))
        .await
        .expect("ingestion should succeed");

    let answer = engine
        .answer("Does the building need a rainscreen?", &[], Some(&report_id))
        .await
        .expect("answer should succeed");

    let messages = mock.last_chat();
    let user_message = &messages.last().expect("user message").content;

    let block_count = user_message.matches("[Source: ").count();
    assert_eq!(answer.sources.len(), block_count);

    // Nth source describes the Nth block: report blocks first, base after.
    let report_sources = answer
        .sources
        .iter()
        .take_while(|s| s.contains("report_id="))
        .count();
    let first_base_block = user_message
        .find("[Source: Balcony")
        .or_else(|| user_message.find("[Source: Parkade"))
        .or_else(|| user_message.find("[Source: Rainscreen"))
        .or_else(|| user_message.find("[Source: Maintenance"));
    let first_report_block = user_message.find("[Source: audit.pdf");

    assert!(report_sources > 0);
    if let (Some(report_pos), Some(base_pos)) = (first_report_block, first_base_block) {
        assert!(report_pos < base_pos);
    }
}

#[tokio::test]
async fn history_is_forwarded_verbatim_between_system_and_question() {
    let (mock, engine) = engine_with_mock().await;

    let history = vec![
        ChatMessage {
            role: Role::User,
            content: "Earlier: is the membrane failing?".to_string(),
        },
        ChatMessage {
            role: Role::Assistant,
            content: "Earlier: it is near end of life.".to_string(),
        },
    ];

    engine
        .answer("Should we budget for replacement?", &history, None)
        .await
        .expect("answer should succeed");

    let messages = mock.last_chat();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[1].content, "Earlier: is the membrane failing?");
    assert_eq!(messages[2].content, "Earlier: it is near end of life.");
    assert_eq!(messages[3].role, Role::User);
    assert!(messages[3]
        .content
        .contains("Should we budget for replacement?"));
}

#[tokio::test]
async fn system_prompt_prioritizes_the_report_only_when_scoped() {
    let (mock, engine) = engine_with_mock().await;

    let report_id = engine
        .ingest_report("report.pdf", "Maintenance backlog details.")
        .await
        .expect("ingestion should succeed");

    engine
        .answer("What first?", &[], Some(&report_id))
        .await
        .expect("answer should succeed");
    let scoped_system = mock.last_chat()[0].content.clone();
    assert!(scoped_system.contains("Give priority to information coming from that report"));

    engine
        .answer("What first?", &[], None)
        .await
        .expect("answer should succeed");
    let unscoped_system = mock.last_chat()[0].content.clone();
    assert!(!unscoped_system.contains("Give priority to information coming from that report"));
}
