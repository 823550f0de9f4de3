// Research flow with fake backends
//
// Covers the stage order, placeholder text when context sources fail,
// error propagation from the model and indexing of finished reports.

use crate::common::{
    create_default_test_services, create_test_services, create_test_services_with_store,
    long_report, sample_results, FailingKnowledge, FailingModel, FailingSearch, ScriptedModel,
    StaticSearch,
};
use researchgpt::core::error::ResearchError;
use researchgpt::core::prompts::PromptStyle;
use researchgpt::core::research::{ResearchRequest, ResearchSession};
use researchgpt::core::types::TIMESTAMP_FORMAT;
use std::sync::Arc;

#[tokio::test]
async fn test_first_run_uses_web_sources_and_empty_kb() {
    let (services, _temp, model) = create_default_test_services();

    let outcome = services
        .research
        .run(&ResearchRequest::new("  quantum error correction  "))
        .await
        .expect("research should succeed");

    let prompt = model.last_prompt();
    assert!(prompt.contains("Query: quantum error correction\n"));
    assert!(prompt.contains(
        "Source 1:\nTitle: Quantum computing - Wikipedia\n\
         Content: A quantum computer exploits superposition and entanglement.\n\
         URL: https://en.wikipedia.org/wiki/Quantum_computing\n"
    ));
    assert!(prompt.contains("Source 3:"));
    assert!(prompt.contains("Knowledge Base:\nKnowledge base empty.\n"));

    assert_eq!(outcome.record.query, "quantum error correction");
    assert_eq!(outcome.record.report, long_report());
    assert_eq!(outcome.sources, sample_results());
    assert_eq!(outcome.kb_hits, 0);
    assert!(outcome.indexed);
    assert_eq!(outcome.chunks_indexed, 3);
    assert_eq!(services.knowledge.count(), 3);
}

#[tokio::test]
async fn test_timestamp_is_local_time_format() {
    let (services, _temp, _model) = create_default_test_services();

    let outcome = services
        .research
        .run(&ResearchRequest::new("timestamps"))
        .await
        .unwrap();

    assert!(
        chrono::NaiveDateTime::parse_from_str(&outcome.record.timestamp, TIMESTAMP_FORMAT).is_ok(),
        "unexpected timestamp: {}",
        outcome.record.timestamp
    );
}

#[tokio::test]
async fn test_second_run_recalls_first_report() {
    let (services, _temp, model) = create_default_test_services();

    services
        .research
        .run(&ResearchRequest::new("quantum error correction"))
        .await
        .unwrap();
    let second = services
        .research
        .run(&ResearchRequest::new("logical qubits"))
        .await
        .unwrap();

    let prompt = model.last_prompt();
    assert!(prompt.contains("Past Research 1:\nQuery: quantum error correction\nDate: "));
    assert!(prompt.contains("Past Research 3:"));
    assert!(!prompt.contains("Past Research 4:"));
    assert_eq!(second.kb_hits, 3);

    // Each excerpt is the first 200 characters followed by "..."
    let excerpt: String = long_report().chars().take(200).collect();
    assert!(prompt.contains(&format!("Content: {excerpt}...\n")));
}

#[tokio::test]
async fn test_web_failure_becomes_placeholder() {
    let model = Arc::new(ScriptedModel::new("report"));
    let (services, _temp) = create_test_services(Arc::new(FailingSearch), model.clone());

    let outcome = services
        .research
        .run(&ResearchRequest::new("anything"))
        .await
        .expect("a failed web search must not fail the run");

    assert!(model
        .last_prompt()
        .contains("Web Sources:\nSearch error: Web search failed: connection refused\n"));
    assert!(outcome.sources.is_empty());
}

#[tokio::test]
async fn test_kb_lookup_failure_becomes_placeholder() {
    let model = Arc::new(ScriptedModel::new(long_report()));
    let web = Arc::new(StaticSearch::new(sample_results()));
    let (services, _temp) =
        create_test_services_with_store(web, model.clone(), Arc::new(FailingKnowledge));

    let outcome = services
        .research
        .run(&ResearchRequest::new("quantum error correction"))
        .await
        .expect("a failed knowledge-base lookup must not fail the run");

    assert!(model
        .last_prompt()
        .contains("Knowledge Base:\nKB search unavailable.\n"));
    assert_eq!(outcome.kb_hits, 0);
    assert_eq!(outcome.sources, sample_results());
}

#[tokio::test]
async fn test_kb_insert_failure_still_returns_report() {
    let model = Arc::new(ScriptedModel::new(long_report()));
    let web = Arc::new(StaticSearch::new(sample_results()));
    let (services, _temp) =
        create_test_services_with_store(web, model, Arc::new(FailingKnowledge));

    let mut session = ResearchSession::new();
    let outcome = session
        .research(&services.research, &ResearchRequest::new("quantum error correction"))
        .await
        .expect("a failed insert must not fail the run");

    assert_eq!(outcome.record.report, long_report());
    assert!(!outcome.indexed);
    assert_eq!(outcome.chunks_indexed, 0);
    assert_eq!(session.history().len(), 1);
}

#[tokio::test]
async fn test_model_failure_propagates_and_skips_indexing() {
    let web = Arc::new(StaticSearch::new(sample_results()));
    let (services, _temp) = create_test_services(web, Arc::new(FailingModel));

    let err = services
        .research
        .run(&ResearchRequest::new("anything"))
        .await
        .unwrap_err();

    assert!(err.is_upstream());
    assert!(services.knowledge.is_empty());
}

#[tokio::test]
async fn test_blank_query_rejected_before_any_call() {
    let web = Arc::new(StaticSearch::new(sample_results()));
    let model = Arc::new(ScriptedModel::new("report"));
    let (services, _temp) = create_test_services(web.clone(), model.clone());

    for query in ["", "   ", "\n\t"] {
        match services.research.run(&ResearchRequest::new(query)).await {
            Err(ResearchError::InvalidQuery(msg)) => assert_eq!(msg, "Please enter a question"),
            other => panic!("expected InvalidQuery, got {other:?}"),
        }
    }

    assert_eq!(web.calls(), 0);
    assert!(model.prompts().is_empty());
}

#[tokio::test]
async fn test_overlong_query_rejected() {
    let (services, _temp, model) = create_default_test_services();
    let query = "q".repeat(services.config.research.max_query_length + 1);

    let err = services
        .research
        .run(&ResearchRequest::new(query))
        .await
        .unwrap_err();

    assert!(err.is_bad_request());
    assert!(model.prompts().is_empty());
}

#[tokio::test]
async fn test_without_web_skips_search() {
    let web = Arc::new(StaticSearch::new(sample_results()));
    let model = Arc::new(ScriptedModel::new("report"));
    let (services, _temp) = create_test_services(web.clone(), model.clone());

    let outcome = services
        .research
        .run(&ResearchRequest::new("offline question").without_web())
        .await
        .unwrap();

    assert_eq!(web.calls(), 0);
    assert!(outcome.sources.is_empty());
    assert!(model.last_prompt().contains("Web Sources:\nNo results found.\n"));
}

#[tokio::test]
async fn test_without_kb_neither_reads_nor_writes() {
    let (services, _temp, model) = create_default_test_services();

    services
        .research
        .run(&ResearchRequest::new("quantum error correction"))
        .await
        .unwrap();
    let outcome = services
        .research
        .run(&ResearchRequest::new("quantum error correction").without_kb())
        .await
        .unwrap();

    assert!(model.last_prompt().contains("Knowledge base empty."));
    assert!(!outcome.indexed);
    assert_eq!(outcome.chunks_indexed, 0);
    assert_eq!(services.knowledge.count(), 3);
}

#[tokio::test]
async fn test_template_and_result_overrides() {
    let (services, _temp, model) = create_default_test_services();

    let outcome = services
        .research
        .run(
            &ResearchRequest::new("fusion energy")
                .with_template(PromptStyle::Brief)
                .with_max_results(1),
        )
        .await
        .unwrap();

    let prompt = model.last_prompt();
    assert!(prompt.contains("## Bottom Line"));
    assert!(!prompt.contains("## Executive Summary"));
    assert!(!prompt.contains("Source 2:"));
    assert_eq!(outcome.sources.len(), 1);
}

#[tokio::test]
async fn test_session_records_only_successful_runs() {
    let (services, _temp, _model) = create_default_test_services();
    let mut session = ResearchSession::new();

    session
        .research(&services.research, &ResearchRequest::new("first question"))
        .await
        .unwrap();
    assert!(session
        .research(&services.research, &ResearchRequest::new("   "))
        .await
        .is_err());
    session
        .research(&services.research, &ResearchRequest::new("second question"))
        .await
        .unwrap();

    let queries: Vec<&str> = session
        .history()
        .newest_first()
        .map(|r| r.query.as_str())
        .collect();
    assert_eq!(queries, ["second question", "first question"]);

    assert_eq!(session.history_mut().clear(), 2);
    assert!(session.history().is_empty());
}
