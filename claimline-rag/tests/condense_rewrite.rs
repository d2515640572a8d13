//! Deterministic condense rendering, observed through a scripted model.

mod common;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use claimline_rag::{ChatModel, ConversationTurn, RagResult, RagService};

struct ScriptedModel {
    prompts: Arc<Mutex<Vec<String>>>,
    reply: String,
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn model_id(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> RagResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

#[tokio::test]
async fn condense_prompt_is_deterministic() {
    let stub = common::spawn().await;
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let service = RagService::connect(stub.settings())
        .await
        .expect("connect")
        .with_model(Box::new(ScriptedModel {
            prompts: prompts.clone(),
            reply: "What color was the sedan?".to_string(),
        }));

    let history = vec![
        ConversationTurn::new(
            "I want to report an accident",
            "I'm sorry to hear that. What happened?",
        ),
        ConversationTurn::new("A sedan hit my mailbox", "Understood. I noted the vehicle."),
    ];

    service
        .query("What color was it?", &history)
        .await
        .expect("query");
    service
        .query("What color was it?", &history)
        .await
        .expect("query");

    let captured = prompts.lock().unwrap().clone();
    // Two queries, two prompts each: condense, then answer.
    assert_eq!(captured.len(), 4);
    assert_eq!(captured[0], captured[2]);
    assert_eq!(captured[1], captured[3]);

    insta::assert_snapshot!("condense_prompt", captured[0]);
}
