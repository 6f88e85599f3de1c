use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;
use uuid::Uuid;

use super::TaskResult;
use crate::{
    deck::parse_flashcards,
    llm,
};

/// Runs model calls on worker threads and funnels their results back to the
/// UI thread over an mpsc channel drained once per frame.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Self {
        let runtime = Arc::new(Runtime::new().expect("Failed to create TaskManager runtime"));
        let (sender, receiver) = mpsc::channel();

        Self { runtime, receiver, sender }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    /// Request a fresh deck for `topic`. The raw completion is parsed on the
    /// worker; the UI only ever sees cards or an error message.
    pub fn generate_deck(&self, model: String, api_key: String, topic: String, max_cards: u32) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                llm::generate_flashcards(&model, &api_key, &topic, max_cards)
                    .await
                    .map(|raw| parse_flashcards(&raw))
                    .map_err(|e| e.to_string())
            });

            let _ = sender.send(TaskResult::DeckGenerated(result));
        });
    }

    /// Grade a submitted answer. Never produces an error variant: the
    /// evaluation dispatcher folds failures into the feedback itself.
    pub fn evaluate_answer(
        &self,
        model: String,
        api_key: String,
        card_id: Uuid,
        term: String,
        definition: String,
        answer: String,
    ) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let feedback = runtime.block_on(llm::evaluate_answer(
                &model,
                &api_key,
                &term,
                &definition,
                &answer,
            ));

            let _ = sender.send(TaskResult::AnswerEvaluated { card_id, feedback });
        });
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}
