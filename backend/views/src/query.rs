//! Query view-model: free-text questions and CRUD commands.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use std::time::Duration;

use tracing::{debug, info};

use logging::{QueryEvent, QueryEventLogger};
use ontodash_core::{row_keys, OntologyApi, QueryResponse, RefreshBus, Row};

/// Delay between a successful mutation and the dashboard refresh, giving
/// the backend time to persist.
pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_millis(500);

/// Shown when `ask()` is called with a blank question.
pub const EMPTY_QUESTION_MESSAGE: &str = "Veuillez entrer une question";

const SUGGESTED_QUESTIONS: [&str; 5] = [
    "Quelles sont toutes les destinations ?",
    "Quels hébergements ont une certification ?",
    "Quelles activités ont une faible empreinte carbone ?",
    "Quels sont les transports écologiques ?",
    "Quelles sont toutes les personnes ?",
];

const CRUD_EXAMPLES: [&str; 5] = [
    "Ajoute une personne [nom] qui a [age] ans",
    "Modifie l'âge de [nom] à [nouveau_age] ans",
    "Supprime la personne [nom]",
    "Crée une destination [nom] dans le pays [pays]",
    "Ajoute un service [nom] à [prix] euros",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub question: String,
    pub results: Vec<Row>,
    /// SPARQL echoed by the backend for read queries.
    pub sparql: String,
    pub loading: bool,
    pub error: String,
    pub success_message: String,
    /// Action tag of the last mutation (`create`, `update`, ...), or empty.
    pub crud_action: String,
}

/// What a call to [`QueryViewModel::ask`] ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    /// Blank question; nothing was sent.
    Rejected,
    Read { rows: usize },
    /// A refresh has been scheduled on the bus.
    Mutation { action: String },
    Failed,
}

pub struct QueryViewModel {
    api: Arc<dyn OntologyApi>,
    bus: RefreshBus,
    refresh_delay: Duration,
    state: RwLock<QueryState>,
}

impl QueryViewModel {
    pub fn new(api: Arc<dyn OntologyApi>, bus: RefreshBus) -> Self {
        Self {
            api,
            bus,
            refresh_delay: DEFAULT_REFRESH_DELAY,
            state: RwLock::new(QueryState::default()),
        }
    }

    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    pub fn suggested_questions(&self) -> &'static [&'static str] {
        &SUGGESTED_QUESTIONS
    }

    pub fn crud_examples(&self) -> &'static [&'static str] {
        &CRUD_EXAMPLES
    }

    pub fn set_question(&self, question: impl Into<String>) {
        self.write().question = question.into();
    }

    /// Put a suggested question into the input.
    pub fn select_question(&self, question: &str) {
        self.set_question(question);
    }

    /// Edit the question in place (used by the terminal input box).
    pub fn edit_question(&self, edit: impl FnOnce(&mut String)) {
        edit(&mut self.write().question);
    }

    pub fn snapshot(&self) -> QueryState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Column names for the result table.
    pub fn result_keys(&self) -> Vec<String> {
        row_keys(&self.state.read().unwrap_or_else(PoisonError::into_inner).results)
    }

    pub fn clear_messages(&self) {
        let mut state = self.write();
        state.error.clear();
        state.success_message.clear();
        state.results.clear();
        state.sparql.clear();
    }

    /// Submit the current question.
    pub async fn ask(&self) -> AskOutcome {
        let question = {
            let mut state = self.write();
            if state.question.trim().is_empty() {
                state.error = EMPTY_QUESTION_MESSAGE.to_string();
                return AskOutcome::Rejected;
            }
            state.loading = true;
            state.error.clear();
            state.success_message.clear();
            state.results.clear();
            state.sparql.clear();
            state.crud_action.clear();
            state.question.clone()
        };

        QueryEventLogger::log_event(QueryEvent::Question {
            question: question.clone(),
        });
        let response = self.api.ask(&question).await;

        let mut state = self.write();
        state.loading = false;
        match response {
            Ok(QueryResponse::Mutation(mutation)) => {
                QueryEventLogger::log_event(QueryEvent::Mutation {
                    action: mutation.action.clone(),
                    message: mutation.message.clone(),
                });
                state.crud_action = mutation.action.clone();
                state.success_message = mutation.message;
                if let Some(entity) = mutation.entity {
                    state.results = vec![entity];
                }
                drop(state);

                info!(
                    action = %mutation.action,
                    delay_ms = self.refresh_delay.as_millis() as u64,
                    "Scheduling dashboard refresh"
                );
                self.bus.publish_after(self.refresh_delay);
                AskOutcome::Mutation {
                    action: mutation.action,
                }
            }
            Ok(QueryResponse::Read(read)) => {
                QueryEventLogger::log_event(QueryEvent::Answer {
                    rows: read.results.len(),
                    sparql: read.sparql.clone(),
                });
                let rows = read.results.len();
                state.results = read.results;
                state.sparql = read.sparql.unwrap_or_default();
                debug!(rows, "Query answered");
                AskOutcome::Read { rows }
            }
            Err(e) => {
                let message = e.user_message();
                QueryEventLogger::log_event(QueryEvent::Failure {
                    error_msg: e.to_string(),
                });
                state.error = message;
                AskOutcome::Failed
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, QueryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;
    use ontodash_core::{ApiError, MutationResult, ReadResult};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn view(api: &Arc<FakeApi>, bus: &RefreshBus) -> QueryViewModel {
        QueryViewModel::new(api.clone(), bus.clone()).with_refresh_delay(Duration::from_millis(20))
    }

    fn counter(bus: &RefreshBus) -> (Arc<AtomicUsize>, ontodash_core::Subscription) {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let sub = bus.subscribe(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        (hits, sub)
    }

    fn row(value: serde_json::Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn blank_question_is_rejected_without_network() {
        let api = Arc::new(FakeApi::default());
        let vm = view(&api, &RefreshBus::new());
        vm.set_question("   \t ");

        assert_eq!(vm.ask().await, AskOutcome::Rejected);
        assert_eq!(api.calls("ask"), 0);
        assert!(!vm.snapshot().error.is_empty());
    }

    #[tokio::test]
    async fn mutation_sets_message_and_refreshes_once() {
        let api = Arc::new(FakeApi::default());
        let bus = RefreshBus::new();
        let (hits, _sub) = counter(&bus);
        api.push_answer(Ok(QueryResponse::Mutation(MutationResult {
            success: true,
            action: "create".into(),
            message: "Personne 'Ali' créée".into(),
            entity: Some(row(json!({"type": "Personne", "nom": "Ali"}))),
        })));

        let vm = view(&api, &bus);
        vm.set_question("Ajoute une personne Ali qui a 31 ans");
        let outcome = vm.ask().await;

        assert_eq!(outcome, AskOutcome::Mutation { action: "create".into() });
        let state = vm.snapshot();
        assert_eq!(state.success_message, "Personne 'Ali' créée");
        assert_eq!(state.crud_action, "create");
        assert_eq!(state.results, vec![row(json!({"type": "Personne", "nom": "Ali"}))]);
        assert!(!state.loading);

        // Deferred, not immediate.
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn read_result_populates_rows_without_refresh() {
        let api = Arc::new(FakeApi::default());
        let bus = RefreshBus::new();
        let (hits, _sub) = counter(&bus);
        api.push_answer(Ok(QueryResponse::Read(ReadResult {
            success: true,
            results: vec![row(json!({"a": 1, "b": 2}))],
            count: 1,
            sparql: Some("SELECT ?a ?b WHERE { ?s ?a ?b }".into()),
            ..Default::default()
        })));

        let vm = view(&api, &bus);
        vm.set_question("Quelles sont toutes les destinations ?");
        assert_eq!(vm.ask().await, AskOutcome::Read { rows: 1 });

        let state = vm.snapshot();
        assert_eq!(state.results, vec![row(json!({"a": 1, "b": 2}))]);
        assert_eq!(state.sparql, "SELECT ?a ?b WHERE { ?s ?a ?b }");
        assert_eq!(vm.result_keys(), vec!["a".to_string(), "b".to_string()]);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_shows_error_and_suggestion() {
        let api = Arc::new(FakeApi::default());
        api.push_answer(Err(ApiError::Backend {
            status: 400,
            error: Some("Unknown entity".into()),
            suggestion: Some("Did you mean Person?".into()),
        }));

        let vm = view(&api, &RefreshBus::new());
        vm.set_question("Supprime la licorne");
        assert_eq!(vm.ask().await, AskOutcome::Failed);

        let error = vm.snapshot().error;
        assert!(error.contains("Unknown entity"));
        assert!(error.contains("Did you mean Person?"));
    }

    #[tokio::test]
    async fn new_question_clears_previous_output() {
        let api = Arc::new(FakeApi::default());
        api.push_answer(Err(ApiError::Transport("refused".into())));
        let vm = view(&api, &RefreshBus::new());
        vm.set_question("Quelles sont toutes les personnes ?");
        vm.ask().await;
        assert!(!vm.snapshot().error.is_empty());

        vm.ask().await;
        let state = vm.snapshot();
        assert!(state.error.is_empty());
        assert!(state.results.is_empty());
        assert!(vm.result_keys().is_empty());
    }

    #[tokio::test]
    async fn clear_messages_resets_output_but_keeps_question() {
        let api = Arc::new(FakeApi::default());
        api.push_answer(Ok(QueryResponse::Read(ReadResult {
            results: vec![row(json!({"uri": "x", "nom": "y"}))],
            sparql: Some("SELECT".into()),
            ..Default::default()
        })));
        let vm = view(&api, &RefreshBus::new());
        vm.select_question(vm.suggested_questions()[0]);
        vm.ask().await;
        assert_eq!(vm.result_keys(), vec!["uri".to_string(), "nom".to_string()]);

        vm.clear_messages();
        let state = vm.snapshot();
        assert!(state.results.is_empty());
        assert!(state.sparql.is_empty());
        assert_eq!(state.question, "Quelles sont toutes les destinations ?");
    }

    #[test]
    fn examples_are_exposed() {
        let vm = QueryViewModel::new(Arc::new(FakeApi::default()), RefreshBus::new());
        assert_eq!(vm.suggested_questions().len(), 5);
        assert!(vm.crud_examples().iter().any(|q| q.starts_with("Supprime")));
    }
}
