// src/web/state.rs
// Web server state management

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Result;
use crate::llm::PromptService;
use crate::session::{Action, Effect, Session};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The single in-memory editing session
    pub session: Arc<Mutex<Session>>,

    /// Analyze / parse / optimize backend
    pub service: Arc<dyn PromptService>,
}

/// Result of `POST /api/actions`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
    pub session: Session,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copied: Option<String>,
}

impl AppState {
    pub fn new(session: Session, service: Arc<dyn PromptService>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            service,
        }
    }

    pub async fn snapshot(&self) -> Session {
        self.session.lock().await.clone()
    }

    /// Run one action to completion. The session lock is released while a
    /// service call is pending, so other actions are served meanwhile.
    ///
    /// The service call and its `resolve` run on a spawned task: if the caller
    /// goes away (client disconnect), the reply is still applied and the
    /// in-flight flag cleared.
    pub async fn apply(&self, action: Action) -> Result<ActionOutcome> {
        let effect = self.session.lock().await.dispatch(action)?;

        let copied = match effect {
            Effect::None => None,
            Effect::Copy(text) => Some(text),
            Effect::Request(request) => {
                debug!(request = request.name(), "Running service request unlocked");
                let session = Arc::clone(&self.session);
                let service = Arc::clone(&self.service);
                let task = tokio::spawn(async move {
                    let reply = request.execute(service.as_ref()).await;
                    session.lock().await.resolve(reply)
                });
                task.await??;
                None
            }
        };

        Ok(ActionOutcome {
            session: self.snapshot().await,
            copied,
        })
    }
}
