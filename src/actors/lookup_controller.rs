use crate::error::{LookupError, Result};
use crate::lookup::LookupMachine;
use crate::models::{LookupState, LookupStats, ProfileRecord, SearchKey};
use crate::source::ProfileSource;
use ractor::{rpc::CallResult, Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

const CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Actor that owns the lookup state machine
pub struct LookupController;

/// State for the lookup controller
pub struct LookupControllerState {
    machine: LookupMachine,
    source: Arc<dyn ProfileSource>,
    publisher: watch::Sender<LookupState>,
    stats: LookupStats,
}

/// Messages the controller can handle
#[derive(Debug)]
pub enum LookupMessage {
    /// User submitted a key; replies with the state after the transition
    Submit {
        key: String,
        reply: RpcReplyPort<LookupState>,
    },
    /// A spawned fetch finished
    FetchCompleted {
        key: SearchKey,
        result: Result<ProfileRecord>,
    },
    /// Get counters
    GetStats(RpcReplyPort<LookupStats>),
    /// Stop the controller
    Shutdown,
}

/// Arguments for starting the controller
pub struct LookupControllerArgs {
    pub source: Arc<dyn ProfileSource>,
    pub publisher: watch::Sender<LookupState>,
}

impl LookupController {
    /// Spawn the controller and return a handle to it
    pub async fn spawn(source: Arc<dyn ProfileSource>) -> Result<LookupHandle> {
        let (publisher, receiver) = watch::channel(LookupState::Idle);
        let args = LookupControllerArgs { source, publisher };

        let (actor, _handle) = Actor::spawn(None, LookupController, args)
            .await
            .map_err(|e| LookupError::ControllerError(format!("Failed to spawn controller: {}", e)))?;

        info!("Lookup controller started");
        Ok(LookupHandle { actor, receiver })
    }
}

#[ractor::async_trait]
impl Actor for LookupController {
    type Msg = LookupMessage;
    type State = LookupControllerState;
    type Arguments = LookupControllerArgs;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> std::result::Result<Self::State, ActorProcessingErr> {
        Ok(LookupControllerState {
            machine: LookupMachine::new(),
            source: args.source,
            publisher: args.publisher,
            stats: LookupStats::default(),
        })
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> std::result::Result<(), ActorProcessingErr> {
        match message {
            LookupMessage::Submit { key, reply } => {
                state.stats.submissions += 1;

                if let Some(key) = state.machine.submit(&key) {
                    info!(key = %key, "Looking up profile");
                    state.stats.fetches_started += 1;
                    spawn_fetch(myself, state.source.clone(), key);
                } else {
                    debug!("Search cleared");
                }

                let current = state.machine.state().clone();
                state.publisher.send_replace(current.clone());

                if reply.send(current).is_err() {
                    warn!("Submitter went away before the reply was sent");
                }
            }
            LookupMessage::FetchCompleted { key, result } => {
                state.stats.fetches_completed += 1;

                if let Err(e) = &result {
                    warn!(key = %key, "Profile lookup failed: {}", e);
                }

                if state.machine.complete(&key, result) {
                    state.publisher.send_replace(state.machine.state().clone());
                } else {
                    state.stats.stale_responses_discarded += 1;
                }
            }
            LookupMessage::GetStats(reply) => {
                if reply.send(state.stats.clone()).is_err() {
                    warn!("Stats requester went away");
                }
            }
            LookupMessage::Shutdown => {
                info!("Lookup controller shutting down");
                myself.stop(None);
            }
        }

        Ok(())
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> std::result::Result<(), ActorProcessingErr> {
        info!(
            submissions = state.stats.submissions,
            fetches_completed = state.stats.fetches_completed,
            stale_responses_discarded = state.stats.stale_responses_discarded,
            "Lookup controller stopped"
        );
        Ok(())
    }
}

// Runs the fetch off the actor so the mailbox stays responsive; the result
// comes back as a message and goes through the staleness check. A panicking
// source still reports back, so the key never stays loading.
fn spawn_fetch(myself: ActorRef<LookupMessage>, source: Arc<dyn ProfileSource>, key: SearchKey) {
    tokio::spawn(async move {
        let fetch_key = key.clone();
        let fetch = tokio::spawn(async move { source.fetch_profile(fetch_key.as_str()).await });

        let result = match fetch.await {
            Ok(result) => result,
            Err(e) => {
                error!(key = %key, "Profile fetch task failed: {}", e);
                Err(LookupError::ControllerError(format!("profile fetch aborted: {}", e)))
            }
        };

        if let Err(e) = myself.send_message(LookupMessage::FetchCompleted { key, result }) {
            error!("Failed to deliver fetch result: {}", e);
        }
    });
}

/// Cloneable handle used by rendering surfaces
#[derive(Clone)]
pub struct LookupHandle {
    actor: ActorRef<LookupMessage>,
    receiver: watch::Receiver<LookupState>,
}

impl LookupHandle {
    /// Submit a key. Returns once the transition is applied, so a non-empty
    /// key always comes back as `Loading`.
    pub async fn submit(&self, key: impl Into<String>) -> Result<LookupState> {
        let key = key.into();
        let call_result = self
            .actor
            .call(|reply| LookupMessage::Submit { key, reply }, Some(CALL_TIMEOUT))
            .await
            .map_err(|e| LookupError::ControllerError(format!("Failed to submit key: {}", e)))?;

        unwrap_call(call_result, "submit")
    }

    /// Latest state snapshot
    pub fn state(&self) -> LookupState {
        self.receiver.borrow().clone()
    }

    /// Observer that is notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<LookupState> {
        self.receiver.clone()
    }

    /// Wait until the current lookup is no longer loading
    pub async fn settled(&self) -> Result<LookupState> {
        let mut receiver = self.receiver.clone();
        let state = receiver
            .wait_for(|state| !state.is_loading())
            .await
            .map_err(|_| LookupError::ControllerError("controller stopped".to_string()))?;
        Ok(state.clone())
    }

    pub async fn stats(&self) -> Result<LookupStats> {
        let call_result = self
            .actor
            .call(LookupMessage::GetStats, Some(CALL_TIMEOUT))
            .await
            .map_err(|e| LookupError::ControllerError(format!("Failed to get stats: {}", e)))?;

        unwrap_call(call_result, "stats")
    }

    pub fn shutdown(&self) -> Result<()> {
        self.actor
            .send_message(LookupMessage::Shutdown)
            .map_err(|e| LookupError::ControllerError(format!("Failed to shutdown controller: {}", e)))
    }
}

fn unwrap_call<T>(call_result: CallResult<T>, operation: &str) -> Result<T> {
    match call_result {
        CallResult::Success(value) => Ok(value),
        CallResult::Timeout => Err(LookupError::ControllerError(format!(
            "Timeout waiting for {} reply",
            operation
        ))),
        CallResult::SenderError => Err(LookupError::ControllerError(format!(
            "Controller dropped the {} reply",
            operation
        ))),
    }
}
