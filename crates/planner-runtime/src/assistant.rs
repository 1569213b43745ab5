//! Async playback of the scripted planning assistant.
//!
//! [`AssistantRuntime::start`] spawns a tokio task owning a [`ChatScript`].
//! User text goes in over one `mpsc` channel and [`AssistantEvent`]s come out
//! on another, so the front end never shares state with the task.

use std::time::Duration;

use planner_core::chat::{ChatMessage, ChatScript};
use planner_core::models::MediaPlan;
use tokio::sync::mpsc;
use tokio::time;

// ── Public types ──────────────────────────────────────────────────────────────

/// Something the assistant did that the front end should show.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantEvent {
    /// The typing indicator turned on or off.
    Typing(bool),
    /// A new assistant message.
    Message(ChatMessage),
    /// The draft plan behind the "view media plan" action, sent right after
    /// the action message.
    PlanReady(Box<MediaPlan>),
}

// ── AssistantRuntime ──────────────────────────────────────────────────────────

pub struct AssistantRuntime {
    /// Multiplier applied to every scripted delay; `0.0` plays instantly.
    delay_scale: f64,
}

impl Default for AssistantRuntime {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl AssistantRuntime {
    pub fn new(delay_scale: f64) -> Self {
        Self {
            delay_scale: if delay_scale.is_finite() {
                delay_scale.max(0.0)
            } else {
                1.0
            },
        }
    }

    /// Start the assistant task.
    ///
    /// Returns the sender for user text, the receiver for assistant events
    /// and a handle that aborts the task. The greeting is the first event.
    /// The task ends when either channel is closed.
    pub fn start(
        self,
    ) -> (
        mpsc::Sender<String>,
        mpsc::Receiver<AssistantEvent>,
        AssistantHandle,
    ) {
        let (input_tx, input_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel(32);

        let handle = tokio::spawn(async move {
            self.conversation_loop(input_rx, event_tx).await;
        });

        (input_tx, event_rx, AssistantHandle { handle })
    }

    // ── Private implementation ────────────────────────────────────────────

    async fn conversation_loop(
        self,
        mut input_rx: mpsc::Receiver<String>,
        tx: mpsc::Sender<AssistantEvent>,
    ) {
        let mut script = ChatScript::new();
        if tx
            .send(AssistantEvent::Message(script.greeting()))
            .await
            .is_err()
        {
            return;
        }

        while let Some(text) = input_rx.recv().await {
            let replies = script.respond(&text);
            if replies.is_empty() {
                continue;
            }

            for (i, reply) in replies.into_iter().enumerate() {
                let first = i == 0;
                if first && !self.send(&tx, AssistantEvent::Typing(true)).await {
                    return;
                }
                self.pause(reply.delay).await;

                let is_action = reply.message.is_view_plan_action();
                if !self.send(&tx, AssistantEvent::Message(reply.message)).await {
                    return;
                }
                if first && !self.send(&tx, AssistantEvent::Typing(false)).await {
                    return;
                }
                if is_action {
                    let today = chrono::Local::now().date_naive();
                    let plan = script.propose_plan(today);
                    tracing::debug!(client = %plan.client_name, "assistant proposed plan");
                    if !self.send(&tx, AssistantEvent::PlanReady(Box::new(plan))).await {
                        return;
                    }
                }
            }
        }
        tracing::debug!("assistant input closed; exiting loop");
    }

    async fn pause(&self, delay: Duration) {
        if self.delay_scale > 0.0 {
            time::sleep(delay.mul_f64(self.delay_scale)).await;
        }
    }

    /// Returns `false` when the receiver is gone.
    async fn send(&self, tx: &mpsc::Sender<AssistantEvent>, event: AssistantEvent) -> bool {
        match tx.send(event).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "assistant event receiver dropped");
                false
            }
        }
    }
}

// ── AssistantHandle ───────────────────────────────────────────────────────────

/// Handle to the background assistant task.
pub struct AssistantHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl AssistantHandle {
    /// Immediately abort the assistant task.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
