//! Per-user sessions and the registry that routes inputs to them.

use super::capture::{self, CaptureStep};
use super::report::{self, ReportStep};
use super::{Advance, FlowContext, Input, Reply, Selection, Step, advance};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    Capture(CaptureStep),
    Report(ReportStep),
}

impl FlowState {
    /// Whether the state expects a typed message rather than a button.
    pub fn awaits_text(&self) -> bool {
        matches!(
            self,
            FlowState::Capture(
                CaptureStep::AwaitingAmount
                    | CaptureStep::AwaitingCategoryCustom { .. }
                    | CaptureStep::AwaitingPaymentMethodCustom { .. }
            ) | FlowState::Report(
                ReportStep::AwaitingStartDateManual | ReportStep::AwaitingEndDateManual { .. }
            )
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            FlowState::Capture(step) => match step {
                CaptureStep::AwaitingAmount => "awaiting_amount",
                CaptureStep::AwaitingCategory { .. } => "awaiting_category",
                CaptureStep::AwaitingCategoryCustom { .. } => "awaiting_category_custom",
                CaptureStep::AwaitingPaymentMethod { .. } => "awaiting_payment_method",
                CaptureStep::AwaitingPaymentMethodCustom { .. } => "awaiting_payment_method_custom",
                CaptureStep::AwaitingNecessity { .. } => "awaiting_necessity",
            },
            FlowState::Report(step) => match step {
                ReportStep::AwaitingPeriodChoice => "awaiting_period_choice",
                ReportStep::AwaitingStartDateManual => "awaiting_start_date",
                ReportStep::AwaitingEndDateManual { .. } => "awaiting_end_date",
                ReportStep::AwaitingReportType { .. } => "awaiting_report_type",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Capture,
    Report,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Channel the flow was started in; typed input elsewhere is not consumed.
    pub channel_id: u64,
    /// Message carrying the currently active choices. Selections from any other message
    /// are stale, including while the transport has not reported the id yet.
    pub prompt_message_id: Option<u64>,
    pub state: FlowState,
}

/// What happened to a routed input.
#[derive(Debug, PartialEq, Eq)]
pub enum Dispatch {
    NoSession,
    /// Typed text the current state does not consume.
    Ignored,
    /// A choice from an old message or for a different step.
    Stale,
    Replied { replies: Vec<Reply>, finished: bool },
}

pub struct Started {
    pub replies: Vec<Reply>,
    /// The session this start displaced, if any.
    pub replaced: Option<Session>,
}

pub const REPLACED_NOTICE: &str = "A operação anterior foi descartada.";

/// All live sessions, at most one per user.
#[derive(Default)]
pub struct Conversations {
    sessions: RwLock<HashMap<u64, Session>>,
}

impl Conversations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a flow, replacing any session the user already had.
    pub async fn start(&self, user_id: u64, channel_id: u64, kind: FlowKind) -> Started {
        let (state, mut replies) = match kind {
            FlowKind::Capture => {
                let (step, replies) = capture::begin();
                (FlowState::Capture(step), replies)
            }
            FlowKind::Report => {
                let (step, replies) = report::begin();
                (FlowState::Report(step), replies)
            }
        };
        let session = Session {
            channel_id,
            prompt_message_id: None,
            state,
        };
        let replaced = self.sessions.write().await.insert(user_id, session);
        if let Some(old) = &replaced {
            tracing::debug!(target="flow", user_id, state=old.state.name(), "session replaced");
            replies.insert(0, Reply::send(REPLACED_NOTICE));
        }
        Started { replies, replaced }
    }

    /// Discards the user's session, returning it so the caller can tidy its prompt.
    pub async fn cancel(&self, user_id: u64) -> Option<Session> {
        let removed = self.sessions.write().await.remove(&user_id);
        if let Some(s) = &removed {
            tracing::debug!(target="flow", user_id, state=s.state.name(), "session cancelled");
        }
        removed
    }

    /// Records the message that now carries the session's choices.
    pub async fn attach_prompt(&self, user_id: u64, message_id: u64) {
        if let Some(s) = self.sessions.write().await.get_mut(&user_id) {
            s.prompt_message_id = Some(message_id);
        }
    }

    pub async fn session(&self, user_id: u64) -> Option<Session> {
        self.sessions.read().await.get(&user_id).cloned()
    }

    /// Cheap pre-check so ordinary chat is not routed through the engine.
    pub async fn awaits_text(&self, user_id: u64, channel_id: u64) -> bool {
        self.sessions
            .read()
            .await
            .get(&user_id)
            .is_some_and(|s| s.channel_id == channel_id && s.state.awaits_text())
    }

    pub async fn dispatch_text(
        &self,
        user_id: u64,
        channel_id: u64,
        text: String,
        ctx: &FlowContext<'_>,
    ) -> Dispatch {
        let Some(session) = self.take(user_id).await else {
            return Dispatch::NoSession;
        };
        if session.channel_id != channel_id {
            self.restore(user_id, session).await;
            return Dispatch::Ignored;
        }
        self.run(user_id, session, Input::Text(text), ctx, Dispatch::Ignored)
            .await
    }

    pub async fn dispatch_selection(
        &self,
        user_id: u64,
        message_id: u64,
        selection: Selection,
        ctx: &FlowContext<'_>,
    ) -> Dispatch {
        let Some(session) = self.take(user_id).await else {
            return Dispatch::NoSession;
        };
        if session.prompt_message_id != Some(message_id) {
            self.restore(user_id, session).await;
            return Dispatch::Stale;
        }
        self.run(user_id, session, Input::Select(selection), ctx, Dispatch::Stale)
            .await
    }

    async fn run(
        &self,
        user_id: u64,
        session: Session,
        input: Input,
        ctx: &FlowContext<'_>,
        on_reject: Dispatch,
    ) -> Dispatch {
        let Session {
            channel_id,
            prompt_message_id,
            state,
        } = session;
        let from = state.name();
        match advance(state, input, ctx).await {
            Advance::Rejected(state) => {
                self.restore(
                    user_id,
                    Session {
                        channel_id,
                        prompt_message_id,
                        state,
                    },
                )
                .await;
                on_reject
            }
            Advance::Moved(transition) => {
                let finished = match transition.step {
                    Step::Continue(next) => {
                        tracing::debug!(target="flow", user_id, from, to=next.name(), "transition");
                        self.restore(
                            user_id,
                            Session {
                                channel_id,
                                prompt_message_id: None,
                                state: next,
                            },
                        )
                        .await;
                        false
                    }
                    Step::Done => {
                        tracing::debug!(target="flow", user_id, from, "flow finished");
                        true
                    }
                };
                Dispatch::Replied {
                    replies: transition.replies,
                    finished,
                }
            }
        }
    }

    async fn take(&self, user_id: u64) -> Option<Session> {
        self.sessions.write().await.remove(&user_id)
    }

    // A session started while this one was out of the map wins.
    async fn restore(&self, user_id: u64, session: Session) {
        self.sessions
            .write()
            .await
            .entry(user_id)
            .or_insert(session);
    }
}
