//! The per-user conversation engine.
//!
//! A flow is a finite state machine fed one input per chat turn. Each turn yields an
//! ordered list of [`Reply`] values that the transport executes in order: a selection
//! always finalizes the message it came from before the next prompt is sent.
//!
//! Nothing here knows about Discord. `handler.rs` and `interactions/` translate serenity
//! events into [`Input`]s and replies into serenity builders.

pub mod capture;
pub mod report;
pub mod session;

pub use session::{Conversations, Dispatch, FlowKind, FlowState, Session};

use crate::database::ExpenseGateway;
use crate::report::{PeriodShortcut, ReportKind};
use chrono::NaiveDate;

/// A button choice, independent of how the transport encodes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Category(String),
    CategoryOther,
    PaymentMethod(String),
    PaymentMethodOther,
    Necessity(bool),
    Period(PeriodShortcut),
    PeriodManual,
    Report(ReportKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Select(Selection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Secondary,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub selection: Selection,
    pub label: String,
    pub tone: Tone,
}

impl Choice {
    pub fn new(selection: Selection, label: impl Into<String>, tone: Tone) -> Self {
        Self {
            selection,
            label: label.into(),
            tone,
        }
    }
}

/// A new outbound message, optionally carrying rows of choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub rows: Vec<Vec<Choice>>,
}

impl Prompt {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rows: Vec::new(),
        }
    }

    pub fn with_rows(text: impl Into<String>, rows: Vec<Vec<Choice>>) -> Self {
        Self {
            text: text.into(),
            rows,
        }
    }

    pub fn has_choices(&self) -> bool {
        self.rows.iter().any(|r| !r.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Replace the text of the message the selection came from and drop its choices.
    Finalize(String),
    Send(Prompt),
}

impl Reply {
    pub fn send(text: impl Into<String>) -> Self {
        Reply::Send(Prompt::text(text))
    }
}

/// What a transition needs from the outside world.
pub struct FlowContext<'a> {
    pub gateway: &'a dyn ExpenseGateway,
    pub user_id: u64,
    /// Read once per request so shortcut ranges never straddle midnight.
    pub today: NaiveDate,
}

#[derive(Debug)]
pub enum Step {
    Continue(FlowState),
    Done,
}

#[derive(Debug)]
pub struct Transition {
    pub step: Step,
    pub replies: Vec<Reply>,
}

impl Transition {
    pub fn stay(state: FlowState, replies: Vec<Reply>) -> Self {
        Self {
            step: Step::Continue(state),
            replies,
        }
    }

    pub fn done(replies: Vec<Reply>) -> Self {
        Self {
            step: Step::Done,
            replies,
        }
    }
}

/// Result of feeding one input to a state.
#[derive(Debug)]
pub enum Advance {
    Moved(Transition),
    /// The state does not take this kind of input; it is handed back untouched.
    Rejected(FlowState),
}

pub async fn advance(state: FlowState, input: Input, ctx: &FlowContext<'_>) -> Advance {
    match state {
        FlowState::Capture(step) => capture::advance(step, input, ctx).await,
        FlowState::Report(step) => report::advance(step, input, ctx).await,
    }
}

/// Splits choices into rows of at most `width`.
pub(crate) fn rows_of(choices: Vec<Choice>, width: usize) -> Vec<Vec<Choice>> {
    let mut rows = Vec::new();
    let mut current = Vec::with_capacity(width);
    for choice in choices {
        current.push(choice);
        if current.len() == width {
            rows.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}
