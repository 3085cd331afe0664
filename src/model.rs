//! Shared application state, stored as a `TypeMapKey` in Serenity's global context.

use crate::database::ExpenseGateway;
use crate::flow::{Conversations, FlowContext};
use chrono::{FixedOffset, NaiveDate, Utc};
use serenity::prelude::TypeMapKey;
use std::sync::Arc;

/// The central, shared state of the application.
/// An `Arc<AppState>` lives in the global context so every handler can reach it.
pub struct AppState {
    /// Persistence boundary for expenses.
    pub gateway: Arc<dyn ExpenseGateway>,
    /// Live capture/report sessions, one per user.
    pub conversations: Conversations,
    /// Prefix for text commands, e.g. `!novo`.
    pub prefix: String,
    /// Offset used to decide what "today" is.
    pub utc_offset: FixedOffset,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ExpenseGateway>, prefix: String, utc_offset: FixedOffset) -> Self {
        Self {
            gateway,
            conversations: Conversations::new(),
            prefix,
            utc_offset,
        }
    }

    pub async fn from_ctx(ctx: &serenity::prelude::Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.utc_offset).date_naive()
    }

    /// Context for one turn; `today` is captured here, once.
    pub fn flow_context(&self, user_id: u64) -> FlowContext<'_> {
        FlowContext {
            gateway: self.gateway.as_ref(),
            user_id,
            today: self.today(),
        }
    }
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}
