//! Central hub for persistence: the pool alias, row models, the raw expense queries and the
//! fault-absorbing gateway the conversation flows talk to.

pub mod expenses;
pub mod gateway;
pub mod init;
pub mod models;

pub use gateway::{ExpenseGateway, PgGateway};
pub use init::DbPool;
