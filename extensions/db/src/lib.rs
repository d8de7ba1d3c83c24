//! Database driver abstraction for junction.
//!
//! Handlers and middlewares talk to persistence through the
//! [`DatabaseDriver`] trait: connect once at bootstrap, run parameterized
//! statements, get rows back as plain maps. [`PgDriver`] is the sqlx-backed
//! PostgreSQL implementation; [`MemoryDriver`] is a scripted double for
//! tests and demos. The router core never calls any of this.

mod driver;
mod memory;
mod postgres;

pub use driver::{DatabaseDriver, DbError, Row};
pub use memory::MemoryDriver;
pub use postgres::PgDriver;
