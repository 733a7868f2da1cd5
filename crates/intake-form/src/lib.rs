//! # intake-form — Submission Accumulator and Form Session
//!
//! - **Table** (`table.rs`): [`RecordTable`], the append-only,
//!   insertion-ordered dataset of submitted records, and the
//!   [`ColumnSpec`] list handed to a [`TableRenderer`].
//!
//! - **Accumulator** (`accumulator.rs`): runs the exhaustive validation
//!   pass and appends a record only when it comes back empty.
//!
//! - **Mode** (`mode.rs`): [`ValidationMode`], when incremental
//!   per-field validation fires.
//!
//! - **Session** (`session.rs`): [`FormSession`], the explicit state
//!   container owning the form values, the per-field errors, the
//!   [`CascadeController`](intake_state::CascadeController), and the
//!   accumulator. The presentation layer forwards change, blur, and submit
//!   events into it unmodified and reads bound values back out.

pub mod accumulator;
pub mod mode;
pub mod session;
pub mod table;

pub use accumulator::Accumulator;
pub use mode::ValidationMode;
pub use session::FormSession;
pub use table::{default_columns, ColumnSpec, RecordTable, TableRenderer};
