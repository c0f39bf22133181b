//! Duration reconciliation: total work and education time from date intervals.
//!
//! Every orchestrator that needs a duration goes through this module.
//! Nothing here reads the clock or performs I/O: the reference instant is
//! always passed in through [`EvaluationContext`].

use chrono::NaiveDate;
use thiserror::Error;

pub mod handlers;
pub mod interval;
pub mod normalize;
pub mod reconciler;

pub use interval::{EvaluationContext, Interval, IntervalEnd, RawIntervalInput, TotalDuration};
pub use reconciler::{
    interval_inputs, reconcile, reconcile_duration, reconcile_value, Reconciliation,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// A date token could not be read. Recovered by dropping the interval.
    #[error("unrecognised date '{token}'")]
    DateParse { token: String },

    /// Start falls after the resolved end. Recovered by dropping the interval.
    #[error("interval starts {start} but ends {end}")]
    InvalidInterval { start: NaiveDate, end: NaiveDate },

    /// One record in a payload has unreadable keys. Recovered by dropping it.
    #[error("unreadable interval record: {0}")]
    MalformedRecord(String),

    /// The payload as a whole is unusable. Propagated to the caller.
    #[error("interval payload is not a list of records: {0}")]
    InputShape(String),
}
