//! Client side of the evaluation service exchange.
//!
//! One multipart POST per finished recording; the response carries the
//! recognized text and a 0-100 accuracy score. Anything else -- transport
//! failure, non-2xx status, unparseable body, out-of-range score -- is a
//! failed exchange.

mod client;
mod messages;

pub use client::{EvalError, EvaluationClient};
pub use messages::{EvaluationResult, VerdictMessage};
