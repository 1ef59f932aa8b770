//! Infrastructure layer: concrete `Evaluator` backends. The HTTP client talks
//! to a remote evaluator endpoint; the rules engine answers in-process.

pub mod http;
pub mod rules;
