//! Application layer: the `SubmissionEngine` that sequences validation,
//! transport and result classification for each submission attempt.

pub mod engine;
