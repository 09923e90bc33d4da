//! Request extractors and middleware.
//!
//! - [`validation::ValidatedJson`] -- Parses a JSON body and runs its `validator` rules.
//! - [`validation::ValidatedQuery`] -- Same for query strings.
//! - `DbSession` -- Request-scoped database session (see [`session`]).
//! - [`cors::reject_disallowed_preflight`] -- Turns preflights from unknown origins into 400s.

pub mod cors;
pub mod session;
pub mod validation;
