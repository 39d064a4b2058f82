//! Behavioural test suites for the query server.

mod bootstrap_behaviour;
mod query_behaviour;
mod support;
