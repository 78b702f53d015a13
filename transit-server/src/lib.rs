//! Transit connection resolver server.
//!
//! A web application that answers: "how do I get from this bus stop to that
//! one, directly or with a bounded number of transfers?"

pub mod cache;
pub mod domain;
pub mod resolver;
pub mod schedule;
pub mod web;
