//! Types shared by the PainKiller crates: domain models returned by the store
//! and the request/response bodies of the HTTP API.

pub mod api;
pub mod models;
