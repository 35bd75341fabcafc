//! Supabase Collaborators
//!
//! GoTrue (auth) and PostgREST (task rows) over HTTP.

mod config;
mod auth;
mod tasks;
mod wire;

pub use config::SupabaseConfig;
pub use auth::SupabaseAuth;
pub use tasks::{SupabaseTaskRepository, TASKS_TABLE};
