//! Repository Layer
//!
//! Session and persistence collaborators behind async traits, with a
//! Supabase implementation and in-memory implementations.

mod traits;
mod listeners;
mod memory;
pub mod supabase;

#[cfg(test)]
mod tests;

pub use traits::{SessionProvider, TaskRepository};
pub use listeners::{auth_callback, AuthCallback, AuthState, Subscription};
pub use memory::{InMemorySessionProvider, InMemoryTaskRepository};
pub use supabase::{SupabaseAuth, SupabaseConfig, SupabaseTaskRepository};
