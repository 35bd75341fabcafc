//! Build-time Configuration
//!
//! The Supabase project is baked in at compile time. Without it the board
//! runs local-only: no sign-in and nothing persisted.

use kanban_core::repository::SupabaseConfig;

pub const APP_NAME: &str = "YouKanBan";

/// Lines kept by the in-memory log buffer
pub const LOG_CAPACITY: usize = rolling_logger::DEFAULT_CAPACITY;

/// Message shown by the auth forms when no backend is configured
pub const NO_BACKEND_MESSAGE: &str = "Accounts are unavailable: no backend is configured";

pub fn supabase_config() -> Option<SupabaseConfig> {
    SupabaseConfig::from_parts(
        option_env!("YOUKANBAN_SUPABASE_URL"),
        option_env!("YOUKANBAN_SUPABASE_ANON_KEY"),
    )
}
