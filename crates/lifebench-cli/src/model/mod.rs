pub mod config;
pub mod openrouter;
pub mod prompt;
pub mod provider;
pub mod runner;
pub mod test_case;
