pub mod risk_profile;
pub mod terminal_config;

pub use risk_profile::RiskProfile;
pub use terminal_config::TerminalConfig;
