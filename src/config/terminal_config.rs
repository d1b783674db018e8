use crate::alert::AlertSettings;
use crate::config::RiskProfile;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

//everything the terminal hands to the core at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerminalConfig {
    pub risk: RiskProfile,

    //missing settings mean alerts are suppressed
    #[serde(default)]
    pub alerts: Option<AlertSettings>,
}

impl TerminalConfig {
    //load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).context(format!("Failed to read config {:?}", path))?;
        let config: TerminalConfig = serde_json::from_str(&contents)
            .context(format!("Failed to parse config {:?}", path))?;
        config.risk.validate()?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
