use serde::Deserialize;

/// Which wire convention a validator speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireMode {
    /// Metadata in `hedwig_*` transport attributes, bare payload body.
    #[default]
    Attributes,
    /// Metadata and payload packed into one container envelope body.
    Container,
}

/// Controls validator behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Wire convention used for both serialize and deserialize.
    pub wire_mode: WireMode,
    /// When true, messages with a format version other than `1.0` are rejected.
    pub check_format_version: bool,
}

impl ValidatorConfig {
    /// Transport-attributes mode with defaults.
    pub fn attributes() -> Self {
        Self {
            wire_mode: WireMode::Attributes,
            ..Self::default()
        }
    }

    /// Container mode with defaults.
    pub fn container() -> Self {
        Self {
            wire_mode: WireMode::Container,
            ..Self::default()
        }
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            wire_mode: WireMode::default(),
            check_format_version: true,
        }
    }
}
