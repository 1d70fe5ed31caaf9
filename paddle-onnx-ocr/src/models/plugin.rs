use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Languages advertised to the host
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Auto,
    ChineseSimplified,
    ChineseTraditional,
    English,
    Korean,
    Japanese,
}

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language::Auto,
    Language::ChineseSimplified,
    Language::ChineseTraditional,
    Language::English,
    Language::Korean,
    Language::Japanese,
];

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::ChineseSimplified => write!(f, "chinese_simplified"),
            Self::ChineseTraditional => write!(f, "chinese_traditional"),
            Self::English => write!(f, "english"),
            Self::Korean => write!(f, "korean"),
            Self::Japanese => write!(f, "japanese"),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "chinese_simplified" => Ok(Self::ChineseSimplified),
            "chinese_traditional" => Ok(Self::ChineseTraditional),
            "english" => Ok(Self::English),
            "korean" => Ok(Self::Korean),
            "japanese" => Ok(Self::Japanese),
            _ => Err(format!("Unknown language: {s}")),
        }
    }
}

/// Plugin settings. There is nothing to configure yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {}

/// Plugin metadata supplied by the host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PluginMetadata {
    pub plugin_directory: PathBuf,
    pub assembly_name: String,
}
