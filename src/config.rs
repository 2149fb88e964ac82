use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserConfig,
}

#[derive(Clone, Default, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParserConfig {
    /// Language preferred when a post carries several.
    pub default_language: Option<String>,
    /// Quote policy of posts that do not declare an interaction policy.
    pub default_quote_policy: u32,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Config> {
        toml::from_str(text).context("invalid configuration")
    }

    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read {}", path.display()))?;
        Config::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use anyhow::Result;

    use super::{Config, ParserConfig};

    #[test]
    fn empty_config() -> Result<()> {
        let config = Config::from_toml("")?;
        assert_eq!(config.parser, ParserConfig::default());
        assert_eq!(config.parser.default_quote_policy, 0);
        Ok(())
    }

    #[test]
    fn load_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(
            file,
            r#"
[parser]
default_language = "en"
default_quote_policy = 131072
"#
        )?;
        let config = Config::load(file.path())?;
        assert_eq!(config.parser.default_language.as_deref(), Some("en"));
        assert_eq!(config.parser.default_quote_policy, 2 << 16);
        Ok(())
    }

    #[test]
    fn invalid_config() {
        assert!(Config::from_toml("[parser]\ndefault_quote_policy = \"all\"").is_err());
        assert!(Config::load(std::path::Path::new("/nonexistent/pinka-status.toml")).is_err());
    }
}
