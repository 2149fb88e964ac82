use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use pinka_status::{Config, ParserOptions, StatusParser};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let flags = xflags::parse_or_exit! {
        /// Activity document, in JSON
        required path: PathBuf
        /// Canonical URI of the sending actor
        required --actor-uri ACTOR_URI: String
        /// Followers collection of the sending actor
        optional --followers FOLLOWERS: String
        /// Configuration file
        optional -c,--config CONFIG: PathBuf
    };

    let config = match &flags.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let text = fs::read_to_string(&flags.path)
        .with_context(|| format!("unable to read {}", flags.path.display()))?;
    let document: Value = serde_json::from_str(&text).context("invalid JSON document")?;

    let mut options = ParserOptions::new(flags.actor_uri);
    if let Some(followers) = flags.followers {
        options = options.with_followers_collection(followers);
    }
    let parser = StatusParser::new(&document, options).with_config(config.parser);
    if !parser.is_object_inlined() {
        info!(uri = ?parser.uri(), "object is not inlined; nothing to parse");
    }
    let status = parser.to_status()?;
    println!("{}", serde_json::to_string_pretty(&status)?);

    Ok(())
}
