//! Config parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{PolsimConfigV1, SCHEMA_CONFIG_V1};
pub use resolve::{
    Overrides, ResolvedConfig, DEFAULT_LOG_PATH, DEFAULT_MARKDOWN_OUT,
};

/// Parse `polsim.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<PolsimConfigV1> {
    let cfg: PolsimConfigV1 = toml::from_str(input)?;
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema `{schema}` (expected `{SCHEMA_CONFIG_V1}`)");
    }
    Ok(cfg)
}

/// Resolve the effective settings for a run (CLI overrides, then config, then defaults).
pub fn resolve_config(cfg: PolsimConfigV1, overrides: Overrides) -> ResolvedConfig {
    resolve::resolve_config(cfg, overrides)
}

/// Parse and resolve in one step; empty input means "no config file".
pub fn load_config_str(input: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if input.trim().is_empty() {
        PolsimConfigV1::default()
    } else {
        parse_config_toml(input)?
    };
    Ok(resolve_config(cfg, overrides))
}
