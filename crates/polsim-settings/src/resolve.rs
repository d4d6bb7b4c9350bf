use crate::model::PolsimConfigV1;
use camino::Utf8PathBuf;

pub const DEFAULT_LOG_PATH: &str = "access_logs.csv";
pub const DEFAULT_MARKDOWN_OUT: &str = "simulation_result.txt";

/// Values given on the command line. `None`/`false` defers to the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub log: Option<Utf8PathBuf>,
    pub out: Option<Utf8PathBuf>,
    pub json_out: Option<Utf8PathBuf>,
    pub fail_on_change: bool,
    pub parallel: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub log: Utf8PathBuf,
    pub out: Utf8PathBuf,
    pub json_out: Option<Utf8PathBuf>,
    pub fail_on_change: bool,
    pub parallel: bool,
}

pub fn resolve_config(cfg: PolsimConfigV1, overrides: Overrides) -> ResolvedConfig {
    let log = overrides
        .log
        .or(cfg.log.map(Utf8PathBuf::from))
        .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_LOG_PATH));

    let out = overrides
        .out
        .or(cfg.out.map(Utf8PathBuf::from))
        .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_MARKDOWN_OUT));

    let json_out = overrides.json_out.or(cfg.json_out.map(Utf8PathBuf::from));

    ResolvedConfig {
        log,
        out,
        json_out,
        fail_on_change: overrides.fail_on_change || cfg.fail_on_change.unwrap_or(false),
        parallel: overrides.parallel || cfg.parallel.unwrap_or(false),
    }
}
