//! CLI entry point for polsim.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `polsim-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand};
use polsim_app::{
    change_exit_code, format_evaluation, render_markdown, render_summary, run_eval,
    run_simulation, serialize_report, EvalInput, SimulationInput,
};
use polsim_domain::Request;
use polsim_settings::Overrides;
use polsim_types::ids::{ATTR_ACTION, ATTR_DEPARTMENT, ATTR_RESOURCE, ATTR_ROLE};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const DEFAULT_CONFIG_PATH: &str = "polsim.toml";

/// Request attributes that have their own flags on `polsim eval`.
const FIXED_ATTRIBUTES: [&str; 4] = [ATTR_ROLE, ATTR_DEPARTMENT, ATTR_RESOURCE, ATTR_ACTION];

#[derive(Parser, Debug)]
#[command(
    name = "polsim",
    version,
    about = "Simulate the impact of an access policy change against historical requests",
    subcommand_negates_reqs = true
)]
struct Cli {
    /// Policy currently in force (JSON).
    #[arg(required = true)]
    old_policy: Option<Utf8PathBuf>,

    /// Candidate policy to compare against (JSON).
    #[arg(required = true)]
    new_policy: Option<Utf8PathBuf>,

    /// Historical request log (CSV) [default: access_logs.csv].
    #[arg(long)]
    log: Option<Utf8PathBuf>,

    /// Where to write the Markdown impact report [default: simulation_result.txt].
    #[arg(long)]
    out: Option<Utf8PathBuf>,

    /// Also write a JSON impact report to this path.
    #[arg(long)]
    json_out: Option<Utf8PathBuf>,

    /// Path to polsim config TOML [default: polsim.toml, skipped when absent].
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Exit with status 2 when any user's access changes.
    #[arg(long)]
    fail_on_change: bool,

    /// Evaluate requests in parallel.
    #[arg(long)]
    parallel: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a single request against one policy.
    Eval {
        /// Policy file (JSON).
        policy: Utf8PathBuf,
        #[arg(long)]
        role: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        resource: String,
        #[arg(long)]
        action: String,
        /// Extra request attribute as key=value (repeatable); cannot replace the fixed four.
        #[arg(long = "attr", value_parser = parse_attr)]
        attrs: Vec<(String, String)>,
    },

    /// Print the JSON schema of the policy document.
    Schema,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Some(Commands::Eval {
            ref policy,
            ref role,
            ref department,
            ref resource,
            ref action,
            ref attrs,
        }) => {
            let mut request = Request::new(role, department, resource, action);
            for (k, v) in attrs {
                request.insert(k, v);
            }
            cmd_eval(policy, request)
        }
        Some(Commands::Schema) => cmd_schema(),
        None => cmd_simulate(&cli),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    // A subscriber may already be set when embedded; keep the existing one.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn cmd_simulate(cli: &Cli) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let (Some(old_policy), Some(new_policy)) = (&cli.old_policy, &cli.new_policy) else {
            anyhow::bail!("both OLD_POLICY and NEW_POLICY are required");
        };

        let overrides = Overrides {
            log: cli.log.clone(),
            out: cli.out.clone(),
            json_out: cli.json_out.clone(),
            fail_on_change: cli.fail_on_change,
            parallel: cli.parallel,
        };
        let cfg_text = match &cli.config {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path))?,
            None => read_optional(Utf8Path::new(DEFAULT_CONFIG_PATH)).context("read config")?,
        };
        let settings =
            polsim_settings::load_config_str(&cfg_text, overrides).context("parse config")?;

        let output = run_simulation(SimulationInput {
            old_policy,
            new_policy,
            log: &settings.log,
            parallel: settings.parallel,
        })?;

        let md = render_markdown(&output.renderable);
        write_text_file(&settings.out, &md).context("write markdown report")?;

        if let Some(json_out) = &settings.json_out {
            let data = serialize_report(&output.envelope).context("serialize report")?;
            write_bytes_file(json_out, &data).context("write json report")?;
        }

        eprintln!("{}", render_summary(&output.renderable));
        eprintln!("polsim: report written to {}", settings.out);

        Ok(change_exit_code(output.has_changes(), settings.fail_on_change))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("polsim error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_eval(policy: &Utf8Path, request: Request) -> anyhow::Result<()> {
    match run_eval(EvalInput { policy, request }) {
        Ok(out) => {
            print!("{}", format_evaluation(&out));
            Ok(())
        }
        Err(err) => {
            eprintln!("polsim error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_schema() -> anyhow::Result<()> {
    let schema = polsim_types::policy_document_schema();
    println!(
        "{}",
        serde_json::to_string_pretty(&schema).context("serialize schema")?
    );
    Ok(())
}

fn parse_attr(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, _)) if FIXED_ATTRIBUTES.contains(&k) => {
            Err(format!("`{k}` is set with --{k}; --attr cannot override it"))
        }
        Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => Err(format!("expected key=value, got `{s}`")),
    }
}

/// Read a file that is allowed to be absent; absent reads as empty.
fn read_optional(path: &Utf8Path) -> anyhow::Result<String> {
    if !path.exists() {
        return Ok(String::new());
    }
    std::fs::read_to_string(path).with_context(|| format!("read {}", path))
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes_file(path, text.as_bytes())
}

fn write_bytes_file(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, data).with_context(|| format!("write: {}", path))?;
    Ok(())
}
