//! Scenario script runner.
//!
//! Loads a scenario script into a fresh script environment and drives it
//! headless:
//!
//! 1. Load `scriptbridge.ini` (or `--config`), apply command line overrides
//! 2. Create the host services and the scenario session
//! 3. Run the entry module, call `init()` if it is defined
//! 4. Call `update(delta)` once per tick, advancing scenario time
//! 5. Print the console log and, with `--report`, the session as JSON
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --scripts scenarios --setting variation=Hard scenario_00_basic.lua
//! ```

use clap::Parser;
use scriptbridge::luarc_generator;
use scriptbridge::resources::config::BridgeConfig;
use scriptbridge::resources::entities::WorldEntityFactory;
use scriptbridge::resources::localization::MemoryCatalog;
use scriptbridge::resources::lua_runtime::{HostServices, ScriptEnvironment};
use scriptbridge::resources::resource_stream::DirectoryProvider;
use scriptbridge::resources::session::ScenarioSession;
use scriptbridge::stub_generator;
use std::path::PathBuf;
use std::rc::Rc;

/// Headless runner for Lua scenario scripts
#[derive(Parser)]
#[command(version, about = "Runs Lua scenario scripts against the script bridge.")]
struct Cli {
    /// Scenario module to run, resolved against the script directories.
    #[arg(value_name = "ENTRY")]
    entry: Option<String>,

    /// Configuration file (default: ./scriptbridge.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Script directory; repeat to search several, in order.
    #[arg(long = "scripts", value_name = "DIR")]
    scripts: Vec<PathBuf>,

    /// Language code used for localization overlays.
    #[arg(long, value_name = "CODE")]
    language: Option<String>,

    /// Scenario setting as KEY=VALUE; may be repeated.
    #[arg(long = "setting", value_name = "KEY=VALUE", value_parser = parse_setting)]
    settings: Vec<(String, String)>,

    /// Number of update ticks to run after init().
    #[arg(long, default_value_t = 0)]
    ticks: u32,

    /// Seconds passed to update() on every tick.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    delta: f32,

    /// Print the final scenario state as JSON.
    #[arg(long)]
    report: bool,

    /// Generate Lua LSP stubs from the host API and exit.
    /// Optionally provide a path (default: scripts/scriptbridge.lua).
    #[arg(long, value_name = "PATH")]
    create_lua_stubs: Option<Option<PathBuf>>,

    /// Generate .luarc.json for Lua Language Server and exit.
    /// Optionally provide a path (default: scripts/.luarc.json).
    #[arg(long, value_name = "PATH")]
    create_luarc: Option<Option<PathBuf>>,
}

fn parse_setting(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    if key.trim().is_empty() {
        return Err(format!("empty setting key in `{raw}`"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BridgeConfig::with_path(path),
        None => BridgeConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        // Missing file is fine, defaults apply
        log::debug!("{e}");
    }
    if !cli.scripts.is_empty() {
        config.script_dirs = cli.scripts.clone();
    }
    if let Some(language) = &cli.language {
        config.language = language.clone();
    }

    let provider = Rc::new(DirectoryProvider::new(config.script_dirs.clone()));
    let services = HostServices::new(
        config,
        provider,
        Rc::new(MemoryCatalog::new()),
        Rc::new(WorldEntityFactory::new()),
    );
    let session = ScenarioSession::new(services);
    for (key, value) in &cli.settings {
        session.set_setting(key, value);
    }

    let env = match ScriptEnvironment::create(&session) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Error creating script environment: {e}");
            print_console(&session);
            std::process::exit(1);
        }
    };

    // Early-exit: generate Lua stubs and quit
    if let Some(maybe_path) = cli.create_lua_stubs {
        let path = maybe_path.unwrap_or_else(|| PathBuf::from("scripts/scriptbridge.lua"));
        match stub_generator::generate_stubs(&env) {
            Ok(content) => {
                if let Err(e) = stub_generator::write_stubs(&path, &content) {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
                println!("Lua stubs written to {}", path.display());
            }
            Err(e) => {
                eprintln!("Error generating stubs: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    // Early-exit: generate .luarc.json and quit
    if let Some(maybe_path) = cli.create_luarc {
        let path = maybe_path.unwrap_or_else(|| PathBuf::from("scripts/.luarc.json"));
        match luarc_generator::generate_luarc(&env, "scriptbridge.lua") {
            Ok(content) => {
                if let Err(e) = luarc_generator::write_luarc(&path, &content) {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
                println!(".luarc.json written to {}", path.display());
            }
            Err(e) => {
                eprintln!("Error generating .luarc.json: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let Some(entry) = cli.entry else {
        eprintln!("No scenario given. Pass an ENTRY module or see --help.");
        std::process::exit(2);
    };

    log::info!("Running scenario {entry}");
    let ok = run_scenario(&env, &session, &entry, cli.ticks, cli.delta);
    print_console(&session);

    if cli.report {
        match serde_json::to_string_pretty(&session.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing report: {e}"),
        }
    }

    // Sub-scripts go before the main environment
    session.clear_additional_scripts();
    drop(env);

    if !ok {
        std::process::exit(1);
    }
}

/// Runs the entry module, `init()` and `ticks` updates. Returns `false` on the
/// first failure.
fn run_scenario(
    env: &ScriptEnvironment,
    session: &ScenarioSession,
    entry: &str,
    ticks: u32,
    delta: f32,
) -> bool {
    let console = session.console();

    if !console.check_result(&env.run_localized(entry)) {
        return false;
    }

    if env.has_function("init") {
        let result = env.call_function::<_, ()>("init", ()).map_err(|e| e.to_string());
        if !console.check_result(&result) {
            return false;
        }
    }

    if !env.has_function("update") {
        return true;
    }
    for _ in 0..ticks {
        if session.is_paused() {
            log::info!("Scenario paused, stopping updates");
            break;
        }
        session.advance_time(delta);
        let result = env
            .call_function::<_, ()>("update", delta)
            .map_err(|e| e.to_string());
        if !console.check_result(&result) {
            return false;
        }
    }
    true
}

fn print_console(session: &ScenarioSession) {
    for entry in session.console().drain() {
        println!("[{}] {}", entry.level, entry.message);
    }
}
