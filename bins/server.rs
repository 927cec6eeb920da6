use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info};

fn main() -> std::process::ExitCode {
    // load .env before anything reads RUST_LOG / SERVER_* / CONFIG_PATH
    dotenv().ok();

    let cfg = match AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "deals", event = "config_invalid", error = %e, "invalid configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    if let Err(e) = server::startup::init_logging_from(&cfg) {
        common::utils::logging::init_logging_default();
        error!(service = "deals", event = "logger_init_failed", error = %e, "falling back to compact logs");
    }
    info!(service = "deals", event = "logger_init", "tracing subscriber initialized");

    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "deals",
            event = "panic",
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "deals", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "deals",
        event = "start",
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "deals service starting"
    );

    // server::run_with_config drains connections itself on ctrl-c
    let result = rt.block_on(server::run_with_config(cfg));

    match result {
        Ok(()) => {
            info!(service = "deals", event = "stop", pid, "deals service stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "deals", event = "run_failed", error = %e, "server returned error");
            std::process::ExitCode::FAILURE
        }
    }
}
