use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // load .env first so RUST_LOG / LOG_FORMAT take effect
    dotenv().ok();
    // shared subscriber setup; LOG_FORMAT picks compact or json output
    common::utils::logging::init_logging_from_env();
    info!(service = "shoes_shop", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging();

    // process context for log correlation (nothing sensitive)
    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // panics go through tracing so they land in the same log stream
    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "shoes_shop",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    // config.toml (or CONFIG_PATH) first, env vars override, bad values stop startup
    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "shoes_shop", event = "config_invalid", error = %e, "configuration rejected");
            return std::process::ExitCode::FAILURE;
        }
    };

    // tokio runtime; worker count only when configured, otherwise one per core
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "shoes_shop", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    // startup event
    info!(
        service = "shoes_shop",
        event = "start",
        %service_id,
        pid,
        version,
        port = cfg.server.port,
        "shoes shop starting"
    );

    // server::run owns Ctrl+C handling and drains in-flight requests before returning
    rt.block_on(async move {
        match server::run(cfg).await {
            Ok(()) => {
                info!(service = "shoes_shop", event = "stop", %service_id, pid, "server stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "shoes_shop", event = "run_failed", error = %e, "server::run returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
