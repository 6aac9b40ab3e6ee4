use dotenvy::dotenv;
use tracing::error;

fn main() -> std::process::ExitCode {
    // Load .env early so RUST_LOG and friends apply to logger setup.
    dotenv().ok();

    // Panic hook: surface unhandled panics through the logs.
    std::panic::set_hook(Box::new(|info| {
        error!(message = %info, "unhandled panic occurred");
    }));

    // Thread count comes from config.toml when present.
    let worker_threads = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg.server.worker_threads,
        Err(_) => std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok()),
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to build tokio runtime: {e}");
            return std::process::ExitCode::FAILURE;
        }
    };

    match rt.block_on(server::run()) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server exited with error");
            std::process::ExitCode::FAILURE
        }
    }
}
