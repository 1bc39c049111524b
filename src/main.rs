use orbitip::config::Config;
use orbitip::{
    logger, server, Bytes, Command, ErrorObserver, HandlerResult, Handlers, Params, Server,
};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = match std::env::args().nth(1) {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let ext = cfg.ext()?;

    let handlers = Arc::new(default_handlers());
    logger::log_registered_commands(&handlers.commands());

    let observer: ErrorObserver = Arc::new(logger::log_handler_error);
    let server = Server::new(addr, &cfg.server.root, ext, handlers)
        .with_options(cfg.server_options())
        .with_error_observer(observer);

    let listener = server::create_reusable_listener(addr)?;
    logger::log_server_start(&listener.local_addr()?, server.path(), &cfg);

    server.serve(listener, server::shutdown_signal()).await?;
    Ok(())
}

/// Empty 200 for commands that need no reply body
#[allow(clippy::needless_pass_by_value)]
fn ack(_params: Params) -> HandlerResult {
    Ok(Bytes::new())
}

/// Acknowledge every well-known command; ping answers `pong`
fn default_handlers() -> Handlers {
    Handlers::new()
        .with(Command::PING, |_| Ok(Bytes::from_static(b"pong")))
        .with(Command::POWER_UP, ack)
        .with(Command::HEARTBEAT, ack)
        .with(Command::CARD_OPERATION, ack)
        .with(Command::LEVEL_CHANGE, ack)
}
