//! Logger module
//!
//! Provides logging utilities for the server including:
//! - Server lifecycle logging
//! - Error and warning logging
//! - File-based logging support
//!
//! Requests are not logged here. Handler failures reach this module only
//! when the binary installs `log_handler_error` as the mux's error observer.

pub mod writer;

use crate::config::Config;
use crate::handler::HandlerError;
use crate::nfc::Command;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    let info_enabled = !matches!(
        config.logging.level.to_ascii_lowercase().as_str(),
        "warn" | "error"
    );
    writer::init(
        config.logging.info_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
        info_enabled,
    )
}

/// Write to info log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, path: &str, config: &Config) {
    write_info("======================================");
    write_info("NFC reader server started successfully");
    write_info(&format!("Listening on: http://{addr}{path}"));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(max) = config.performance.max_connections {
        write_info(&format!("Max connections: {max}"));
    }
    if let Some(ref path) = config.logging.info_log_file {
        write_info(&format!("Info log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================");
}

pub fn log_registered_commands(commands: &[Command]) {
    let mut codes: Vec<&str> = commands.iter().map(Command::as_str).collect();
    codes.sort_unstable();
    write_info(&format!("[Handlers] Registered commands: {}", codes.join(", ")));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_handler_error(command: &Command, err: &HandlerError) {
    write_error(&format!("[ERROR] Handler for '{command}' failed: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_shutdown(active_connections: usize) {
    write_info(&format!(
        "[Shutdown] Listener closed, {active_connections} connection(s) still finishing"
    ));
}
