//! Logger module
//!
//! Stdout/stderr logging for the café server:
//! - Server lifecycle logging
//! - Access logging (one CLF-style line per request)
//! - Error and warning logging

use chrono::Local;
use hyper::{Method, Uri};
use std::net::SocketAddr;

use crate::config::Config;

pub fn log_server_start(addr: &SocketAddr, config: &Config, city_count: usize) {
    println!("======================================");
    println!("Café server started successfully");
    println!("Listening on: http://{addr}");
    println!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Directory: {city_count} cities loaded");
    println!("Using Tokio runtime for concurrency");
    println!("======================================\n");
}

/// Write one access log line for a completed request
pub fn log_access(method: &Method, uri: &Uri, status: u16) {
    println!(
        "[{}] \"{} {}\" {}",
        Local::now().format("%d/%b/%Y:%H:%M:%S %z"),
        method,
        uri,
        status,
    );
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}
