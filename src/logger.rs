use crate::config::Config;
use chrono::Local;
use hyper::{Method, Uri, Version};
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("User directory server started");
    println!("Started at: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!("Listening on: http://{addr}");
    println!("Log level: {}", config.logging.level);
    println!("Database: {}", config.database.path);
    println!("Static directory: {}", config.resources.static_dir);
    println!("Template directory: {}", config.resources.template_dir);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Using Tokio runtime for concurrency");
    println!("======================================\n");
}

pub fn log_server_stop() {
    println!("\n[Shutdown] Storage connection closed, server stopped");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[Error] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!("[Request] {method} {uri} {version:?}");
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        println!("[Headers] Count: {count}");
    }
}

pub fn log_response(size: usize) {
    println!("[Response] Sent 200 OK ({size} bytes)\n");
}

pub fn log_error(message: &str) {
    eprintln!("[Error] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[Warn] {message}");
}

pub fn log_template_load(path: &std::path::Path) {
    println!("[Template] Constructing template from file {}", path.display());
}

pub fn log_template_apply(records: usize) {
    println!("[Template] Applying template to {records} data records");
}

pub fn log_user_registered(name: &str, surname: &str) {
    println!("[Users] Registering new user {name} {surname}");
}

pub fn log_user_delete(id: &str) {
    println!("[Users] Going to delete user with ID {id}");
}
