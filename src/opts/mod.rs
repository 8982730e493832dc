use std::env;
use std::panic;

use log::error;

use crate::{Error, Result};

pub static LOG_ENV_NAME: &str = "KIRKOS_LOG";

static LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configure the logger from a level name.
pub fn log_level(level: &str) -> Result<()> {
    if !LEVELS.contains(&level) {
        // Initialize so the error can be pretty printed
        env::set_var(LOG_ENV_NAME, "error");
        pretty_env_logger::init_custom_env(LOG_ENV_NAME);
        return Err(Error::UnknownLogLevel(level.to_string()));
    }
    env::set_var(LOG_ENV_NAME, level);
    pretty_env_logger::init_custom_env(LOG_ENV_NAME);
    Ok(())
}

pub fn print_error(e: Error) {
    match e {
        Error::Unconfirmed { .. } => {
            error!("{}", e);
            error!("Deleted records cannot be restored");
        }
        _ => error!("{}", e),
    }
}

pub fn fatal(e: Error) -> Result<()> {
    print_error(e);
    std::process::exit(1);
}

pub fn panic_hook() {
    panic::set_hook(Box::new(|info| {
        let message = format!("{}", info);
        print_error(Error::Panic(message));
    }));
}

pub mod admin;

pub use self::admin::Admin;
