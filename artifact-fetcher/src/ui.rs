use colored::*;

pub fn success(msg: &str) {
    tracing::info!("{} {}", "✓".green(), msg);
}

pub fn info(msg: &str) {
    tracing::info!("{}", msg);
}

pub fn warning(msg: &str) {
    tracing::info!("{} {}", "!".yellow(), msg.yellow());
}
