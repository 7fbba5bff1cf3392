//! Development diagnostics: an opt-in tracing subscriber and anonymized
//! document ids for log lines.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_DEV_LOG: &str = "SO_CALC_DEV_LOG";
pub const ENV_RUNTIME: &str = "SO_CALC_ENV";

// Dev logging gate: SO_CALC_DEV_LOG=1 AND dev env (debug or SO_CALC_ENV in {local,development,dev})
pub fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var(ENV_RUNTIME)
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// Install a compact subscriber when dev logging is enabled. Returns whether
/// one was installed; an already installed global subscriber is left alone.
pub fn enable_dev_tracing() -> bool {
    if !dev_logging_enabled() {
        return false;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("so_calc=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init()
        .is_ok()
}

/// First 6 bytes of the SHA-256 of `text`, hex encoded. Never log raw text.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    Sha256::digest(text.as_bytes())[..6]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn anon_hash_is_short_and_stable() {
        let a = anon_hash("great/JJ");
        assert_eq!(a.len(), 12);
        assert_eq!(a, anon_hash("great/JJ"));
        assert_ne!(a, anon_hash("bad/JJ"));
        // sha256("") = e3b0c442 98fc...
        assert_eq!(anon_hash(""), "e3b0c44298fc");
    }

    #[test]
    #[serial]
    fn dev_logging_needs_the_flag() {
        std::env::remove_var(ENV_DEV_LOG);
        assert!(!dev_logging_enabled());
        std::env::set_var(ENV_DEV_LOG, "0");
        assert!(!dev_logging_enabled());
        std::env::set_var(ENV_DEV_LOG, "1");
        std::env::set_var(ENV_RUNTIME, "dev");
        assert!(dev_logging_enabled());
        std::env::remove_var(ENV_DEV_LOG);
        std::env::remove_var(ENV_RUNTIME);
    }

    #[test]
    #[serial]
    fn dev_tracing_is_gated_and_installed_once() {
        std::env::remove_var(ENV_DEV_LOG);
        assert!(!enable_dev_tracing());
        std::env::set_var(ENV_DEV_LOG, "1");
        std::env::set_var(ENV_RUNTIME, "dev");
        enable_dev_tracing();
        // the global subscriber is taken now
        assert!(!enable_dev_tracing());
        tracing::info!(target: "so_calc", "dev tracing on");
        std::env::remove_var(ENV_DEV_LOG);
        std::env::remove_var(ENV_RUNTIME);
    }
}
