use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "MindShield";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hand-movement model, hosted inference endpoint.
pub const HAND_ENDPOINT: &str = "https://neuroalz-api-719509516996.us-central1.run.app/predict";

/// Gait model, hosted inference endpoint.
pub const GAIT_ENDPOINT: &str = "https://my-flask-app-608127581259.us-central1.run.app/predict";

/// Environment overrides for the two endpoints (staging deployments, local mocks).
pub const GAIT_ENDPOINT_ENV: &str = "MINDSHIELD_GAIT_URL";
pub const HAND_ENDPOINT_ENV: &str = "MINDSHIELD_HAND_URL";

/// Key under which the diagnosis history is stored in the settings table.
pub const HISTORY_KEY: &str = "diagnosisResultsKey";

/// Connect timeout for the upload client. The request itself has no timeout:
/// large videos on slow links can legitimately take minutes.
pub const UPLOAD_CONNECT_TIMEOUT_SECS: u64 = 15;

/// Tracing filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "mindshield_lib=debug,mindshield=debug,info"
    } else {
        "info"
    }
}

/// Get the application data directory
/// ~/MindShield/ on all platforms, current directory if no home is known.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the local settings database holding the diagnosis history.
pub fn database_path() -> PathBuf {
    app_data_dir().join("mindshield.db")
}

/// Gait endpoint, honouring `MINDSHIELD_GAIT_URL`.
pub fn gait_endpoint() -> String {
    resolve_endpoint(std::env::var(GAIT_ENDPOINT_ENV).ok(), GAIT_ENDPOINT)
}

/// Hand endpoint, honouring `MINDSHIELD_HAND_URL`.
pub fn hand_endpoint() -> String {
    resolve_endpoint(std::env::var(HAND_ENDPOINT_ENV).ok(), HAND_ENDPOINT)
}

fn resolve_endpoint(override_value: Option<String>, default: &str) -> String {
    match override_value {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_ends_with_app_name() {
        let dir = app_data_dir();
        assert!(dir.ends_with("MindShield"));
    }

    #[test]
    fn database_lives_in_app_data() {
        let db = database_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with("mindshield.db"));
    }

    #[test]
    fn app_name_is_mindshield() {
        assert_eq!(APP_NAME, "MindShield");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }

    #[test]
    fn endpoints_are_https_predict_routes() {
        for url in [GAIT_ENDPOINT, HAND_ENDPOINT] {
            assert!(url.starts_with("https://"));
            assert!(url.ends_with("/predict"));
        }
        assert_ne!(GAIT_ENDPOINT, HAND_ENDPOINT);
    }

    #[test]
    fn override_wins_when_set() {
        let url = resolve_endpoint(Some("http://127.0.0.1:9000/predict".into()), GAIT_ENDPOINT);
        assert_eq!(url, "http://127.0.0.1:9000/predict");
    }

    #[test]
    fn blank_override_falls_back_to_default() {
        assert_eq!(resolve_endpoint(Some("   ".into()), HAND_ENDPOINT), HAND_ENDPOINT);
        assert_eq!(resolve_endpoint(None, HAND_ENDPOINT), HAND_ENDPOINT);
    }

    #[test]
    fn history_key_is_stable() {
        // Existing installs read their history from this key.
        assert_eq!(HISTORY_KEY, "diagnosisResultsKey");
    }
}
