use std::path::PathBuf;

pub const DEFAULT_PRIVILEGED_ROLE: &str = "recruiter";

/// Runtime configuration. Paths come from the command line; the rest from
/// the environment (a `.env` file is honored by the binary).
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` keeps everything in memory for the life of the process.
    pub data_dir: Option<PathBuf>,
    /// Allowed CORS origins; empty means any origin.
    pub cors_allow_origin: Vec<String>,
    /// `x-role` header value that unlocks unredacted text.
    pub privileged_role: String,
}

impl Config {
    pub fn from_env(data_dir: Option<PathBuf>) -> Self {
        let cors_allow_origin = std::env::var("CORS_ALLOW_ORIGIN")
            .map(|val| parse_origins(&val))
            .unwrap_or_default();
        let privileged_role = std::env::var("PRIVILEGED_ROLE")
            .ok()
            .map(|r| r.trim().to_lowercase())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_PRIVILEGED_ROLE.to_string());
        Self { data_dir, cors_allow_origin, privileged_role }
    }

    pub fn in_memory() -> Self {
        Self {
            data_dir: None,
            cors_allow_origin: Vec::new(),
            privileged_role: DEFAULT_PRIVILEGED_ROLE.to_string(),
        }
    }
}

fn parse_origins(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_dropped() {
        assert_eq!(
            parse_origins(" http://a.test, ,http://b.test "),
            vec!["http://a.test", "http://b.test"]
        );
        assert!(parse_origins(" , ").is_empty());
    }
}
