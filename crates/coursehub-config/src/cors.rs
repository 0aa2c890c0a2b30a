use std::env;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::from_origins("http://localhost:3000,http://localhost:5173")
    }
}

impl CorsConfig {
    pub fn from_env() -> Self {
        match env::var("ALLOWED_ORIGINS") {
            Ok(origins) => Self::from_origins(&origins),
            Err(_) => Self::default(),
        }
    }

    /// Parses a comma-separated origin list, skipping blank entries.
    pub fn from_origins(origins: &str) -> Self {
        let allowed_origins = origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_origins_trims_and_skips_blanks() {
        let config = CorsConfig::from_origins(" https://a.edu , ,https://b.edu,");
        assert_eq!(config.allowed_origins, vec!["https://a.edu", "https://b.edu"]);
    }

    #[test]
    fn test_default_origins() {
        assert_eq!(CorsConfig::default().allowed_origins.len(), 2);
    }
}
