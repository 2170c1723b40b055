use crate::config::types::{Config, CrawlerConfig, PageEntry, SiteEntry, UserAgentConfig};
use crate::strategy::StrategyRegistry;
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_sites(&config.site)?;
    validate_pages(&config.page)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    // Unknown strategy names fail here, before any dispatch starts
    if let Some(name) = &config.strategy {
        let registry = StrategyRegistry::with_builtins();
        registry.resolve(name)?;
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates site entries
fn validate_sites(sites: &[SiteEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for site in sites {
        if site.identifier.is_empty() {
            return Err(ConfigError::Validation(
                "site identifier cannot be empty".to_string(),
            ));
        }

        if !seen.insert(site.identifier.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Duplicate site identifier: '{}'",
                site.identifier
            )));
        }

        let languages: HashSet<&str> = site.languages.iter().map(String::as_str).collect();

        for target in &site.target {
            validate_target_url(&target.url)?;

            if !languages.is_empty() && !languages.contains(target.language.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Site '{}' target '{}' has language '{}' which is not in its language list",
                    site.identifier, target.url, target.language
                )));
            }
        }

        for pattern in &site.exclude_patterns {
            if pattern.is_empty() {
                return Err(ConfigError::InvalidPattern(format!(
                    "Site '{}' has an empty exclude pattern",
                    site.identifier
                )));
            }
        }
    }

    Ok(())
}

/// Validates page entries
fn validate_pages(pages: &[PageEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for page in pages {
        if page.id.is_empty() {
            return Err(ConfigError::Validation(
                "page id cannot be empty".to_string(),
            ));
        }

        if !seen.insert(page.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Duplicate page id: '{}'",
                page.id
            )));
        }

        for target in &page.target {
            validate_target_url(&target.url)?;
        }
    }

    Ok(())
}

/// Validates a warmup target URL: absolute, http or https
fn validate_target_url(raw: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid target URL '{}': {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Target URL '{}' must use the http or https scheme",
            raw
        )));
    }

    Ok(())
}

/// Basic email sanity check: one '@' with a dot in the host part
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid contact_email: '{}'",
            email
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{HttpConfig, TargetEntry};

    fn base_config() -> Config {
        Config {
            crawler: CrawlerConfig {
                concurrency: 5,
                limit: 250,
                strategy: None,
            },
            user_agent: UserAgentConfig {
                crawler_name: "TestWarmer".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
            http: HttpConfig::default(),
            site: vec![],
            page: vec![],
        }
    }

    fn site_with_target(identifier: &str, url: &str, language: &str) -> SiteEntry {
        SiteEntry {
            identifier: identifier.to_string(),
            languages: vec![language.to_string()],
            excluded_sitemaps: vec![],
            exclude_patterns: vec![],
            target: vec![TargetEntry {
                url: url.to_string(),
                language: language.to_string(),
                priority: None,
            }],
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let mut config = base_config();
        config.site = vec![site_with_target("main", "https://example.com/en/", "en")];
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = base_config();
        config.crawler.concurrency = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let mut config = base_config();
        config.crawler.strategy = Some("random".to_string());
        assert!(matches!(
            validate(&config),
            Err(ConfigError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_known_strategies_accepted() {
        for name in ["identity", "priority"] {
            let mut config = base_config();
            config.crawler.strategy = Some(name.to_string());
            assert!(validate(&config).is_ok(), "strategy '{}' rejected", name);
        }
    }

    #[test]
    fn test_duplicate_site_identifier_rejected() {
        let mut config = base_config();
        config.site = vec![
            site_with_target("main", "https://example.com/en/", "en"),
            site_with_target("main", "https://example.org/en/", "en"),
        ];
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_target_language_outside_site_languages_rejected() {
        let mut config = base_config();
        let mut site = site_with_target("main", "https://example.com/fr/", "fr");
        site.languages = vec!["en".to_string()];
        config.site = vec![site];
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_non_http_target_rejected() {
        let mut config = base_config();
        config.site = vec![site_with_target("main", "ftp://example.com/en/", "en")];
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_malformed_target_url_rejected() {
        let mut config = base_config();
        config.site = vec![site_with_target("main", "not a url", "en")];
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_empty_exclude_pattern_rejected() {
        let mut config = base_config();
        let mut site = site_with_target("main", "https://example.com/en/", "en");
        site.exclude_patterns = vec!["".to_string()];
        config.site = vec![site];
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut config = base_config();
        config.user_agent.contact_email = "not-an-email".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_user_agent_header_value_format() {
        let config = base_config();
        assert_eq!(
            config.user_agent.header_value(),
            "TestWarmer/1.0 (+https://example.com/about; admin@example.com)"
        );
    }
}
