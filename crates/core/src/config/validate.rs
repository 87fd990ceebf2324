use super::{types::Config, ConfigError, SourceBackend};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Extractor backend has its config section and a URL
/// - Discovery deadlines are positive and at least one query variant exists
/// - Catalog overrides name every retailer and templates carry `{query}`
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Source validation
    if let Some(source) = &config.source {
        match source.backend {
            SourceBackend::Extractor => {
                let Some(extractor) = &source.extractor else {
                    return Err(ConfigError::ValidationError(
                        "source.extractor section required for extractor backend".to_string(),
                    ));
                };
                if extractor.url.is_empty() {
                    return Err(ConfigError::ValidationError(
                        "source.extractor.url cannot be empty".to_string(),
                    ));
                }
            }
        }
    }

    // Discovery validation
    if config.discovery.run_deadline_secs == 0 {
        return Err(ConfigError::ValidationError(
            "discovery.run_deadline_secs must be positive".to_string(),
        ));
    }
    if config.discovery.fetch_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "discovery.fetch_timeout_secs must be positive".to_string(),
        ));
    }
    if config.discovery.query_variants.is_empty() {
        return Err(ConfigError::ValidationError(
            "discovery.query_variants cannot be empty".to_string(),
        ));
    }

    // Catalog validation
    if let Some(catalog) = &config.catalog {
        for entry in catalog.entries() {
            if entry.name.is_empty() {
                return Err(ConfigError::ValidationError(
                    "catalog entries must have a name".to_string(),
                ));
            }
            if let Some(template) = &entry.search_template {
                if !template.contains("{query}") {
                    return Err(ConfigError::ValidationError(format!(
                        "search template for {} is missing the {{query}} placeholder",
                        entry.name
                    )));
                }
            }
        }
    }

    Ok(())
}
