use std::collections::HashSet;

use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.standard_driver_count == 0 {
        errors.push("standard_driver_count: must be at least 1".to_string());
    }

    for (name, points) in &config.points_schemes {
        if points.is_empty() {
            errors.push(format!("points_schemes.{}: must award at least one position", name));
        }
    }

    let mut seen = HashSet::new();
    for (i, season) in config.seasons.iter().enumerate() {
        if season.id.trim().is_empty() {
            errors.push(format!("seasons[{}].id: must not be empty", i));
        } else if !seen.insert(season.id.as_str()) {
            errors.push(format!("seasons[{}].id: duplicate season '{}'", i, season.id));
        }

        if !config.points_schemes.contains_key(&season.points_scheme) {
            errors.push(format!(
                "seasons[{}].points_scheme: unknown scheme '{}'",
                i, season.points_scheme
            ));
        }
    }

    if config.generated_seasons().next().is_none() {
        errors.push("seasons: no season has generate: true".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeasonConfig;

    fn season(id: &str, scheme: &str, generate: bool) -> SeasonConfig {
        SeasonConfig {
            id: id.to_string(),
            points_scheme: scheme.to_string(),
            generate,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_driver_count() {
        let config = Config {
            standard_driver_count: 0,
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("standard_driver_count"));
    }

    #[test]
    fn test_empty_scheme() {
        let mut config = Config::default();
        config.points_schemes.insert("none".to_string(), vec![]);
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("points_schemes.none"));
    }

    #[test]
    fn test_unknown_scheme() {
        let config = Config {
            seasons: vec![season("s1", "top_fifty", true)],
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("seasons[0].points_scheme"));
    }

    #[test]
    fn test_duplicate_season() {
        let config = Config {
            seasons: vec![season("s1", "top_ten", true), season("s1", "top_ten", false)],
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("duplicate season 's1'"));
    }

    #[test]
    fn test_nothing_to_generate() {
        let config = Config {
            seasons: vec![season("s1", "top_ten", false)],
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("generate"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = Config {
            standard_driver_count: 0,                         // Error 1
            seasons: vec![season("s1", "missing", false)],    // Errors 2 and 3
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
