use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Seed usernames and hashtags that drive a collection sweep.
///
/// Loaded from `config/seeds.yaml`. Hashtags are stored without the leading
/// `#`; usernames without the leading `@`.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedsFile {
    #[serde(default)]
    pub seed_accounts: Vec<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

/// Load and validate the seeds configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_seeds(path: &Path) -> Result<SeedsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SeedsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut seeds: SeedsFile = serde_yaml::from_str(&content)?;
    normalize(&mut seeds);
    validate(&seeds)?;

    Ok(seeds)
}

fn normalize(seeds: &mut SeedsFile) {
    for account in &mut seeds.seed_accounts {
        *account = account.trim().trim_start_matches('@').to_lowercase();
    }
    for tag in &mut seeds.hashtags {
        *tag = tag.trim().trim_start_matches('#').to_lowercase();
    }
}

fn validate(seeds: &SeedsFile) -> Result<(), ConfigError> {
    if seeds.seed_accounts.is_empty() && seeds.hashtags.is_empty() {
        return Err(ConfigError::Validation(
            "seeds file must list at least one seed account or hashtag".to_string(),
        ));
    }

    let mut seen_accounts = HashSet::new();
    for account in &seeds.seed_accounts {
        if account.is_empty() {
            return Err(ConfigError::Validation(
                "seed account must be non-empty".to_string(),
            ));
        }
        if !seen_accounts.insert(account.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate seed account '{account}'"
            )));
        }
    }

    let mut seen_tags = HashSet::new();
    for tag in &seeds.hashtags {
        if tag.is_empty() {
            return Err(ConfigError::Validation(
                "hashtag must be non-empty".to_string(),
            ));
        }
        if !seen_tags.insert(tag.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate hashtag '{tag}'"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<SeedsFile, ConfigError> {
        let mut seeds: SeedsFile = serde_yaml::from_str(yaml)?;
        normalize(&mut seeds);
        validate(&seeds)?;
        Ok(seeds)
    }

    #[test]
    fn accounts_and_hashtags_are_normalized() {
        let seeds = parse(
            "seed_accounts:\n  - '@Maria.Fit'\n  - wellness_ana\nhashtags:\n  - '#WeightLossJourney'\n  - transformation\n",
        )
        .unwrap();
        assert_eq!(seeds.seed_accounts, vec!["maria.fit", "wellness_ana"]);
        assert_eq!(seeds.hashtags, vec!["weightlossjourney", "transformation"]);
    }

    #[test]
    fn empty_file_is_rejected() {
        let result = parse("seed_accounts: []\nhashtags: []\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn duplicate_accounts_are_rejected() {
        // Same account in different spellings collapses after normalization.
        let result = parse("seed_accounts:\n  - maria\n  - '@Maria'\n");
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("maria")),
            "expected duplicate account error, got: {result:?}"
        );
    }

    #[test]
    fn duplicate_hashtags_are_rejected() {
        let result = parse("hashtags:\n  - fitness\n  - '#fitness'\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn hashtags_only_is_valid() {
        let seeds = parse("hashtags:\n  - weightloss\n").unwrap();
        assert!(seeds.seed_accounts.is_empty());
        assert_eq!(seeds.hashtags.len(), 1);
    }

    #[test]
    fn missing_file_reports_path() {
        let result = load_seeds(Path::new("/nonexistent/seeds.yaml"));
        assert!(
            matches!(result, Err(ConfigError::SeedsFileIo { ref path, .. }) if path.contains("nonexistent")),
            "expected SeedsFileIo, got: {result:?}"
        );
    }
}
