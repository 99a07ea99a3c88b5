use std::env;

use mailshift_core::{AppError, AppResult};
use mailshift_domain::{
    CalendarSharingOptions, DEFAULT_ELIGIBILITY_THRESHOLD, ScoringConfig, SharingFlag,
    WeightTable,
};

/// Settings read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Default eligibility threshold percentage.
    pub threshold: u8,
    /// Assignment kind weights.
    pub weights: WeightTable,
    /// Settings attached to calendar Reviewer and Editor grants.
    pub calendar_options: CalendarSharingOptions,
    /// Whether input CSV files start with a header row.
    pub csv_has_headers: bool,
}

impl CliConfig {
    /// Loads settings from process environment variables.
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads settings through a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = WeightTable::default();
        let weights = WeightTable {
            usr: parse_u32(&lookup, "MAILSHIFT_WEIGHT_USR", defaults.usr)?,
            grp: parse_u32(&lookup, "MAILSHIFT_WEIGHT_GRP", defaults.grp)?,
            dom: parse_u32(&lookup, "MAILSHIFT_WEIGHT_DOM", defaults.dom)?,
            all: parse_u32(&lookup, "MAILSHIFT_WEIGHT_ALL", defaults.all)?,
            public: parse_u32(&lookup, "MAILSHIFT_WEIGHT_PUB", defaults.public)?,
            guest: parse_u32(&lookup, "MAILSHIFT_WEIGHT_GUEST", defaults.guest)?,
        };

        let threshold = match lookup("MAILSHIFT_THRESHOLD") {
            Some(value) => value.trim().parse::<u8>().map_err(|error| {
                AppError::Validation(format!(
                    "invalid MAILSHIFT_THRESHOLD value '{value}': {error}"
                ))
            })?,
            None => DEFAULT_ELIGIBILITY_THRESHOLD,
        };

        let sharing_flags = lookup("MAILSHIFT_CALENDAR_SHARING_FLAGS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|flag| !flag.is_empty() && *flag != "None")
                    .map(str::parse::<SharingFlag>)
                    .collect::<AppResult<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();

        let config = Self {
            threshold,
            weights,
            calendar_options: CalendarSharingOptions {
                send_notification: parse_bool(&lookup, "MAILSHIFT_CALENDAR_NOTIFY", false)?,
                sharing_flags,
            },
            csv_has_headers: parse_bool(&lookup, "MAILSHIFT_CSV_HAS_HEADERS", false)?,
        };
        config.scoring(None)?;

        Ok(config)
    }

    /// Builds scorer configuration, letting a command-line threshold win.
    pub fn scoring(&self, threshold_override: Option<u8>) -> AppResult<ScoringConfig> {
        ScoringConfig::new(self.weights, threshold_override.unwrap_or(self.threshold))
    }
}

fn parse_u32<F>(lookup: &F, name: &str, default: u32) -> AppResult<u32>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value.trim().parse::<u32>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}

fn parse_bool<F>(lookup: &F, name: &str, default: bool) -> AppResult<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(AppError::Validation(format!(
                "invalid {name} value '{value}': expected true or false"
            ))),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use mailshift_domain::{SharingFlag, WeightTable};

    use super::CliConfig;

    fn load(vars: &[(&str, &str)]) -> Result<CliConfig, mailshift_core::AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        CliConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = load(&[]);
        assert!(config.is_ok());

        let config = config.unwrap_or_else(|_| unreachable!());
        assert_eq!(config.threshold, 75);
        assert_eq!(config.weights, WeightTable::default());
        assert!(!config.calendar_options.send_notification);
        assert!(config.calendar_options.sharing_flags.is_empty());
        assert!(!config.csv_has_headers);
    }

    #[test]
    fn variables_override_weights_and_calendar_options() {
        let config = load(&[
            ("MAILSHIFT_WEIGHT_GRP", "8"),
            ("MAILSHIFT_THRESHOLD", "60"),
            ("MAILSHIFT_CALENDAR_NOTIFY", "true"),
            ("MAILSHIFT_CALENDAR_SHARING_FLAGS", "Delegate, CanViewPrivateItems"),
        ])
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.weights.grp, 8);
        assert_eq!(config.weights.usr, 2);
        assert_eq!(config.threshold, 60);
        assert!(config.calendar_options.send_notification);
        assert_eq!(
            config.calendar_options.sharing_flags,
            vec![SharingFlag::Delegate, SharingFlag::CanViewPrivateItems]
        );
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        assert!(load(&[("MAILSHIFT_THRESHOLD", "101")]).is_err());
        assert!(load(&[("MAILSHIFT_THRESHOLD", "-1")]).is_err());
    }

    #[test]
    fn command_line_threshold_wins() {
        let config = load(&[("MAILSHIFT_THRESHOLD", "60")]).unwrap_or_else(|_| unreachable!());
        let scoring = config.scoring(Some(90)).unwrap_or_default();
        assert_eq!(scoring.threshold(), 90);
    }

    #[test]
    fn unknown_sharing_flag_is_rejected() {
        assert!(load(&[("MAILSHIFT_CALENDAR_SHARING_FLAGS", "Everything")]).is_err());
    }
}
