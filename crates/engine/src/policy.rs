//! The module contains the auto-acquisition policy ("AI manager").
//!
//! The policy is a set of named, typed settings. When its `enabled` toggle
//! is on, it is evaluated against the inventory and selects every lead with
//! `score >= min_score` and `price <= max_price`, after the chosen strategy
//! has adjusted both thresholds. Selected leads go through the same cart and
//! settlement path as manual purchases.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, leads::Lead};

/// A tagged setting value. The variant *is* the declared type: updates must
/// carry the same variant as the current value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum SettingValue {
    Toggle(bool),
    Slider(i64),
    Select(String),
}

impl SettingValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Toggle(_) => "toggle",
            Self::Slider(_) => "slider",
            Self::Select(_) => "select",
        }
    }
}

/// A single named policy setting.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolicySetting {
    pub name: String,
    pub value: SettingValue,
    pub description: String,
    /// Allowed values for a `Select`; empty for the other kinds.
    pub options: Vec<String>,
}

/// Strategy presets shifting the selection thresholds.
///
/// - `balanced` leaves the configured thresholds unchanged.
/// - `aggressive` lowers the score floor by 10 points and raises the price
///   ceiling by 25%.
/// - `economical` raises the score floor by 10 points and lowers the price
///   ceiling by 25%.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    #[default]
    Balanced,
    Aggressive,
    Economical,
}

impl Strategy {
    fn from_option(value: &str) -> Self {
        match value {
            "aggressive" => Self::Aggressive,
            "economical" => Self::Economical,
            _ => Self::Balanced,
        }
    }
}

pub const SETTING_ENABLED: &str = "enabled";
pub const SETTING_MIN_SCORE: &str = "min_score";
pub const SETTING_MAX_PRICE: &str = "max_price";
pub const SETTING_STRATEGY: &str = "strategy";

/// The named settings of the AI manager.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AutoPolicy {
    settings: Vec<PolicySetting>,
}

impl Default for AutoPolicy {
    fn default() -> Self {
        Self {
            settings: vec![
                PolicySetting {
                    name: SETTING_ENABLED.to_string(),
                    value: SettingValue::Toggle(false),
                    description: "Let the AI manager select and buy matching leads automatically"
                        .to_string(),
                    options: Vec::new(),
                },
                PolicySetting {
                    name: SETTING_MIN_SCORE.to_string(),
                    value: SettingValue::Slider(70),
                    description: "Minimum quality score a lead must reach".to_string(),
                    options: Vec::new(),
                },
                PolicySetting {
                    name: SETTING_MAX_PRICE.to_string(),
                    value: SettingValue::Slider(10_000),
                    description: "Maximum price per lead, in minor units".to_string(),
                    options: Vec::new(),
                },
                PolicySetting {
                    name: SETTING_STRATEGY.to_string(),
                    value: SettingValue::Select("balanced".to_string()),
                    description: "Buying strategy adjusting both thresholds".to_string(),
                    options: vec![
                        "balanced".to_string(),
                        "aggressive".to_string(),
                        "economical".to_string(),
                    ],
                },
            ],
        }
    }
}

impl AutoPolicy {
    pub fn settings(&self) -> &[PolicySetting] {
        &self.settings
    }

    fn setting(&self, name: &str) -> Option<&PolicySetting> {
        self.settings.iter().find(|setting| setting.name == name)
    }

    /// Updates a setting, type-checked against its declared kind.
    ///
    /// A value of the wrong kind is rejected with `TypeMismatch` and the
    /// setting stays unchanged; for a `Select`, an option outside the
    /// declared list is rejected the same way.
    pub fn update(&mut self, name: &str, value: SettingValue) -> ResultEngine<()> {
        let setting = self
            .settings
            .iter_mut()
            .find(|setting| setting.name == name)
            .ok_or_else(|| EngineError::KeyNotFound(name.to_string()))?;

        if setting.value.kind() != value.kind() {
            return Err(EngineError::TypeMismatch(format!(
                "setting '{name}' is a {}, got a {}",
                setting.value.kind(),
                value.kind()
            )));
        }
        if let SettingValue::Select(option) = &value
            && !setting.options.contains(option)
        {
            return Err(EngineError::TypeMismatch(format!(
                "setting '{name}' does not accept option '{option}'"
            )));
        }

        setting.value = value;
        Ok(())
    }

    pub fn enabled(&self) -> bool {
        matches!(
            self.setting(SETTING_ENABLED).map(|s| &s.value),
            Some(SettingValue::Toggle(true))
        )
    }

    fn min_score(&self) -> i64 {
        match self.setting(SETTING_MIN_SCORE).map(|s| &s.value) {
            Some(SettingValue::Slider(value)) => *value,
            _ => 0,
        }
    }

    fn max_price_minor(&self) -> i64 {
        match self.setting(SETTING_MAX_PRICE).map(|s| &s.value) {
            Some(SettingValue::Slider(value)) => *value,
            _ => 0,
        }
    }

    fn strategy(&self) -> Strategy {
        match self.setting(SETTING_STRATEGY).map(|s| &s.value) {
            Some(SettingValue::Select(value)) => Strategy::from_option(value),
            _ => Strategy::Balanced,
        }
    }

    /// The thresholds after the strategy adjustment.
    pub fn effective_thresholds(&self) -> (i64, i64) {
        let score = self.min_score();
        let price = self.max_price_minor();
        match self.strategy() {
            Strategy::Balanced => (score, price),
            Strategy::Aggressive => ((score - 10).max(0), price + price / 4),
            Strategy::Economical => ((score + 10).min(100), price - price / 4),
        }
    }

    /// Ids of the leads the policy would buy from `inventory`.
    pub fn select(&self, inventory: &[Lead]) -> Vec<Uuid> {
        let (min_score, max_price_minor) = self.effective_thresholds();
        inventory
            .iter()
            .filter(|lead| i64::from(lead.score) >= min_score && lead.price_minor <= max_price_minor)
            .map(|lead| lead.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::leads::LeadDraft;

    fn policy_with(min_score: i64, max_price: i64, strategy: &str) -> AutoPolicy {
        let mut policy = AutoPolicy::default();
        policy
            .update(SETTING_MIN_SCORE, SettingValue::Slider(min_score))
            .unwrap();
        policy
            .update(SETTING_MAX_PRICE, SettingValue::Slider(max_price))
            .unwrap();
        policy
            .update(SETTING_STRATEGY, SettingValue::Select(strategy.to_string()))
            .unwrap();
        policy
    }

    #[test]
    fn update_rejects_wrong_kind() {
        let mut policy = AutoPolicy::default();
        let err = policy
            .update(SETTING_MIN_SCORE, SettingValue::Select("high".to_string()))
            .unwrap_err();

        assert!(matches!(err, EngineError::TypeMismatch(_)));
        // The slider kept its previous value.
        let (min_score, _) = policy.effective_thresholds();
        assert_eq!(min_score, 70);
    }

    #[test]
    fn update_rejects_unknown_select_option() {
        let mut policy = AutoPolicy::default();
        let err = policy
            .update(SETTING_STRATEGY, SettingValue::Select("yolo".to_string()))
            .unwrap_err();

        assert!(matches!(err, EngineError::TypeMismatch(_)));
    }

    #[test]
    fn update_rejects_unknown_setting() {
        let mut policy = AutoPolicy::default();
        let err = policy
            .update("turbo", SettingValue::Toggle(true))
            .unwrap_err();

        assert_eq!(err, EngineError::KeyNotFound("turbo".to_string()));
    }

    #[test]
    fn strategy_adjusts_both_thresholds() {
        assert_eq!(policy_with(70, 8000, "balanced").effective_thresholds(), (70, 8000));
        assert_eq!(
            policy_with(70, 8000, "aggressive").effective_thresholds(),
            (60, 10_000)
        );
        assert_eq!(
            policy_with(70, 8000, "economical").effective_thresholds(),
            (80, 6000)
        );
        // The score floor saturates at the scale ends.
        assert_eq!(policy_with(5, 8000, "aggressive").effective_thresholds().0, 0);
        assert_eq!(policy_with(95, 8000, "economical").effective_thresholds().0, 100);
    }

    #[test]
    fn select_applies_score_and_price_gates() {
        let listed_at = Utc.timestamp_opt(0, 0).unwrap();
        let inventory = vec![
            LeadDraft::new("mortgage", "Central", "Springfield", 92, 8500).listed(listed_at),
            LeadDraft::new("mortgage", "Central", "Shelbyville", 78, 6500).listed(listed_at),
            LeadDraft::new("mortgage", "North", "Capital City", 95, 20_000).listed(listed_at),
        ];

        let policy = policy_with(90, 10_000, "balanced");
        let picked = policy.select(&inventory);

        assert_eq!(picked, vec![inventory[0].id]);
    }
}
