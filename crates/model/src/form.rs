//! Pure transforms between server representations and form drafts
//!
//! Everything here is applied when a form loads and reversed when it is
//! submitted, so each transform comes with its inverse.

use chrono::{Local, TimeZone};
use kc_console_core::TimeUnit;
use std::collections::BTreeMap;

// ============================================================================
// Config Keys
// ============================================================================

/// Mapper config keys edited by the mapping details form
pub mod mapper_keys {
    pub const ROLE_PREFIX: &str = "usermodel.realmRoleMapping.rolePrefix";
    pub const MULTIVALUED: &str = "multivalued";
    pub const CLAIM_NAME: &str = "claim.name";
    pub const JSON_TYPE: &str = "jsonType.label";
    pub const ID_TOKEN_CLAIM: &str = "id.token.claim";
    pub const ACCESS_TOKEN_CLAIM: &str = "access.token.claim";
    pub const USERINFO_TOKEN_CLAIM: &str = "userinfo.token.claim";
}

/// Form-safe name of a dotted config key
pub fn form_key(key: &str) -> String {
    key.replace('.', "_")
}

/// Maps form-safe keys back to the dotted keys they were loaded from
///
/// The plain `_` → `.` rule would corrupt keys that contain underscores
/// (`claim_name` is not `claim.name`), so the original of every loaded key is
/// recorded. Keys that only exist in the form use the plain rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormKeyMap {
    originals: BTreeMap<String, String>,
}

impl FormKeyMap {
    /// Convert a config map to form values, remembering the original keys
    ///
    /// Keys without a dot keep their name. A dotted key whose form name is
    /// already taken gets a numbered suffix, so no entry is ever dropped.
    pub fn to_form(config: &BTreeMap<String, String>) -> (Self, BTreeMap<String, String>) {
        let mut map = FormKeyMap::default();
        let mut form = BTreeMap::new();

        let (plain, dotted): (Vec<_>, Vec<_>) = config.iter().partition(|(k, _)| !k.contains('.'));

        for (key, value) in plain.into_iter().chain(dotted) {
            let safe = map.unused_form_key(key);
            let previous = map.originals.insert(safe.clone(), key.clone());
            debug_assert!(previous.is_none(), "form key {safe} assigned twice");
            form.insert(safe, value.clone());
        }
        (map, form)
    }

    fn unused_form_key(&self, key: &str) -> String {
        let base = form_key(key);
        if !self.originals.contains_key(&base) {
            return base;
        }
        (2..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !self.originals.contains_key(candidate))
            .unwrap_or(base)
    }

    /// Dotted key for a form key
    pub fn original_key(&self, form_key: &str) -> String {
        self.originals
            .get(form_key)
            .cloned()
            .unwrap_or_else(|| form_key.replace('_', "."))
    }

    /// Form key under which an original dotted key is edited
    pub fn form_key_for(&self, original: &str) -> String {
        self.originals
            .iter()
            .find(|(_, o)| o.as_str() == original)
            .map(|(f, _)| f.clone())
            .unwrap_or_else(|| form_key(original))
    }

    /// Convert form values back to a config map with the original keys
    pub fn restore(&self, form: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        form.iter()
            .map(|(k, v)| (self.original_key(k), v.clone()))
            .collect()
    }
}

// ============================================================================
// Multi-Valued Attributes
// ============================================================================

/// One editable attribute row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Attribute rows for a form; an empty map yields one blank row
pub fn attributes_to_rows(attributes: Option<&BTreeMap<String, Vec<String>>>) -> Vec<KeyValue> {
    let rows: Vec<KeyValue> = attributes
        .into_iter()
        .flatten()
        .flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| KeyValue::new(key.clone(), value.clone()))
        })
        .collect();

    if rows.is_empty() {
        vec![KeyValue::default()]
    } else {
        rows
    }
}

/// Attribute map from form rows; rows without a key are dropped
pub fn rows_to_attributes(rows: &[KeyValue]) -> BTreeMap<String, Vec<String>> {
    let mut attributes: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for row in rows {
        let key = row.key.trim();
        if key.is_empty() {
            continue;
        }
        attributes
            .entry(key.to_string())
            .or_default()
            .push(row.value.clone());
    }
    attributes
}

// ============================================================================
// Multi-Line Lists
// ============================================================================

/// Editable rows for a list field, with at least one (blank) row
pub fn to_multi_line(values: Option<&[String]>) -> Vec<String> {
    match values {
        Some(v) if !v.is_empty() => v.to_vec(),
        _ => vec![String::new()],
    }
}

/// List value from editable rows, blank rows dropped
pub fn from_multi_line(rows: &[String]) -> Vec<String> {
    rows.iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Time
// ============================================================================

/// A duration as shown by a time selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeValue {
    pub value: u64,
    pub unit: TimeUnit,
}

impl TimeValue {
    /// Pick the largest unit that divides `seconds` exactly
    pub fn from_seconds(seconds: u64) -> Self {
        if seconds == 0 {
            return Self {
                value: 0,
                unit: TimeUnit::Minute,
            };
        }
        let unit = TimeUnit::all()
            .iter()
            .rev()
            .copied()
            .find(|u| seconds % u.seconds() == 0)
            .unwrap_or(TimeUnit::Second);
        Self {
            value: seconds / unit.seconds(),
            unit,
        }
    }

    /// `seconds` in `unit` when it divides exactly, otherwise in the largest
    /// unit that does
    pub fn in_unit(seconds: u64, unit: TimeUnit) -> Self {
        if seconds % unit.seconds() == 0 {
            Self {
                value: seconds / unit.seconds(),
                unit,
            }
        } else {
            Self::from_seconds(seconds)
        }
    }

    /// Total seconds, or `None` past [`MAX_SECONDS`]
    pub fn to_seconds(&self) -> Option<u64> {
        self.value
            .checked_mul(self.unit.seconds())
            .filter(|seconds| *seconds <= MAX_SECONDS)
    }
}

/// Longest duration a time selector accepts; the server keeps these in 32-bit fields
pub const MAX_SECONDS: u64 = i32::MAX as u64;

/// Revocation time for display: "None" when unset
pub fn format_not_before(not_before: i64) -> String {
    if not_before == 0 {
        return "None".to_string();
    }
    format_timestamp(not_before)
}

/// Seconds since the epoch as a long local date and time
pub fn format_timestamp(seconds: i64) -> String {
    match Local.timestamp_opt(seconds, 0).single() {
        Some(time) => time.format("%B %-d, %Y %-I:%M %p").to_string(),
        None => seconds.to_string(),
    }
}

/// Current time in seconds since the epoch
pub fn now_seconds() -> i64 {
    chrono::Utc::now().timestamp()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_form_keys_restore_exactly() {
        let original = config(&[
            (mapper_keys::CLAIM_NAME, "realm_access.roles"),
            (mapper_keys::ACCESS_TOKEN_CLAIM, "true"),
            ("user_attribute", "locale"),
        ]);

        let (map, form) = FormKeyMap::to_form(&original);
        assert_eq!(form.get("claim_name").map(String::as_str), Some("realm_access.roles"));
        assert_eq!(form.get("access_token_claim").map(String::as_str), Some("true"));
        assert_eq!(map.restore(&form), original);
    }

    #[test]
    fn test_new_form_keys_use_dot_rule() {
        let (map, mut form) = FormKeyMap::to_form(&config(&[("multivalued", "true")]));
        form.insert("userinfo_token_claim".to_string(), "false".to_string());

        let restored = map.restore(&form);
        assert_eq!(
            restored.get(mapper_keys::USERINFO_TOKEN_CLAIM).map(String::as_str),
            Some("false")
        );
        assert_eq!(map.form_key_for(mapper_keys::JSON_TYPE), "jsonType_label");
    }

    #[test]
    fn test_colliding_keys_stay_distinct() {
        let original = config(&[("a.b", "dotted"), ("a_b", "underscored")]);
        let (map, form) = FormKeyMap::to_form(&original);
        assert_eq!(form.len(), 2);
        assert_eq!(form.get("a_b").map(String::as_str), Some("underscored"));
        assert_eq!(form.get("a_b_2").map(String::as_str), Some("dotted"));
        assert_eq!(map.form_key_for("a.b"), "a_b_2");
        assert_eq!(map.restore(&form), original);
    }

    #[test]
    fn test_suffix_skips_taken_names() {
        let original = config(&[
            ("a.b", "one"),
            ("a_b", "two"),
            ("a_b_2", "three"),
            ("a.b_2", "four"),
        ]);
        let (map, form) = FormKeyMap::to_form(&original);
        assert_eq!(form.len(), 4);
        assert!(form.keys().all(|k| !k.contains('.')));
        assert_eq!(map.restore(&form), original);
    }

    #[test]
    fn test_attribute_rows() {
        assert_eq!(attributes_to_rows(None), vec![KeyValue::default()]);

        let mut attributes = BTreeMap::new();
        attributes.insert("team".to_string(), vec!["a".to_string(), "b".to_string()]);
        let mut rows = attributes_to_rows(Some(&attributes));
        assert_eq!(rows.len(), 2);

        rows.push(KeyValue::new("  ", "dropped"));
        rows.push(KeyValue::new("site", "eu"));
        let back = rows_to_attributes(&rows);
        assert_eq!(back["team"], vec!["a", "b"]);
        assert_eq!(back["site"], vec!["eu"]);
        assert_eq!(back.len(), 2);
    }

    #[test]
    fn test_multi_line() {
        assert_eq!(to_multi_line(None), vec![String::new()]);
        let rows = vec![
            "https://app/*".to_string(),
            " ".to_string(),
            "https://other/cb ".to_string(),
        ];
        assert_eq!(
            from_multi_line(&rows),
            vec!["https://app/*".to_string(), "https://other/cb".to_string()]
        );
    }

    #[test]
    fn test_time_value_picks_largest_unit() {
        assert_eq!(
            TimeValue::from_seconds(7200),
            TimeValue { value: 2, unit: TimeUnit::Hour }
        );
        assert_eq!(
            TimeValue::from_seconds(90),
            TimeValue { value: 90, unit: TimeUnit::Second }
        );
        assert_eq!(TimeValue::from_seconds(172_800).unit, TimeUnit::Day);
        assert_eq!(TimeValue { value: 3, unit: TimeUnit::Minute }.to_seconds(), Some(180));
    }

    #[test]
    fn test_chosen_unit_is_kept() {
        assert_eq!(
            TimeValue::in_unit(3_600, TimeUnit::Minute),
            TimeValue { value: 60, unit: TimeUnit::Minute }
        );
        assert_eq!(
            TimeValue::in_unit(0, TimeUnit::Hour),
            TimeValue { value: 0, unit: TimeUnit::Hour }
        );
        // not a whole number of minutes
        assert_eq!(
            TimeValue::in_unit(90, TimeUnit::Minute),
            TimeValue { value: 90, unit: TimeUnit::Second }
        );
    }

    #[test]
    fn test_oversized_duration_is_rejected() {
        let huge = TimeValue { value: 999_999_999_999_999_999, unit: TimeUnit::Day };
        assert_eq!(huge.to_seconds(), None);
        assert_eq!(TimeValue { value: u64::MAX, unit: TimeUnit::Second }.to_seconds(), None);
        assert_eq!(
            TimeValue { value: MAX_SECONDS, unit: TimeUnit::Second }.to_seconds(),
            Some(MAX_SECONDS)
        );
    }

    #[test]
    fn test_not_before_display() {
        assert_eq!(format_not_before(0), "None");
        let shown = format_not_before(1_600_000_000);
        assert_ne!(shown, "None");
        assert!(shown.contains("2020"));
    }
}
