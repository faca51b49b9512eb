//! Shift type catalog and shift kinds.
//!
//! A [`ShiftTypeDefinition`] is an immutable catalog entry whose default
//! start and end times backfill shifts logged without explicit times. The
//! [`ShiftKind`] enum gives the well-known codes a closed, total mapping to
//! presentation hints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::TimeOfDay;

fn default_sort_order() -> i32 {
    100
}

/// An entry in the shift type catalog.
///
/// # Example
///
/// ```
/// use shift_ledger::models::{ShiftTypeDefinition, TimeOfDay};
///
/// let night = ShiftTypeDefinition {
///     code: "NIGHT".to_string(),
///     name: "Night shift".to_string(),
///     default_start: Some(TimeOfDay::hm(22, 30)),
///     default_end: Some(TimeOfDay::hm(7, 15)),
///     unpaid_break_minutes: 0,
///     sort_order: 30,
/// };
/// assert_eq!(night.code, "NIGHT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTypeDefinition {
    /// Unique catalog key (e.g., "MORNING").
    pub code: String,
    /// Localized display name.
    pub name: String,
    /// Default start time used when a shift has none.
    #[serde(default)]
    pub default_start: Option<TimeOfDay>,
    /// Default end time used when a shift has none.
    #[serde(default)]
    pub default_end: Option<TimeOfDay>,
    /// Unpaid break deducted from the span when deriving worked hours.
    #[serde(default)]
    pub unpaid_break_minutes: u32,
    /// Display ordering within the catalog.
    #[serde(default = "default_sort_order")]
    pub sort_order: i32,
}

impl ShiftTypeDefinition {
    /// Returns the [`ShiftKind`] for this definition's code.
    pub fn kind(&self) -> ShiftKind {
        ShiftKind::from_code(&self.code)
    }
}

/// Lookup over the shift type definitions of the current session.
///
/// Definitions are resolved by exact code, then case-insensitive code, then
/// display name, since stored shifts may reference either.
#[derive(Debug, Clone, Default)]
pub struct ShiftTypeCatalog {
    definitions: Vec<ShiftTypeDefinition>,
    by_code: HashMap<String, usize>,
}

impl ShiftTypeCatalog {
    /// Builds a catalog, rejecting duplicate codes.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_ledger::models::{ShiftTypeCatalog, ShiftTypeDefinition};
    ///
    /// let catalog = ShiftTypeCatalog::new(vec![ShiftTypeDefinition {
    ///     code: "MORNING".to_string(),
    ///     name: "Morning shift".to_string(),
    ///     default_start: None,
    ///     default_end: None,
    ///     unpaid_break_minutes: 60,
    ///     sort_order: 10,
    /// }])
    /// .unwrap();
    ///
    /// assert!(catalog.get("morning").is_some());
    /// assert!(catalog.get("EVENING").is_none());
    /// ```
    pub fn new(mut definitions: Vec<ShiftTypeDefinition>) -> EngineResult<Self> {
        definitions.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.code.cmp(&b.code))
        });

        let mut by_code = HashMap::with_capacity(definitions.len());
        for (index, definition) in definitions.iter().enumerate() {
            if by_code.insert(definition.code.clone(), index).is_some() {
                return Err(EngineError::invalid_input(
                    "code",
                    format!("duplicate shift type code '{}'", definition.code),
                ));
            }
        }

        Ok(Self {
            definitions,
            by_code,
        })
    }

    /// Finds a definition by code or display name.
    pub fn get(&self, key: &str) -> Option<&ShiftTypeDefinition> {
        if let Some(&index) = self.by_code.get(key) {
            return self.definitions.get(index);
        }
        self.definitions
            .iter()
            .find(|d| d.code.eq_ignore_ascii_case(key))
            .or_else(|| self.definitions.iter().find(|d| d.name == key))
    }

    /// Finds a definition, failing with [`EngineError::ShiftTypeNotFound`].
    pub fn require(&self, key: &str) -> EngineResult<&ShiftTypeDefinition> {
        self.get(key).ok_or_else(|| EngineError::ShiftTypeNotFound {
            code: key.to_string(),
        })
    }

    /// Iterates definitions in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ShiftTypeDefinition> {
        self.definitions.iter()
    }

    /// Returns the definitions in display order.
    pub fn definitions(&self) -> &[ShiftTypeDefinition] {
        &self.definitions
    }

    /// Returns the number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if the catalog has no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// The well-known shift kinds, plus a catch-all for custom codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    /// Early day shift.
    Morning,
    /// Afternoon into evening.
    Evening,
    /// Overnight shift.
    Night,
    /// Midday shift.
    Middle,
    /// 07:30 until 16:30.
    EarlyDay,
    /// 16:00 until 00:30.
    LateEvening,
    /// Any code not listed above.
    Custom,
}

/// Icon hint for a shift kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftIcon {
    /// Sun icon.
    Sun,
    /// Sunset icon.
    Sunset,
    /// Moon icon.
    Moon,
    /// Clock icon.
    Clock,
}

/// Presentation hints for rendering a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftPalette {
    /// The icon to show.
    pub icon: ShiftIcon,
    /// The accent colour family.
    pub accent: &'static str,
}

impl ShiftKind {
    /// Maps a shift type code to its kind. Total: unknown codes are `Custom`.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_ledger::models::ShiftKind;
    ///
    /// assert_eq!(ShiftKind::from_code("night"), ShiftKind::Night);
    /// assert_eq!(ShiftKind::from_code("4PM_UNTIL_12"), ShiftKind::LateEvening);
    /// assert_eq!(ShiftKind::from_code("inventory"), ShiftKind::Custom);
    /// ```
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "MORNING" => ShiftKind::Morning,
            "EVENING" => ShiftKind::Evening,
            "NIGHT" => ShiftKind::Night,
            "MIDDLE" => ShiftKind::Middle,
            "7AM_UNTIL_4" => ShiftKind::EarlyDay,
            "4PM_UNTIL_12" => ShiftKind::LateEvening,
            _ => ShiftKind::Custom,
        }
    }

    /// Returns the presentation palette for this kind.
    pub fn palette(self) -> ShiftPalette {
        let (icon, accent) = match self {
            ShiftKind::Morning => (ShiftIcon::Sun, "amber"),
            ShiftKind::Evening => (ShiftIcon::Sunset, "orange"),
            ShiftKind::Night => (ShiftIcon::Moon, "indigo"),
            ShiftKind::Middle => (ShiftIcon::Clock, "teal"),
            ShiftKind::EarlyDay => (ShiftIcon::Clock, "cyan"),
            ShiftKind::LateEvening => (ShiftIcon::Clock, "purple"),
            ShiftKind::Custom => (ShiftIcon::Clock, "slate"),
        };
        ShiftPalette { icon, accent }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(code: &str, name: &str, sort_order: i32) -> ShiftTypeDefinition {
        ShiftTypeDefinition {
            code: code.to_string(),
            name: name.to_string(),
            default_start: None,
            default_end: None,
            unpaid_break_minutes: 0,
            sort_order,
        }
    }

    #[test]
    fn test_catalog_orders_by_sort_order_then_code() {
        let catalog = ShiftTypeCatalog::new(vec![
            definition("NIGHT", "Night", 30),
            definition("MORNING", "Morning", 10),
            definition("EVENING", "Evening", 10),
        ])
        .unwrap();

        let codes: Vec<&str> = catalog.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["EVENING", "MORNING", "NIGHT"]);
    }

    #[test]
    fn test_catalog_rejects_duplicate_codes() {
        let result = ShiftTypeCatalog::new(vec![
            definition("MORNING", "Morning", 10),
            definition("MORNING", "Early", 20),
        ]);
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_catalog_lookup_by_code_case_and_name() {
        let catalog = ShiftTypeCatalog::new(vec![definition("MIDDLE", "Middle shift", 40)]).unwrap();

        assert_eq!(catalog.get("MIDDLE").unwrap().code, "MIDDLE");
        assert_eq!(catalog.get("middle").unwrap().code, "MIDDLE");
        assert_eq!(catalog.get("Middle shift").unwrap().code, "MIDDLE");
        assert!(catalog.get("LUNCH").is_none());
    }

    #[test]
    fn test_catalog_require_unknown_code() {
        let catalog = ShiftTypeCatalog::default();
        match catalog.require("LUNCH") {
            Err(EngineError::ShiftTypeNotFound { code }) => assert_eq!(code, "LUNCH"),
            other => panic!("Expected ShiftTypeNotFound, got {:?}", other),
        }
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_shift_kind_mapping_is_total() {
        assert_eq!(ShiftKind::from_code("MORNING"), ShiftKind::Morning);
        assert_eq!(ShiftKind::from_code("evening"), ShiftKind::Evening);
        assert_eq!(ShiftKind::from_code(" Night "), ShiftKind::Night);
        assert_eq!(ShiftKind::from_code("7am_until_4"), ShiftKind::EarlyDay);
        assert_eq!(ShiftKind::from_code(""), ShiftKind::Custom);
        assert_eq!(ShiftKind::from_code("weekend_bar"), ShiftKind::Custom);
    }

    #[test]
    fn test_palette_for_each_kind() {
        assert_eq!(ShiftKind::Morning.palette().icon, ShiftIcon::Sun);
        assert_eq!(ShiftKind::Evening.palette().icon, ShiftIcon::Sunset);
        assert_eq!(ShiftKind::Night.palette().icon, ShiftIcon::Moon);
        assert_eq!(ShiftKind::Night.palette().accent, "indigo");
        assert_eq!(ShiftKind::Custom.palette().accent, "slate");
    }

    #[test]
    fn test_definition_deserializes_with_defaults() {
        let yaml = r#"
code: EVENING
name: Evening shift
default_start: "14:30"
default_end: "23:15"
"#;
        let definition: ShiftTypeDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(definition.unpaid_break_minutes, 0);
        assert_eq!(definition.sort_order, 100);
        assert_eq!(definition.kind(), ShiftKind::Evening);
        assert_eq!(
            definition.default_end,
            Some(TimeOfDay::Text("23:15".to_string()))
        );
    }
}
