//! Group classification registry.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::ClassifierError;
use super::groups::{BUILT_IN_GROUPS, FALLBACK_CLASS, NaturalClass, built_in_class};

/// Where a classification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassSource {
    /// Built-in group table.
    BuiltIn,
    /// Registered at runtime for this company.
    Registered,
    /// Unknown group, fallback class applied.
    Fallback,
}

/// A resolved classification with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Natural class.
    pub class: NaturalClass,
    /// How the class was determined.
    pub source: ClassSource,
}

/// Maps group names to natural classes for one open company.
///
/// Built-in groups are fixed; custom groups are registered per company.
/// Unknown names resolve to [`FALLBACK_CLASS`] through [`Self::classify`]
/// and to an error through [`Self::classify_strict`].
#[derive(Debug, Clone, Default)]
pub struct AccountClassifier {
    registered: BTreeMap<String, NaturalClass>,
}

impl AccountClassifier {
    /// Creates a classifier holding only the built-in groups.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the natural class of a group, falling back to the
    /// credit-like default for unknown names.
    #[must_use]
    pub fn classify(&self, group: &str) -> NaturalClass {
        self.resolve(group).class
    }

    /// Returns the natural class of a group or an error for unknown names.
    pub fn classify_strict(&self, group: &str) -> Result<NaturalClass, ClassifierError> {
        let resolved = self.resolve(group);
        match resolved.source {
            ClassSource::Fallback => Err(ClassifierError::UnknownGroup(group.trim().to_string())),
            ClassSource::BuiltIn | ClassSource::Registered => Ok(resolved.class),
        }
    }

    /// Resolves a group name together with where the answer came from.
    #[must_use]
    pub fn resolve(&self, group: &str) -> Classification {
        let name = group.trim();

        if let Some(class) = built_in_class(name) {
            return Classification {
                class,
                source: ClassSource::BuiltIn,
            };
        }

        if let Some(class) = self.registered.get(name) {
            return Classification {
                class: *class,
                source: ClassSource::Registered,
            };
        }

        warn!(group = %name, fallback = %FALLBACK_CLASS, "Unknown group, applying fallback class");
        Classification {
            class: FALLBACK_CLASS,
            source: ClassSource::Fallback,
        }
    }

    /// Returns true if the group is built in or registered.
    #[must_use]
    pub fn is_known(&self, group: &str) -> bool {
        let name = group.trim();
        built_in_class(name).is_some() || self.registered.contains_key(name)
    }

    /// Registers a custom group.
    ///
    /// Idempotent: registering the same name with the same class again is a
    /// no-op and returns `Ok(false)`. Returns `Ok(true)` on first insertion.
    pub fn register(&mut self, group: &str, class: NaturalClass) -> Result<bool, ClassifierError> {
        let name = group.trim();
        if name.is_empty() {
            return Err(ClassifierError::EmptyName);
        }

        if built_in_class(name).is_some() {
            return Err(ClassifierError::BuiltInGroup(name.to_string()));
        }

        match self.registered.get(name) {
            Some(existing) if *existing == class => Ok(false),
            Some(existing) => Err(ClassifierError::ConflictingClass {
                name: name.to_string(),
                existing: *existing,
                requested: class,
            }),
            None => {
                debug!(group = %name, class = %class, "Registered custom group");
                self.registered.insert(name.to_string(), class);
                Ok(true)
            }
        }
    }

    /// Union of built-in and registered groups for a class.
    #[must_use]
    pub fn list_groups(&self, class: NaturalClass) -> BTreeSet<String> {
        BUILT_IN_GROUPS
            .iter()
            .filter(|(_, c)| *c == class)
            .map(|(name, _)| (*name).to_string())
            .chain(
                self.registered
                    .iter()
                    .filter(|(_, c)| **c == class)
                    .map(|(name, _)| name.clone()),
            )
            .collect()
    }

    /// Registered (non built-in) groups.
    #[must_use]
    pub fn registered_groups(&self) -> &BTreeMap<String, NaturalClass> {
        &self.registered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::groups::names;
    use rstest::rstest;

    #[rstest]
    #[case(names::BANK_ACCOUNTS, NaturalClass::Asset)]
    #[case(names::SUNDRY_DEBTORS, NaturalClass::Asset)]
    #[case(names::CAPITAL_ACCOUNT, NaturalClass::Liability)]
    #[case(names::DUTIES_AND_TAXES, NaturalClass::Liability)]
    #[case(names::SALES_ACCOUNTS, NaturalClass::Income)]
    #[case(names::INDIRECT_EXPENSES, NaturalClass::Expense)]
    fn test_built_in_classification(#[case] group: &str, #[case] expected: NaturalClass) {
        let classifier = AccountClassifier::new();
        assert_eq!(classifier.classify(group), expected);
        assert_eq!(classifier.resolve(group).source, ClassSource::BuiltIn);
    }

    #[test]
    fn test_unknown_group_falls_back_to_credit_like() {
        let classifier = AccountClassifier::new();
        let resolved = classifier.resolve("Bnak Accounts");
        assert_eq!(resolved.class, NaturalClass::Liability);
        assert_eq!(resolved.source, ClassSource::Fallback);
        assert!(!classifier.is_known("Bnak Accounts"));
    }

    #[test]
    fn test_strict_rejects_unknown() {
        let classifier = AccountClassifier::new();
        assert_eq!(
            classifier.classify_strict("Mystery"),
            Err(ClassifierError::UnknownGroup("Mystery".to_string()))
        );
        assert_eq!(
            classifier.classify_strict(names::CASH_IN_HAND),
            Ok(NaturalClass::Asset)
        );
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut classifier = AccountClassifier::new();
        assert_eq!(classifier.register("Petty Cash", NaturalClass::Asset), Ok(true));
        assert_eq!(classifier.register("Petty Cash", NaturalClass::Asset), Ok(false));
        assert_eq!(classifier.registered_groups().len(), 1);
        assert_eq!(classifier.classify("Petty Cash"), NaturalClass::Asset);
        assert_eq!(classifier.resolve("Petty Cash").source, ClassSource::Registered);
    }

    #[test]
    fn test_register_conflicting_class() {
        let mut classifier = AccountClassifier::new();
        classifier.register("Petty Cash", NaturalClass::Asset).unwrap();
        assert_eq!(
            classifier.register("Petty Cash", NaturalClass::Expense),
            Err(ClassifierError::ConflictingClass {
                name: "Petty Cash".to_string(),
                existing: NaturalClass::Asset,
                requested: NaturalClass::Expense,
            })
        );
    }

    #[test]
    fn test_register_rejects_built_in_and_empty() {
        let mut classifier = AccountClassifier::new();
        assert_eq!(
            classifier.register(names::SALES_ACCOUNTS, NaturalClass::Income),
            Err(ClassifierError::BuiltInGroup(names::SALES_ACCOUNTS.to_string()))
        );
        assert_eq!(
            classifier.register("   ", NaturalClass::Asset),
            Err(ClassifierError::EmptyName)
        );
    }

    #[test]
    fn test_list_groups_unions_built_in_and_registered() {
        let mut classifier = AccountClassifier::new();
        classifier.register("Export Sales", NaturalClass::Income).unwrap();

        let income = classifier.list_groups(NaturalClass::Income);
        assert!(income.contains(names::SALES_ACCOUNTS));
        assert!(income.contains(names::DIRECT_INCOMES));
        assert!(income.contains("Export Sales"));
        assert!(!classifier.list_groups(NaturalClass::Asset).contains("Export Sales"));
    }

    #[test]
    fn test_registries_do_not_leak_between_instances() {
        let mut first = AccountClassifier::new();
        first.register("Petty Cash", NaturalClass::Asset).unwrap();

        let second = AccountClassifier::new();
        assert!(!second.is_known("Petty Cash"));
    }

    #[test]
    fn test_names_are_trimmed() {
        let mut classifier = AccountClassifier::new();
        classifier.register("  Petty Cash ", NaturalClass::Asset).unwrap();
        assert_eq!(classifier.classify("Petty Cash"), NaturalClass::Asset);
        assert_eq!(classifier.classify(" Bank Accounts "), NaturalClass::Asset);
    }
}
