//! Lookup tables for migrating legacy modules into the target schema.
//!
//! [`MappingTables`] is pure data: key renames, enumerated value
//! translations, responsible-group expansion and structural removals. The
//! tables are built once per process ([`MappingTables::standard`]) and are
//! read-only afterwards, so a shared reference can be handed to any number
//! of concurrent transformations.
//!
//! # Fallback policy
//!
//! Every lookup is total:
//! - an enumerated value missing from its [`ValueTable`] passes through unchanged;
//! - a responsible group missing from the [`RoleTable`] (or mapped to no
//!   explicit roles) becomes a single-element set holding the original
//!   value, or an empty set when the original value is empty.

use std::{collections::HashMap, sync::OnceLock};

use log::trace;

const MODULE_KEYS: &[(&str, &str)] = &[
    ("module_status", "status"),
    ("created_on", "CreatedOn"),
    ("modified_on", "ModifiedOn"),
    ("created_by", "createdBy"),
    ("modified_by", "ModifiedBy"),
];

const ARTIFACT_KEYS: &[(&str, &str)] = &[
    ("identifier", "legacyID"),
    ("artifact_status", "status"),
    ("created_on", "CreatedOn"),
    ("modified_on", "ModifiedOn"),
    ("created_by", "createdBy"),
    ("modified_by", "ModifiedBy"),
    ("responsible_group", "responsibleGroup"),
    ("key_requirement", "keyRequirement"),
    ("review_status", "reviewStatus"),
    ("oem_status", "oemStatus"),
    ("oem-comment", "oemComment"),
    ("supplier_status", "supplierStatus"),
    ("supplier-comment", "supplierComment"),
];

const LINK_KEYS: &[(&str, &str)] = &[("identifier", "legacyID")];

const DROPPED_MODULE_KEYS: &[&str] = &[
    "module_uri",
    "module_id",
    "module_format",
    "linked_artifacts",
    "structure",
    "artifact_uris_in_module_order",
];

const DROPPED_LINK_KEYS: &[&str] = &[
    "uri",
    "title",
    "link_role_uri",
    "link_role_label",
    "direction",
];

const MODULE_STATUS: &[(&str, &str)] = &[
    ("In work", "draft"),
    ("In change", "inReview"),
    ("Rejected", "rejected"),
    ("Released", "released"),
];

const ARTIFACT_STATUS: &[(&str, &str)] = &[
    ("In work", "draft"),
    ("In change", "inReview"),
    ("Approved", "reviewed"),
    ("Reviewed", "reviewed"),
    ("Released", "released"),
    ("Rejected", "rejected"),
];

const ARTIFACT_TYPE: &[(&str, &str)] = &[
    ("Information", "information"),
    ("Requirements Test", "validationTestCase"),
    ("Note", "information"),
    ("Design", "designRequirement"),
    ("Specification", "systemRequirement"),
    ("Specification Test", "verificationTestCase"),
    ("Specification Test Case", "verificationTestCase"),
    ("Design Test", "verificationTestCase"),
    ("Stakeholder Requirement", "stakeholderRequirement"),
    ("Heading", "heading"),
    ("Image", "information"),
];

const KEY_REQUIREMENT: &[(&str, &str)] = &[
    ("Yes", "yes"),
    ("No", "no"),
    ("true", "yes"),
    ("false", "no"),
];

const REVIEW_STATUS: &[(&str, &str)] = &[
    ("Not reviewed", "notReviewed"),
    ("In review", "inReview"),
    ("Reviewed", "reviewed"),
    ("Rework", "rework"),
];

const OEM_STATUS: &[(&str, &str)] = &[
    ("Accepted", "accepted"),
    ("Not accepted", "notAccepted"),
    ("To be clarified", "toBeClarified"),
    ("Not relevant", "notRelevant"),
];

const SUPPLIER_STATUS: &[(&str, &str)] = &[
    ("Agreed", "agreed"),
    ("Partially agreed", "partiallyAgreed"),
    ("Not agreed", "notAgreed"),
    ("To be clarified", "toBeClarified"),
    ("Not relevant", "notRelevant"),
];

const VARIANT: &[(&str, &str)] = &[
    ("All", "all"),
    ("Base", "base"),
    ("Premium", "premium"),
    ("Export", "export"),
];

const MODULE_TYPE: &[(&str, &str)] = &[
    ("Admin", "att"),
    ("Att", "att"),
    ("Des", "desRS"),
    ("Dt", "desTS"),
    ("Req", "sthRS"),
    ("Rt", "sthTS"),
    ("Req_Sub", "sysRS"),
    ("Spec", "sysRS"),
    ("St", "sysTS"),
];

const SPACE_ID: &[(&str, &str)] = &[
    ("Admin", "_default"),
    ("Att", "00 ATT"),
    ("Des", "03 Design"),
    ("Dt", "04 Verification"),
    ("Req", "01 Stakeholder"),
    ("Rt", "05 Validation"),
    ("Req_Sub", "02 System"),
    ("Spec", "02 System"),
    ("St", "04 Verification"),
];

const LINK_ROLE: &[(&str, &str)] = &[
    ("derived", "refine"),
    ("satisfies", "satisfy"),
    ("reference", "reference"),
    ("verifies", "verify"),
];

const RESPONSIBLE_GROUP: &[(&str, Option<&[&str]>)] = &[
    ("Simulation", Some(&["development", "afterMarketService"])),
    ("Development", Some(&["development"])),
    ("Software", Some(&["development"])),
    ("Hardware", Some(&["development"])),
    ("Testing", Some(&["testing"])),
    ("Validation", Some(&["testing"])),
    ("Quality", Some(&["quality"])),
    ("After Sales", Some(&["afterMarketService"])),
    ("Production", Some(&["production"])),
    ("Purchasing", Some(&["purchasing"])),
    ("Other", None),
];

static STANDARD: OnceLock<MappingTables> = OnceLock::new();

/// A legacy → target key rename table.
///
/// The serialized names of the target model follow these tables.
#[derive(Debug)]
pub struct KeyTable {
    entries: &'static [(&'static str, &'static str)],
}

impl KeyTable {
    /// Returns the target key for a legacy key, if it is renamed.
    pub fn target(&self, legacy: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find_map(|(from, to)| (*from == legacy).then_some(*to))
    }

    /// Iterates over all `(legacy, target)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }
}

/// An enumerated value translation table with pass-through fallback.
#[derive(Debug)]
pub struct ValueTable {
    name: &'static str,
    entries: HashMap<&'static str, &'static str>,
}

impl ValueTable {
    fn new(name: &'static str, pairs: &[(&'static str, &'static str)]) -> Self {
        Self {
            name,
            entries: pairs.iter().copied().collect(),
        }
    }

    /// Returns the table name, used in log records.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the translation of `legacy`, or `None` if it is not classified.
    pub fn get(&self, legacy: &str) -> Option<&'static str> {
        self.entries.get(legacy).copied()
    }

    /// Translates `legacy`, passing unclassified values through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use reqmig_core::mapping::MappingTables;
    /// let tables = MappingTables::standard();
    /// assert_eq!(tables.artifact_status().recode("Approved"), "reviewed");
    /// assert_eq!(tables.artifact_status().recode("Frozen"), "Frozen");
    /// ```
    pub fn recode(&self, legacy: &str) -> String {
        match self.get(legacy) {
            Some(target) => target.to_string(),
            None => {
                trace!(table = self.name, value = legacy; "Unmapped value passed through");
                legacy.to_string()
            }
        }
    }
}

/// Maps a legacy responsible-group category to a set of target roles.
#[derive(Debug)]
pub struct RoleTable {
    entries: HashMap<&'static str, Option<&'static [&'static str]>>,
}

impl RoleTable {
    fn new(pairs: &[(&'static str, Option<&'static [&'static str]>)]) -> Self {
        Self {
            entries: pairs.iter().copied().collect(),
        }
    }

    /// Expands a category into its ordered set of target roles.
    ///
    /// # Examples
    ///
    /// ```
    /// # use reqmig_core::mapping::MappingTables;
    /// let roles = MappingTables::standard().responsible_group();
    /// assert_eq!(roles.expand("Simulation"), vec!["development", "afterMarketService"]);
    /// assert_eq!(roles.expand("Custom"), vec!["Custom"]);
    /// assert!(roles.expand("").is_empty());
    /// ```
    pub fn expand(&self, category: &str) -> Vec<String> {
        match self.entries.get(category).copied().flatten() {
            Some(roles) => roles.iter().map(|role| role.to_string()).collect(),
            None if category.is_empty() => Vec::new(),
            None => vec![category.to_string()],
        }
    }
}

/// Process-wide, read-only lookup tables.
#[derive(Debug)]
pub struct MappingTables {
    module_keys: KeyTable,
    artifact_keys: KeyTable,
    link_keys: KeyTable,
    module_status: ValueTable,
    artifact_status: ValueTable,
    artifact_type: ValueTable,
    key_requirement: ValueTable,
    review_status: ValueTable,
    oem_status: ValueTable,
    supplier_status: ValueTable,
    variant: ValueTable,
    module_type: ValueTable,
    space_id: ValueTable,
    link_role: ValueTable,
    responsible_group: RoleTable,
}

impl MappingTables {
    /// Returns the standard tables, building them on first use.
    pub fn standard() -> &'static MappingTables {
        STANDARD.get_or_init(Self::build)
    }

    fn build() -> Self {
        Self {
            module_keys: KeyTable {
                entries: MODULE_KEYS,
            },
            artifact_keys: KeyTable {
                entries: ARTIFACT_KEYS,
            },
            link_keys: KeyTable { entries: LINK_KEYS },
            module_status: ValueTable::new("module_status", MODULE_STATUS),
            artifact_status: ValueTable::new("artifact_status", ARTIFACT_STATUS),
            artifact_type: ValueTable::new("artifact_type", ARTIFACT_TYPE),
            key_requirement: ValueTable::new("key_requirement", KEY_REQUIREMENT),
            review_status: ValueTable::new("review_status", REVIEW_STATUS),
            oem_status: ValueTable::new("oem_status", OEM_STATUS),
            supplier_status: ValueTable::new("supplier_status", SUPPLIER_STATUS),
            variant: ValueTable::new("variant", VARIANT),
            module_type: ValueTable::new("module_type", MODULE_TYPE),
            space_id: ValueTable::new("space_id", SPACE_ID),
            link_role: ValueTable::new("link_role", LINK_ROLE),
            responsible_group: RoleTable::new(RESPONSIBLE_GROUP),
        }
    }

    pub fn module_keys(&self) -> &KeyTable {
        &self.module_keys
    }

    pub fn artifact_keys(&self) -> &KeyTable {
        &self.artifact_keys
    }

    pub fn link_keys(&self) -> &KeyTable {
        &self.link_keys
    }

    /// Returns `true` if a module-level key is removed during migration.
    pub fn is_dropped_module_key(&self, key: &str) -> bool {
        DROPPED_MODULE_KEYS.contains(&key)
    }

    /// Returns `true` if a linked-artifact key is removed during migration.
    pub fn is_dropped_link_key(&self, key: &str) -> bool {
        DROPPED_LINK_KEYS.contains(&key)
    }

    pub fn module_status(&self) -> &ValueTable {
        &self.module_status
    }

    pub fn artifact_status(&self) -> &ValueTable {
        &self.artifact_status
    }

    pub fn artifact_type(&self) -> &ValueTable {
        &self.artifact_type
    }

    pub fn key_requirement(&self) -> &ValueTable {
        &self.key_requirement
    }

    pub fn review_status(&self) -> &ValueTable {
        &self.review_status
    }

    pub fn oem_status(&self) -> &ValueTable {
        &self.oem_status
    }

    pub fn supplier_status(&self) -> &ValueTable {
        &self.supplier_status
    }

    pub fn variant(&self) -> &ValueTable {
        &self.variant
    }

    /// Module type → target type code.
    pub fn module_type(&self) -> &ValueTable {
        &self.module_type
    }

    /// Module type → grouping code (`space_id`).
    pub fn space_id(&self) -> &ValueTable {
        &self.space_id
    }

    pub fn link_role(&self) -> &ValueTable {
        &self.link_role
    }

    pub fn responsible_group(&self) -> &RoleTable {
        &self.responsible_group
    }

    /// Every enumerated value table, for exhaustive checks.
    pub fn value_tables(&self) -> [&ValueTable; 11] {
        [
            &self.module_status,
            &self.artifact_status,
            &self.artifact_type,
            &self.key_requirement,
            &self.review_status,
            &self.oem_status,
            &self.supplier_status,
            &self.variant,
            &self.module_type,
            &self.space_id,
            &self.link_role,
        ]
    }
}
