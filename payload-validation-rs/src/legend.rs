//! Legend registry
//!
//! Maps every RPC operation name (`"tasks:retrieve"`, `"profiles:save"`, ...)
//! to the [`ObjectSchema`] its payload must satisfy. The registry is assembled
//! once, before any request is served, and is read-only afterwards.

use std::collections::HashMap;

use crate::catalog::{BaseType, TypeCatalog};
use crate::errors::{ValidationError, ValidationResult};
use crate::schema::ObjectSchema;
use crate::types;

/// Largest page a retrieve operation may ask for
pub const MAX_PAGE_SIZE: i64 = 50;

/// Longest content fragment accepted by the task content filter
pub const TASK_CONTENT_FILTER_LENGTH: usize = 128;

/// Longest value accepted by the profile string filters
pub const PROFILE_FILTER_LENGTH: usize = 60;

/// Longest name accepted for catalogue entries and display names
pub const NAME_LENGTH: usize = 60;

/// Longest phone number accepted when saving a profile
pub const PHONE_LENGTH: usize = 15;

/// Reusable legends shared by several operations
pub mod presets {
    use super::*;

    /// No fields accepted, none required
    pub fn nothing() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Only a required `taskId`
    pub fn only_task_id_required(catalog: &TypeCatalog) -> ObjectSchema {
        ObjectSchema::new().property("taskId", catalog.get(BaseType::Serial, true))
    }

    /// Paging, ordering and filtering fields shared by retrieve operations
    pub fn retrieve(catalog: &TypeCatalog, order_columns: &[&str], filters: ObjectSchema) -> ObjectSchema {
        let order_item = ObjectSchema::new()
            .property("column", types::enumeration(order_columns.iter().copied(), true))
            .property("direction", catalog.get(BaseType::OrderingDirection, true));

        ObjectSchema::new()
            .property("limit", types::integer(Some(1), Some(MAX_PAGE_SIZE), false))
            .property("offset", types::integer(Some(0), None, false))
            .property("order", types::array(types::object(order_item), Some(1), true))
            .property("filters", types::object(filters))
    }
}

/// Immutable mapping from operation name to legend
#[derive(Debug, Clone, Default)]
pub struct LegendRegistry {
    legends: HashMap<String, ObjectSchema>,
}

impl LegendRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a legend under an operation name
    pub fn with_legend<S: Into<String>>(mut self, operation: S, legend: ObjectSchema) -> Self {
        self.legends.insert(operation.into(), legend);
        self
    }

    /// Registry holding every supported operation, built from the standard catalog
    pub fn standard() -> Self {
        Self::from_catalog(&TypeCatalog::standard())
    }

    /// Registry holding every supported operation
    pub fn from_catalog(catalog: &TypeCatalog) -> Self {
        let registry = Self::new();
        let registry = register_tasks(registry, catalog);
        let registry = register_task_comments(registry, catalog);
        let registry = register_catalogues(registry, catalog);
        let registry = register_profiles(registry, catalog);
        log::debug!("Legend registry built with {} operations", registry.len());
        registry
    }

    /// Legend for an operation, if registered
    pub fn get(&self, operation: &str) -> Option<&ObjectSchema> {
        self.legends.get(operation)
    }

    /// Legend for an operation, failing for unknown names
    pub fn require(&self, operation: &str) -> ValidationResult<&ObjectSchema> {
        self.get(operation)
            .ok_or_else(|| ValidationError::UnknownOperation(operation.to_string()))
    }

    pub fn contains(&self, operation: &str) -> bool {
        self.legends.contains_key(operation)
    }

    /// Registered operation names, sorted
    pub fn operations(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.legends.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.legends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legends.is_empty()
    }
}

fn register_tasks(registry: LegendRegistry, catalog: &TypeCatalog) -> LegendRegistry {
    let serial = |required| catalog.get(BaseType::Serial, required);
    let serial_filter = || catalog.get(BaseType::SerialFilter, false);

    let filters = ObjectSchema::new()
        .property("closedById", serial_filter())
        .property("typeId", serial_filter())
        .property("universityDepartmentId", serial_filter())
        .property("subdepartmentId", serial_filter())
        .property("content", types::string_filter(TASK_CONTENT_FILTER_LENGTH, false));

    let helper = ObjectSchema::new()
        .property("taskId", serial(true))
        .property("helperId", serial(true));

    registry
        .with_legend(
            "tasks:retrieve",
            presets::retrieve(catalog, &["createdAt", "updatedAt"], filters),
        )
        .with_legend(
            "tasks:save-client",
            ObjectSchema::new()
                .property("content", catalog.get(BaseType::Text, true))
                .property("typeId", serial(true)),
        )
        .with_legend(
            "tasks:save-department chief",
            ObjectSchema::new()
                .property("id", serial(false))
                .property("content", catalog.get(BaseType::Text, true))
                .property("typeId", serial(true))
                .property("clientId", serial(false))
                .property("universityDepartmentId", serial(true))
                .property("subdepartmentId", serial(false)),
        )
        .with_legend("tasks:close", presets::only_task_id_required(catalog))
        .with_legend("tasks:remove", presets::only_task_id_required(catalog))
        .with_legend("tasks:add helper", helper.clone())
        .with_legend("tasks:remove helper", helper)
}

fn register_task_comments(registry: LegendRegistry, catalog: &TypeCatalog) -> LegendRegistry {
    let serial = |required| catalog.get(BaseType::Serial, required);

    registry
        .with_legend("task comments:retrieve", presets::only_task_id_required(catalog))
        .with_legend("task comments:unsubscribe", presets::only_task_id_required(catalog))
        .with_legend(
            "task comments:save",
            ObjectSchema::new()
                .property("content", catalog.get(BaseType::Text, true))
                .property("taskId", serial(true)),
        )
        .with_legend(
            "task comments:save-department chief",
            ObjectSchema::new()
                .property("id", serial(false))
                .property("content", catalog.get(BaseType::Text, true))
                .property("taskId", serial(true)),
        )
        .with_legend(
            "task comments:remove",
            ObjectSchema::new().property("commentId", serial(true)),
        )
}

fn register_catalogues(registry: LegendRegistry, catalog: &TypeCatalog) -> LegendRegistry {
    let serial = |required| catalog.get(BaseType::Serial, required);
    let named = || {
        ObjectSchema::new()
            .property("id", serial(false))
            .property("name", types::string(NAME_LENGTH, true))
    };

    registry
        .with_legend("task types:retrieve", presets::nothing())
        .with_legend(
            "task types:save",
            named().property("subdepartmentId", serial(false)),
        )
        .with_legend("subdepartments:retrieve", presets::nothing())
        .with_legend("subdepartments:save", named())
        .with_legend("university departments:retrieve", presets::nothing())
        .with_legend("university departments:save", named())
}

fn register_profiles(registry: LegendRegistry, catalog: &TypeCatalog) -> LegendRegistry {
    let serial = |required| catalog.get(BaseType::Serial, required);
    let serial_filter = || catalog.get(BaseType::SerialFilter, false);
    let string_filter = || types::string_filter(PROFILE_FILTER_LENGTH, false);

    let filters = ObjectSchema::new()
        .property("id", serial_filter())
        .property("displayName", string_filter())
        .property("email", string_filter())
        .property("phone", string_filter())
        .property("role", catalog.get(BaseType::RoleFilter, false))
        .property("universityDepartmentId", serial_filter())
        .property("subdepartmentId", serial_filter());

    let own_profile = ObjectSchema::new()
        .property("displayName", types::string(NAME_LENGTH, true))
        .property("phone", types::string(PHONE_LENGTH, false));

    registry
        .with_legend(
            "profiles:retrieve",
            presets::retrieve(catalog, &["displayName", "createdAt", "updatedAt"], filters),
        )
        .with_legend("profiles:save", own_profile.clone())
        .with_legend(
            "profiles:save-department chief",
            own_profile.property("id", serial(false)),
        )
        .with_legend(
            "profiles:remove",
            ObjectSchema::new().property("profileId", serial(true)),
        )
        .with_legend(
            "profiles:make client",
            ObjectSchema::new()
                .property("userId", serial(true))
                .property("universityDepartmentId", serial(true)),
        )
        .with_legend(
            "profiles:make helper",
            ObjectSchema::new()
                .property("userId", serial(true))
                .property("chief", catalog.get(BaseType::Boolean, false))
                .property("subdepartmentId", serial(true)),
        )
        .with_legend(
            "profiles:make department chief",
            ObjectSchema::new().property("userId", serial(true)),
        )
        .with_legend(
            "profiles:set subdepartment",
            ObjectSchema::new()
                .property("userId", serial(true))
                .property("subdepartmentId", serial(true)),
        )
        .with_legend(
            "profiles:set university department",
            ObjectSchema::new()
                .property("userId", serial(true))
                .property("universityDepartmentId", serial(true)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Kind;
    use test_case::test_case;

    #[test]
    fn test_standard_registry_has_every_operation() {
        let registry = LegendRegistry::standard();
        assert_eq!(registry.len(), 27);
        assert!(registry.contains("tasks:retrieve"));
        assert!(registry.contains("profiles:set university department"));
        assert!(!registry.contains("nonexistent:op"));
    }

    #[test]
    fn test_operations_are_sorted() {
        let registry = LegendRegistry::standard();
        let operations = registry.operations();
        let mut sorted = operations.clone();
        sorted.sort();
        assert_eq!(operations, sorted);
    }

    #[test]
    fn test_require_unknown_operation() {
        let registry = LegendRegistry::standard();
        assert!(matches!(
            registry.require("nonexistent:op"),
            Err(ValidationError::UnknownOperation(_))
        ));
        assert!(registry.require("tasks:close").is_ok());
    }

    #[test_case("tasks:close" ; "close")]
    #[test_case("tasks:remove" ; "remove")]
    #[test_case("task comments:retrieve" ; "comments retrieve")]
    #[test_case("task comments:unsubscribe" ; "comments unsubscribe")]
    fn test_only_task_id_preset(operation: &str) {
        let registry = LegendRegistry::standard();
        let legend = registry.get(operation).unwrap();
        assert_eq!(legend.len(), 1);
        assert_eq!(legend.required_fields(), vec!["taskId"]);
    }

    #[test_case("task types:retrieve" ; "task types")]
    #[test_case("subdepartments:retrieve" ; "subdepartments")]
    #[test_case("university departments:retrieve" ; "university departments")]
    fn test_nothing_preset(operation: &str) {
        let registry = LegendRegistry::standard();
        assert!(registry.get(operation).unwrap().is_empty());
    }

    #[test]
    fn test_retrieve_paging_fields() {
        let registry = LegendRegistry::standard();
        let legend = registry.get("tasks:retrieve").unwrap();

        assert_eq!(
            legend.get("limit").unwrap().kind(),
            &Kind::Integer {
                minimum: Some(1),
                maximum: Some(50)
            }
        );
        assert_eq!(
            legend.get("offset").unwrap().kind(),
            &Kind::Integer {
                minimum: Some(0),
                maximum: None
            }
        );
        match legend.get("order").unwrap().kind() {
            Kind::Array(array) => {
                assert!(array.unique_items);
                assert_eq!(array.min_items, Some(1));
                match array.items.kind() {
                    Kind::Object(item) => {
                        assert_eq!(item.required_fields(), vec!["column", "direction"])
                    }
                    other => panic!("unexpected order item {:?}", other),
                }
            }
            other => panic!("unexpected order kind {:?}", other),
        }
    }

    #[test]
    fn test_profile_filters() {
        let registry = LegendRegistry::standard();
        let legend = registry.get("profiles:retrieve").unwrap();
        let filters = match legend.get("filters").unwrap().kind() {
            Kind::Object(filters) => filters.clone(),
            other => panic!("unexpected filters kind {:?}", other),
        };
        let names: Vec<&String> = filters.properties().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "displayName",
                "email",
                "id",
                "phone",
                "role",
                "subdepartmentId",
                "universityDepartmentId"
            ]
        );
    }

    #[test]
    fn test_make_helper_chief_is_optional_boolean() {
        let registry = LegendRegistry::standard();
        let legend = registry.get("profiles:make helper").unwrap();
        let chief = legend.get("chief").unwrap();
        assert_eq!(chief.kind(), &Kind::Boolean);
        assert!(!chief.is_required());
        assert_eq!(legend.required_fields(), vec!["subdepartmentId", "userId"]);
    }

    #[test]
    fn test_custom_registry() {
        let registry = LegendRegistry::new().with_legend("ping", presets::nothing());
        assert_eq!(registry.operations(), vec!["ping"]);
        assert!(!registry.is_empty());
    }
}
