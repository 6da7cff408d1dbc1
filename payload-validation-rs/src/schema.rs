//! Schema objects
//!
//! An [`ObjectSchema`] maps field names to [`Descriptor`]s; it is what a
//! legend is made of and what nested `filters`/`order` fields recurse into.
//! Schemas can be exported to a Draft 7 JSON Schema document for the
//! structural validator.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::types::{Descriptor, FilterType, Kind};

/// Schema describing the accepted fields of an object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    properties: BTreeMap<String, Descriptor>,
}

/// Schema describing the elements of an array field
#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    pub items: Box<Descriptor>,
    pub min_items: Option<usize>,
    pub unique_items: bool,
}

impl ArraySchema {
    pub fn new(items: Descriptor, min_items: Option<usize>, unique_items: bool) -> Self {
        Self {
            items: Box::new(items),
            min_items,
            unique_items,
        }
    }
}

impl ObjectSchema {
    /// Create a schema with no properties
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property to the schema
    pub fn property<S: Into<String>>(mut self, name: S, descriptor: Descriptor) -> Self {
        self.properties.insert(name.into(), descriptor);
        self
    }

    /// Descriptor declared for `name`, if any
    pub fn get(&self, name: &str) -> Option<&Descriptor> {
        self.properties.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&String, &Descriptor)> {
        self.properties.iter()
    }

    /// Names of the properties flagged as required
    pub fn required_fields(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter(|(_, descriptor)| descriptor.is_required())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Export as a Draft 7 JSON Schema object
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for (name, descriptor) in &self.properties {
            properties.insert(name.clone(), descriptor.to_json_schema());
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));

        let required = self.required_fields();
        if !required.is_empty() {
            schema.insert("required".to_string(), json!(required));
        }
        Value::Object(schema)
    }
}

impl Descriptor {
    /// Export as a Draft 7 JSON Schema fragment
    pub fn to_json_schema(&self) -> Value {
        let mut schema = match self.kind() {
            Kind::Integer { minimum, maximum } => {
                let mut map = type_map("integer");
                insert_opt(&mut map, "minimum", *minimum);
                insert_opt(&mut map, "maximum", *maximum);
                map
            }
            Kind::String {
                max_length,
                format,
                pattern,
            } => {
                let mut map = type_map("string");
                insert_opt(&mut map, "maxLength", *max_length);
                insert_opt(&mut map, "format", format.as_ref().map(|f| f.as_str()));
                insert_opt(&mut map, "pattern", *pattern);
                map
            }
            Kind::Boolean => type_map("boolean"),
            Kind::Enum { values } => {
                let mut map = type_map("string");
                map.insert("enum".to_string(), json!(values));
                map
            }
            Kind::Filter(filter) => filter_schema(filter),
            Kind::Object(nested) => match nested.to_json_schema() {
                Value::Object(map) => map,
                _ => Map::new(),
            },
            Kind::Array(array) => {
                let mut map = type_map("array");
                map.insert("items".to_string(), array.items.to_json_schema());
                insert_opt(&mut map, "minItems", array.min_items);
                if array.unique_items {
                    map.insert("uniqueItems".to_string(), Value::Bool(true));
                }
                map
            }
        };

        if let Some(default) = self.default_value() {
            schema.insert("default".to_string(), default.clone());
        }
        Value::Object(schema)
    }
}

fn filter_schema(filter: &FilterType) -> Map<String, Value> {
    let branches: Vec<&str> = filter.branches.iter().map(|b| b.as_str()).collect();

    let mut map = Map::new();
    map.insert("type".to_string(), json!(branches));
    insert_opt(&mut map, "minimum", filter.minimum);
    insert_opt(&mut map, "minLength", filter.min_length);
    insert_opt(&mut map, "maxLength", filter.max_length);
    insert_opt(&mut map, "minItems", filter.min_items);
    map.insert("items".to_string(), filter.items.to_json_schema());
    map
}

fn type_map(type_name: &str) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("type".to_string(), json!(type_name));
    map
}

fn insert_opt<T: Into<Value>>(map: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types;

    #[test]
    fn test_property_lookup() {
        let schema = ObjectSchema::new()
            .property("taskId", types::serial().with_required(true))
            .property("content", types::text());

        assert!(schema.contains("taskId"));
        assert!(!schema.contains("extra"));
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.required_fields(), vec!["taskId"]);
        assert!(ObjectSchema::new().is_empty());
    }

    #[test]
    fn test_scalar_export() {
        assert_eq!(
            types::integer(Some(1), Some(50), false).to_json_schema(),
            json!({ "type": "integer", "minimum": 1, "maximum": 50 })
        );
        assert_eq!(
            types::email().to_json_schema(),
            json!({ "type": "string", "maxLength": 255, "format": "email" })
        );
        assert_eq!(
            types::phone().to_json_schema(),
            json!({ "type": "string", "pattern": types::PHONE_PATTERN })
        );
        assert_eq!(
            types::ordering_direction().to_json_schema(),
            json!({ "type": "string", "enum": ["ASC", "DESC"] })
        );
    }

    #[test]
    fn test_filter_export() {
        assert_eq!(
            types::serial_filter().to_json_schema(),
            json!({
                "type": ["integer", "array", "null"],
                "minimum": 1,
                "minItems": 1,
                "items": { "type": "integer", "minimum": 1 }
            })
        );
    }

    #[test]
    fn test_nested_export_collects_required() {
        let order_item = ObjectSchema::new()
            .property("column", types::enumeration(["createdAt"], true))
            .property("direction", types::ordering_direction().with_required(true));
        let schema = ObjectSchema::new()
            .property("limit", types::integer(Some(1), Some(50), false).with_default(json!(20)))
            .property("order", types::array(types::object(order_item), Some(1), true));

        let exported = schema.to_json_schema();
        assert_eq!(exported["properties"]["limit"]["default"], json!(20));
        assert!(exported.get("required").is_none());

        let order = &exported["properties"]["order"];
        assert_eq!(order["type"], json!("array"));
        assert_eq!(order["uniqueItems"], json!(true));
        assert_eq!(order["minItems"], json!(1));
        assert_eq!(order["items"]["required"], json!(["column", "direction"]));
    }
}
