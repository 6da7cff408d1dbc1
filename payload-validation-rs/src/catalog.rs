//! Required-variant registry
//!
//! Every named base type (as opposed to the parameterised builders in
//! [`crate::types`]) is registered here together with a required copy of
//! itself, so legends can ask for either form by name.

use std::fmt;

use crate::types::{self, Descriptor};

/// Named base types available to legend authors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Serial,
    Timestamp,
    Text,
    Boolean,
    Email,
    Phone,
    UserRole,
    OrderingDirection,
    SerialFilter,
    RoleFilter,
}

impl BaseType {
    /// All base types, in registration order
    pub const ALL: [BaseType; 10] = [
        BaseType::Serial,
        BaseType::Timestamp,
        BaseType::Text,
        BaseType::Boolean,
        BaseType::Email,
        BaseType::Phone,
        BaseType::UserRole,
        BaseType::OrderingDirection,
        BaseType::SerialFilter,
        BaseType::RoleFilter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BaseType::Serial => "Serial",
            BaseType::Timestamp => "Timestamp",
            BaseType::Text => "Text",
            BaseType::Boolean => "Boolean",
            BaseType::Email => "Email",
            BaseType::Phone => "Phone",
            BaseType::UserRole => "UserRole",
            BaseType::OrderingDirection => "OrderingDirection",
            BaseType::SerialFilter => "SerialFilter",
            BaseType::RoleFilter => "RoleFilter",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|base| base.name() == name)
    }

    /// The optional form of this base type
    pub fn descriptor(&self) -> Descriptor {
        match self {
            BaseType::Serial => types::serial(),
            BaseType::Timestamp => types::timestamp(),
            BaseType::Text => types::text(),
            BaseType::Boolean => types::boolean(),
            BaseType::Email => types::email(),
            BaseType::Phone => types::phone(),
            BaseType::UserRole => types::user_role(),
            BaseType::OrderingDirection => types::ordering_direction(),
            BaseType::SerialFilter => types::serial_filter(),
            BaseType::RoleFilter => types::role_filter(),
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A base descriptor paired with its required copy
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredVariant {
    base: Descriptor,
    required: Descriptor,
}

impl RequiredVariant {
    /// Derive the required copy from `base`; the pair owns both descriptors
    pub fn new(base: Descriptor) -> Self {
        let required = base.clone().with_required(true);
        Self { base, required }
    }

    /// The required copy when `required` is set, the untouched base otherwise
    pub fn get(&self, required: bool) -> &Descriptor {
        if required {
            &self.required
        } else {
            &self.base
        }
    }

    pub fn base(&self) -> &Descriptor {
        &self.base
    }
}

/// Immutable registry of named base types and their required variants
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    /// Indexed by position in [`BaseType::ALL`]
    variants: Vec<RequiredVariant>,
}

impl TypeCatalog {
    /// Build the catalog of all standard base types
    pub fn standard() -> Self {
        let variants = BaseType::ALL
            .iter()
            .map(|base| RequiredVariant::new(base.descriptor()))
            .collect();
        Self { variants }
    }

    pub fn variant(&self, base: BaseType) -> &RequiredVariant {
        &self.variants[base as usize]
    }

    /// Descriptor for a base type, optionally in its required form
    pub fn get(&self, base: BaseType, required: bool) -> Descriptor {
        self.variant(base).get(required).clone()
    }

    /// Look a base type up by its name (`"Serial"`, `"UserRole"`, ...)
    pub fn lookup(&self, name: &str, required: bool) -> Option<&Descriptor> {
        BaseType::from_name(name).map(|base| self.variant(base).get(required))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        BaseType::ALL.iter().map(|base| base.name())
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
