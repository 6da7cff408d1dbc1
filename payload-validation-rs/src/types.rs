//! Type descriptors
//!
//! A [`Descriptor`] describes the value accepted for one field of a legend:
//! its [`Kind`] (with only the constraints that make sense for that kind),
//! whether the field is required, and an optional default.
//!
//! The free functions in this module are the builders legends are authored
//! with. They are pure constructors; descriptors are never mutated after a
//! legend is assembled.

use serde_json::Value;

use crate::schema::{ArraySchema, ObjectSchema};

/// Roles a profile can hold
pub const USER_ROLES: [&str; 4] = ["client", "helper", "subdepartment chief", "department chief"];

/// Allowed ordering directions for `order` clauses
pub const ORDERING_DIRECTIONS: [&str; 2] = ["ASC", "DESC"];

/// International phone numbers: a plus sign followed by 10 to 15 digits
pub const PHONE_PATTERN: &str = r"^\+[0-9]{10,15}$";

/// Maximum length of an email address
pub const EMAIL_MAX_LENGTH: usize = 255;

/// String formats understood by the structural validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    Email,
    DateTime,
}

impl StringFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            StringFormat::Email => "email",
            StringFormat::DateTime => "date-time",
        }
    }
}

/// Shapes a filter field may arrive in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterBranch {
    Integer,
    String,
    Array,
    Null,
}

impl FilterBranch {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterBranch::Integer => "integer",
            FilterBranch::String => "string",
            FilterBranch::Array => "array",
            FilterBranch::Null => "null",
        }
    }
}

/// Multi-type field used for "match one or many" query parameters
#[derive(Debug, Clone, PartialEq)]
pub struct FilterType {
    pub branches: Vec<FilterBranch>,
    pub minimum: Option<i64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min_items: Option<usize>,
    /// Descriptor for elements when the field arrives as a sequence
    pub items: Box<Descriptor>,
}

impl FilterType {
    /// Whether the field may arrive in the given shape
    pub fn accepts(&self, branch: FilterBranch) -> bool {
        self.branches.contains(&branch)
    }
}

/// The kind of value a descriptor accepts, with kind-specific constraints
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Integer {
        minimum: Option<i64>,
        maximum: Option<i64>,
    },
    String {
        max_length: Option<usize>,
        format: Option<StringFormat>,
        pattern: Option<&'static str>,
    },
    Boolean,
    Enum {
        values: Vec<String>,
    },
    Filter(FilterType),
    Object(ObjectSchema),
    Array(ArraySchema),
}

/// Structural description of one accepted field
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    kind: Kind,
    required: bool,
    default: Option<Value>,
}

impl Descriptor {
    /// Create an optional descriptor without a default
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            required: false,
            default: None,
        }
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Value assigned when the field is missing from an entry
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Copy of this descriptor with the required flag set as given
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Copy of this descriptor with a default value
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Integer with optional inclusive bounds
pub fn integer(minimum: Option<i64>, maximum: Option<i64>, required: bool) -> Descriptor {
    Descriptor::new(Kind::Integer { minimum, maximum }).with_required(required)
}

/// Database-assigned identifier: an integer of at least 1
pub fn serial() -> Descriptor {
    integer(Some(1), None, false)
}

/// Date-time formatted string
pub fn timestamp() -> Descriptor {
    Descriptor::new(Kind::String {
        max_length: None,
        format: Some(StringFormat::DateTime),
        pattern: None,
    })
}

/// Unconstrained string
pub fn text() -> Descriptor {
    Descriptor::new(Kind::String {
        max_length: None,
        format: None,
        pattern: None,
    })
}

/// String bounded by a maximum length
pub fn string(max_length: usize, required: bool) -> Descriptor {
    Descriptor::new(Kind::String {
        max_length: Some(max_length),
        format: None,
        pattern: None,
    })
    .with_required(required)
}

pub fn boolean() -> Descriptor {
    Descriptor::new(Kind::Boolean)
}

pub fn email() -> Descriptor {
    Descriptor::new(Kind::String {
        max_length: Some(EMAIL_MAX_LENGTH),
        format: Some(StringFormat::Email),
        pattern: None,
    })
}

pub fn phone() -> Descriptor {
    Descriptor::new(Kind::String {
        max_length: None,
        format: None,
        pattern: Some(PHONE_PATTERN),
    })
}

/// String constrained to a fixed value set
pub fn enumeration<I, S>(values: I, required: bool) -> Descriptor
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Descriptor::new(Kind::Enum {
        values: values.into_iter().map(Into::into).collect(),
    })
    .with_required(required)
}

pub fn user_role() -> Descriptor {
    enumeration(USER_ROLES, false)
}

pub fn ordering_direction() -> Descriptor {
    enumeration(ORDERING_DIRECTIONS, false)
}

/// One positive integer, a non-empty array of positive integers, or null
pub fn serial_filter() -> Descriptor {
    Descriptor::new(Kind::Filter(FilterType {
        branches: vec![FilterBranch::Integer, FilterBranch::Array, FilterBranch::Null],
        minimum: Some(1),
        min_length: None,
        max_length: None,
        min_items: Some(1),
        items: Box::new(integer(Some(1), None, false)),
    }))
}

/// One string, a non-empty array of strings, or null
pub fn string_filter(max_length: usize, required: bool) -> Descriptor {
    Descriptor::new(Kind::Filter(FilterType {
        branches: vec![FilterBranch::String, FilterBranch::Array, FilterBranch::Null],
        minimum: None,
        min_length: Some(1),
        max_length: Some(max_length),
        min_items: Some(1),
        items: Box::new(string(max_length, false)),
    }))
    .with_required(required)
}

/// Non-empty array of user roles
pub fn role_filter() -> Descriptor {
    Descriptor::new(Kind::Filter(FilterType {
        branches: vec![FilterBranch::Array],
        minimum: None,
        min_length: None,
        max_length: None,
        min_items: Some(1),
        items: Box::new(user_role()),
    }))
}

/// Nested object field
pub fn object(schema: ObjectSchema) -> Descriptor {
    Descriptor::new(Kind::Object(schema))
}

/// Array field whose elements follow `items`
pub fn array(items: Descriptor, min_items: Option<usize>, unique_items: bool) -> Descriptor {
    Descriptor::new(Kind::Array(ArraySchema::new(items, min_items, unique_items)))
}
