//! Schema graph
//!
//! Read-only, language-agnostic model of Protocol Buffer definitions handed over by an
//! external descriptor front end. The graph is an arena: messages and enums are stored
//! once, keyed by fully-qualified name, and referenced by name from fields, methods and
//! units. This keeps cyclic message references representable without shared ownership.

mod builder;

pub use builder::{GraphBuilder, MessageBuilder, UnitBuilder};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All schema units and the entities they define
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaGraph {
    /// Units in the order the front end supplied them
    units: Vec<SchemaUnit>,
    /// Messages indexed by fully-qualified name
    messages: HashMap<String, Message>,
    /// Enums indexed by fully-qualified name
    enums: HashMap<String, Enum>,
}

impl SchemaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fluent graph builder
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Load a graph serialized by a front end
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Register a unit together with the entities it defines.
    ///
    /// Each message and enum is tagged with the unit's path and listed on the unit in
    /// the order given.
    pub fn insert_unit(&mut self, mut unit: SchemaUnit, messages: Vec<Message>, enums: Vec<Enum>) {
        for mut message in messages {
            message.unit = unit.path.clone();
            unit.messages.push(message.full_name.clone());
            self.messages.insert(message.full_name.clone(), message);
        }

        for mut enum_def in enums {
            enum_def.unit = unit.path.clone();
            unit.enums.push(enum_def.full_name.clone());
            self.enums.insert(enum_def.full_name.clone(), enum_def);
        }

        self.units.push(unit);
    }

    pub fn units(&self) -> &[SchemaUnit] {
        &self.units
    }

    /// Get a unit by its source path
    pub fn unit(&self, path: &str) -> Option<&SchemaUnit> {
        self.units.iter().find(|u| u.path == path)
    }

    /// Get a message by its fully-qualified name
    pub fn message(&self, full_name: &str) -> Option<&Message> {
        self.messages.get(full_name)
    }

    /// Get an enum by its fully-qualified name
    pub fn enum_def(&self, full_name: &str) -> Option<&Enum> {
        self.enums.get(full_name)
    }

    /// Messages declared by a unit, in declaration order
    pub fn unit_messages<'a>(&'a self, unit: &'a SchemaUnit) -> impl Iterator<Item = &'a Message> {
        unit.messages.iter().filter_map(|name| self.messages.get(name))
    }

    /// Enums declared by a unit, in declaration order
    pub fn unit_enums<'a>(&'a self, unit: &'a SchemaUnit) -> impl Iterator<Item = &'a Enum> {
        unit.enums.iter().filter_map(|name| self.enums.get(name))
    }
}

/// One source definition file compiled in a single pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaUnit {
    /// Source path (e.g., "calculator/v1/calculator.proto")
    pub path: String,
    /// Target package name (e.g., "calculatorv1")
    pub package_name: String,
    /// Module reference other units use to import this one
    pub import_path: String,
    /// Fully-qualified names of declared messages
    #[serde(default)]
    pub messages: Vec<String>,
    /// Fully-qualified names of declared enums
    #[serde(default)]
    pub enums: Vec<String>,
    #[serde(default)]
    pub services: Vec<Service>,
}

impl SchemaUnit {
    pub fn new(
        path: impl Into<String>,
        package_name: impl Into<String>,
        import_path: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            package_name: package_name.into(),
            import_path: import_path.into(),
            ..Self::default()
        }
    }

    pub fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn has_services(&self) -> bool {
        !self.services.is_empty()
    }

    pub fn has_enums(&self) -> bool {
        !self.enums.is_empty()
    }
}

/// A message definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Fully-qualified name (e.g., "calculator.v1.AddRequest")
    pub full_name: String,
    /// Base identifier used for generated names (e.g., "AddRequest", "Outer_Inner")
    pub name: String,
    /// Path of the defining unit
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub oneofs: Vec<Oneof>,
    /// Synthesized key/value entry of a map field
    #[serde(default)]
    pub is_map_entry: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Message {
    pub fn new(full_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            name: name.into(),
            unit: String::new(),
            fields: Vec::new(),
            oneofs: Vec::new(),
            is_map_entry: false,
            comment: None,
        }
    }

    /// Key field of a map entry (position 1)
    pub fn map_key(&self) -> Option<&Field> {
        self.fields.first()
    }

    /// Value field of a map entry (position 2)
    pub fn map_value(&self) -> Option<&Field> {
        self.fields.get(1)
    }

    /// The oneof a field belongs to, if any
    pub fn oneof_of(&self, field: &Field) -> Option<&Oneof> {
        field.oneof.and_then(|index| self.oneofs.get(index))
    }

    /// Whether a field is a member of a real (non-synthetic) oneof
    pub fn in_real_oneof(&self, field: &Field) -> bool {
        self.oneof_of(field).is_some_and(|o| !o.synthetic)
    }
}

/// A message field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub number: i32,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Explicit `optional` keyword
    #[serde(default)]
    pub optional: bool,
    /// Index into the owning message's oneofs
    #[serde(default)]
    pub oneof: Option<usize>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, number: i32, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            number,
            field_type,
            optional: false,
            oneof: None,
            comment: None,
        }
    }

    pub fn scalar(name: impl Into<String>, number: i32, kind: ScalarKind) -> Self {
        Self::new(name, number, FieldType::Scalar(kind))
    }

    pub fn message(name: impl Into<String>, number: i32, message: impl Into<String>) -> Self {
        Self::new(name, number, FieldType::Message(message.into()))
    }

    pub fn enumeration(name: impl Into<String>, number: i32, enum_name: impl Into<String>) -> Self {
        Self::new(name, number, FieldType::Enum(enum_name.into()))
    }

    /// A repeated field of the given element type
    pub fn list(name: impl Into<String>, number: i32, element: FieldType) -> Self {
        Self::new(name, number, FieldType::List(Box::new(element)))
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn is_list(&self) -> bool {
        matches!(self.field_type, FieldType::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self.field_type, FieldType::Map { .. })
    }

    /// Whether the field (or its list element) is message-typed
    pub fn is_message(&self) -> bool {
        self.message_ref().is_some()
    }

    /// Referenced message of a message or repeated-message field
    pub fn message_ref(&self) -> Option<&str> {
        match self.field_type.element() {
            FieldType::Message(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Referenced enum of an enum or repeated-enum field
    pub fn enum_ref(&self) -> Option<&str> {
        match self.field_type.element() {
            FieldType::Enum(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// Shape of a field's type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Scalar(ScalarKind),
    /// Reference to a message by fully-qualified name
    Message(String),
    /// Reference to an enum by fully-qualified name
    Enum(String),
    /// Repeated field
    List(Box<FieldType>),
    /// Map field backed by a synthesized entry message
    Map { entry: String },
}

impl FieldType {
    /// Element type of a list, the type itself otherwise
    pub fn element(&self) -> &FieldType {
        match self {
            FieldType::List(element) => element.as_ref(),
            other => other,
        }
    }
}

/// Protocol Buffer scalar kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Bool,
    Int32,
    Sint32,
    Sfixed32,
    Uint32,
    Fixed32,
    Int64,
    Sint64,
    Sfixed64,
    Uint64,
    Fixed64,
    Float,
    Double,
    String,
    Bytes,
}

/// A oneof group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Oneof {
    pub name: String,
    /// Compiler-generated wrapper of a proto3 `optional` field
    #[serde(default)]
    pub synthetic: bool,
    /// Indices of member fields in the owning message
    #[serde(default)]
    pub fields: Vec<usize>,
}

impl Oneof {
    /// Build a oneof, inferring synthetic-ness from protoc's `_name` convention
    pub fn infer_synthetic(name: impl Into<String>, fields: Vec<usize>) -> Self {
        let name = name.into();
        Self {
            synthetic: name.starts_with('_'),
            name,
            fields,
        }
    }
}

/// A service definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<Method>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            comment: None,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// An RPC method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    /// Fully-qualified request message name
    pub input: String,
    /// Fully-qualified response message name
    pub output: String,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Method {
    pub fn new(
        name: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            output: output.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// An enum definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enum {
    pub full_name: String,
    /// Base identifier used for generated names (e.g., "Status")
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Enum {
    pub fn new(full_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            name: name.into(),
            unit: String::new(),
            values: Vec::new(),
            comment: None,
        }
    }

    /// Add a value declared as `name = number`; its identifier is prefixed with the
    /// enum's own name the way the schema front end does it.
    pub fn value(mut self, name: &str, number: i32) -> Self {
        self.values.push(EnumValue {
            ident: format!("{}_{}", self.name, name),
            number,
            comment: None,
        });
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// An enum value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumValue {
    /// Schema identifier, prefixed with the enum name (e.g., "Status_STATUS_ACTIVE")
    pub ident: String,
    pub number: i32,
    #[serde(default)]
    pub comment: Option<String>,
}
