//! Intermediate Representation (IR)
//!
//! Renderer-ready template data. Every name and type expression is already resolved
//! and the values own all their data, so a renderer never needs the schema graph.

use crate::imports::Import;
use serde::{Deserialize, Serialize};

/// Data for one generated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateData {
    /// Target package name
    pub package_name: String,
    /// Path of the schema unit this file was generated from
    pub source_unit_name: String,
    /// Groups of imports, separated by blank lines when rendered
    pub import_groups: Vec<Vec<Import>>,
    pub messages: Vec<MessageData>,
    pub services: Vec<ServiceData>,
    pub enums: Vec<EnumData>,
    /// Whether NoImpl stubs are rendered for the interfaces
    pub emit_stubs: bool,
}

impl TemplateData {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.services.is_empty() && self.enums.is_empty()
    }
}

/// A message interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageData {
    pub name: String,
    pub interface_name: String,
    pub stub_name: String,
    pub comment: String,
    pub fields: Vec<FieldData>,
    pub oneof_groups: Vec<OneofData>,
}

/// A regular (non-oneof) field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldData {
    /// Schema field name
    pub name: String,
    pub accessor_name: String,
    pub type_expr: String,
    pub comment: String,
    /// Name of the owning oneof, empty for regular fields
    pub oneof_name: String,
    /// Declared with the `optional` keyword
    pub optional: bool,
    pub is_oneof_member: bool,
    /// The type is a message interface (or a list of them)
    pub is_message_typed: bool,
}

/// A real oneof group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneofData {
    pub name: String,
    pub accessor_name: String,
    pub members: Vec<OneofMemberData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneofMemberData {
    pub name: String,
    pub accessor_name: String,
    pub type_expr: String,
    /// Name of the parent oneof group
    pub oneof_name: String,
}

/// A service interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceData {
    pub name: String,
    pub interface_name: String,
    pub stub_name: String,
    pub comment: String,
    pub methods: Vec<MethodData>,
}

/// An RPC method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodData {
    pub name: String,
    pub comment: String,
    pub request_type_expr: String,
    pub response_type_expr: String,
}

/// An enum helper type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumData {
    /// Generated name with pattern applied (e.g., StatusEnum)
    pub name: String,
    /// Name for internal lookup tables (e.g., statusEnum)
    pub private_name: String,
    pub comment: String,
    pub values: Vec<EnumValueData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValueData {
    /// Full constant name (e.g., StatusEnum_STATUS_PENDING)
    pub full_name: String,
    /// Unprefixed name (e.g., STATUS_PENDING)
    pub unprefixed_name: String,
    pub comment: String,
    pub number: i32,
}
