//! Generator configuration
//!
//! Options are immutable for a run. Every field defaults independently: an absent
//! configuration behaves like [`GeneratorOptions::default`], and an explicit one only
//! falls back for patterns left empty.

use crate::error::{Error, Result};
use crate::naming::{DEFAULT_ENUM_PATTERN, DEFAULT_INTERFACE_PATTERN};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GENERATE_INTERFACES: bool = true;
pub const DEFAULT_GENERATE_SERVICES: bool = true;
pub const DEFAULT_GENERATE_NO_IMPL: bool = true;
pub const DEFAULT_GENERATE_ENUMS: bool = true;

/// Configuration options for code generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Generate interfaces for messages
    pub generate_interfaces: bool,
    /// Generate service interfaces
    pub generate_services: bool,
    /// Generate NoImpl stubs for interfaces
    pub generate_no_impl: bool,
    /// Generate enum helper types
    pub generate_enums: bool,
    /// Pattern for interface names, e.g. "I%" or "%Interface"
    pub interface_pattern: String,
    /// Pattern for enum type names, e.g. "%Enum" or "E%"
    pub enum_pattern: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            generate_interfaces: DEFAULT_GENERATE_INTERFACES,
            generate_services: DEFAULT_GENERATE_SERVICES,
            generate_no_impl: DEFAULT_GENERATE_NO_IMPL,
            generate_enums: DEFAULT_GENERATE_ENUMS,
            interface_pattern: DEFAULT_INTERFACE_PATTERN.to_string(),
            enum_pattern: DEFAULT_ENUM_PATTERN.to_string(),
        }
    }
}

impl GeneratorOptions {
    /// Effective options for an optional configuration
    pub fn resolve(options: Option<&Self>) -> Self {
        match options {
            None => Self::default(),
            Some(options) => Self {
                interface_pattern: options.interface_pattern().to_string(),
                enum_pattern: options.enum_pattern().to_string(),
                ..options.clone()
            },
        }
    }

    pub fn interface_pattern(&self) -> &str {
        if self.interface_pattern.is_empty() {
            DEFAULT_INTERFACE_PATTERN
        } else {
            &self.interface_pattern
        }
    }

    pub fn enum_pattern(&self) -> &str {
        if self.enum_pattern.is_empty() {
            DEFAULT_ENUM_PATTERN
        } else {
            &self.enum_pattern
        }
    }

    /// Parse a plugin parameter string such as `interfaces=false,enum_pattern=E%`.
    ///
    /// Keys left out keep their defaults; a bare boolean key means `true`.
    pub fn from_parameter(parameter: &str) -> Result<Self> {
        let mut options = Self::default();

        for entry in parameter.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (key, value) = match entry.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (entry, None),
            };

            match key {
                "interfaces" => options.generate_interfaces = parse_flag(key, value)?,
                "services" => options.generate_services = parse_flag(key, value)?,
                "noimpl" => options.generate_no_impl = parse_flag(key, value)?,
                "enums" => options.generate_enums = parse_flag(key, value)?,
                "interface_pattern" => options.interface_pattern = parse_pattern(key, value)?,
                "enum_pattern" => options.enum_pattern = parse_pattern(key, value)?,
                other => return Err(Error::invalid_parameter(other, "unknown option")),
            }
        }

        Ok(options)
    }
}

fn parse_flag(key: &str, value: Option<&str>) -> Result<bool> {
    match value {
        None | Some("1" | "t" | "T" | "true" | "TRUE" | "True") => Ok(true),
        Some("0" | "f" | "F" | "false" | "FALSE" | "False") => Ok(false),
        Some(other) => Err(Error::invalid_parameter(
            key,
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

fn parse_pattern(key: &str, value: Option<&str>) -> Result<String> {
    value
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_parameter(key, "expected a pattern value"))
}
