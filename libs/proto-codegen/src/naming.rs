//! Naming pattern engine
//!
//! A pattern is a template with a `%` placeholder standing for the schema's base
//! name, e.g. `I%` turns `User` into `IUser` and `%Enum` turns `Status` into
//! `StatusEnum`. A pattern without `%` is not rejected: it is returned literally.

use heck::ToUpperCamelCase;

pub const PLACEHOLDER: char = '%';
pub const DEFAULT_INTERFACE_PATTERN: &str = "I%";
pub const DEFAULT_ENUM_PATTERN: &str = "%Enum";

const SERVICE_SUFFIX: &str = "Service";
const STUB_PREFIX: &str = "NoImpl";

/// What a pattern is being applied for; decides the default of an empty pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Interface,
    Enum,
}

impl PatternKind {
    pub fn default_pattern(self) -> &'static str {
        match self {
            PatternKind::Interface => DEFAULT_INTERFACE_PATTERN,
            PatternKind::Enum => DEFAULT_ENUM_PATTERN,
        }
    }
}

/// Substitute `base` into `pattern`
pub fn apply_pattern(base: &str, pattern: &str, kind: PatternKind) -> String {
    let pattern = if pattern.is_empty() {
        kind.default_pattern()
    } else {
        pattern
    };
    pattern.replace(PLACEHOLDER, base)
}

/// Generated interface name of a message
pub fn interface_name(base: &str, pattern: &str) -> String {
    apply_pattern(base, pattern, PatternKind::Interface)
}

/// Generated type name of an enum
pub fn enum_name(base: &str, pattern: &str) -> String {
    apply_pattern(base, pattern, PatternKind::Enum)
}

/// Append the `Service` suffix unless the name already carries it
pub fn normalize_service_name(base: &str) -> String {
    if base.ends_with(SERVICE_SUFFIX) {
        base.to_string()
    } else {
        format!("{base}{SERVICE_SUFFIX}")
    }
}

/// Generated interface name of a service; `Calculator` and `CalculatorService`
/// both become `ICalculatorService` under `I%`.
pub fn service_interface_name(base: &str, pattern: &str) -> String {
    interface_name(&normalize_service_name(base), pattern)
}

/// Name of the no-op implementation of a message or (normalized) service
pub fn stub_name(base: &str) -> String {
    format!("{STUB_PREFIX}{base}")
}

/// Lower-case the first character only (`StatusEnum` -> `statusEnum`)
pub fn private_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Exported accessor for a schema field or oneof name (`user_id` -> `UserId`)
pub fn accessor_name(name: &str) -> String {
    name.to_upper_camel_case()
}

/// Strip the schema's own `<Enum>_` prefix from a value identifier
pub fn unprefixed_enum_value<'a>(ident: &'a str, enum_base: &str) -> &'a str {
    ident
        .strip_prefix(enum_base)
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(ident)
}
