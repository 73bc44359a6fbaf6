//! Type mapping from schema fields to Go type expressions

use crate::diagnostics::{NoopDiagnostics, Reporter};
use crate::naming::{enum_name, interface_name};
use crate::options::GeneratorOptions;
use crate::schema::{Field, FieldType, Message, ScalarKind, SchemaGraph, SchemaUnit};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

/// Untyped placeholder for unresolvable or in-progress fields
pub const FIELD_FALLBACK: &str = "any";
/// Placeholder for references to unknown enums
pub const ENUM_FALLBACK: &str = "int32";

/// Identity of a field within the schema graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId {
    /// Fully-qualified name of the owning message
    pub message: String,
    pub field: String,
}

impl FieldId {
    pub fn new(owner: &Message, field: &Field) -> Self {
        Self {
            message: owner.full_name.clone(),
            field: field.name.clone(),
        }
    }
}

/// The naming patterns a type expression was resolved under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamingPatterns {
    pub interface: String,
    pub enumeration: String,
}

impl NamingPatterns {
    pub fn new(interface: impl Into<String>, enumeration: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            enumeration: enumeration.into(),
        }
    }

    pub fn from_options(options: &GeneratorOptions) -> Self {
        Self::new(options.interface_pattern(), options.enum_pattern())
    }
}

impl Default for NamingPatterns {
    fn default() -> Self {
        Self::from_options(&GeneratorOptions::default())
    }
}

/// Memoized resolutions: field identity -> patterns -> type expression.
///
/// A key is written with [`FIELD_FALLBACK`] before its dependencies are resolved and
/// overwritten once the real expression is known, so a resolution that loops back
/// onto itself terminates with the placeholder.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: HashMap<FieldId, HashMap<NamingPatterns, String>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &FieldId, patterns: &NamingPatterns) -> Option<&str> {
        self.entries
            .get(id)
            .and_then(|by_pattern| by_pattern.get(patterns))
            .map(String::as_str)
    }

    pub fn insert(&mut self, id: FieldId, patterns: NamingPatterns, type_expr: String) {
        self.entries
            .entry(id)
            .or_default()
            .insert(patterns, type_expr);
    }

    /// Number of (field, patterns) resolutions held
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Go type of a scalar kind
pub fn scalar_type(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Bool => "bool",
        ScalarKind::Int32 | ScalarKind::Sint32 | ScalarKind::Sfixed32 => "int32",
        ScalarKind::Uint32 | ScalarKind::Fixed32 => "uint32",
        ScalarKind::Int64 | ScalarKind::Sint64 | ScalarKind::Sfixed64 => "int64",
        ScalarKind::Uint64 | ScalarKind::Fixed64 => "uint64",
        ScalarKind::Float => "float32",
        ScalarKind::Double => "float64",
        ScalarKind::String => "string",
        ScalarKind::Bytes => "[]byte",
    }
}

/// Resolves field types for one generated unit under one set of patterns.
///
/// The cache lives and dies with the mapper; mappers are never shared between
/// units or builds.
pub struct TypeMapper<'g> {
    graph: &'g SchemaGraph,
    unit: &'g SchemaUnit,
    patterns: NamingPatterns,
    cache: ResolutionCache,
    /// Other units referenced so far, import path -> local package name
    referenced_units: BTreeMap<String, String>,
    /// Local package names already taken by `referenced_units`
    package_names: HashSet<String>,
    reporter: Reporter,
}

impl<'g> TypeMapper<'g> {
    pub fn new(graph: &'g SchemaGraph, unit: &'g SchemaUnit, patterns: NamingPatterns) -> Self {
        Self {
            graph,
            unit,
            patterns,
            cache: ResolutionCache::new(),
            referenced_units: BTreeMap::new(),
            package_names: HashSet::new(),
            reporter: Reporter::new(Arc::new(NoopDiagnostics), &unit.path),
        }
    }

    pub(crate) fn with_reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn patterns(&self) -> &NamingPatterns {
        &self.patterns
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Units whose types were referenced, import path -> local package name
    pub fn referenced_units(&self) -> &BTreeMap<String, String> {
        &self.referenced_units
    }

    /// Type expression of a field declared on `owner`
    pub fn resolve_field(&mut self, owner: &Message, field: &Field) -> String {
        let id = FieldId::new(owner, field);
        if let Some(cached) = self.cache.get(&id, &self.patterns) {
            return cached.to_string();
        }

        self.cache
            .insert(id.clone(), self.patterns.clone(), FIELD_FALLBACK.to_string());
        let resolved = self.resolve_type(&field.field_type);
        self.reporter
            .trace(format!("resolved {}.{} as {}", id.message, id.field, resolved));
        self.cache
            .insert(id, self.patterns.clone(), resolved.clone());

        resolved
    }

    fn resolve_type(&mut self, field_type: &FieldType) -> String {
        match field_type {
            FieldType::Scalar(kind) => scalar_type(*kind).to_string(),
            FieldType::Message(name) => self.message_type(name),
            FieldType::Enum(name) => self.enum_type(name),
            FieldType::List(element) => format!("[]{}", self.resolve_type(element)),
            FieldType::Map { entry } => self.map_type(entry),
        }
    }

    /// Interface type of a message, qualified when defined in another unit.
    ///
    /// Message types are never wrapped: the interface value itself conveys presence.
    pub fn message_type(&mut self, full_name: &str) -> String {
        let graph = self.graph;
        match graph.message(full_name) {
            Some(message) => {
                let name = interface_name(&message.name, &self.patterns.interface);
                self.qualify(&message.unit, name)
            }
            None => {
                self.reporter.warn(format!(
                    "message {full_name} not found, using {FIELD_FALLBACK}"
                ));
                FIELD_FALLBACK.to_string()
            }
        }
    }

    /// Generated enum type, qualified when defined in another unit
    pub fn enum_type(&mut self, full_name: &str) -> String {
        let graph = self.graph;
        match graph.enum_def(full_name) {
            Some(enum_def) => {
                let name = enum_name(&enum_def.name, &self.patterns.enumeration);
                self.qualify(&enum_def.unit, name)
            }
            None => {
                self.reporter
                    .warn(format!("enum {full_name} not found, using {ENUM_FALLBACK}"));
                ENUM_FALLBACK.to_string()
            }
        }
    }

    fn map_type(&mut self, entry_name: &str) -> String {
        let graph = self.graph;
        let Some(entry) = graph.message(entry_name) else {
            self.reporter.warn(format!(
                "map entry {entry_name} not found, using {FIELD_FALLBACK}"
            ));
            return FIELD_FALLBACK.to_string();
        };

        match (entry.map_key(), entry.map_value()) {
            (Some(key), Some(value)) => {
                let key = self.resolve_field(entry, key);
                let value = self.resolve_field(entry, value);
                format!("map[{key}]{value}")
            }
            _ => {
                self.reporter.warn(format!(
                    "map entry {entry_name} lacks key/value fields, using {FIELD_FALLBACK}"
                ));
                FIELD_FALLBACK.to_string()
            }
        }
    }

    fn qualify(&mut self, defining_unit: &str, name: String) -> String {
        if defining_unit.is_empty() || defining_unit == self.unit.path {
            return name;
        }

        let graph = self.graph;
        match graph.unit(defining_unit) {
            Some(unit) if unit.import_path != self.unit.import_path => {
                let package = self.local_package_name(unit);
                format!("{package}.{name}")
            }
            Some(_) => name,
            None => {
                self.reporter.debug(format!(
                    "unit {defining_unit} not in graph, leaving {name} unqualified"
                ));
                name
            }
        }
    }

    /// Name a referenced unit's package is known by in the generated file.
    ///
    /// The first import path claiming a package name keeps it; later paths with the
    /// same package name get a numeric suffix (`v1`, `v11`, `v12`, ...).
    fn local_package_name(&mut self, unit: &SchemaUnit) -> String {
        if let Some(local) = self.referenced_units.get(&unit.import_path) {
            return local.clone();
        }

        let mut local = unit.package_name.clone();
        let mut suffix = 1;
        while self.package_names.contains(&local) {
            local = format!("{}{suffix}", unit.package_name);
            suffix += 1;
        }

        if local != unit.package_name {
            self.reporter.debug(format!(
                "package {} of {} already imported, aliasing as {local}",
                unit.package_name, unit.import_path
            ));
        }

        self.package_names.insert(local.clone());
        self.referenced_units
            .insert(unit.import_path.clone(), local.clone());
        local
    }
}
