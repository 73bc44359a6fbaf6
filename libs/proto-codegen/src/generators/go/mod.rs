//! Go interface generator
//!
//! Builds the template data for a unit's interface file (`*.types.go`) and its
//! NoImpl stub file (`*.noimpl.go`).

mod types;

pub use types::{
    scalar_type, FieldId, NamingPatterns, ResolutionCache, TypeMapper, ENUM_FALLBACK,
    FIELD_FALLBACK,
};

use crate::diagnostics::{Diagnostics, NoopDiagnostics, Reporter};
use crate::error::{Error, Result};
use crate::generators::{GeneratedFile, Generator, OutputKind};
use crate::imports::ImportSet;
use crate::ir::{
    EnumData, EnumValueData, FieldData, MessageData, MethodData, OneofData, OneofMemberData,
    ServiceData, TemplateData,
};
use crate::naming::{
    accessor_name, enum_name, normalize_service_name, private_name, service_interface_name,
    stub_name, unprefixed_enum_value,
};
use crate::needs::GenerationNeeds;
use crate::options::GeneratorOptions;
use crate::schema::{Enum, Message, SchemaGraph, SchemaUnit, Service};
use anyhow::Context;
use std::sync::Arc;

pub const CONTEXT_IMPORT: &str = "context";
pub const ERRORS_IMPORT: &str = "errors";
pub const CORE_IMPORT: &str = "darvaza.org/core";
pub const PROTOREFLECT_IMPORT: &str = "google.golang.org/protobuf/reflect/protoreflect";

/// Output of the Go generator
#[derive(Debug, Default)]
pub struct GoOutput {
    /// Generated files of all units, in unit order
    pub files: Vec<GeneratedFile>,
}

/// Go code generator
pub struct GoGenerator {
    options: GeneratorOptions,
    diagnostics: Arc<dyn Diagnostics>,
}

impl GoGenerator {
    /// Create a generator; `None` options mean all defaults
    pub fn new(options: Option<&GeneratorOptions>) -> Self {
        Self {
            options: GeneratorOptions::resolve(options),
            diagnostics: Arc::new(NoopDiagnostics),
        }
    }

    pub fn new_default() -> Self {
        Self::new(None)
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Effective options, with defaults applied
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn needs(&self, unit: Option<&SchemaUnit>) -> GenerationNeeds {
        GenerationNeeds::compute(unit, Some(&self.options))
    }

    /// Template data for the interface file of a unit
    pub fn build(&self, graph: &SchemaGraph, unit: Option<&SchemaUnit>) -> Result<TemplateData> {
        let unit = unit.ok_or(Error::MissingUnit)?;
        let needs = self.needs(Some(unit));
        let reporter = Reporter::new(self.diagnostics.clone(), &unit.path);
        reporter.debug(format!(
            "building interfaces: messages={} services={} enums={}",
            needs.message_interfaces, needs.service_interfaces, needs.enum_helpers
        ));

        let mut mapper = self.mapper(graph, unit, &reporter);

        let mut imports = ImportSet::new();
        if needs.service_interfaces {
            imports.standard(CONTEXT_IMPORT);
        }
        if needs.enum_helpers {
            imports.standard(ERRORS_IMPORT);
        }

        let messages = if self.options.generate_interfaces {
            self.build_messages(graph, unit, &mut mapper)
        } else {
            Vec::new()
        };

        let services = if self.options.generate_services {
            self.build_services(unit, &mut mapper)
        } else {
            Vec::new()
        };

        let enums = if needs.enum_helpers {
            graph
                .unit_enums(unit)
                .map(|e| self.build_enum_data(e))
                .collect()
        } else {
            Vec::new()
        };

        for (path, local_name) in mapper.referenced_units() {
            imports.unit(path, local_name);
        }

        Ok(TemplateData {
            package_name: unit.package_name.clone(),
            source_unit_name: unit.path.clone(),
            import_groups: imports.into_groups(),
            messages,
            services,
            enums,
            emit_stubs: self.options.generate_no_impl,
        })
    }

    /// Template data for the NoImpl stub file of a unit
    pub fn build_stubs(
        &self,
        graph: &SchemaGraph,
        unit: Option<&SchemaUnit>,
    ) -> Result<TemplateData> {
        let unit = unit.ok_or(Error::MissingUnit)?;
        let needs = self.needs(Some(unit));
        let reporter = Reporter::new(self.diagnostics.clone(), &unit.path);
        reporter.debug(format!("building stubs: enabled={}", needs.stub_output));

        let mut mapper = self.mapper(graph, unit, &reporter);

        let mut imports = ImportSet::new();
        if needs.service_interfaces {
            imports.standard(CONTEXT_IMPORT);
        }
        if needs.stub_output {
            imports.third_party(CORE_IMPORT);
            if needs.message_interfaces {
                imports.third_party(PROTOREFLECT_IMPORT);
            }
        }

        let messages = if self.options.generate_interfaces {
            self.build_messages(graph, unit, &mut mapper)
        } else {
            Vec::new()
        };

        let services = if self.options.generate_services {
            self.build_services(unit, &mut mapper)
        } else {
            Vec::new()
        };

        for (path, local_name) in mapper.referenced_units() {
            imports.unit(path, local_name);
        }

        Ok(TemplateData {
            package_name: unit.package_name.clone(),
            source_unit_name: unit.path.clone(),
            import_groups: imports.into_groups(),
            messages,
            services,
            enums: Vec::new(),
            emit_stubs: true,
        })
    }

    /// All files a unit needs; an empty list is a valid outcome
    pub fn generate_unit(
        &self,
        graph: &SchemaGraph,
        unit: &SchemaUnit,
    ) -> Result<Vec<GeneratedFile>> {
        let needs = self.needs(Some(unit));
        let reporter = Reporter::new(self.diagnostics.clone(), &unit.path);

        if !needs.produces_output() {
            reporter.debug("nothing to generate");
            return Ok(Vec::new());
        }

        let mut files = vec![GeneratedFile {
            kind: OutputKind::Interfaces,
            data: self.build(graph, Some(unit))?,
        }];

        if needs.stub_output {
            files.push(GeneratedFile {
                kind: OutputKind::Stubs,
                data: self.build_stubs(graph, Some(unit))?,
            });
        }

        Ok(files)
    }

    fn mapper<'g>(
        &self,
        graph: &'g SchemaGraph,
        unit: &'g SchemaUnit,
        reporter: &Reporter,
    ) -> TypeMapper<'g> {
        TypeMapper::new(graph, unit, NamingPatterns::from_options(&self.options))
            .with_reporter(reporter.clone())
    }

    fn build_messages(
        &self,
        graph: &SchemaGraph,
        unit: &SchemaUnit,
        mapper: &mut TypeMapper<'_>,
    ) -> Vec<MessageData> {
        graph
            .unit_messages(unit)
            .filter(|m| !m.is_map_entry)
            .map(|m| self.build_message_data(m, mapper))
            .collect()
    }

    fn build_message_data(&self, message: &Message, mapper: &mut TypeMapper<'_>) -> MessageData {
        let interface_name = mapper.message_type(&message.full_name);

        // synthetic oneof members stay regular fields
        let fields = message
            .fields
            .iter()
            .filter(|f| !message.in_real_oneof(f))
            .map(|field| FieldData {
                name: field.name.clone(),
                accessor_name: accessor_name(&field.name),
                type_expr: mapper.resolve_field(message, field),
                comment: comment_text(&field.comment),
                oneof_name: String::new(),
                optional: field.optional,
                is_oneof_member: false,
                // map fields point at their entry message
                is_message_typed: field.is_message() || field.is_map(),
            })
            .collect();

        let oneof_groups = message
            .oneofs
            .iter()
            .filter(|o| !o.synthetic)
            .map(|oneof| OneofData {
                name: oneof.name.clone(),
                accessor_name: accessor_name(&oneof.name),
                members: oneof
                    .fields
                    .iter()
                    .filter_map(|&index| message.fields.get(index))
                    .map(|field| OneofMemberData {
                        name: field.name.clone(),
                        accessor_name: accessor_name(&field.name),
                        type_expr: mapper.resolve_field(message, field),
                        oneof_name: oneof.name.clone(),
                    })
                    .collect(),
            })
            .collect();

        MessageData {
            name: message.name.clone(),
            interface_name,
            stub_name: stub_name(&message.name),
            comment: comment_text(&message.comment),
            fields,
            oneof_groups,
        }
    }

    fn build_services(&self, unit: &SchemaUnit, mapper: &mut TypeMapper<'_>) -> Vec<ServiceData> {
        unit.services
            .iter()
            .map(|s| self.build_service_data(s, mapper))
            .collect()
    }

    fn build_service_data(&self, service: &Service, mapper: &mut TypeMapper<'_>) -> ServiceData {
        ServiceData {
            name: service.name.clone(),
            interface_name: service_interface_name(&service.name, self.options.interface_pattern()),
            stub_name: stub_name(&normalize_service_name(&service.name)),
            comment: comment_text(&service.comment),
            methods: service
                .methods
                .iter()
                .map(|method| MethodData {
                    name: method.name.clone(),
                    comment: comment_text(&method.comment),
                    request_type_expr: mapper.message_type(&method.input),
                    response_type_expr: mapper.message_type(&method.output),
                })
                .collect(),
        }
    }

    fn build_enum_data(&self, enum_def: &Enum) -> EnumData {
        let name = enum_name(&enum_def.name, self.options.enum_pattern());

        let values = enum_def
            .values
            .iter()
            .map(|value| {
                let unprefixed = unprefixed_enum_value(&value.ident, &enum_def.name);
                EnumValueData {
                    full_name: format!("{name}_{unprefixed}"),
                    unprefixed_name: unprefixed.to_string(),
                    comment: comment_text(&value.comment),
                    number: value.number,
                }
            })
            .collect();

        EnumData {
            private_name: private_name(&name),
            comment: comment_text(&enum_def.comment),
            values,
            name,
        }
    }
}

impl Generator for GoGenerator {
    type Output = GoOutput;

    fn generate(&self, graph: &SchemaGraph) -> anyhow::Result<Self::Output> {
        let mut output = GoOutput::default();

        for unit in graph.units() {
            let files = self
                .generate_unit(graph, unit)
                .with_context(|| format!("generating Go interfaces for {}", unit.path))?;
            output.files.extend(files);
        }

        Ok(output)
    }
}

fn comment_text(comment: &Option<String>) -> String {
    comment.as_deref().map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, MessageBuilder, Method, ScalarKind};

    fn calculator() -> SchemaGraph {
        SchemaGraph::builder()
            .unit("calculator.proto", "calculatorpb", "example.com/calculatorpb", |u| {
                u.message(
                    MessageBuilder::new("calculator.AddRequest", "AddRequest")
                        .field(Field::scalar("a", 1, ScalarKind::Double))
                        .field(Field::scalar("b", 2, ScalarKind::Double)),
                )
                .message(
                    MessageBuilder::new("calculator.AddResponse", "AddResponse")
                        .field(Field::scalar("result", 1, ScalarKind::Double)),
                )
                .service(Service::new("Calculator").method(Method::new(
                    "Add",
                    "calculator.AddRequest",
                    "calculator.AddResponse",
                )))
            })
            .build()
    }

    #[test]
    fn test_missing_unit_is_an_error() {
        let graph = calculator();
        let generator = GoGenerator::new_default();
        assert!(matches!(generator.build(&graph, None), Err(Error::MissingUnit)));
        assert!(matches!(generator.build_stubs(&graph, None), Err(Error::MissingUnit)));
    }

    #[test]
    fn test_service_data() {
        let graph = calculator();
        let data = GoGenerator::new_default()
            .build(&graph, graph.unit("calculator.proto"))
            .unwrap();

        let service = &data.services[0];
        assert_eq!(service.interface_name, "ICalculatorService");
        assert_eq!(service.stub_name, "NoImplCalculatorService");
        assert_eq!(service.methods[0].request_type_expr, "IAddRequest");
        assert_eq!(service.methods[0].response_type_expr, "IAddResponse");
        assert_eq!(data.import_groups.len(), 1);
        assert_eq!(data.import_groups[0][0].path, CONTEXT_IMPORT);
    }

    #[test]
    fn test_comment_text_trims() {
        assert_eq!(comment_text(&Some("  Adds numbers.\n".into())), "Adds numbers.");
        assert_eq!(comment_text(&None), "");
    }
}
