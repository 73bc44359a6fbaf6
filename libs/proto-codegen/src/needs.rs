//! Generation-need decisions
//!
//! Each answer is a "has content" predicate over the unit combined with a "should
//! generate" flag from the options. Nothing is stored between calls.

use crate::options::GeneratorOptions;
use crate::schema::SchemaUnit;

pub fn has_messages(unit: Option<&SchemaUnit>) -> bool {
    unit.is_some_and(SchemaUnit::has_messages)
}

pub fn has_services(unit: Option<&SchemaUnit>) -> bool {
    unit.is_some_and(SchemaUnit::has_services)
}

pub fn has_enums(unit: Option<&SchemaUnit>) -> bool {
    unit.is_some_and(SchemaUnit::has_enums)
}

/// Answers for one unit under one configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationNeeds {
    pub has_messages: bool,
    pub has_services: bool,
    pub has_enums: bool,
    pub message_interfaces: bool,
    pub service_interfaces: bool,
    pub enum_helpers: bool,
    pub any_interface_output: bool,
    pub stub_output: bool,
}

impl GenerationNeeds {
    pub fn compute(unit: Option<&SchemaUnit>, options: Option<&GeneratorOptions>) -> Self {
        let options = GeneratorOptions::resolve(options);

        let has_messages = has_messages(unit);
        let has_services = has_services(unit);
        let has_enums = has_enums(unit);

        let message_interfaces = has_messages && options.generate_interfaces;
        let service_interfaces = has_services && options.generate_services;
        let enum_helpers = has_enums && options.generate_enums;
        let any_interface_output = message_interfaces || service_interfaces;

        Self {
            has_messages,
            has_services,
            has_enums,
            message_interfaces,
            service_interfaces,
            enum_helpers,
            any_interface_output,
            // enums have no behaviour to stub
            stub_output: any_interface_output && options.generate_no_impl,
        }
    }

    /// Whether the unit produces any output file at all
    pub fn produces_output(&self) -> bool {
        self.any_interface_output || self.enum_helpers
    }
}

pub fn needs_message_interfaces(
    unit: Option<&SchemaUnit>,
    options: Option<&GeneratorOptions>,
) -> bool {
    GenerationNeeds::compute(unit, options).message_interfaces
}

pub fn needs_service_interfaces(
    unit: Option<&SchemaUnit>,
    options: Option<&GeneratorOptions>,
) -> bool {
    GenerationNeeds::compute(unit, options).service_interfaces
}

pub fn needs_enum_helpers(unit: Option<&SchemaUnit>, options: Option<&GeneratorOptions>) -> bool {
    GenerationNeeds::compute(unit, options).enum_helpers
}

pub fn needs_any_interface_output(
    unit: Option<&SchemaUnit>,
    options: Option<&GeneratorOptions>,
) -> bool {
    GenerationNeeds::compute(unit, options).any_interface_output
}

pub fn needs_stub_output(unit: Option<&SchemaUnit>, options: Option<&GeneratorOptions>) -> bool {
    GenerationNeeds::compute(unit, options).stub_output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Service;

    fn unit_with(messages: bool, services: bool, enums: bool) -> SchemaUnit {
        let mut unit = SchemaUnit::new("test.proto", "testpb", "example.com/testpb");
        if messages {
            unit.messages.push("test.Item".to_string());
        }
        if services {
            unit.services.push(Service::new("Items"));
        }
        if enums {
            unit.enums.push("test.Status".to_string());
        }
        unit
    }

    fn options_with(
        interfaces: bool,
        services: bool,
        enums: bool,
        no_impl: bool,
    ) -> GeneratorOptions {
        GeneratorOptions {
            generate_interfaces: interfaces,
            generate_services: services,
            generate_enums: enums,
            generate_no_impl: no_impl,
            ..GeneratorOptions::default()
        }
    }

    #[test]
    fn test_missing_unit_has_nothing() {
        let needs = GenerationNeeds::compute(None, None);
        assert_eq!(needs, GenerationNeeds::default());
        assert!(!needs.produces_output());
    }

    #[test]
    fn test_truth_table() {
        for bits in 0..64u8 {
            let flag = |n: u8| (bits & (1 << n)) != 0;
            let unit = unit_with(flag(0), flag(1), flag(2));
            let options = options_with(flag(3), flag(4), flag(5), true);
            let needs = GenerationNeeds::compute(Some(&unit), Some(&options));

            assert_eq!(needs.message_interfaces, flag(0) && flag(3));
            assert_eq!(needs.service_interfaces, flag(1) && flag(4));
            assert_eq!(needs.enum_helpers, flag(2) && flag(5));
            assert_eq!(
                needs.stub_output,
                needs.message_interfaces || needs.service_interfaces
            );

            let options = options_with(flag(3), flag(4), flag(5), false);
            assert!(!needs_stub_output(Some(&unit), Some(&options)));
        }
    }

    #[test]
    fn test_enum_only_unit_never_stubs() {
        let unit = unit_with(false, false, true);
        let options = options_with(true, true, true, true);
        let needs = GenerationNeeds::compute(Some(&unit), Some(&options));

        assert!(needs.enum_helpers);
        assert!(!needs.stub_output);
        assert!(needs.produces_output());
    }

    #[test]
    fn test_absent_options_match_defaults() {
        let unit = unit_with(true, true, true);
        assert_eq!(
            GenerationNeeds::compute(Some(&unit), None),
            GenerationNeeds::compute(Some(&unit), Some(&GeneratorOptions::default()))
        );
    }

    #[test]
    fn test_disabled_flags_produce_nothing() {
        let unit = unit_with(true, true, true);
        let options = options_with(false, false, false, true);
        assert!(!GenerationNeeds::compute(Some(&unit), Some(&options)).produces_output());
    }
}
