//! Fluent construction of schema graphs
//!
//! Front ends that do not deserialize a graph, and tests, assemble one here. The
//! builder takes care of the bookkeeping the descriptor compiler would otherwise do:
//! tagging entities with their unit, synthesizing map entry messages and wiring
//! oneof membership.

use super::{Enum, Field, FieldType, Message, Oneof, ScalarKind, SchemaGraph, SchemaUnit, Service};
use heck::ToUpperCamelCase;

/// Builder for a whole [`SchemaGraph`]
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: SchemaGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit; entities are declared inside the closure
    pub fn unit(
        mut self,
        path: &str,
        package_name: &str,
        import_path: &str,
        define: impl FnOnce(UnitBuilder) -> UnitBuilder,
    ) -> Self {
        let unit = define(UnitBuilder::new(SchemaUnit::new(path, package_name, import_path)));
        self.graph.insert_unit(unit.unit, unit.messages, unit.enums);
        self
    }

    pub fn build(self) -> SchemaGraph {
        self.graph
    }
}

/// Collects the entities of one unit
#[derive(Debug)]
pub struct UnitBuilder {
    unit: SchemaUnit,
    messages: Vec<Message>,
    enums: Vec<Enum>,
}

impl UnitBuilder {
    fn new(unit: SchemaUnit) -> Self {
        Self {
            unit,
            messages: Vec::new(),
            enums: Vec::new(),
        }
    }

    /// Declare a message; synthesized map entries are declared right after it
    pub fn message(mut self, message: MessageBuilder) -> Self {
        self.messages.push(message.message);
        self.messages.extend(message.entries);
        self
    }

    pub fn enumeration(mut self, enum_def: Enum) -> Self {
        self.enums.push(enum_def);
        self
    }

    pub fn service(mut self, service: Service) -> Self {
        self.unit.services.push(service);
        self
    }
}

/// Builder for a message and the entry messages of its map fields
#[derive(Debug)]
pub struct MessageBuilder {
    message: Message,
    entries: Vec<Message>,
}

impl MessageBuilder {
    pub fn new(full_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            message: Message::new(full_name, name),
            entries: Vec::new(),
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.message.comment = Some(comment.into());
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.message.fields.push(field);
        self
    }

    /// Add a proto3 `optional` scalar, wrapped in a synthetic oneof
    pub fn optional_scalar(mut self, name: &str, number: i32, kind: ScalarKind) -> Self {
        let index = self.message.fields.len();
        let mut field = Field::scalar(name, number, kind).optional();
        field.oneof = Some(self.message.oneofs.len());
        self.message.fields.push(field);
        self.message
            .oneofs
            .push(Oneof::infer_synthetic(format!("_{name}"), vec![index]));
        self
    }

    /// Add a real oneof group with the given members
    pub fn oneof(mut self, name: &str, members: Vec<Field>) -> Self {
        let oneof_index = self.message.oneofs.len();
        let mut indices = Vec::with_capacity(members.len());

        for mut member in members {
            member.oneof = Some(oneof_index);
            indices.push(self.message.fields.len());
            self.message.fields.push(member);
        }

        self.message.oneofs.push(Oneof {
            name: name.to_string(),
            synthetic: false,
            fields: indices,
        });
        self
    }

    /// Add a map field, synthesizing its `<Name>Entry` message
    pub fn map_field(mut self, name: &str, number: i32, key: ScalarKind, value: FieldType) -> Self {
        let entry_base = format!("{}Entry", name.to_upper_camel_case());
        let mut entry = Message::new(
            format!("{}.{}", self.message.full_name, entry_base),
            format!("{}_{}", self.message.name, entry_base),
        );
        entry.is_map_entry = true;
        entry.fields.push(Field::scalar("key", 1, key));
        entry.fields.push(Field::new("value", 2, value));

        self.message.fields.push(Field::new(
            name,
            number,
            FieldType::Map {
                entry: entry.full_name.clone(),
            },
        ));
        self.entries.push(entry);
        self
    }

    pub fn build(self) -> (Message, Vec<Message>) {
        (self.message, self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_field_synthesizes_entry() {
        let graph = SchemaGraph::builder()
            .unit("node.proto", "nodepb", "example.com/nodepb", |u| {
                u.message(MessageBuilder::new("test.Node", "Node").map_field(
                    "children",
                    1,
                    ScalarKind::String,
                    FieldType::Message("test.Node".into()),
                ))
            })
            .build();

        let entry = graph.message("test.Node.ChildrenEntry").unwrap();
        assert!(entry.is_map_entry);
        assert_eq!(entry.name, "Node_ChildrenEntry");
        assert_eq!(entry.map_key().unwrap().field_type, FieldType::Scalar(ScalarKind::String));

        let unit = graph.unit("node.proto").unwrap();
        assert_eq!(unit.messages, vec!["test.Node", "test.Node.ChildrenEntry"]);
    }

    #[test]
    fn test_oneof_members_are_wired() {
        let (message, _) = MessageBuilder::new("test.Shape", "Shape")
            .field(Field::scalar("id", 1, ScalarKind::String))
            .oneof(
                "kind",
                vec![
                    Field::scalar("circle", 2, ScalarKind::Double),
                    Field::scalar("square", 3, ScalarKind::Double),
                ],
            )
            .optional_scalar("label", 4, ScalarKind::String)
            .build();

        assert_eq!(message.oneofs.len(), 2);
        assert_eq!(message.oneofs[0].fields, vec![1, 2]);
        assert!(message.in_real_oneof(&message.fields[1]));
        assert!(message.oneofs[1].synthetic);
        assert!(!message.in_real_oneof(&message.fields[3]));
        assert!(message.fields[3].optional);
    }
}
