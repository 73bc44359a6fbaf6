#![allow(dead_code)]

use protomcp_codegen::schema::{
    Enum, Field, FieldType, MessageBuilder, Method, ScalarKind, SchemaGraph, Service,
};

pub const ITEM_UNIT: &str = "item/v1/item.proto";
pub const CALCULATOR_UNIT: &str = "calculator/v1/calculator.proto";
pub const STATUS_UNIT: &str = "status/v1/status.proto";
pub const EMPTY_UNIT: &str = "empty/v1/empty.proto";

/// `Item{id: string, status: Status}` and `Status{STATUS_UNSPECIFIED, STATUS_ACTIVE}`
pub fn item_graph() -> SchemaGraph {
    SchemaGraph::builder()
        .unit(ITEM_UNIT, "itemv1", "example.com/gen/item/v1", |u| {
            u.message(
                MessageBuilder::new("item.v1.Item", "Item")
                    .comment(" An inventory item. ")
                    .field(Field::scalar("id", 1, ScalarKind::String))
                    .field(Field::enumeration("status", 2, "item.v1.Status")),
            )
            .enumeration(
                Enum::new("item.v1.Status", "Status")
                    .value("STATUS_UNSPECIFIED", 0)
                    .value("STATUS_ACTIVE", 1),
            )
        })
        .build()
}

/// A service-only unit whose messages live in a shared unit
pub fn calculator_graph() -> SchemaGraph {
    SchemaGraph::builder()
        .unit(CALCULATOR_UNIT, "calculatorv1", "example.com/gen/calculator/v1", |u| {
            u.message(
                MessageBuilder::new("calculator.v1.AddRequest", "AddRequest")
                    .field(Field::scalar("a", 1, ScalarKind::Double))
                    .field(Field::scalar("b", 2, ScalarKind::Double)),
            )
            .message(
                MessageBuilder::new("calculator.v1.AddResponse", "AddResponse")
                    .field(Field::scalar("result", 1, ScalarKind::Double)),
            )
            .service(
                Service::new("Calculator")
                    .with_comment("Basic arithmetic.")
                    .method(Method::new(
                        "Add",
                        "calculator.v1.AddRequest",
                        "calculator.v1.AddResponse",
                    )),
            )
        })
        .build()
}

/// Every field shape in one message, plus an enum-only and an empty unit
pub fn kitchen_sink_graph() -> SchemaGraph {
    SchemaGraph::builder()
        .unit(STATUS_UNIT, "statusv1", "example.com/gen/status/v1", |u| {
            u.enumeration(Enum::new("status.v1.Status", "Status").value("STATUS_UNSPECIFIED", 0))
        })
        .unit(EMPTY_UNIT, "emptyv1", "example.com/gen/empty/v1", |u| u)
        .unit(ITEM_UNIT, "itemv1", "example.com/gen/item/v1", |u| {
            u.message(
                MessageBuilder::new("item.v1.Profile", "Profile")
                    .field(Field::scalar("display_name", 1, ScalarKind::String)),
            )
            .message(
                MessageBuilder::new("item.v1.User", "User")
                    .field(
                        Field::scalar("user_id", 1, ScalarKind::Int64).with_comment("Primary key"),
                    )
                    .field(Field::message("profile", 2, "item.v1.Profile").optional())
                    .field(Field::list(
                        "addresses",
                        3,
                        FieldType::Message("item.v1.Profile".into()),
                    ))
                    .field(Field::scalar("avatar", 4, ScalarKind::Bytes))
                    .field(Field::enumeration("status", 5, "status.v1.Status"))
                    .optional_scalar("nickname", 6, ScalarKind::String)
                    .oneof(
                        "contact",
                        vec![
                            Field::scalar("email", 7, ScalarKind::String),
                            Field::message("phone_owner", 8, "item.v1.Profile"),
                        ],
                    )
                    .map_field(
                        "labels",
                        9,
                        ScalarKind::String,
                        FieldType::Scalar(ScalarKind::Uint32),
                    ),
            )
        })
        .build()
}
