//! Code generators for different target languages
//!
//! Each language has its own module that implements the `Generator` trait.

pub mod go;

use crate::ir::TemplateData;
use crate::schema::SchemaGraph;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Trait that all language generators must implement
pub trait Generator {
    /// The output type of this generator
    type Output;

    /// Generate template data from the schema graph
    fn generate(&self, graph: &SchemaGraph) -> Result<Self::Output>;
}

/// Category of a generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Message/service interfaces and enum helpers
    Interfaces,
    /// NoImpl implementations of the interfaces
    Stubs,
}

impl OutputKind {
    /// Label the renderer appends to the unit's file name prefix
    pub fn suffix(self) -> &'static str {
        match self {
            OutputKind::Interfaces => "types",
            OutputKind::Stubs => "noimpl",
        }
    }
}

/// Template data for one file, ready for the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub kind: OutputKind,
    pub data: TemplateData,
}
