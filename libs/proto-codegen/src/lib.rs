//! Protocol Buffer interface generator
//!
//! This library turns Protocol Buffer message, enum and service definitions into
//! renderer-ready template data for target-language interfaces, NoImpl stubs and enum
//! helpers, under user-selectable naming patterns.
//!
//! ## Architecture
//!
//! The generator uses a three-stage pipeline:
//! 1. **Schema**: A read-only graph of definitions handed over by a descriptor front end
//! 2. **Generators**: Decide what each unit needs, map field types and resolve names
//! 3. **IR (Intermediate Representation)**: Owned template data consumed by a renderer
//!
//! Rendering the template data to source text and writing files is left to the caller.

pub mod diagnostics;
pub mod error;
pub mod generators;
pub mod imports;
pub mod ir;
pub mod naming;
pub mod needs;
pub mod options;
pub mod schema;

pub use error::{Error, Result};
pub use options::GeneratorOptions;

use anyhow::Context;
use generators::go::{GoGenerator, GoOutput};
use ir::TemplateData;
use schema::{SchemaGraph, SchemaUnit};

/// Main entry point for code generation
pub struct CodeGenerator {
    graph: SchemaGraph,
}

impl CodeGenerator {
    pub fn new(graph: SchemaGraph) -> Self {
        Self { graph }
    }

    /// Create a code generator from a graph serialized by the front end
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(SchemaGraph::from_json(json)?))
    }

    /// Get the schema graph
    pub fn graph(&self) -> &SchemaGraph {
        &self.graph
    }

    /// Generate code for a specific language
    pub fn generate<G: generators::Generator>(&self, generator: G) -> anyhow::Result<G::Output> {
        generator.generate(&self.graph)
    }

    /// Build the interface template data of the unit at `path`
    pub fn build_unit(
        &self,
        path: &str,
        options: Option<&GeneratorOptions>,
    ) -> Result<TemplateData> {
        let unit = self
            .graph
            .unit(path)
            .ok_or_else(|| Error::UnitNotFound(path.to_string()))?;
        build(&self.graph, Some(unit), options)
    }
}

/// Build the interface template data of one unit.
///
/// `None` options mean every default; a `None` unit is an [`Error::MissingUnit`].
pub fn build(
    graph: &SchemaGraph,
    unit: Option<&SchemaUnit>,
    options: Option<&GeneratorOptions>,
) -> Result<TemplateData> {
    GoGenerator::new(options).build(graph, unit)
}

/// Convenience helper to run the Go generator over a serialized schema graph.
pub fn generate_go_from_json(
    json: &str,
    options: Option<&GeneratorOptions>,
) -> anyhow::Result<GoOutput> {
    let codegen = CodeGenerator::from_json(json).context("loading schema graph")?;

    let generator = GoGenerator::new(options)
        .with_diagnostics(std::sync::Arc::new(diagnostics::TracingDiagnostics));
    codegen
        .generate(generator)
        .context("running Go generator")
}
