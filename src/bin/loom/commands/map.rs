//! `loom map` command
//!
//! Reads one JSON object or an array of objects and maps each onto the
//! record declared by a schema file.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rayon::prelude::*;

use crate::cli::MapArgs;
use projection_loom::util::Schema;
use projection_loom::{Mapper, MappingConfiguration, Record, TypeDescriptor};

pub fn execute(args: MapArgs, config: Option<&Path>) -> Result<()> {
    let settings = super::settings(config)?;
    let schema = Schema::load(&args.schema)?;
    let input = read_input(args.input.as_deref())?;

    let document: serde_json::Value =
        serde_json::from_str(&input).context("input is not valid JSON")?;

    let mapper = Mapper::with_configuration(MappingConfiguration::from_settings(&settings));
    let descriptor = schema.descriptor();

    let output = match &document {
        serde_json::Value::Array(items) => {
            tracing::debug!("mapping {} documents onto `{}`", items.len(), schema.name());
            let mapped = items
                .par_iter()
                .enumerate()
                .map(|(i, item)| {
                    map_document(&mapper, &descriptor, item)
                        .with_context(|| format!("document {}", i))
                })
                .collect::<Result<Vec<_>>>()?;
            serde_json::Value::Array(mapped)
        }
        item => map_document(&mapper, &descriptor, item)?,
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file: {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn map_document(
    mapper: &Mapper,
    descriptor: &TypeDescriptor,
    document: &serde_json::Value,
) -> Result<serde_json::Value> {
    let serde_json::Value::Object(fields) = document else {
        bail!("expected a JSON object, found {}", json_kind(document));
    };

    let source = Record::from_json_object(fields);
    let mut target = descriptor
        .instantiate()
        .with_context(|| format!("cannot instantiate `{}`", descriptor.name()))?;

    let report = mapper.map_into(&source, target.as_mut());
    for failure in &report.failed {
        tracing::warn!("`{}` left at its default: {}", failure.field, failure.reason);
    }

    match target.downcast_ref::<Record>() {
        Some(record) => Ok(record.to_json()),
        None => bail!("`{}` did not produce a record", descriptor.name()),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
