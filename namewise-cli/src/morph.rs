use anyhow::{bail, Result};
use namewise_core::{
    CaseMode, CatalogOptions, Config, Morphology, MorphologyResult, OutputFormat, OutputFormatter,
};
use tracing::debug;

pub fn handle_pluralize(
    morphology: &Morphology,
    config: &Config,
    name: &str,
    suffixes: Vec<String>,
    case_sensitive: bool,
    format: OutputFormat,
) -> Result<()> {
    ensure_name(name)?;

    let suffixes = if suffixes.is_empty() {
        CatalogOptions::from_config(config).collection_suffixes
    } else {
        suffixes
    };
    let comparison = if case_sensitive || config.defaults.case_sensitive {
        CaseMode::Ordinal
    } else {
        CaseMode::OrdinalIgnoreCase
    };
    debug!(name, ?comparison, suffixes = suffixes.len(), "pluralizing");

    print_result(
        "pluralize",
        name,
        morphology.pluralize(name, comparison, &suffixes),
        format,
    );
    Ok(())
}

pub fn handle_verb(morphology: &Morphology, name: &str, format: OutputFormat) -> Result<()> {
    ensure_name(name)?;

    let (ok, verb) = morphology.try_make_verb(name);
    print_result("verb", name, ok.then_some(verb), format);
    Ok(())
}

pub fn handle_strip_marker(
    morphology: &Morphology,
    name: &str,
    format: OutputFormat,
) -> Result<()> {
    ensure_name(name)?;

    let stripped = morphology.strip_entity_marker(name);
    print_result("strip-marker", name, Some(stripped), format);
    Ok(())
}

fn ensure_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("invalid identifier: name must not be empty");
    }
    Ok(())
}

fn print_result(operation: &str, input: &str, output: Option<String>, format: OutputFormat) {
    let result = MorphologyResult {
        operation: operation.to_string(),
        input: input.to_string(),
        output,
    };
    crate::emit(&result.format(format));
}
