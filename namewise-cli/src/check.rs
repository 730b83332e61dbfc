use anyhow::{Context, Result};
use namewise_core::{
    builtin_rules, CatalogOptions, CheckResult, Config, Dispatcher, Morphology, OutputFormat,
    OutputFormatter, SymbolTable,
};
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Run the rule catalog over a symbol file; returns the process exit code.
pub fn handle_check(
    morphology: Arc<Morphology>,
    config: &Config,
    symbols_path: &Path,
    disabled: &[String],
    format: OutputFormat,
    use_color: bool,
) -> Result<i32> {
    let content = read_symbols(symbols_path)?;
    let table = SymbolTable::from_json(&content, morphology.cache())
        .with_context(|| format!("Invalid symbol file {}", symbols_path.display()))?;
    info!(symbols = table.len(), "loaded symbols");

    let mut disabled_rules = config.rules.disabled.clone();
    disabled_rules.extend(disabled.iter().cloned());

    let options = CatalogOptions::from_config(config);
    let rules = builtin_rules(&options)
        .context("Failed to build rule catalog")?
        .without(&disabled_rules);
    debug!(rules = rules.len(), disabled = ?disabled_rules, "rule catalog ready");

    let dispatcher = Dispatcher::new(morphology);
    let issues = dispatcher.dispatch_all(table.symbols(), &rules);

    let result = CheckResult {
        issues,
        symbols_checked: table.len(),
        rules_enabled: rules.len(),
        stats: dispatcher.stats().snapshot(),
        use_color,
    };
    crate::emit(&result.format(format));

    Ok(result.exit_code())
}

fn read_symbols(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read symbols from stdin")?;
        return Ok(content);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read symbol file {}", path.display()))
}
