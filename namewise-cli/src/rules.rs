use anyhow::{Context, Result};
use namewise_core::{
    builtin_rules, CatalogOptions, Config, OutputFormat, OutputFormatter, RuleInfo, RuleListResult,
};

pub fn handle_rules(config: &Config, format: OutputFormat) -> Result<()> {
    let rules = builtin_rules(&CatalogOptions::from_config(config))
        .context("Failed to build rule catalog")?;

    let result = RuleListResult {
        rules: rules.rules().iter().map(RuleInfo::from).collect(),
        disabled: config.rules.disabled.clone(),
    };
    crate::emit(&result.format(format));
    Ok(())
}
