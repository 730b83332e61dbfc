use crate::dispatch::StatsSnapshot;
use crate::rule::{NamingIssue, Rule};
use crate::symbol::SymbolKind;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use nu_ansi_term::Color as AnsiColor;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Summary,
    Table,
    Json,
}

impl OutputFormat {
    /// Parse a format name as written in the config file
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "summary" => Some(Self::Summary),
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Result of a check run
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResult {
    pub issues: Vec<NamingIssue>,
    pub symbols_checked: usize,
    pub rules_enabled: usize,
    #[serde(skip)]
    pub stats: StatsSnapshot,
    #[serde(skip)]
    pub use_color: bool,
}

impl CheckResult {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// 0 when clean, 1 when any issue was found
    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_issues())
    }
}

/// Result of a single morphology command
#[derive(Debug, Serialize, Deserialize)]
pub struct MorphologyResult {
    pub operation: String,
    pub input: String,
    pub output: Option<String>,
}

impl MorphologyResult {
    pub fn changed(&self) -> bool {
        self.output.as_deref().is_some_and(|output| output != self.input)
    }
}

/// One row of the rule listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleInfo {
    pub id: String,
    pub kinds: Vec<SymbolKind>,
    pub description: String,
}

impl From<&Rule> for RuleInfo {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id().to_string(),
            kinds: rule.applies_to().iter().collect(),
            description: rule.description().to_string(),
        }
    }
}

/// Result of listing the rules
#[derive(Debug, Serialize, Deserialize)]
pub struct RuleListResult {
    pub rules: Vec<RuleInfo>,
    pub disabled: Vec<String>,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Table => self.format_table(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;

    fn format_table(&self) -> String {
        self.format_summary()
    }
}

fn new_table(headers: &[&str], use_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Disabled);
    if use_color {
        table.enforce_styling();
        table.set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    } else {
        table.set_header(headers.to_vec());
    }
    table
}

fn kinds_label(kinds: &[SymbolKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl OutputFormatter for CheckResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "check",
            "summary": {
                "symbols_checked": self.symbols_checked,
                "rules_enabled": self.rules_enabled,
                "issues": self.issues.len(),
                "evaluations": self.stats.evaluations,
                "panics": self.stats.panics,
            },
            "issues": self.issues,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        for issue in &self.issues {
            if self.use_color {
                writeln!(
                    output,
                    "{} {} {} -> {}",
                    AnsiColor::Yellow.paint(issue.rule_id.as_str()),
                    issue.kind,
                    AnsiColor::Red.paint(issue.symbol_name.as_str()),
                    AnsiColor::Green.paint(issue.proposed_name.as_str())
                )
                .unwrap();
            } else {
                writeln!(
                    output,
                    "{} {} {} -> {}",
                    issue.rule_id, issue.kind, issue.symbol_name, issue.proposed_name
                )
                .unwrap();
            }
        }

        if self.has_issues() {
            writeln!(output).unwrap();
        }
        writeln!(
            output,
            "{} issue(s) in {} symbol(s), {} rule(s) enabled",
            self.issues.len(),
            self.symbols_checked,
            self.rules_enabled
        )
        .unwrap();

        output
    }

    fn format_table(&self) -> String {
        if !self.has_issues() {
            return self.format_summary();
        }

        let mut table = new_table(&["Rule", "Kind", "Symbol", "Proposed"], self.use_color);
        for issue in &self.issues {
            table.add_row(vec![
                issue.rule_id.clone(),
                issue.kind.to_string(),
                issue.symbol_name.clone(),
                issue.proposed_name.clone(),
            ]);
        }
        format!("{table}\n")
    }
}

impl OutputFormatter for MorphologyResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": self.operation,
            "input": self.input,
            "output": self.output,
            "changed": self.changed(),
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        match &self.output {
            Some(output) if self.changed() => format!("{output}\n"),
            _ => format!("{} (no change)\n", self.input),
        }
    }
}

impl OutputFormatter for RuleListResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "rules",
            "rules": self.rules,
            "disabled": self.disabled,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        for rule in &self.rules {
            let state = if self.disabled.contains(&rule.id) {
                " [disabled]"
            } else {
                ""
            };
            writeln!(output, "{}{state}  {}", rule.id, rule.description).unwrap();
            writeln!(output, "    applies to: {}", kinds_label(&rule.kinds)).unwrap();
        }
        output
    }

    fn format_table(&self) -> String {
        let mut table = new_table(&["Rule", "Enabled", "Applies to", "Description"], false);
        for rule in &self.rules {
            let enabled = if self.disabled.contains(&rule.id) { "no" } else { "yes" };
            table.add_row(vec![
                rule.id.clone(),
                enabled.to_string(),
                kinds_label(&rule.kinds),
                rule.description.clone(),
            ]);
        }
        format!("{table}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_result(issues: Vec<NamingIssue>) -> CheckResult {
        CheckResult {
            issues,
            symbols_checked: 3,
            rules_enabled: 11,
            stats: StatsSnapshot::default(),
            use_color: false,
        }
    }

    fn issue(rule_id: &str, kind: SymbolKind, from: &str, to: &str) -> NamingIssue {
        NamingIssue {
            symbol_name: from.to_string(),
            kind,
            proposed_name: to.to_string(),
            rule_id: rule_id.to_string(),
        }
    }

    #[test]
    fn test_output_format_from_name() {
        assert_eq!(OutputFormat::from_name("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name("table"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_name("diff"), None);
    }

    #[test]
    fn test_check_result_summary_format() {
        let result = check_result(vec![
            issue("NW1001", SymbolKind::Field, "customerList", "customers"),
            issue("NW1003", SymbolKind::Method, "Registration", "Register"),
        ]);

        insta::assert_snapshot!(result.format_summary().trim_end(), @r"
        NW1001 field customerList -> customers
        NW1003 method Registration -> Register

        2 issue(s) in 3 symbol(s), 11 rule(s) enabled
        ");
        assert_eq!(result.exit_code(), 1);
    }

    #[test]
    fn test_check_result_clean() {
        let result = check_result(Vec::new());
        assert_eq!(
            result.format(OutputFormat::Table),
            "0 issue(s) in 3 symbol(s), 11 rule(s) enabled\n"
        );
        assert_eq!(result.exit_code(), 0);
    }

    #[test]
    fn test_check_result_json_format() {
        let result = check_result(vec![issue("NW1005", SymbolKind::Field, "m_count", "_count")]);
        let value: serde_json::Value = serde_json::from_str(&result.format_json()).unwrap();

        assert_eq!(value["operation"], "check");
        assert_eq!(value["summary"]["issues"], 1);
        assert_eq!(value["issues"][0]["rule_id"], "NW1005");
        assert_eq!(value["issues"][0]["kind"], "field");
        assert_eq!(value["issues"][0]["proposed_name"], "_count");
    }

    #[test]
    fn test_check_result_table_format() {
        let result = check_result(vec![issue("NW1005", SymbolKind::Field, "m_count", "_count")]);
        let table = result.format_table();
        assert!(table.contains("Rule"));
        assert!(table.contains("Proposed"));
        assert!(table.contains("m_count"));
        assert!(table.contains("_count"));
    }

    #[test]
    fn test_morphology_result_formats() {
        let changed = MorphologyResult {
            operation: "pluralize".to_string(),
            input: "CustomerList".to_string(),
            output: Some("Customers".to_string()),
        };
        let unchanged = MorphologyResult {
            operation: "verb".to_string(),
            input: "Register".to_string(),
            output: None,
        };

        assert_eq!(changed.format_summary(), "Customers\n");
        assert_eq!(unchanged.format_summary(), "Register (no change)\n");
        assert!(changed.format_json().contains("\"changed\":true"));
        assert!(unchanged.format_json().contains("\"output\":null"));
    }

    #[test]
    fn test_rule_list_marks_disabled_rules() {
        let result = RuleListResult {
            rules: vec![RuleInfo {
                id: "NW1005".to_string(),
                kinds: vec![SymbolKind::Field],
                description: "Fields use a plain underscore prefix".to_string(),
            }],
            disabled: vec!["NW1005".to_string()],
        };

        assert!(result.format_summary().starts_with("NW1005 [disabled]  Fields"));
        assert!(result.format_table().contains("no"));
        assert!(result.format_json().contains("\"disabled\":[\"NW1005\"]"));
    }
}
