//! `handoff check` — Validate agent definitions.

use handoff_config::AppConfig;
use std::path::Path;

pub fn run(path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating agent definitions...");

    let config = match super::load_config(path) {
        Ok(config) => config,
        Err(e) => {
            println!("   ❌ {e}");
            return Err(e.into());
        }
    };

    println!("   ✅ Config parsed successfully");

    let warnings = warnings(&config);
    if warnings.is_empty() {
        println!("   ✅ All checks passed");
    } else {
        println!();
        for w in &warnings {
            println!("   ⚠️  {w}");
        }
    }

    println!();
    println!("   Default model: {}", config.default_model);
    println!("   Agents:        {}", config.agents.len());
    Ok(())
}

/// Definitions that load but cannot behave as configured.
pub fn warnings(config: &AppConfig) -> Vec<String> {
    config
        .agents
        .iter()
        .filter(|agent| agent.functions.is_empty() && agent.tool_choice.as_deref() == Some("required"))
        .map(|agent| {
            format!(
                "{} sets tool_choice = \"required\" without functions",
                agent.name
            )
        })
        .collect()
}
