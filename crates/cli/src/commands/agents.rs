//! `handoff agents` — List configured agents.

use handoff_config::AppConfig;
use handoff_core::AgentConfig;
use std::path::Path;

pub fn run(path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(path).map_err(|e| format!("Failed to load config: {e}"))?;

    if config.agents.is_empty() {
        println!("No agents configured. Run `handoff init` for a starter config.");
        return Ok(());
    }

    for agent in &config.agents {
        for line in describe(&config, agent) {
            println!("{line}");
        }
    }

    Ok(())
}

/// Summary lines for one agent.
fn describe(config: &AppConfig, agent: &AgentConfig) -> Vec<String> {
    let reflection = if agent.has_reflection { " (reflective)" } else { "" };
    let mut lines = vec![
        format!("{}{reflection}", agent.name),
        format!("   Model:     {}", config.model_for(agent)),
    ];
    if agent.functions.is_empty() {
        lines.push("   Functions: none".into());
    } else {
        lines.push(format!("   Functions: {}", agent.functions.join(", ")));
    }
    if let Some(tool_choice) = &agent.tool_choice {
        lines.push(format!("   Tool choice: {tool_choice}"));
    }
    if !agent.parallel_tool_calls {
        lines.push("   Parallel tool calls: off".into());
    }
    lines
}
