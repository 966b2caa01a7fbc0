use anyhow::Result;
use campo::config::Settings;
use campo::registry::AgentRegistry;
use cliclack::spinner;
use console::style;

use crate::render;

pub fn execute(registry: &AgentRegistry, settings: &Settings) -> Result<()> {
    let spin = spinner();
    spin.start("checking agents...");
    let status = registry.status();
    spin.stop(format!("{} agents", status.len()));

    for (name, health) in &status {
        render::health(name, health);
    }

    let alerts = registry.alerts();
    let log_state = if alerts.exists() {
        format!("{} ({} bytes)", alerts.path().display(), alerts.size())
    } else {
        format!("{} (not created yet)", alerts.path().display())
    };
    println!();
    println!("{} {}", style("Modelo:").bold(), settings.provider.model_id);
    println!(
        "{} {} / {}",
        style("Por defecto:").bold(),
        settings.agents.default_region,
        settings.agents.default_language
    );
    println!("{} {}", style("Log:").bold(), log_state);
    Ok(())
}
