use anyhow::Result;
use campo::registry::AgentRegistry;
use console::style;

pub fn execute(registry: &AgentRegistry) -> Result<()> {
    for (name, description) in registry.describe() {
        println!("{}\n  {}", style(name).bold().green(), description);
    }
    Ok(())
}
