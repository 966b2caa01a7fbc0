use anyhow::{Context, Result};
use campo::agent::TaskParams;
use campo::registry::AgentRegistry;
use cliclack::spinner;

use crate::render;

pub fn execute(registry: &AgentRegistry, agent: &str, params: TaskParams) -> Result<()> {
    let spin = spinner();
    spin.start(format!("{} preparing brief...", agent));
    let brief = registry.quick_brief(agent, &params);
    spin.stop("");

    let brief = brief.with_context(|| format!("No brief from {}", agent))?;
    render::markdown(&brief);
    Ok(())
}
