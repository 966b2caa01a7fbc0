use anyhow::Result;
use campo::agent::TaskParams;
use campo::registry::AgentRegistry;
use cliclack::spinner;
use console::style;

use crate::render;

pub fn execute(registry: &mut AgentRegistry, agents: &[String], params: TaskParams) -> Result<()> {
    cliclack::intro(style(" campo futuro ").on_green().black())?;

    let label = match params.region.as_deref() {
        Some(region) => format!("sesión de monitoreo - {}", region),
        None => "sesión de monitoreo".to_string(),
    };
    // agents still report their own write failures
    if let Err(e) = registry.start_session(&label) {
        cliclack::log::warning(format!("Could not open session block: {}", e))?;
    }

    for name in agents {
        let spin = spinner();
        spin.start(format!("{} working...", name));
        let result = registry.run(name, &params);
        spin.stop(result.headline());
        render::result(&result);
    }

    let summary = registry.summary();
    render::summary(&summary);
    tracing::debug!("{}", serde_json::to_string(&summary)?);

    cliclack::outro(format!(
        "Alertas guardadas en {}",
        style(registry.alerts().path().display()).dim()
    ))?;
    Ok(())
}
