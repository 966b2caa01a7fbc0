use bat::WrappingMode;
use campo::agent::{AgentHealth, AgentResult};
use campo::registry::ExecutionSummary;
use console::style;

/// Print model output as highlighted markdown, falling back to plain text.
pub fn markdown(content: &str) {
    let printed = bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .language("Markdown")
        .wrapping_mode(WrappingMode::Character)
        .print();

    if printed.is_err() {
        println!("{}", content);
    }
}

pub fn result(result: &AgentResult) {
    if result.is_completed() {
        println!(
            "{} {} {}",
            style("✅").green(),
            style(&result.agent).bold(),
            style(format!("{} · {} fuentes", result.region, result.data_sources)).dim()
        );
        if let Some(analysis) = &result.analysis {
            markdown(analysis);
        }
    } else {
        println!(
            "{} {} {}",
            style("❌").red(),
            style(&result.agent).bold(),
            style(result.error.as_deref().unwrap_or("failed")).red()
        );
    }
    println!();
}

pub fn health(name: &str, health: &AgentHealth) {
    let line = match health {
        AgentHealth::Operational => style(health.to_string()).green(),
        AgentHealth::Degraded(_) => style(health.to_string()).yellow(),
        AgentHealth::Failing(_) => style(health.to_string()).red(),
    };
    println!("{:<26} {}", style(name).bold(), line);
}

pub fn summary(summary: &ExecutionSummary) {
    println!(
        "{} {} total · {} ok · {} error · {:.1}%",
        style("Resumen:").bold().cyan(),
        summary.total,
        style(summary.succeeded).green(),
        style(summary.failed).red(),
        summary.success_rate
    );
}
