use anyhow::Context;
use plangrid::core::cli::CliPaths;
use plangrid::core::context::AppContext;
use plangrid::logging::LogTarget;
use plangrid::prompter::flows::calendar_flow::CalendarFlow;
use plangrid::prompter::prompter::Prompter;

fn main() -> anyhow::Result<()> {
    let paths = CliPaths::from_env().map_err(anyhow::Error::msg)?;
    let mut ctx = AppContext::from_paths(&paths).with_context(|| {
        format!(
            "Failed to start with config '{}' and events '{}'",
            paths.config_path.display(),
            paths.events_path.display()
        )
    })?;
    ctx.logger.info(
        format!("Session started with {} stored events", ctx.store.len()),
        LogTarget::FileOnly,
    );

    let logger = ctx.logger.clone();
    let flow = CalendarFlow::new(&mut ctx);
    if let Err(err) = Prompter::new().run(flow, false) {
        logger.error(format!("{err}"), LogTarget::ConsoleAndFile);
    }
    Ok(())
}
