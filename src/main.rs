use anyhow::Result;
use calcterm::{
    config::AppConfig, init_logging, ipc, log_debug, log_debug_content, log_file_path,
    telemetry::init_tracing, ui, CalcApp, InputController, Outcome,
};
use std::process::ExitCode;

#[cfg(not(test))]
fn main() -> Result<ExitCode> {
    run_with_args(std::env::args_os())
}

#[cfg_attr(test, allow(dead_code))]
fn run_with_args<I, T>(args: I) -> Result<ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let config = AppConfig::parse_args(args)?;
    init_logging(&config);
    let trace_path = init_tracing(&config);
    log_debug("=== calcterm started ===");
    log_debug(&format!("Log file: {:?}", log_file_path()));
    if let Some(path) = trace_path {
        log_debug(&format!("Trace file: {path:?}"));
    }

    if let Some(expr) = config.eval.as_deref() {
        let (text, ok) = evaluate_once(expr);
        println!("{text}");
        return Ok(if ok {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    if config.json_ipc {
        ipc::run_ipc_mode()?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut app = CalcApp::new(config);
    tracing::info!(event = "session_start", theme = app.config().theme.label());
    let result = ui::run_app(&mut app);

    log_debug("=== calcterm exiting ===");
    tracing::info!(event = "session_end", ok = result.is_ok());
    if let Err(ref e) = result {
        log_debug(&format!("Exit with error: {e:#}"));
    }

    result.map(|()| ExitCode::SUCCESS)
}

/// Load `expr` as if typed and evaluate it once. Returns the buffer text and
/// whether evaluation succeeded.
fn evaluate_once(expr: &str) -> (String, bool) {
    let mut controller = InputController::new();
    controller.load(expr);
    let outcome = controller.evaluate();
    log_debug_content(&format!("--eval {expr:?} -> {}", controller.buffer()));
    (
        controller.buffer().to_string(),
        matches!(outcome, Outcome::Evaluated(_)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_once_reports_result() {
        assert_eq!(evaluate_once("2+2"), ("4".to_string(), true));
        assert_eq!(evaluate_once("50%"), ("0.5".to_string(), true));
        assert_eq!(evaluate_once("(1+2)*3"), ("9".to_string(), true));
    }

    #[test]
    fn evaluate_once_reports_errors() {
        assert_eq!(evaluate_once("5/0"), ("Error".to_string(), false));
        assert_eq!(evaluate_once("2+x"), ("Error".to_string(), false));
    }

    #[test]
    fn run_with_args_rejects_conflicting_modes() {
        let result = run_with_args(["calcterm", "--json-ipc", "--eval", "1+1"]);
        assert!(result.is_err());
    }
}
