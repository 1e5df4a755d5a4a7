use super::{AppConfig, MAX_EVAL_BYTES};
use anyhow::{bail, Result};
use clap::Parser;
use std::ffi::OsString;

impl AppConfig {
    /// Parse CLI arguments and validate them right away.
    pub fn parse_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut config = Self::parse_from(args);
        config.validate()?;
        Ok(config)
    }

    /// Check CLI values and normalize the expression passed to `--eval`.
    pub fn validate(&mut self) -> Result<()> {
        if self.json_ipc && self.eval.is_some() {
            bail!("--eval cannot be combined with --json-ipc");
        }

        if let Some(expr) = self.eval.as_mut() {
            let trimmed = expr.trim();
            if trimmed.is_empty() {
                bail!("--eval requires a non-empty expression");
            }
            if trimmed.len() > MAX_EVAL_BYTES {
                bail!(
                    "--eval expression must be at most {MAX_EVAL_BYTES} bytes, got {}",
                    trimmed.len()
                );
            }
            *expr = trimmed.to_string();
        }

        if self.log_content && !self.logging_enabled() {
            // Content logging only makes sense on top of the debug log.
            self.log_content = false;
        }

        Ok(())
    }
}
