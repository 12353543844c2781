//! Fire-spread prediction
//!
//! The model itself is an external program. It receives the request body as
//! a single JSON argument and prints its result as JSON on stdout. A
//! non-zero exit means failure, with the reason on stderr.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::process::Command;
use tokio::sync::Semaphore;

use crate::config::PredictorConfig;

/// Ways a prediction can fail
#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("failed to start predictor: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("predictor exited with status {code:?}")]
    Failed { code: Option<i32>, stderr: String },

    #[error("predictor output is not JSON: {0}")]
    InvalidOutput(#[source] serde_json::Error),

    #[error("predictor did not finish within {0} seconds")]
    TimedOut(u64),

    #[error("predictor is shutting down")]
    Unavailable,
}

impl PredictionError {
    /// Headline shown to the client
    pub fn summary(&self) -> &'static str {
        match self {
            PredictionError::InvalidOutput(_) => "Failed to parse prediction output",
            _ => "Fire spread prediction failed",
        }
    }

    /// Detail shown to the client; the trimmed stderr for a failed run
    pub fn details(&self) -> String {
        match self {
            PredictionError::Failed { stderr, .. } => stderr.trim().to_string(),
            PredictionError::Spawn(e) => e.to_string(),
            PredictionError::InvalidOutput(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

/// Anything that turns a fire description into a spread prediction
#[async_trait]
pub trait SpreadPredictor: Send + Sync {
    async fn predict(&self, input: &Value) -> Result<Value, PredictionError>;
}

/// Runs the predictor as a child process per request
pub struct SubprocessPredictor {
    command: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    timeout: Duration,
    permits: Arc<Semaphore>,
}

impl SubprocessPredictor {
    pub fn new(config: &PredictorConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            working_dir: config.working_dir.as_ref().map(PathBuf::from),
            timeout: Duration::from_secs(config.timeout_secs),
            permits: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        }
    }

    fn build_command(&self, payload: String) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .arg(payload)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

#[async_trait]
impl SpreadPredictor for SubprocessPredictor {
    async fn predict(&self, input: &Value) -> Result<Value, PredictionError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| PredictionError::Unavailable)?;

        let mut cmd = self.build_command(input.to_string());
        tracing::debug!("Running predictor {} {:?}", self.command, self.args);

        // Dropping the output future on timeout kills the child (kill_on_drop)
        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| PredictionError::TimedOut(self.timeout.as_secs()))?
            .map_err(PredictionError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            tracing::error!("Predictor failed ({:?}): {}", output.status.code(), stderr.trim());
            return Err(PredictionError::Failed {
                code: output.status.code(),
                stderr,
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|e| {
            tracing::error!("Predictor output is not JSON: {}", e);
            PredictionError::InvalidOutput(e)
        })
    }
}

/// Check that a prediction request names a fire location.
///
/// `lat` and `lng` must both be present and numeric.
pub fn validate_prediction_input(input: &Value) -> Result<(), &'static str> {
    let has_number = |key: &str| input.get(key).map_or(false, Value::is_number);
    if input.is_object() && has_number("lat") && has_number("lng") {
        Ok(())
    } else {
        Err("Missing required fire location data (lat, lng)")
    }
}
