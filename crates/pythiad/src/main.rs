use std::process::ExitCode;
use std::sync::Arc;

use pythia_config::ConfigError;
use pythiad::{BootstrapError, HealthReporter, StructuredHealthReporter, SystemConfigLoader};

const USAGE_EXIT_CODE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let reporter: Arc<dyn HealthReporter> = Arc::new(StructuredHealthReporter::new());
    let pythia = match pythiad::bootstrap(&SystemConfigLoader, reporter) {
        Ok(pythia) => pythia,
        Err(BootstrapError::Configuration {
            source: ConfigError::Cli(error),
        }) => {
            let _ = error.print();
            return if error.use_stderr() {
                ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(USAGE_EXIT_CODE))
            } else {
                ExitCode::SUCCESS
            };
        }
        Err(error) => {
            eprintln!("pythia: {error}");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %error, "failed to listen for interrupt signal");
            std::future::pending::<()>().await;
        }
    };
    match pythia.serve(shutdown).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("pythia: {error}");
            ExitCode::FAILURE
        }
    }
}
