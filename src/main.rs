//! `spark-api` binary.

// std
use std::process::ExitCode;
// self
use spark_api::{cli, obs};

fn main() -> ExitCode {
	obs::init_cli_logger();

	cli::main()
}
