use std::process::ExitCode;

use efulist_runtime::settings::sample_config;

pub fn run() -> ExitCode {
    print!("{}", sample_config());
    ExitCode::SUCCESS
}
