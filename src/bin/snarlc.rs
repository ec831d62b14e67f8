use snarlc::driver::driver_main;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    match driver_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
