use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    grade_report::run()
}
