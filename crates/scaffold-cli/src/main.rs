#![forbid(unsafe_code)]

fn main() {
    scaffold_core::tracing::init_tracing();
    if let Err(error) = scaffold_cli::run_from_env() {
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
