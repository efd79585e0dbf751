fn main() {
    // RUST_LOG overrides the quiet default
    let _ = holdem_tables::init_logging_with("warn", false);

    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    let code = holdem_cli::run(std::env::args(), &mut out, &mut err);
    std::process::exit(code);
}
