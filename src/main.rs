use otter_leibniz::cli;

fn main() -> anyhow::Result<()> {
    if let Err(e) = cli::run() {
        #[expect(clippy::print_stderr, reason = "Failure must be visible regardless of the log filter")]
        {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
    Ok(())
}
