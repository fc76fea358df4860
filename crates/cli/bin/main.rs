use pharos_cli::args::run;

fn main() -> eyre::Result<()> {
    run()
}
