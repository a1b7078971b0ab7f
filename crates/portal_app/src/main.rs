use clap::Parser;

fn main() -> anyhow::Result<()> {
    portal_app::platform::app::run(portal_app::cli::Cli::parse())
}
