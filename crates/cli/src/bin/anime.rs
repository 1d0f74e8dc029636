fn main() -> anyhow::Result<()> {
    shelfkeeper_cli::run(shelfkeeper_core::Domain::Anime)
}
