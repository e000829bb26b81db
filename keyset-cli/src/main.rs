fn main() -> anyhow::Result<()> {
    keyset_cli::cli::run()
}
