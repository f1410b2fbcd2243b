fn main() -> anyhow::Result<()> {
    routebench::cli::run(routebench::cli::DEFAULT_PORT)
}
