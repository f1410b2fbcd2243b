fn main() -> anyhow::Result<()> {
    routebench::cli::run(routebench::cli::ALT_DEFAULT_PORT)
}
