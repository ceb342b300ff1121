fn main() -> anyhow::Result<()> {
    mainterm_lib::run()
}
