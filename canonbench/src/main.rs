fn main() -> anyhow::Result<()> {
    canonbench::run()
}
