#[tokio::main]
async fn main() -> anyhow::Result<()> {
    firmbuilder_lib::main().await
}
