#[tokio::main]
async fn main() -> anyhow::Result<()> {
    picker_server::start_server().await
}
