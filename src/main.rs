#[tokio::main]
async fn main() -> anyhow::Result<()> {
    thread_labels_lib::run().await
}
