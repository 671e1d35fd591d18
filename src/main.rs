#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bookshelf_app::run().await
}
