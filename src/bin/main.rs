#[tokio::main]
async fn main() -> profile_builder::Result<()> {
    profile_builder::cli::main().await
}
