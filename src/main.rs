#[tokio::main]
async fn main() {
    scheduler_backend::run().await;
}
