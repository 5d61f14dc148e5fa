#[tokio::main]
async fn main() {
    tracker_backend::run().await;
}
