#[tokio::main]
async fn main() {
    jurnal_backend::run().await;
}
