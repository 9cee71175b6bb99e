use std::env;
use std::sync::Arc;

use gas_station::Station;
use gas_station::csv::{read_requests, write_report};
use tokio_stream::wrappers::ReceiverStream;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let path = env::args()
        .nth(1)
        .expect("usage: gas-station <requests.csv>");

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let station = Arc::new(Station::new());
    let (request_sender, request_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in read_requests(&path) {
            match result {
                Ok(request) => {
                    request_sender.send(request).await.unwrap();
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    station.run(ReceiverStream::new(request_receiver)).await;

    write_report(&station.pumps(), station.statistics());
}
