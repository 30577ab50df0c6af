//! Drives the six literal end-to-end scenarios from the wire contract
//! against a real, ephemeral-port `TcpListener`.

use std::sync::Arc;
use std::time::Duration;

use aesdsocket::log::LogStore;
use aesdsocket::net::acceptor;
use aesdsocket::shutdown::Shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

const MAX_PACKET_BYTES: usize = 1024 * 1024;

/// Spawns the acceptor on an OS-assigned port and returns that port plus a
/// shutdown handle the test can trigger at the end.
async fn spawn_server() -> (u16, Shutdown, tokio::task::JoinHandle<()>) {
    let socket = aesdsocket::listener::bind(0).expect("bind");
    let listener = aesdsocket::listener::listen(socket).expect("listen");
    let port = listener.local_addr().expect("local_addr").port();

    let store = Arc::new(LogStore::in_memory());
    let shutdown = Shutdown::new();
    let shutdown_for_server = shutdown.clone();

    let handle = tokio::spawn(async move {
        acceptor::run(listener, store, MAX_PACKET_BYTES, shutdown_for_server)
            .await
            .expect("acceptor run");
    });

    (port, shutdown, handle)
}

async fn send_and_collect(port: u16, data: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(("127.0.0.1", port))
        .await
        .expect("connect");
    stream.write_all(data).await.expect("write");
    stream.shutdown().await.ok();

    let mut response = Vec::new();
    // A short grace period covers scheduling jitter without masking a
    // genuinely missing response: a correct server always closes promptly.
    let _ = tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response)).await;
    response
}

#[tokio::test(flavor = "multi_thread")]
async fn scenario_1_single_client_echoes_its_own_packet() {
    let (port, shutdown, handle) = spawn_server().await;

    let response = send_and_collect(port, b"hello\n").await;
    assert_eq!(response, b"hello\n");

    shutdown.trigger();
    let _ = handle.await;
}

#[tokio::test(flavor = "multi_thread")]
async fn scenario_2_three_connections_accumulate_in_order() {
    let (port, shutdown, handle) = spawn_server().await;

    assert_eq!(send_and_collect(port, b"one\n").await, b"one\n");
    assert_eq!(send_and_collect(port, b"two\n").await, b"one\ntwo\n");
    assert_eq!(
        send_and_collect(port, b"three\n").await,
        b"one\ntwo\nthree\n"
    );

    shutdown.trigger();
    let _ = handle.await;
}

#[tokio::test(flavor = "multi_thread")]
async fn scenario_3_eleventh_packet_evicts_the_first() {
    let (port, shutdown, handle) = spawn_server().await;

    for i in 0..10 {
        send_and_collect(port, format!("p{i}\n").as_bytes()).await;
    }
    let response = send_and_collect(port, b"p10\n").await;
    let expected: Vec<u8> = (1..=10)
        .map(|i| format!("p{i}\n"))
        .collect::<String>()
        .into_bytes();
    assert_eq!(response, expected);

    shutdown.trigger();
    let _ = handle.await;
}

#[tokio::test(flavor = "multi_thread")]
async fn scenario_4_seek_to_entry_repositions_the_cursor() {
    let (port, shutdown, handle) = spawn_server().await;

    send_and_collect(port, b"one\n").await;
    send_and_collect(port, b"two\n").await;
    send_and_collect(port, b"three\n").await;

    let response = send_and_collect(port, b"AESDCHAR_IOCSEEKTO:1,2\n").await;
    assert_eq!(response, b"o\nthree\n".to_vec());
    // The control packet itself was not appended: a follow-up normal read
    // still shows only the original three packets.
    let full = send_and_collect(port, b"check\n").await;
    assert_eq!(full, b"one\ntwo\nthree\ncheck\n");

    shutdown.trigger();
    let _ = handle.await;
}

#[tokio::test(flavor = "multi_thread")]
async fn scenario_5_seek_to_empty_slot_falls_back_to_offset_zero() {
    let (port, shutdown, handle) = spawn_server().await;

    send_and_collect(port, b"one\n").await;
    send_and_collect(port, b"two\n").await;

    let response = send_and_collect(port, b"AESDCHAR_IOCSEEKTO:5,0\n").await;
    assert_eq!(response, b"one\ntwo\n".to_vec());

    shutdown.trigger();
    let _ = handle.await;
}

#[tokio::test(flavor = "multi_thread")]
async fn scenario_6_packet_without_newline_is_dropped_on_close() {
    let (port, shutdown, handle) = spawn_server().await;

    let response = send_and_collect(port, b"no newline here").await;
    assert!(response.is_empty());

    // Nothing was appended: a later connection sees an empty log.
    let follow_up = send_and_collect(port, b"hello\n").await;
    assert_eq!(follow_up, b"hello\n");

    shutdown.trigger();
    let _ = handle.await;
}
