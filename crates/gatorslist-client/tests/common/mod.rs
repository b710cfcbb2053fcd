#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;

use gatorslist_client::{MarketplaceClient, ObjectStorage};
use gatorslist_proxy::{AppStateInner, api_routes};

pub const OBJECT_BASE: &str = "https://cdn.example.com";

pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub async fn unreachable() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Real proxy in front of a stand-in backend; returns the proxy's origin.
pub async fn spawn_stack(backend: Router) -> String {
    let backend_url = spawn(backend).await;
    let state = AppStateInner::new(&backend_url, Duration::from_secs(5)).unwrap();
    spawn(api_routes(state)).await
}

pub fn client(origin: &str) -> MarketplaceClient {
    MarketplaceClient::new(origin, ObjectStorage::new(OBJECT_BASE, "placeholders")).unwrap()
}
