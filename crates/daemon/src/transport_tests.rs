// SPDX-License-Identifier: MIT

use super::*;

#[tokio::test]
async fn unix_scheme_binds_a_socket_at_the_given_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ctl.sock");
    let addr = format!("ws+unix://{}", path.display());

    let bound = bind(&addr).await.unwrap();
    assert!(matches!(bound, Bound::Unix(_)));
    assert!(path.exists());
}

#[tokio::test]
async fn empty_unix_path_is_rejected() {
    let err = bind("ws+unix://").await.unwrap_err();
    assert!(matches!(err, TransportError::InvalidAddr { .. }));
}

#[tokio::test]
async fn non_unix_scheme_binds_a_tcp_listener() {
    let bound = bind("127.0.0.1:0").await.unwrap();
    assert!(matches!(bound, Bound::Tcp(_)));
}
