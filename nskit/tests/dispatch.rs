// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use httptest::matchers::*;
use httptest::responders::*;
use httptest::{cycle, Expectation, Server};
use nskit::netstorage::RequestSigner;
use nskit::time::from_timestamp;
use nskit::{Client, ErrorKind, Operation, DOWNLOAD_DONE};
use pretty_assertions::assert_eq;
use test_case::test_case;

const KEY_NAME: &str = "nskit-test";
const KEY: &str = "abcdefghij0123456789abcdefghij0123456789abcdefghij";
const CONTENT: &str = "Hello, Storage API World!";

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn client(server: &Server) -> Client {
    Client::new(&server.addr().to_string(), KEY_NAME, KEY, false).expect("client must build")
}

fn pinned_client(server: &Server, nonce: u32) -> Client {
    client(server).with_request_signer(
        RequestSigner::new()
            .with_time(from_timestamp(1_700_000_000).expect("valid timestamp"))
            .with_nonce(nonce),
    )
}

#[tokio::test]
async fn test_signed_headers_on_the_wire() -> anyhow::Result<()> {
    init();
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/123456/dir"),
            request::headers(contains((
                "x-akamai-acs-action",
                "version=1&action=dir&format=xml"
            ))),
            request::headers(contains((
                "x-akamai-acs-auth-data",
                "5, 0.0.0.0, 0.0.0.0, 1700000000, 42, nskit-test"
            ))),
            request::headers(contains((
                "x-akamai-acs-auth-sign",
                "904HptUkxR5iiFrp5ZBq44804W602TcMs2dsy+RuKos="
            ))),
            request::headers(contains(("accept-encoding", "identity"))),
            request::headers(contains(("user-agent", nskit::CLIENT_ID))),
        ])
        .respond_with(status_code(200).body("<stat/>")),
    );

    let resp = pinned_client(&server, 42).dir("/123456/dir").await?;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text(), "<stat/>");
    Ok(())
}

#[tokio::test]
async fn test_canonical_path_is_signed_and_sent() -> anyhow::Result<()> {
    init();
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/123456/a%20b"),
            request::headers(contains(("x-akamai-acs-action", "version=1&action=mkdir"))),
            request::headers(contains((
                "x-akamai-acs-auth-sign",
                "MBPthZvvm9VAJkjxj1JP4ClgmwignvR4alI0YSoJRp4="
            ))),
        ])
        .respond_with(status_code(200)),
    );

    let resp = pinned_client(&server, 7).mkdir("/123456/x/../a b").await?;
    assert!(resp.is_success());
    Ok(())
}

#[test_case(Operation::dir("123456/dir"); "dir")]
#[test_case(Operation::du(""); "du")]
#[test_case(Operation::stat("cp/file"); "stat")]
#[test_case(Operation::download("123456/file.txt", None); "download")]
#[test_case(Operation::mkdir("cp/dir"); "mkdir")]
#[test_case(Operation::rmdir("cp/dir"); "rmdir")]
#[test_case(Operation::mtime("cp/file", 0); "mtime")]
#[test_case(Operation::delete("cp/file"); "delete")]
#[test_case(Operation::quick_delete("cp/dir"); "quick delete")]
#[test_case(Operation::rename("cp/a", "/cp/b"); "rename")]
#[test_case(Operation::symlink("/cp/a", "cp/b"); "symlink")]
#[tokio::test]
async fn test_relative_path_is_rejected_without_request(op: Operation) {
    init();
    // Any request reaching this server fails the test when it is dropped.
    let server = Server::run();

    let err = client(&server).execute(op).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathInvalid);
}

#[tokio::test]
async fn test_relative_upload_destination_is_rejected_without_request() -> anyhow::Result<()> {
    let server = Server::run();
    let tmp = tempfile::tempdir()?;
    let source = tmp.path().join("file.txt");
    tokio::fs::write(&source, CONTENT).await?;

    let err = client(&server)
        .upload(&source, "123456/file.txt")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathInvalid);
    Ok(())
}

#[tokio::test]
async fn test_download_directory_is_rejected_without_request() -> anyhow::Result<()> {
    let server = Server::run();
    let tmp = tempfile::tempdir()?;

    let err = client(&server)
        .download("/123456/dir/", Some(tmp.path()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathInvalid);
    Ok(())
}

#[tokio::test]
async fn test_upload_directory_is_rejected_without_request() -> anyhow::Result<()> {
    let server = Server::run();
    let tmp = tempfile::tempdir()?;

    let err = client(&server)
        .upload(tmp.path(), "/123456/dir/")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathInvalid);
    Ok(())
}

#[tokio::test]
async fn test_upload_missing_source_is_local_io() -> anyhow::Result<()> {
    let server = Server::run();
    let tmp = tempfile::tempdir()?;

    let err = client(&server)
        .upload(tmp.path().join("absent.txt"), "/123456/absent.txt")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LocalIo);
    Ok(())
}

#[tokio::test]
async fn test_upload_then_download_round_trip() -> anyhow::Result<()> {
    init();
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("PUT", "/123456/test/file.txt"),
            request::headers(contains(("x-akamai-acs-action", "version=1&action=upload"))),
            request::headers(contains(("content-length", "25"))),
            request::body(CONTENT),
        ])
        .respond_with(status_code(200)),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/123456/test/file.txt"),
            request::headers(contains((
                "x-akamai-acs-action",
                "version=1&action=download"
            ))),
        ])
        .respond_with(status_code(200).body(CONTENT)),
    );

    let tmp = tempfile::tempdir()?;
    let source = tmp.path().join("file.txt");
    tokio::fs::write(&source, CONTENT).await?;
    let client = client(&server);

    let resp = client.upload(&source, "/123456/test/").await?;
    assert!(resp.is_success());

    let dest = tmp.path().join("downloaded.txt");
    let resp = client.download("/123456/test/file.txt", Some(dest.as_path())).await?;
    assert_eq!(resp.text(), DOWNLOAD_DONE);
    assert_eq!(tokio::fs::read(&dest).await?, CONTENT.as_bytes());
    Ok(())
}

#[tokio::test]
async fn test_download_binary_body() -> anyhow::Result<()> {
    let server = Server::run();
    let payload: Vec<u8> = (0..=255u8).cycle().take(64 * 1024 + 3).collect();
    server.expect(
        Expectation::matching(request::method_path("GET", "/123456/blob.bin"))
            .respond_with(status_code(200).body(payload.clone())),
    );

    let tmp = tempfile::tempdir()?;
    let resp = client(&server)
        .download("/123456/blob.bin", Some(tmp.path()))
        .await?;

    assert_eq!(resp.text(), DOWNLOAD_DONE);
    assert_eq!(tokio::fs::read(tmp.path().join("blob.bin")).await?, payload);
    Ok(())
}

#[tokio::test]
async fn test_download_into_existing_directory_and_new_file() -> anyhow::Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/cp/dir/file.txt"))
            .times(2)
            .respond_with(status_code(200).body(CONTENT)),
    );

    let tmp = tempfile::tempdir()?;
    let out = tmp.path().join("out");
    tokio::fs::create_dir(&out).await?;
    let renamed = tmp.path().join("renamed.txt");
    let client = client(&server);

    client.download("/cp/dir/file.txt", Some(out.as_path())).await?;
    assert_eq!(tokio::fs::read_to_string(out.join("file.txt")).await?, CONTENT);

    client.download("/cp/dir/file.txt", Some(renamed.as_path())).await?;
    assert_eq!(tokio::fs::read_to_string(&renamed).await?, CONTENT);
    Ok(())
}

#[tokio::test]
async fn test_failed_download_returns_body_and_writes_nothing() -> anyhow::Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/123456/missing.txt"))
            .respond_with(status_code(404).body("<error>not found</error>")),
    );

    let tmp = tempfile::tempdir()?;
    let resp = client(&server)
        .download("/123456/missing.txt", Some(tmp.path()))
        .await?;

    assert_eq!(resp.status(), 404);
    assert_eq!(resp.text(), "<error>not found</error>");
    assert!(!tmp.path().join("missing.txt").exists());
    Ok(())
}

#[tokio::test]
async fn test_unwritable_destination_is_local_io() -> anyhow::Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/123456/file.txt"))
            .respond_with(status_code(200).body(CONTENT)),
    );

    let tmp = tempfile::tempdir()?;
    let dest = tmp.path().join("no-such-dir").join("file.txt");
    let err = client(&server)
        .download("/123456/file.txt", Some(dest.as_path()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LocalIo);
    Ok(())
}

#[tokio::test]
async fn test_remote_errors_are_passed_through() -> anyhow::Result<()> {
    init();
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/123456/dir"))
            .times(2)
            .respond_with(cycle![
                status_code(200).body("<resp>ok</resp>"),
                status_code(409).body("<resp>exists</resp>"),
            ]),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/123456/file.txt"),
            request::headers(contains(("x-akamai-acs-action", "version=1&action=delete"))),
        ])
        .times(2)
        .respond_with(cycle![
            status_code(200).body("<resp>deleted</resp>"),
            status_code(404).body("<resp>not found</resp>"),
        ]),
    );
    let client = client(&server);

    assert!(client.mkdir("/123456/dir").await?.is_success());
    let again = client.mkdir("/123456/dir").await?;
    assert_eq!(again.status(), 409);
    assert_eq!(again.text(), "<resp>exists</resp>");

    assert!(client.delete("/123456/file.txt").await?.is_success());
    let again = client.delete("/123456/file.txt").await?;
    assert_eq!(again.status(), 404);
    assert_eq!(again.text(), "<resp>not found</resp>");
    Ok(())
}

#[tokio::test]
async fn test_rename_and_symlink_encode_their_argument() -> anyhow::Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/123456/old.txt"),
            request::headers(contains((
                "x-akamai-acs-action",
                "version=1&action=rename&destination=%2F123456%2Fnew+name.txt"
            ))),
        ])
        .respond_with(status_code(200)),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/123456/link"),
            request::headers(contains((
                "x-akamai-acs-action",
                "version=1&action=symlink&target=%2F123456%2Fold.txt"
            ))),
        ])
        .respond_with(status_code(200)),
    );
    let client = client(&server);

    client.rename("/123456/old.txt", "/123456/new name.txt").await?;
    client.symlink("/123456/old.txt", "/123456/link").await?;
    Ok(())
}

#[tokio::test]
async fn test_remaining_operations() -> anyhow::Result<()> {
    let server = Server::run();
    for (method, path, action) in [
        ("GET", "/123456/du", "version=1&action=du&format=xml"),
        ("GET", "/123456/stat", "version=1&action=stat&format=xml"),
        ("POST", "/123456/rmdir", "version=1&action=rmdir"),
        (
            "POST",
            "/123456/mtime",
            "version=1&action=mtime&format=xml&mtime=1700000000",
        ),
        (
            "POST",
            "/123456/tree",
            "version=1&action=quick-delete&quick-delete=imreallyreallysure",
        ),
    ] {
        server.expect(
            Expectation::matching(all_of![
                request::method_path(method, path),
                request::headers(contains(("x-akamai-acs-action", action))),
            ])
            .respond_with(status_code(200).body(path)),
        );
    }
    let client = client(&server);

    assert_eq!(client.du("/123456/du").await?.text(), "/123456/du");
    assert_eq!(client.stat("/123456/stat").await?.text(), "/123456/stat");
    assert_eq!(client.rmdir("/123456/rmdir").await?.text(), "/123456/rmdir");
    assert_eq!(
        client.mtime("/123456/mtime", 1_700_000_000).await?.text(),
        "/123456/mtime"
    );
    assert_eq!(
        client.quick_delete("/123456/tree").await?.text(),
        "/123456/tree"
    );
    Ok(())
}

#[tokio::test]
async fn test_connection_refused_is_network_error() -> anyhow::Result<()> {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?
    };
    let client = Client::new(&addr.to_string(), KEY_NAME, KEY, false)?;

    let err = client.dir("/123456").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    Ok(())
}

#[tokio::test]
async fn test_destination_is_checked_before_upload_source() -> anyhow::Result<()> {
    let server = Server::run();
    let tmp = tempfile::tempdir()?;

    let err = client(&server)
        .upload(tmp.path().join("absent.txt"), "123456/absent.txt")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathInvalid);
    Ok(())
}

#[tokio::test]
async fn test_backslash_path_is_escaped_on_the_wire() -> anyhow::Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/cp/dir%5Cfile"))
            .respond_with(status_code(200).body("<stat/>")),
    );

    let resp = client(&server).stat("/cp/dir\\file").await?;
    assert_eq!(resp.status(), 200);
    Ok(())
}

#[tokio::test]
async fn test_error_body_is_kept_byte_for_byte() -> anyhow::Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/123456/file.bin"))
            .respond_with(status_code(404).body(vec![0xffu8, 0xfe, b'x'])),
    );

    let resp = client(&server).stat("/123456/file.bin").await?;
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.body(), &[0xffu8, 0xfe, b'x'][..]);
    assert_eq!(resp.text(), "\u{fffd}\u{fffd}x");
    assert_eq!(resp.into_body().len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_truncated_download_is_network_error() -> anyhow::Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    init();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await?;
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n0123456789")
            .await?;
        socket.shutdown().await?;
        anyhow::Ok(())
    });

    let tmp = tempfile::tempdir()?;
    let dest = tmp.path().join("file.txt");
    let client = Client::new(&addr.to_string(), KEY_NAME, KEY, false)?;
    let err = client
        .download("/123456/file.txt", Some(dest.as_path()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(tokio::fs::read(&dest).await?.len(), 10);

    server.await??;
    Ok(())
}
