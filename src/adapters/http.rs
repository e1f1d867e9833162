use crate::error::FetchError;
use crate::ports::{self, BoxFuture};
use crate::types::RosterSnapshot;

use std::time::Duration;

/// Roster published as a JSON document behind a plain HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpRosterSource {
    client: reqwest::Client,
    url: String,
}

impl HttpRosterSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(url, client))
    }

    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl ports::RosterSource for HttpRosterSource {
    type Fut<'a>
        = BoxFuture<'a, Result<RosterSnapshot, FetchError>>
    where
        Self: 'a;

    fn fetch<'a>(&'a self) -> Self::Fut<'a> {
        Box::pin(async move {
            tracing::debug!(url = %self.url, "fetching roster");
            let response = self.client.get(&self.url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        })
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use crate::ports::RosterSource;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    async fn serve_once(response: String) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("listener address");
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/piket-data.json")
    }

    fn source(url: String) -> HttpRosterSource {
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("client");
        HttpRosterSource::with_client(url, client)
    }

    #[tokio::test]
    async fn fetch__should_decode_roster_payload() {
        // Given
        let body = r#"{"instansi":"Kejaksaan","bulan":"Maret","tahun":2026,"petugas":[
            {"id":1,"nama":"Andi","jabatan":"Staf TU","jadwal":[]}
        ]}"#;
        let url = serve_once(http_response("200 OK", body)).await;

        // When
        let snapshot = source(url).fetch().await.expect("roster");

        // Then
        assert_eq!(snapshot.period_label, "Maret");
        assert_eq!(snapshot.staff[0].full_name, "Andi");
    }

    #[tokio::test]
    async fn fetch__should_reject_non_success_status() {
        let url = serve_once(http_response("503 Service Unavailable", "{}")).await;

        let err = source(url).fetch().await.expect_err("server error");

        assert!(matches!(err, FetchError::Status(503)));
    }

    #[tokio::test]
    async fn fetch__should_reject_malformed_payload() {
        let url = serve_once(http_response("200 OK", r#"[{"nama":"Andi"}]"#)).await;

        let err = source(url).fetch().await.expect_err("wrong shape");

        assert!(matches!(err, FetchError::Decode(_)));
    }
}
