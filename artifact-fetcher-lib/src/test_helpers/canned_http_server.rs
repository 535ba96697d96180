use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A local HTTP/1.1 server answering one connection per canned response, in order.
pub struct CannedHttpServer {
    listener: TcpListener,
    base_url: String,
}

impl CannedHttpServer {
    pub async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        Self { listener, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Serves `responses` (status line text and body) and resolves to the
    /// lowercased head of every request received.
    pub fn serve(self, responses: Vec<(&'static str, Vec<u8>)>) -> JoinHandle<Vec<String>> {
        tokio::spawn(async move {
            let mut requests = Vec::new();

            for (status, body) in responses {
                let (mut socket, _) = self.listener.accept().await.unwrap();

                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|window| window == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&buf[..n]);
                }
                requests.push(String::from_utf8_lossy(&head).to_lowercase());

                let header = format!(
                    "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                socket.write_all(header.as_bytes()).await.unwrap();
                socket.write_all(&body).await.unwrap();
                let _ = socket.shutdown().await;
            }

            requests
        })
    }
}
