pub mod canned_http_server;
pub mod mock_release_client;
