//! HTTP Request Tester
//!
//! Requests run as fire-and-forget local tasks. A response that arrives after
//! the card was dismissed lands on disposed nodes and is dropped. In a
//! document without a task executor (see `Dom::with_tasks`) a click raises
//! "Request failed: no async runtime" instead.

use log::{debug, info};
use reqwest::{Client, Method};

use crate::dom::{Element, EventKind};
use crate::error::Result;
use crate::shell::ToolDescriptor;
use crate::tools::TransformError;
use crate::tools::common::require;

pub const KIND: &str = "http";
pub const TITLE: &str = "HTTP Request Tester";

const BODY: &str = r#"<div class="space-y-4">
  <input class="url-input" placeholder="Enter URL...">
  <select class="method-select">
    <option value="GET">GET</option>
    <option value="POST">POST</option>
    <option value="PUT">PUT</option>
    <option value="DELETE">DELETE</option>
  </select>
  <button class="send-btn">Send Request</button>
  <textarea class="response-area" placeholder="Response will appear here..." readonly></textarea>
</div>"#;

pub fn descriptor(client: Client) -> ToolDescriptor {
    ToolDescriptor::new(KIND, TITLE, BODY).with_wire(move |root| wire(root, &client))
}

/// Send a body-less request and return the response text, whatever the status
pub async fn send(client: &Client, method: &str, url: &str) -> std::result::Result<String, TransformError> {
    let method = Method::from_bytes(method.as_bytes()).map_err(|e| TransformError::Request(e.to_string()))?;
    debug!("{} {}", method, url);
    let response = client
        .request(method, url)
        .send()
        .await
        .map_err(|e| TransformError::Request(e.to_string()))?;
    let status = response.status();
    let body = response.text().await.map_err(|e| TransformError::Request(e.to_string()))?;
    info!("{} -> {} ({} bytes)", url, status, body.len());
    Ok(body)
}

fn wire(root: &Element, client: &Client) -> Result<()> {
    let url = require(root, ".url-input")?;
    let method = require(root, ".method-select")?;
    let response = require(root, ".response-area")?;
    let client = client.clone();

    require(root, ".send-btn")?.add_event_listener(EventKind::Click, move |e| {
        let client = client.clone();
        let url = url.value().trim().to_string();
        let method = method.value();
        let response = response.clone();
        let button = e.target.clone();
        let spawned = e.target.spawn_local(async move {
            match send(&client, &method, &url).await {
                Ok(body) => {
                    response.set_value(body);
                }
                Err(err) => button.alert(err.to_string()),
            }
        });
        if !spawned {
            e.target.alert(TransformError::Request("no async runtime".to_string()).to_string());
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Dom;
    use crate::shell::ToolCard;
    use tokio::task::LocalSet;
    use wiremock::matchers::{method as http_method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_returns_body() {
        let server = MockServer::start().await;
        Mock::given(http_method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
            .mount(&server)
            .await;

        let body = send(&Client::new(), "GET", &format!("{}/ping", server.uri())).await.unwrap();
        assert_eq!(body, "pong");
    }

    #[tokio::test]
    async fn test_send_error_status_still_returns_body() {
        let server = MockServer::start().await;
        Mock::given(http_method("DELETE"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let body = send(&Client::new(), "DELETE", &server.uri()).await.unwrap();
        assert_eq!(body, "missing");
    }

    #[tokio::test]
    async fn test_send_invalid_url() {
        let err = send(&Client::new(), "GET", "not a url").await.unwrap_err();
        assert!(err.to_string().starts_with("Request failed: "));
    }

    #[tokio::test]
    async fn test_send_invalid_method() {
        let err = send(&Client::new(), "BAD METHOD", "http://localhost").await.unwrap_err();
        assert!(matches!(err, TransformError::Request(_)));
    }

    #[tokio::test]
    async fn test_wired_card_fills_response() {
        let server = MockServer::start().await;
        Mock::given(http_method("POST"))
            .and(path("/echo"))
            .respond_with(ResponseTemplate::new(200).set_body_string("posted"))
            .mount(&server)
            .await;

        LocalSet::new()
            .run_until(async {
                let dom = Dom::with_tasks();
                let root = ToolCard::from_descriptor(&descriptor(Client::new())).render(&dom);
                root.query(".url-input").unwrap().set_value(format!("  {}/echo  ", server.uri()));
                root.query(".method-select").unwrap().set_value("POST");
                root.query(".send-btn").unwrap().click();
                assert_eq!(dom.pending_tasks(), 1);

                dom.settle().await;
                assert_eq!(root.query(".response-area").unwrap().value(), "posted");
                assert!(dom.take_notices().is_empty());
            })
            .await;
    }

    #[tokio::test]
    async fn test_wired_card_failure_alerts() {
        LocalSet::new()
            .run_until(async {
                let dom = Dom::with_tasks();
                let root = ToolCard::from_descriptor(&descriptor(Client::new()))
                    .with_instance_key("http-1")
                    .render(&dom);
                root.query(".url-input").unwrap().set_value("nope");
                root.query(".send-btn").unwrap().click();

                dom.settle().await;
                let notices = dom.take_notices();
                assert_eq!(notices.len(), 1);
                assert_eq!(notices[0].source.as_deref(), Some("http-1"));
                assert!(notices[0].message.starts_with("Request failed: "));
            })
            .await;
    }

    #[test]
    fn test_click_without_runtime_alerts() {
        let dom = Dom::new();
        let root = ToolCard::from_descriptor(&descriptor(Client::new()))
            .with_instance_key("http-2")
            .render(&dom);
        root.query(".url-input").unwrap().set_value("http://localhost/");
        root.query(".send-btn").unwrap().click();

        assert_eq!(dom.pending_tasks(), 0);
        let notices = dom.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Request failed: no async runtime");
    }
}
