//! Workspace API operations

use log::debug;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::document;
use crate::hcp::TfeClient;

use super::models::Workspace;

/// Index workspaces by name; names must be unique within an organization
pub fn index_by_name(workspaces: Vec<Workspace>) -> Result<BTreeMap<String, Workspace>> {
    let mut by_name = BTreeMap::new();

    for ws in workspaces {
        match by_name.entry(ws.attributes.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(ws);
            }
            Entry::Occupied(existing) => {
                return Err(TfeError::Consistency(format!(
                    "workspace name '{}' returned twice ({} and {})",
                    existing.key(),
                    existing.get().id,
                    ws.id
                )));
            }
        }
    }

    Ok(by_name)
}

impl TfeClient {
    /// Build the organization's workspace collection URL
    fn workspaces_url(&self, org: &str) -> String {
        format!(
            "{}/{}/{}/{}?page[size]={}",
            self.base_url(),
            api::ORGANIZATIONS,
            org,
            api::WORKSPACES,
            api::DEFAULT_PAGE_SIZE
        )
    }

    /// Get every workspace of an organization, in API page order
    pub async fn fetch_workspaces(&self, org: &str) -> Result<Vec<Workspace>> {
        let items = self.fetch_all_pages(&self.workspaces_url(org)).await?;
        let workspaces: Vec<Workspace> = document::decode_items(items, "workspace")?;

        debug!(
            "Fetched {} workspaces for organization '{}'",
            workspaces.len(),
            org
        );
        Ok(workspaces)
    }

    /// Get every workspace of an organization keyed (and so ordered) by name
    pub async fn list_workspaces(&self, org: &str) -> Result<BTreeMap<String, Workspace>> {
        index_by_name(self.fetch_workspaces(org).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ws_json(name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": format!("ws-{}", name),
            "type": "workspaces",
            "attributes": {
                "name": name,
                "locked": false,
                "auto-apply": false,
                "resource-count": 1,
                "terraform-version": "1.5.7",
                "created-at": "2023-01-01T00:00:00Z"
            }
        })
    }

    fn page_json(names: &[&str], next: Option<String>) -> serde_json::Value {
        let data: Vec<_> = names.iter().map(|n| ws_json(n)).collect();
        serde_json::json!({ "data": data, "links": { "next": next } })
    }

    async fn mount_three_pages(mock_server: &MockServer) {
        let next = |n: u32| {
            Some(format!(
                "{}/api/v2/organizations/acme/workspaces?page[number]={}&page[size]=100",
                mock_server.uri(),
                n
            ))
        };

        Mock::given(method("GET"))
            .and(path("/api/v2/organizations/acme/workspaces"))
            .and(query_param("page[number]", "2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(page_json(&["alpha", "omega"], next(3))),
            )
            .mount(mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v2/organizations/acme/workspaces"))
            .and(query_param("page[number]", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["kappa"], None)))
            .mount(mock_server)
            .await;

        // First page: the request carries page[size] but no page[number]
        Mock::given(method("GET"))
            .and(path("/api/v2/organizations/acme/workspaces"))
            .and(query_param("page[size]", "100"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(page_json(&["zulu", "beta"], next(2))),
            )
            .with_priority(10)
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_workspaces_three_pages_in_page_order() {
        let mock_server = MockServer::start().await;
        mount_three_pages(&mock_server).await;

        let client = TfeClient::test_client(&mock_server.uri());
        let workspaces = client.fetch_workspaces("acme").await.unwrap();

        let names: Vec<&str> = workspaces.iter().map(|w| w.attributes.name.as_str()).collect();
        assert_eq!(names, vec!["zulu", "beta", "alpha", "omega", "kappa"]);
    }

    #[tokio::test]
    async fn test_list_workspaces_sorted_by_name() {
        let mock_server = MockServer::start().await;
        mount_three_pages(&mock_server).await;

        let client = TfeClient::test_client(&mock_server.uri());
        let workspaces = client.list_workspaces("acme").await.unwrap();

        let names: Vec<&String> = workspaces.keys().collect();
        assert_eq!(names, vec!["alpha", "beta", "kappa", "omega", "zulu"]);
    }

    #[tokio::test]
    async fn test_fetch_workspaces_missing_attribute_aborts() {
        let mock_server = MockServer::start().await;
        let mut broken = ws_json("broken");
        broken["attributes"]
            .as_object_mut()
            .unwrap()
            .remove("locked");

        Mock::given(method("GET"))
            .and(path("/api/v2/organizations/acme/workspaces"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [ws_json("fine"), broken]
            })))
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        let err = client.fetch_workspaces("acme").await.unwrap_err();
        assert!(matches!(err, TfeError::MissingField { .. }));
    }

    #[tokio::test]
    async fn test_fetch_workspaces_unknown_org() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/organizations/ghost/workspaces"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "errors": [{"status": "404", "title": "not found"}]
            })))
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        let err = client.list_workspaces("ghost").await.unwrap_err();
        assert_eq!(err.exit_code(), 404);
    }

    #[test]
    fn test_index_by_name_rejects_duplicates() {
        let a: Workspace = serde_json::from_value(ws_json("dup")).unwrap();
        let mut b = a.clone();
        b.id = "ws-other".to_string();

        let err = index_by_name(vec![a, b]).unwrap_err();
        assert!(matches!(err, TfeError::Consistency(_)));
    }
}
