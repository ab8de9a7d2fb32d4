// File: src/graph/credentials.rs
use crate::config::Config;
use crate::errors::CredentialError;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// A page-scoped publishing credential derived from the user token
#[derive(Debug, Clone)]
pub struct PageCredential {
    pub token: String,
    pub page_id: String,
    pub page_name: String,
}

#[derive(Debug, Deserialize)]
struct AccountsResponse {
    #[serde(default)]
    data: Vec<AccountEntry>,
}

#[derive(Debug, Deserialize)]
struct AccountEntry {
    id: String,
    name: String,
    #[serde(default)]
    access_token: String,
}

/// Resolves the target page credential from the configured user token.
///
/// The first successful lookup is cached for the remainder of the process
/// lifetime; the operator restarts the service to force a refresh.
pub struct CredentialResolver {
    client: Client,
    base_url: String,
    user_token: Option<String>,
    page_id: Option<String>,
    page_keywords: Vec<String>,
    cache: Mutex<Option<PageCredential>>,
}

impl CredentialResolver {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            base_url: config.graph_api_base.clone(),
            user_token: config.secrets.user_token.clone(),
            page_id: config.page_id.clone(),
            page_keywords: config
                .page_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            cache: Mutex::new(None),
        }
    }

    /// Return the cached credential, or perform the single remote lookup.
    ///
    /// Failures leave the cache untouched; a previously cached credential
    /// is never invalidated by a later error.
    pub async fn resolve(&self) -> Result<PageCredential, CredentialError> {
        let mut cache = self.cache.lock().await;
        if let Some(credential) = cache.as_ref() {
            debug!("Using cached page token for {}", credential.page_name);
            return Ok(credential.clone());
        }

        let user_token = self.user_token.as_ref().ok_or_else(|| {
            CredentialError::Lookup {
                reason: "FB_USER_TOKEN not configured".to_string(),
            }
        })?;

        info!("Fetching page info from user token...");
        let url = super::endpoint(&self.base_url, "me/accounts");
        let response = self
            .client
            .get(&url)
            .query(&[("access_token", user_token.as_str())])
            .send()
            .await
            .map_err(|e| CredentialError::Lookup {
                reason: format!("accounts request failed: {}", e),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| CredentialError::Lookup {
            reason: format!("accounts response unreadable: {}", e),
        })?;

        if !status.is_success() {
            return Err(CredentialError::Lookup {
                reason: super::error_message(status, &body),
            });
        }

        let accounts: AccountsResponse =
            serde_json::from_str(&body).map_err(|e| CredentialError::Lookup {
                reason: format!("malformed accounts response: {}", e),
            })?;

        if accounts.data.is_empty() {
            return Err(CredentialError::NoPagesFound);
        }

        debug!(
            "Available pages: {}",
            accounts
                .data
                .iter()
                .map(|p| format!("{} ({})", p.name, p.id))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let credential = self.select_page(&accounts.data)?;
        info!(
            "Resolved page: {} ({})",
            credential.page_name, credential.page_id
        );

        *cache = Some(credential.clone());
        Ok(credential)
    }

    /// Pick the target page: configured id first, then name keywords,
    /// then the first usable entry. Entries without a page token cannot
    /// publish and are skipped.
    fn select_page(&self, pages: &[AccountEntry]) -> Result<PageCredential, CredentialError> {
        let usable: Vec<&AccountEntry> =
            pages.iter().filter(|p| !p.access_token.is_empty()).collect();

        if usable.is_empty() {
            return Err(CredentialError::TargetPageNotFound {
                available: pages.iter().map(|p| p.name.clone()).collect(),
            });
        }

        let matched = usable
            .iter()
            .find(|p| self.page_id.as_deref() == Some(p.id.as_str()))
            .or_else(|| {
                usable.iter().find(|p| {
                    let name = p.name.to_lowercase();
                    self.page_keywords.iter().any(|k| name.contains(k))
                })
            })
            .unwrap_or(&usable[0]);

        Ok(PageCredential {
            token: matched.access_token.clone(),
            page_id: matched.id.clone(),
            page_name: matched.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver_with(page_id: Option<&str>, keywords: &[&str]) -> CredentialResolver {
        let mut config = Config::default();
        config.page_id = page_id.map(|s| s.to_string());
        config.page_keywords = keywords.iter().map(|s| s.to_string()).collect();
        config.secrets.user_token = Some("user-token".to_string());
        CredentialResolver::new(&config, Client::new())
    }

    fn entry(id: &str, name: &str, token: &str) -> AccountEntry {
        AccountEntry {
            id: id.to_string(),
            name: name.to_string(),
            access_token: token.to_string(),
        }
    }

    #[test]
    fn test_select_by_configured_id() {
        let resolver = resolver_with(Some("222"), &["solutions"]);
        let pages = vec![
            entry("111", "Solutions Hub", "t1"),
            entry("222", "Other Page", "t2"),
        ];
        let cred = resolver.select_page(&pages).unwrap();
        assert_eq!(cred.page_id, "222");
        assert_eq!(cred.token, "t2");
    }

    #[test]
    fn test_select_by_keyword() {
        let resolver = resolver_with(None, &["solution"]);
        let pages = vec![
            entry("111", "Cooking Corner", "t1"),
            entry("222", "IT-Solutions", "t2"),
        ];
        let cred = resolver.select_page(&pages).unwrap();
        assert_eq!(cred.page_name, "IT-Solutions");
    }

    #[test]
    fn test_falls_back_to_first_page() {
        let resolver = resolver_with(None, &["nomatch"]);
        let pages = vec![
            entry("111", "Cooking Corner", "t1"),
            entry("222", "IT-Solutions", "t2"),
        ];
        let cred = resolver.select_page(&pages).unwrap();
        assert_eq!(cred.page_id, "111");
    }

    #[test]
    fn test_skips_pages_without_token() {
        let resolver = resolver_with(None, &[]);
        let pages = vec![entry("111", "Broken", ""), entry("222", "Usable", "t2")];
        let cred = resolver.select_page(&pages).unwrap();
        assert_eq!(cred.page_id, "222");
    }

    #[test]
    fn test_no_usable_page_is_an_error() {
        let resolver = resolver_with(None, &[]);
        let pages = vec![entry("111", "Broken", "")];
        match resolver.select_page(&pages) {
            Err(CredentialError::TargetPageNotFound { available }) => {
                assert_eq!(available, vec!["Broken".to_string()]);
            }
            other => panic!("expected TargetPageNotFound, got {:?}", other),
        }
    }
}
