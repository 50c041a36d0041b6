use crate::domain_port::{Directory, DirectoryConnection, DirectoryEntry, DirectoryError};
use crate::logger::*;
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, LdapError, Scope, SearchEntry};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct LdapConfig {
    pub url: String,
    pub bind_dn: Option<String>,
    pub bind_password: Option<String>,
    pub timeout: Duration,
    pub starttls: bool,
}

/// LDAP-backed [`Directory`]. Each `open` dials and binds a fresh connection.
pub struct LdapDirectory {
    config: LdapConfig,
}

impl LdapDirectory {
    pub fn new(config: LdapConfig) -> Self {
        Self { config }
    }

    fn conn_settings(&self) -> LdapConnSettings {
        LdapConnSettings::new()
            .set_conn_timeout(self.config.timeout)
            .set_starttls(self.config.starttls)
    }
}

fn operation_error(e: LdapError, wrap: fn(String) -> DirectoryError) -> DirectoryError {
    match e {
        LdapError::Timeout { .. } => DirectoryError::Timeout,
        other => wrap(other.to_string()),
    }
}

#[async_trait::async_trait]
impl Directory for LdapDirectory {
    async fn open(&self) -> Result<Box<dyn DirectoryConnection>, DirectoryError> {
        let (conn, mut ldap) = LdapConnAsync::with_settings(self.conn_settings(), &self.config.url)
            .await
            .map_err(|e| operation_error(e, DirectoryError::Connect))?;

        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                warn!(error = %e, "ldap connection driver stopped");
            }
        });

        if let Some(bind_dn) = &self.config.bind_dn {
            let password = self.config.bind_password.as_deref().unwrap_or_default();
            let bound = ldap
                .with_timeout(self.config.timeout)
                .simple_bind(bind_dn, password)
                .await
                .and_then(|res| res.success());
            if let Err(e) = bound {
                if let Err(unbind) = ldap.unbind().await {
                    debug!(error = %unbind, "unbind after failed bind");
                }
                return Err(operation_error(e, DirectoryError::Bind));
            }
        }

        Ok(Box::new(LdapDirectoryConnection {
            ldap,
            timeout: self.config.timeout,
        }))
    }
}

pub struct LdapDirectoryConnection {
    ldap: Ldap,
    timeout: Duration,
}

#[async_trait::async_trait]
impl DirectoryConnection for LdapDirectoryConnection {
    async fn search(
        &mut self,
        base: &str,
        filter: &str,
        attributes: &[&str],
    ) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        let (entries, _) = self
            .ldap
            .with_timeout(self.timeout)
            .search(base, Scope::Subtree, filter, attributes.to_vec())
            .await
            .and_then(|res| res.success())
            .map_err(|e| operation_error(e, DirectoryError::Search))?;

        Ok(entries
            .into_iter()
            .map(SearchEntry::construct)
            .map(|entry| DirectoryEntry {
                dn: entry.dn,
                attributes: entry.attrs,
            })
            .collect())
    }

    async fn close(&mut self) -> Result<(), DirectoryError> {
        self.ldap
            .unbind()
            .await
            .map_err(|e| DirectoryError::Close(e.to_string()))
    }
}
