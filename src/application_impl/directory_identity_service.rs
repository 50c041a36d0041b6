use crate::application_port::{IdentityService, ResolveError};
use crate::domain_model::{DirectoryQueries, GROUP_ATTRIBUTES, IdentityRecord, USER_ATTRIBUTES};
use crate::domain_port::{Directory, DirectoryConnection};
use crate::logger::*;
use std::sync::Arc;

/// Resolves identities straight from the directory: one user search, one group search.
pub struct DirectoryIdentityService {
    directory: Arc<dyn Directory>,
    queries: DirectoryQueries,
}

impl DirectoryIdentityService {
    pub fn new(directory: Arc<dyn Directory>, queries: DirectoryQueries) -> Self {
        Self { directory, queries }
    }

    async fn lookup(
        &self,
        conn: &mut dyn DirectoryConnection,
        user_filter: &str,
        group_filter: &str,
    ) -> Result<IdentityRecord, ResolveError> {
        let mut users = conn
            .search(&self.queries.user.base_dn, user_filter, &USER_ATTRIBUTES)
            .await?;
        let entry = match users.len() {
            0 => return Err(ResolveError::MissingUser),
            1 => users.remove(0),
            _ => return Err(ResolveError::TooManyUsers),
        };

        let (cn, uid, mail) = match (entry.first("cn"), entry.first("uid"), entry.first("mail")) {
            (Some(cn), Some(uid), Some(mail)) => {
                (cn.to_string(), uid.to_string(), mail.to_string())
            }
            _ => return Err(ResolveError::MissingDetails),
        };

        let groups = conn
            .search(&self.queries.groups.base_dn, group_filter, &GROUP_ATTRIBUTES)
            .await?
            .into_iter()
            .filter_map(|group| match group.first("cn") {
                Some(cn) => Some(cn.to_string()),
                None => {
                    warn!(dn = %group.dn, "group entry without cn skipped");
                    None
                }
            })
            .collect();

        Ok(IdentityRecord::new(cn, uid, mail, groups))
    }
}

#[async_trait::async_trait]
impl IdentityService for DirectoryIdentityService {
    async fn resolve(&self, user: &str) -> Result<IdentityRecord, ResolveError> {
        let user_filter = self.queries.user.render(user);
        let group_filter = self.queries.groups.render(user);

        let mut conn = self.directory.open().await?;
        let outcome = self
            .lookup(conn.as_mut(), &user_filter, &group_filter)
            .await;
        // the lookup outcome wins over a failed release
        if let Err(e) = conn.close().await {
            warn!(user, error = %e, "directory connection close failed");
        }

        if let Ok(record) = &outcome {
            info!(
                user,
                identity = %record,
                groups = record.groups.len(),
                "resolved from directory"
            );
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_impl::test_support::*;
    use crate::domain_port::{DirectoryEntry, DirectoryError};
    use std::collections::HashSet;

    fn service(directory: &StubDirectory) -> DirectoryIdentityService {
        DirectoryIdentityService::new(Arc::new(directory.clone()), queries())
    }

    #[tokio::test]
    async fn resolves_user_and_groups() {
        let directory = StubDirectory::default();
        directory.respond(USER_FILTER_ALICE, vec![person("alice")]);
        directory.respond(
            GROUP_FILTER_ALICE,
            vec![group("g1"), group("g2"), group("g3")],
        );

        let record = service(&directory).resolve("alice").await.unwrap();

        assert_eq!(record.cn, "Alice Example");
        assert_eq!(record.uid, "alice");
        assert_eq!(record.mail, "alice@example.org");
        let groups: HashSet<_> = record.groups.iter().map(String::as_str).collect();
        assert_eq!(groups, HashSet::from(["g1", "g2", "g3"]));
        assert_eq!(record.groups.len(), 3);
    }

    #[tokio::test]
    async fn passes_rendered_filters_and_attributes() {
        let directory = StubDirectory::default();
        directory.respond(USER_FILTER_ALICE, vec![person("alice")]);

        service(&directory).resolve("alice").await.unwrap();

        let calls = directory.searches();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].base, USER_BASE);
        assert_eq!(calls[0].filter, "(&(objectClass=person)(uid=alice))");
        assert_eq!(calls[0].attributes, vec!["cn", "uid", "mail"]);
        assert_eq!(calls[1].base, GROUP_BASE);
        assert_eq!(calls[1].filter, GROUP_FILTER_ALICE);
        assert_eq!(calls[1].attributes, vec!["cn"]);
    }

    #[tokio::test]
    async fn zero_groups_is_not_an_error() {
        let directory = StubDirectory::default();
        directory.respond(USER_FILTER_ALICE, vec![person("alice")]);

        let record = service(&directory).resolve("alice").await.unwrap();

        assert!(record.groups.is_empty());
        assert_eq!(directory.close_count(), 1);
    }

    #[tokio::test]
    async fn unknown_user_fails_and_releases_connection() {
        let directory = StubDirectory::default();

        let err = service(&directory).resolve("nobody").await.unwrap_err();

        assert!(matches!(err, ResolveError::MissingUser));
        assert_eq!(directory.search_count(), 1);
        assert_eq!(directory.open_count(), 1);
        assert_eq!(directory.close_count(), 1);
    }

    #[tokio::test]
    async fn ambiguous_user_fails_and_releases_connection() {
        let directory = StubDirectory::default();
        directory.respond(USER_FILTER_BOB, vec![person("bob"), person("bob")]);

        let err = service(&directory).resolve("bob").await.unwrap_err();

        assert!(matches!(err, ResolveError::TooManyUsers));
        assert_eq!(directory.search_count(), 1);
        assert_eq!(directory.close_count(), 1);
    }

    #[tokio::test]
    async fn missing_mail_fails_and_releases_connection() {
        let directory = StubDirectory::default();
        directory.respond(USER_FILTER_ALICE, vec![person_without_mail("alice")]);

        let err = service(&directory).resolve("alice").await.unwrap_err();

        assert!(matches!(err, ResolveError::MissingDetails));
        assert_eq!(directory.search_count(), 1);
        assert_eq!(directory.close_count(), 1);
    }

    #[tokio::test]
    async fn search_failure_is_a_transport_error() {
        let directory = StubDirectory::default();
        directory.fail(USER_FILTER_ALICE);

        let err = service(&directory).resolve("alice").await.unwrap_err();

        assert!(matches!(
            err,
            ResolveError::Transport(DirectoryError::Search(_))
        ));
        assert_eq!(directory.close_count(), 1);
    }

    #[tokio::test]
    async fn group_search_failure_is_a_transport_error() {
        let directory = StubDirectory::default();
        directory.respond(USER_FILTER_ALICE, vec![person("alice")]);
        directory.fail(GROUP_FILTER_ALICE);

        let err = service(&directory).resolve("alice").await.unwrap_err();

        assert!(matches!(err, ResolveError::Transport(_)));
        assert_eq!(directory.search_count(), 2);
        assert_eq!(directory.close_count(), 1);
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        let directory = StubDirectory::default();
        directory.refuse_connections();

        let err = service(&directory).resolve("alice").await.unwrap_err();

        assert!(matches!(
            err,
            ResolveError::Transport(DirectoryError::Connect(_))
        ));
        assert_eq!(directory.search_count(), 0);
        assert_eq!(directory.close_count(), 0);
    }

    #[tokio::test]
    async fn close_failure_keeps_resolved_record() {
        let directory = StubDirectory::default();
        directory.respond(USER_FILTER_ALICE, vec![person("alice")]);
        directory.fail_close();

        let record = service(&directory).resolve("alice").await.unwrap();

        assert_eq!(record.uid, "alice");
        assert_eq!(directory.close_count(), 1);
    }

    #[tokio::test]
    async fn attribute_names_match_regardless_of_case() {
        let directory = StubDirectory::default();
        let entry = DirectoryEntry::new(format!("uid=alice,{USER_BASE}"))
            .with("CN", "Alice Example")
            .with("UID", "alice")
            .with("Mail", "alice@example.org");
        directory.respond(USER_FILTER_ALICE, vec![entry]);
        directory.respond(
            GROUP_FILTER_ALICE,
            vec![DirectoryEntry::new(format!("cn=g1,{GROUP_BASE}")).with("Cn", "g1")],
        );

        let record = service(&directory).resolve("alice").await.unwrap();

        assert_eq!(record.cn, "Alice Example");
        assert_eq!(record.uid, "alice");
        assert_eq!(record.mail, "alice@example.org");
        assert_eq!(record.groups, vec!["g1".to_string()]);
    }

    #[tokio::test]
    async fn group_without_cn_is_skipped() {
        let directory = StubDirectory::default();
        directory.respond(USER_FILTER_ALICE, vec![person("alice")]);
        directory.respond(
            GROUP_FILTER_ALICE,
            vec![group("g1"), DirectoryEntry::new("cn=broken,ou=groups,dc=example,dc=org")],
        );

        let record = service(&directory).resolve("alice").await.unwrap();

        assert_eq!(record.groups, vec!["g1".to_string()]);
    }
}
