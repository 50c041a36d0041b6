//! In-memory collaborators for resolver tests.

use crate::domain_model::{DirectoryQueries, IdentityRecord, QueryTemplate};
use crate::domain_port::{Directory, DirectoryConnection, DirectoryEntry, DirectoryError};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const USER_BASE: &str = "ou=people,dc=example,dc=org";
pub const GROUP_BASE: &str = "ou=groups,dc=example,dc=org";
pub const USER_FILTER_ALICE: &str = "(&(objectClass=person)(uid=alice))";
pub const USER_FILTER_BOB: &str = "(&(objectClass=person)(uid=bob))";
pub const GROUP_FILTER_ALICE: &str = "(&(objectClass=groupOfNames)(memberUid=alice))";

pub fn queries() -> DirectoryQueries {
    DirectoryQueries {
        user: QueryTemplate::new(USER_BASE, "(&(objectClass=person)(uid=%s))"),
        groups: QueryTemplate::new(GROUP_BASE, "(&(objectClass=groupOfNames)(memberUid=%s))"),
    }
}

pub fn person(uid: &str) -> DirectoryEntry {
    person_without_mail(uid).with("mail", format!("{uid}@example.org"))
}

pub fn person_without_mail(uid: &str) -> DirectoryEntry {
    let mut cn = uid.to_string();
    if let Some(first) = cn.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    DirectoryEntry::new(format!("uid={uid},{USER_BASE}"))
        .with("cn", format!("{cn} Example"))
        .with("uid", uid)
}

pub fn group(cn: &str) -> DirectoryEntry {
    DirectoryEntry::new(format!("cn={cn},{GROUP_BASE}")).with("cn", cn)
}

pub fn record(uid: &str) -> IdentityRecord {
    IdentityRecord::new(
        format!("{uid} cached"),
        uid.to_string(),
        format!("{uid}@example.org"),
        vec!["staff".to_string()],
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCall {
    pub base: String,
    pub filter: String,
    pub attributes: Vec<String>,
}

#[derive(Default)]
struct StubState {
    results: Mutex<HashMap<String, Vec<DirectoryEntry>>>,
    failing: Mutex<HashSet<String>>,
    searches: Mutex<Vec<SearchCall>>,
    opens: AtomicUsize,
    closes: AtomicUsize,
    refuse_open: AtomicBool,
    fail_close: AtomicBool,
}

/// Directory answering by exact filter string and counting every call.
#[derive(Clone, Default)]
pub struct StubDirectory {
    state: Arc<StubState>,
}

impl StubDirectory {
    pub fn respond(&self, filter: &str, entries: Vec<DirectoryEntry>) {
        self.state
            .results
            .lock()
            .unwrap()
            .insert(filter.to_string(), entries);
    }

    pub fn fail(&self, filter: &str) {
        self.state.failing.lock().unwrap().insert(filter.to_string());
    }

    pub fn refuse_connections(&self) {
        self.state.refuse_open.store(true, Ordering::SeqCst);
    }

    pub fn fail_close(&self) {
        self.state.fail_close.store(true, Ordering::SeqCst);
    }

    pub fn searches(&self) -> Vec<SearchCall> {
        self.state.searches.lock().unwrap().clone()
    }

    pub fn search_count(&self) -> usize {
        self.state.searches.lock().unwrap().len()
    }

    pub fn open_count(&self) -> usize {
        self.state.opens.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.state.closes.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Directory for StubDirectory {
    async fn open(&self) -> Result<Box<dyn DirectoryConnection>, DirectoryError> {
        if self.state.refuse_open.load(Ordering::SeqCst) {
            return Err(DirectoryError::Connect("connection refused".to_string()));
        }
        self.state.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StubConnection {
            state: self.state.clone(),
        }))
    }
}

struct StubConnection {
    state: Arc<StubState>,
}

#[async_trait::async_trait]
impl DirectoryConnection for StubConnection {
    async fn search(
        &mut self,
        base: &str,
        filter: &str,
        attributes: &[&str],
    ) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        self.state.searches.lock().unwrap().push(SearchCall {
            base: base.to_string(),
            filter: filter.to_string(),
            attributes: attributes.iter().map(|a| a.to_string()).collect(),
        });
        if self.state.failing.lock().unwrap().contains(filter) {
            return Err(DirectoryError::Search("server is unwilling to perform".to_string()));
        }
        let results = self.state.results.lock().unwrap();
        Ok(results.get(filter).cloned().unwrap_or_default())
    }

    async fn close(&mut self) -> Result<(), DirectoryError> {
        self.state.closes.fetch_add(1, Ordering::SeqCst);
        if self.state.fail_close.load(Ordering::SeqCst) {
            return Err(DirectoryError::Close("connection reset".to_string()));
        }
        Ok(())
    }
}
