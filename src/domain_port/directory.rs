use std::collections::HashMap;

/// One search result: its distinguished name and the requested attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub dn: String,
    pub attributes: HashMap<String, Vec<String>>,
}

impl DirectoryEntry {
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes
            .entry(name.to_string())
            .or_default()
            .push(value.into());
        self
    }

    /// First value of `name`, matched ignoring ASCII case like LDAP attribute descriptions.
    ///
    /// An absent attribute or one with no values reads as `None`. An empty string
    /// value reads as `Some("")`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .or_else(|| {
                self.attributes
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, values)| values)
            })
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory connect failed: {0}")]
    Connect(String),
    #[error("directory bind failed: {0}")]
    Bind(String),
    #[error("directory search failed: {0}")]
    Search(String),
    #[error("directory operation timed out")]
    Timeout,
    #[error("directory close failed: {0}")]
    Close(String),
}

/// Opens connections to the directory. Every call gets its own connection.
#[async_trait::async_trait]
pub trait Directory: Send + Sync {
    async fn open(&self) -> Result<Box<dyn DirectoryConnection>, DirectoryError>;
}

#[async_trait::async_trait]
pub trait DirectoryConnection: Send {
    /// Subtree-scope search under `base`, results in directory order.
    async fn search(
        &mut self,
        base: &str,
        filter: &str,
        attributes: &[&str],
    ) -> Result<Vec<DirectoryEntry>, DirectoryError>;

    /// Releases the connection. Called once, after the last search.
    async fn close(&mut self) -> Result<(), DirectoryError>;
}
