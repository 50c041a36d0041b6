use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject and group data a certificate is minted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub cn: String,
    pub uid: String,
    pub mail: String,
    /// Group common names in the order the directory returned them.
    pub groups: Vec<String>,
}

impl IdentityRecord {
    pub fn new(cn: String, uid: String, mail: String, groups: Vec<String>) -> Self {
        Self {
            cn,
            uid,
            mail,
            groups,
        }
    }
}

impl fmt::Display for IdentityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> ({})", self.cn, self.mail, self.uid)
    }
}

/// `None` marks a resolution that failed earlier and must not be retried.
pub type CachedIdentity = Option<IdentityRecord>;
