use serde::Deserialize;

pub const USER_ATTRIBUTES: [&str; 3] = ["cn", "uid", "mail"];
pub const GROUP_ATTRIBUTES: [&str; 1] = ["cn"];

/// A search base and a filter pattern with a single `%s` slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryTemplate {
    pub base_dn: String,
    pub filter: String,
}

impl QueryTemplate {
    pub fn new(base_dn: impl Into<String>, filter: impl Into<String>) -> Self {
        Self {
            base_dn: base_dn.into(),
            filter: filter.into(),
        }
    }

    /// Substitutes `user` into the first `%s` of the filter, `%%` yields `%`.
    ///
    /// The identifier is inserted verbatim. Filter metacharacters in `user`
    /// are not escaped and become part of the search expression.
    pub fn render(&self, user: &str) -> String {
        let mut out = String::with_capacity(self.filter.len() + user.len());
        let mut substituted = false;
        let mut chars = self.filter.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.peek() {
                Some('%') => {
                    chars.next();
                    out.push('%');
                }
                Some('s') if !substituted => {
                    chars.next();
                    out.push_str(user);
                    substituted = true;
                }
                _ => out.push('%'),
            }
        }
        out
    }
}

/// The one query shape the resolver runs: a user search, then a group search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryQueries {
    pub user: QueryTemplate,
    pub groups: QueryTemplate,
}
