mod directory_ldap;

pub use directory_ldap::*;
