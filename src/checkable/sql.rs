/*!
 * SQL Checkable Object
 * Intercepted SQL statements about to be sent to a database server
 */

use super::{encode_lookup_key, CheckCategory, Checkable};
use crate::core::types::LookupKey;
use crate::params::{ParamResult, ParamSink};

/// An intercepted SQL statement
///
/// Parameter keys written for policy rules: `server`, `query`, `username`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlObject {
    server: String,
    query: String,
    username: String,
}

impl SqlObject {
    pub fn new(
        server: impl Into<String>,
        query: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            query: query.into(),
            username: username.into(),
        }
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Checkable for SqlObject {
    fn lookup_key(&self) -> LookupKey {
        encode_lookup_key(
            CheckCategory::Sql,
            &[&self.server, &self.query, &self.username],
        )
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Sql
    }

    /// An empty statement leaves nothing for policy rules to inspect
    fn is_well_formed(&self) -> bool {
        !self.query.is_empty()
    }

    fn populate_params(&self, params: &mut dyn ParamSink) -> ParamResult<()> {
        params.put_str("server", &self.server)?;
        params.put_str("query", &self.query)?;
        params.put_str("username", &self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::JsonParams;

    #[test]
    fn test_well_formed() {
        let obj = SqlObject::new("mysql", "SELECT 1", "root");
        assert!(obj.is_well_formed());
        assert!(!SqlObject::new("mysql", "", "root").is_well_formed());
    }

    #[test]
    fn test_category_fixed() {
        assert_eq!(SqlObject::new("", "", "").category(), CheckCategory::Sql);
        assert_eq!(
            SqlObject::new("pgsql", "DROP TABLE users", "admin").category(),
            CheckCategory::Sql
        );
    }

    #[test]
    fn test_populate_params() {
        let obj = SqlObject::new("mysql", "SELECT * FROM users", "root");
        let mut params = JsonParams::new();
        obj.populate_params(&mut params).unwrap();

        assert_eq!(params.get_str("server"), Some("mysql"));
        assert_eq!(params.get_str("query"), Some("SELECT * FROM users"));
        assert_eq!(params.get_str("username"), Some("root"));
    }
}
