/*!
 * MongoDB Checkable Object
 * Intercepted MongoDB driver calls (server, query, issuing class and method)
 */

use super::{encode_lookup_key, CheckCategory, Checkable};
use crate::core::types::LookupKey;
use crate::params::{ParamResult, ParamSink};

/// An intercepted MongoDB operation
///
/// Parameter keys written for policy rules: `server`, `query`, `class`,
/// `method`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoObject {
    server: String,
    query: String,
    classname: String,
    method: String,
}

impl MongoObject {
    /// Construction is total: any text (including empty) is accepted
    pub fn new(
        server: impl Into<String>,
        query: impl Into<String>,
        classname: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            query: query.into(),
            classname: classname.into(),
            method: method.into(),
        }
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn classname(&self) -> &str {
        &self.classname
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

impl Checkable for MongoObject {
    fn lookup_key(&self) -> LookupKey {
        encode_lookup_key(
            CheckCategory::Mongo,
            &[&self.server, &self.query, &self.classname, &self.method],
        )
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Mongo
    }

    /// An empty query leaves nothing for policy rules to inspect
    fn is_well_formed(&self) -> bool {
        !self.query.is_empty()
    }

    fn populate_params(&self, params: &mut dyn ParamSink) -> ParamResult<()> {
        params.put_str("server", &self.server)?;
        params.put_str("query", &self.query)?;
        params.put_str("class", &self.classname)?;
        params.put_str("method", &self.method)
    }
}
