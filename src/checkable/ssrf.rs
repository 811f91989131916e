/*!
 * SSRF Checkable Object
 * Intercepted outbound requests issued by server-side code
 */

use super::{encode_lookup_key, CheckCategory, Checkable};
use crate::core::types::LookupKey;
use crate::params::{ParamResult, ParamSink};

/// An intercepted outbound request
///
/// Parameter keys written for policy rules: `url`, `hostname`, `ip`,
/// `function` (the library function that issued the request).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsrfObject {
    url: String,
    hostname: String,
    ip: String,
    function: String,
}

impl SsrfObject {
    pub fn new(
        url: impl Into<String>,
        hostname: impl Into<String>,
        ip: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            hostname: hostname.into(),
            ip: ip.into(),
            function: function.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn function(&self) -> &str {
        &self.function
    }
}

impl Checkable for SsrfObject {
    fn lookup_key(&self) -> LookupKey {
        encode_lookup_key(
            CheckCategory::Ssrf,
            &[&self.url, &self.hostname, &self.ip, &self.function],
        )
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Ssrf
    }

    /// An empty URL leaves nothing for policy rules to inspect
    fn is_well_formed(&self) -> bool {
        !self.url.is_empty()
    }

    fn populate_params(&self, params: &mut dyn ParamSink) -> ParamResult<()> {
        params.put_str("url", &self.url)?;
        params.put_str("hostname", &self.hostname)?;
        params.put_str("ip", &self.ip)?;
        params.put_str("function", &self.function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::JsonParams;

    fn sample() -> SsrfObject {
        SsrfObject::new(
            "http://169.254.169.254/latest/meta-data",
            "169.254.169.254",
            "169.254.169.254",
            "curl_exec",
        )
    }

    #[test]
    fn test_well_formed() {
        assert!(sample().is_well_formed());
        assert!(!SsrfObject::new("", "host", "1.2.3.4", "fopen").is_well_formed());
    }

    #[test]
    fn test_populate_params() {
        let mut params = JsonParams::new();
        sample().populate_params(&mut params).unwrap();

        assert_eq!(
            params.get_str("url"),
            Some("http://169.254.169.254/latest/meta-data")
        );
        assert_eq!(params.get_str("hostname"), Some("169.254.169.254"));
        assert_eq!(params.get_str("function"), Some("curl_exec"));
        assert_eq!(params.len(), 4);
    }
}
