use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Header names NCM expects, in the order they are sent.
pub const CP_API_ID_HEADER: &str = "X-CP-API-ID";
pub const CP_API_KEY_HEADER: &str = "X-CP-API-KEY";
pub const ECM_API_ID_HEADER: &str = "X-ECM-API-ID";
pub const ECM_API_KEY_HEADER: &str = "X-ECM-API-KEY";

/// The two API-ID/API-KEY pairs NCM requires on every v2 request.
///
/// One pair identifies the Cradlepoint account (`X-CP-*`), the other the
/// ECM tenant (`X-ECM-*`). The values are never logged; the header values
/// built from them are marked sensitive.
#[derive(Debug, Clone)]
pub struct ApiKeys {
    pub cp_api_id: SecretString,
    pub cp_api_key: SecretString,
    pub ecm_api_id: SecretString,
    pub ecm_api_key: SecretString,
}

impl ApiKeys {
    pub fn new(
        cp_api_id: impl Into<String>,
        cp_api_key: impl Into<String>,
        ecm_api_id: impl Into<String>,
        ecm_api_key: impl Into<String>,
    ) -> Self {
        Self {
            cp_api_id: SecretString::from(cp_api_id.into()),
            cp_api_key: SecretString::from(cp_api_key.into()),
            ecm_api_id: SecretString::from(ecm_api_id.into()),
            ecm_api_key: SecretString::from(ecm_api_key.into()),
        }
    }

    fn pairs(&self) -> [(&'static str, &SecretString); 4] {
        [
            (CP_API_ID_HEADER, &self.cp_api_id),
            (CP_API_KEY_HEADER, &self.cp_api_key),
            (ECM_API_ID_HEADER, &self.ecm_api_id),
            (ECM_API_KEY_HEADER, &self.ecm_api_key),
        ]
    }

    /// Build the default header map carrying all four credentials.
    pub(crate) fn headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        for (name, secret) in self.pairs() {
            let mut value =
                HeaderValue::from_str(secret.expose_secret()).map_err(|e| Error::Authentication {
                    message: format!("invalid {name} header value: {e}"),
                })?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }
        Ok(headers)
    }
}
