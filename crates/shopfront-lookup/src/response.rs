//! ViaCEP response payload.

use serde::Deserialize;
use shopfront_commerce::checkout::AddressFields;

/// Body returned by `GET /ws/{cep}/json/`.
///
/// Unknown codes come back with status 200 and `{"erro": true}` (older
/// deployments send a string). Any non-empty string counts as set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ViaCepResponse {
    pub cep: Option<String>,
    pub logradouro: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub localidade: Option<String>,
    pub uf: Option<String>,
    erro: Option<ErrorFlag>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ErrorFlag {
    Bool(bool),
    Text(String),
}

impl ViaCepResponse {
    /// Whether the service reported the code as unknown.
    pub fn is_not_found(&self) -> bool {
        match &self.erro {
            Some(ErrorFlag::Bool(flag)) => *flag,
            Some(ErrorFlag::Text(text)) => !text.is_empty(),
            None => false,
        }
    }

    /// The address fields, or `None` for an unknown code.
    pub fn into_fields(self) -> Option<AddressFields> {
        if self.is_not_found() {
            return None;
        }
        Some(AddressFields {
            street: self.logradouro.unwrap_or_default(),
            neighborhood: self.bairro.unwrap_or_default(),
            city: self.localidade.unwrap_or_default(),
            state_code: self.uf.unwrap_or_default(),
        })
    }
}
