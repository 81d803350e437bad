use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CLIENT_NOT_FOUND: &str = "Cliente no encontrado.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClientKind {
    #[default]
    #[serde(rename = "empresa")]
    Company,
    #[serde(rename = "persona")]
    Person,
}

impl ClientKind {
    pub fn parse(value: &str) -> Self {
        match value {
            "persona" => Self::Person,
            _ => Self::Company,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Company => "empresa",
            Self::Person => "persona",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: u32,
    pub name: String,
}

/// Clients known before any is registered in the session.
pub fn seed_clients() -> Vec<Client> {
    vec![
        Client {
            id: 1,
            name: "Marcos Reyes".into(),
        },
        Client {
            id: 2,
            name: "Cliente Ejemplo".into(),
        },
    ]
}

/// Case-insensitive substring match on the name; a blank query finds nothing.
pub fn search_clients<'a>(clients: &'a [Client], query: &str) -> Vec<&'a Client> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    clients
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&query))
        .collect()
}

/// `12.345.678-k` → `12345678-K`.
pub fn normalize_rut(rut: &str) -> String {
    rut.chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientFormError {
    #[error("El RUT es obligatorio.")]
    MissingRut,
    #[error("La razón social es obligatoria.")]
    MissingBusinessName,
    #[error("Nombres y apellidos son obligatorios.")]
    MissingNames,
    #[error("La dirección es obligatoria.")]
    MissingAddress,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewClientForm {
    pub kind: ClientKind,
    pub foreign: bool,
    pub rut: String,
    pub business_name: String,
    pub line_of_business: String,
    pub first_names: String,
    pub last_names: String,
    pub address: String,
    pub commune: String,
    pub city: String,
    pub region: String,
}

impl NewClientForm {
    pub fn validate(&self) -> Result<(), ClientFormError> {
        if !self.foreign && self.rut.trim().is_empty() {
            return Err(ClientFormError::MissingRut);
        }
        match self.kind {
            ClientKind::Company if self.business_name.trim().is_empty() => {
                return Err(ClientFormError::MissingBusinessName)
            }
            ClientKind::Person
                if self.first_names.trim().is_empty() || self.last_names.trim().is_empty() =>
            {
                return Err(ClientFormError::MissingNames)
            }
            _ => {}
        }
        if self.address.trim().is_empty() {
            return Err(ClientFormError::MissingAddress);
        }
        Ok(())
    }

    pub fn display_name(&self) -> String {
        match self.kind {
            ClientKind::Company => self.business_name.trim().to_string(),
            ClientKind::Person => format!("{} {}", self.first_names.trim(), self.last_names.trim()),
        }
    }

    /// Validates and turns the form into a client with the next free id.
    pub fn into_client(self, existing: &[Client]) -> Result<Client, ClientFormError> {
        self.validate()?;
        let id = existing.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Ok(Client {
            id,
            name: self.display_name(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search() {
        let clients = seed_clients();
        assert!(search_clients(&clients, "  ").is_empty());
        let found = search_clients(&clients, "MARCOS");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
        assert!(search_clients(&clients, "zzz").is_empty());
    }

    #[test]
    fn rut_normalization() {
        assert_eq!(normalize_rut("12.345.678-k"), "12345678-K");
        assert_eq!(normalize_rut(" 9.876.543-2 "), "9876543-2");
    }

    #[test]
    fn validation_rules() {
        let mut form = NewClientForm {
            business_name: "Comercial Sur SpA".into(),
            address: "Av. Siempre Viva 123".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(ClientFormError::MissingRut));
        form.foreign = true;
        assert!(form.validate().is_ok());

        form.kind = ClientKind::Person;
        form.first_names = "Ana".into();
        assert_eq!(form.validate(), Err(ClientFormError::MissingNames));
        form.last_names = "Pérez".into();
        form.address.clear();
        assert_eq!(form.validate(), Err(ClientFormError::MissingAddress));
    }

    #[test]
    fn new_client_gets_next_id() {
        let form = NewClientForm {
            kind: ClientKind::Person,
            rut: "11.111.111-1".into(),
            first_names: "Ana".into(),
            last_names: "Pérez".into(),
            address: "Calle 1".into(),
            ..Default::default()
        };
        let client = form.into_client(&seed_clients()).unwrap();
        assert_eq!(client.id, 3);
        assert_eq!(client.name, "Ana Pérez");
        assert_eq!(ClientKind::parse("persona"), ClientKind::Person);
    }
}
