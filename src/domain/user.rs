use serde::{Deserialize, Serialize};

const PROFILE_PHOTO: &str =
    "https://images.pexels.com/photos/614810/pexels-photo-614810.jpeg?auto=compress&cs=tinysrgb&w=100&h=100&dpr=1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Worker,
    Administrator,
}

/// Perfil activo del dashboard. El cambio de rol es una transición local
/// sin autenticación; solo condiciona qué acciones muestra la UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub role: Role,
    pub photo: String,
}

impl User {
    pub fn profile(role: Role) -> Self {
        let name = match role {
            Role::Worker => "Trabalhador",
            Role::Administrator => "Administrador",
        };
        Self {
            name: name.to_string(),
            role,
            photo: PROFILE_PHOTO.to_string(),
        }
    }
}

impl Default for User {
    fn default() -> Self {
        User::profile(Role::Worker)
    }
}
