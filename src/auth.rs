//! Static credential gate for the interactive session.
//!
//! A fixed username/password table from config, checked in memory: no
//! persistence, no hashing, no sessions beyond the current process. This
//! is a demo gate, not real security.

use std::collections::HashMap;

use crate::config::UserConfig;

/// An authenticated identity for the current process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub role: String,
}

/// Check credentials against the configured user table.
pub fn login(
    users: &HashMap<String, UserConfig>,
    username: &str,
    password: &str,
) -> Option<Session> {
    let user = users.get(username)?;
    if user.password == password {
        Some(Session {
            username: username.to_string(),
            role: user.role.clone(),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> HashMap<String, UserConfig> {
        let mut users = HashMap::new();
        users.insert(
            "admin".to_string(),
            UserConfig {
                password: "admin123".to_string(),
                role: "admin".to_string(),
            },
        );
        users
    }

    #[test]
    fn valid_credentials_open_a_session() {
        let session = login(&users(), "admin", "admin123").unwrap();
        assert_eq!(session.username, "admin");
        assert_eq!(session.role, "admin");
    }

    #[test]
    fn wrong_password_is_rejected() {
        assert!(login(&users(), "admin", "nope").is_none());
    }

    #[test]
    fn unknown_user_is_rejected() {
        assert!(login(&users(), "ghost", "admin123").is_none());
    }
}
