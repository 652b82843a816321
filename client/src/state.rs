use crate::config::Config;

/// Which screen the main loop shows next. Navigating between the login,
/// registration and voting pages means returning a different variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Screen {
    Login,
    Register,
    Voting,
    Exit,
}

/// Context of one voting-screen visit, built from the stored session on
/// entry and passed to every render and action function.
#[derive(Clone)]
pub struct SessionState {
    pub config: Config,
    pub current_user: String,
    pub is_admin: bool,
}

impl SessionState {
    pub fn new(config: Config, current_user: String, is_admin: bool) -> Self {
        SessionState {
            config,
            current_user,
            is_admin,
        }
    }

    pub fn server_url(&self) -> &str {
        self.config.server_url()
    }
}
