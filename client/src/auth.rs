use colored::*;
use rustyline::DefaultEditor;
use votacao_common::LoginResponse;

use crate::api;
use crate::config::Config;
use crate::session::{self, SessionStore};
use crate::state::Screen;
use crate::ui;

/// Login page: a small menu, then the credential form. A successful login
/// persists the session and moves to the voting screen; every failure lands
/// back here.
pub async fn login_screen(
    config: &Config,
    store: &mut dyn SessionStore,
) -> Result<Screen, Box<dyn std::error::Error>> {
    ui::clear_screen()?;
    println!();
    println!("{}", "═══ VOTAÇÃO — LOGIN ═══".bright_cyan().bold());
    println!();
    println!("  {}. Entrar", "1".bright_yellow());
    println!("  {}. Criar conta", "2".bright_yellow());
    println!("  {}. Sair", "3".bright_yellow());
    println!();

    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("Opção: ") {
            Ok(line) => match line.trim() {
                "1" => return login_form(config, store).await,
                "2" => return Ok(Screen::Register),
                "3" => return Ok(Screen::Exit),
                _ => println!("{}", "Opção inválida.".red()),
            },
            Err(_) => return Ok(Screen::Exit),
        }
    }
}

async fn login_form(
    config: &Config,
    store: &mut dyn SessionStore,
) -> Result<Screen, Box<dyn std::error::Error>> {
    let Some((nickname, password)) = read_credentials()? else {
        return Ok(Screen::Login);
    };

    match api::auth::login(config.server_url(), &nickname, &password).await {
        Ok(response) => {
            persist_login(store, &nickname, &response);
            Ok(Screen::Voting)
        }
        Err(err) => {
            ui::alert_api_error(&err, "Erro ao fazer login.");
            Ok(Screen::Login)
        }
    }
}

/// Registration page: same validation as login. Success sends the user back
/// to the login screen to sign in; nothing is stored locally.
pub async fn register_screen(config: &Config) -> Result<Screen, Box<dyn std::error::Error>> {
    ui::clear_screen()?;
    println!();
    println!("{}", "═══ VOTAÇÃO — CADASTRO ═══".bright_cyan().bold());
    println!();

    let Some((nickname, password)) = read_credentials()? else {
        return Ok(Screen::Login);
    };

    match api::auth::register(config.server_url(), &nickname, &password).await {
        Ok(()) => {
            ui::alert("Cadastro realizado! Agora faça login.");
            Ok(Screen::Login)
        }
        Err(err) => {
            ui::alert_api_error(&err, "Erro ao cadastrar.");
            Ok(Screen::Register)
        }
    }
}

/// Prompts for both fields and applies the shared validation. `None` means
/// the attempt is over without any request having been sent.
fn read_credentials() -> Result<Option<(String, String)>, Box<dyn std::error::Error>> {
    let mut rl = DefaultEditor::new()?;

    let Ok(nickname) = rl.readline("Apelido: ") else {
        return Ok(None);
    };
    let Ok(password) = rl.readline("Senha: ") else {
        return Ok(None);
    };

    match validate_credentials(&nickname, &password) {
        Some(credentials) => Ok(Some(credentials)),
        None => {
            ui::alert("Preencha apelido e senha.");
            Ok(None)
        }
    }
}

/// Trims both fields; `None` means at least one came out empty and no
/// request may be sent.
fn validate_credentials(nickname: &str, password: &str) -> Option<(String, String)> {
    let nickname = nickname.trim();
    let password = password.trim();
    if nickname.is_empty() || password.is_empty() {
        return None;
    }
    Some((nickname.to_string(), password.to_string()))
}

/// Stores exactly what the server declared: the trimmed nickname and the
/// verbatim admin flag.
fn persist_login(store: &mut dyn SessionStore, nickname: &str, response: &LoginResponse) {
    session::set_current_user(store, nickname);
    session::set_admin_flag(store, response.is_admin);
}
