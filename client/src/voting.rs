use colored::*;
use votacao_common::{Player, SetAdminRequest, VoteRequest};

use crate::api;
use crate::config::Config;
use crate::session::{self, SessionStore};
use crate::state::{Screen, SessionState};
use crate::ui;
use crate::view::{self, AdminCell, PlayerRow, RemoveCell};

/// The voting page. Guards the session on entry, loads the list once, then
/// loops: render the table, read an action, run it. Successful mutations
/// re-fetch the list; nothing is recomputed locally.
pub async fn voting_screen(
    config: &Config,
    store: &mut dyn SessionStore,
) -> Result<Screen, Box<dyn std::error::Error>> {
    let Some(current_user) = session::require_auth(store) else {
        return Ok(Screen::Login);
    };
    let state = SessionState::new(config.clone(), current_user, session::admin_flag(store));

    let mut players: Vec<Player> = Vec::new();
    load_players(&state, &mut players).await;

    loop {
        let rows = view::build_rows(&players, &state);

        ui::clear_screen()?;
        print_header(&state);
        view::print_table(&rows);
        print_actions(&state);

        let Some(choice) = ui::prompt("Ação: ") else {
            return Ok(Screen::Exit);
        };

        match choice.trim().to_lowercase().as_str() {
            "v" => {
                if vote_for_player(&state, &rows).await {
                    load_players(&state, &mut players).await;
                }
            }
            "a" if state.is_admin => {
                if toggle_admin(&state, &rows).await {
                    load_players(&state, &mut players).await;
                }
            }
            "x" if state.is_admin => {
                if remove_player(&state, &rows).await {
                    load_players(&state, &mut players).await;
                }
            }
            "d" => {
                if delete_own_account(&state, &players, store).await {
                    return Ok(Screen::Login);
                }
            }
            "r" => load_players(&state, &mut players).await,
            "l" => {
                session::logout(store);
                return Ok(Screen::Login);
            }
            "q" => return Ok(Screen::Exit),
            _ => {}
        }
    }
}

/// Fetches `/players`. On success the cache is replaced wholesale; on
/// failure the previous list stays as is (empty on the very first load) and
/// there is no automatic retry.
async fn load_players(state: &SessionState, players: &mut Vec<Player>) {
    match api::players::fetch(state.server_url()).await {
        Ok(list) => *players = list,
        Err(err) => ui::alert_api_error(&err, "Erro ao carregar jogadores."),
    }
}

fn print_header(state: &SessionState) {
    println!();
    println!("{}", "═══ VOTAÇÃO DE JOGADORES ═══".bright_cyan().bold());
    println!("{}", format!("Logado como: {}", state.current_user).dimmed());
    println!();
}

fn print_actions(state: &SessionState) {
    println!();
    let mut actions = vec![
        "v: votar",
        "d: excluir minha conta",
        "r: atualizar",
        "l: sair",
        "q: fechar",
    ];
    if state.is_admin {
        actions.insert(1, "a: alterar admin");
        actions.insert(2, "x: excluir jogador");
    }
    println!("{}", actions.join(" | ").dimmed());
}

/// Reads a 1-based row number as printed in the table.
fn pick_row<'a>(rows: &'a [PlayerRow], label: &str) -> Option<&'a PlayerRow> {
    if rows.is_empty() {
        ui::alert("Nenhum jogador cadastrado.");
        return None;
    }

    let input = ui::prompt(label)?;
    match input.trim().parse::<usize>() {
        Ok(number) if number >= 1 && number <= rows.len() => Some(&rows[number - 1]),
        _ => {
            ui::alert("Número inválido.");
            None
        }
    }
}

/// Client-side score validation: must parse as a number and land inside the
/// inclusive 0 to 10 range, otherwise no request goes out.
fn parse_score(input: &str) -> Option<f64> {
    let score: f64 = input.trim().parse().ok()?;
    (0.0..=10.0).contains(&score).then_some(score)
}

/// Vote action: pick a row, read a score, validate it locally, submit.
/// Voting for oneself is allowed. Returns whether the list should be
/// re-fetched.
async fn vote_for_player(state: &SessionState, rows: &[PlayerRow]) -> bool {
    let Some(row) = pick_row(rows, "Número do jogador: ") else {
        return false;
    };

    let Some(input) = ui::prompt(&format!("Nota para {} (0 a 10): ", row.name)) else {
        return false;
    };
    let Some(score) = parse_score(&input) else {
        ui::alert("Digite uma nota entre 0 e 10.");
        return false;
    };

    let request = VoteRequest {
        player_id: row.id,
        score,
        voter: state.current_user.clone(),
    };

    match api::players::vote(state.server_url(), &request).await {
        Ok(()) => true,
        Err(err) => {
            ui::alert_api_error(&err, "Erro ao votar.");
            false
        }
    }
}

/// Admin action: flips another account's admin flag, with a confirmation
/// naming the direction. The server re-checks the requester's authority.
async fn toggle_admin(state: &SessionState, rows: &[PlayerRow]) -> bool {
    if !state.is_admin {
        return false;
    }

    let Some(row) = pick_row(rows, "Número do jogador: ") else {
        return false;
    };
    let AdminCell::ToggleButton { make_admin } = row.admin else {
        ui::alert("Ação não disponível para este jogador.");
        return false;
    };

    let message = if make_admin {
        format!("Tornar \"{}\" administrador?", row.name)
    } else {
        format!("Remover privilégios de administrador de \"{}\"?", row.name)
    };
    if !ui::confirm(&message) {
        return false;
    }

    let request = SetAdminRequest {
        requester: state.current_user.clone(),
        target: row.name.clone(),
        is_admin: make_admin,
    };

    match api::players::set_admin(state.server_url(), &request).await {
        Ok(()) => true,
        Err(err) => {
            ui::alert_api_error(&err, "Erro ao alterar privilégios.");
            false
        }
    }
}

/// Admin action: deletes another player's account, and with it every vote
/// they cast or received.
async fn remove_player(state: &SessionState, rows: &[PlayerRow]) -> bool {
    if !state.is_admin {
        return false;
    }

    let Some(row) = pick_row(rows, "Número do jogador: ") else {
        return false;
    };
    if row.remove != RemoveCell::Button {
        ui::alert("Ação não disponível para este jogador.");
        return false;
    }

    let message = format!(
        "Excluir a conta do jogador \"{}\" e todos os votos dele?",
        row.name
    );
    if !ui::confirm(&message) {
        return false;
    }

    match api::players::delete(state.server_url(), row.id, &state.current_user).await {
        Ok(()) => true,
        Err(err) => {
            ui::alert_api_error(&err, "Erro ao excluir jogador.");
            false
        }
    }
}

/// Deletes the viewer's own account. Success clears the session and leaves
/// the page; any failure keeps the session and the screen as they were.
async fn delete_own_account(
    state: &SessionState,
    players: &[Player],
    store: &mut dyn SessionStore,
) -> bool {
    let Some(own) = players
        .iter()
        .find(|player| player.name == state.current_user)
    else {
        ui::alert("Erro: seu jogador não foi encontrado na lista.");
        return false;
    };

    if !ui::confirm("Tem certeza que deseja excluir SUA conta? Todos os seus votos serão apagados.")
    {
        return false;
    }

    let result = api::players::delete(state.server_url(), own.id, &state.current_user).await;
    let logged_out = after_own_delete(store, &result);
    match &result {
        Ok(()) => ui::alert("Sua conta foi removida."),
        Err(err) => ui::alert_api_error(err, "Erro ao excluir conta."),
    }
    logged_out
}

/// The session rule for own-account deletion, separated from the prompts:
/// only a successful deletion may clear the stored session.
fn after_own_delete(store: &mut dyn SessionStore, result: &Result<(), api::ApiError>) -> bool {
    if result.is_ok() {
        session::logout(store);
        true
    } else {
        false
    }
}
