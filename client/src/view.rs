use colored::*;
use votacao_common::Player;

use crate::state::SessionState;

/// Admin column content for one row.
#[derive(Clone, Debug, PartialEq)]
pub enum AdminCell {
    /// The admin viewer's own row carries a static badge, never a control.
    OwnBadge,
    /// Control shown to admins on other rows. `make_admin` is what using it
    /// would request, the opposite of the target's current state.
    ToggleButton { make_admin: bool },
    /// Plain label shown to non-admin viewers.
    Badge { is_admin: bool },
}

impl AdminCell {
    pub fn label(&self) -> &'static str {
        match self {
            AdminCell::OwnBadge => "Admin (você)",
            AdminCell::ToggleButton { make_admin: true } => "Tornar ADM",
            AdminCell::ToggleButton { make_admin: false } => "Remover ADM",
            AdminCell::Badge { is_admin: true } => "Admin",
            AdminCell::Badge { is_admin: false } => "-",
        }
    }
}

/// Remove column content: the delete control for admins on other rows, a
/// dash for everyone else.
#[derive(Clone, Debug, PartialEq)]
pub enum RemoveCell {
    Button,
    Dash,
}

/// One fully derived table row: everything the printer needs, plus which
/// controls the row exposes to the action handlers.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerRow {
    pub id: i64,
    pub name: String,
    pub average: String,
    pub votes: i64,
    pub admin: AdminCell,
    pub remove: RemoveCell,
}

/// Derives the visible table from the cached player list and the viewer's
/// session. Pure: the same inputs always produce the same rows, in server
/// order.
pub fn build_rows(players: &[Player], viewer: &SessionState) -> Vec<PlayerRow> {
    players
        .iter()
        .map(|player| {
            let own_row = player.name == viewer.current_user;

            let admin = if viewer.is_admin {
                if own_row {
                    AdminCell::OwnBadge
                } else {
                    AdminCell::ToggleButton {
                        make_admin: !player.is_admin,
                    }
                }
            } else {
                AdminCell::Badge {
                    is_admin: player.is_admin,
                }
            };

            let remove = if viewer.is_admin && !own_row {
                RemoveCell::Button
            } else {
                RemoveCell::Dash
            };

            PlayerRow {
                id: player.id,
                name: player.name.clone(),
                average: average_display(player),
                votes: player.votes,
                admin,
                remove,
            }
        })
        .collect()
}

/// Two decimals when the server sent an average for a voted-on player, the
/// placeholder otherwise. The client never computes averages itself.
fn average_display(player: &Player) -> String {
    match player.avg_score {
        Some(avg) if player.votes > 0 => format!("{avg:.2}"),
        _ => "-".to_string(),
    }
}

/// Prints the derived rows, numbered so actions can refer to them. Kept
/// separate from `build_rows` so the table stays a pure function of list
/// plus viewer.
pub fn print_table(rows: &[PlayerRow]) {
    println!(
        "{:>3}  {:<20} {:>8} {:>6}  {:<14} {:<8}",
        "#".dimmed(),
        "Jogador".dimmed(),
        "Média".dimmed(),
        "Votos".dimmed(),
        "Admin".dimmed(),
        "Remover".dimmed()
    );
    println!("{}", "─".repeat(68).dimmed());

    if rows.is_empty() {
        println!("{}", "Nenhum jogador cadastrado.".dimmed());
        return;
    }

    for (index, row) in rows.iter().enumerate() {
        let admin = match row.admin {
            AdminCell::ToggleButton { .. } => format!("[{}]", row.admin.label()),
            _ => row.admin.label().to_string(),
        };
        let remove = match row.remove {
            RemoveCell::Button => "[X]",
            RemoveCell::Dash => "-",
        };

        println!(
            "{:>3}  {:<20} {:>8} {:>6}  {:<14} {:<8}",
            index + 1,
            row.name,
            row.average,
            row.votes,
            admin,
            remove
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn player(id: i64, name: &str, is_admin: bool, votes: i64, avg_score: Option<f64>) -> Player {
        Player {
            id,
            name: name.to_string(),
            is_admin,
            votes,
            avg_score,
        }
    }

    fn viewer(name: &str, is_admin: bool) -> SessionState {
        SessionState::new(Config::default(), name.to_string(), is_admin)
    }

    fn roster() -> Vec<Player> {
        vec![
            player(1, "Ana", true, 4, Some(7.25)),
            player(2, "Bob", false, 0, None),
            player(3, "Cid", true, 2, Some(9.0)),
        ]
    }

    #[test]
    fn admin_viewer_gets_controls_everywhere_but_their_own_row() {
        let rows = build_rows(&roster(), &viewer("Ana", true));

        assert_eq!(rows[0].admin, AdminCell::OwnBadge);
        assert_eq!(rows[0].remove, RemoveCell::Dash);

        assert_eq!(rows[1].admin, AdminCell::ToggleButton { make_admin: true });
        assert_eq!(rows[1].remove, RemoveCell::Button);

        assert_eq!(rows[2].admin, AdminCell::ToggleButton { make_admin: false });
        assert_eq!(rows[2].remove, RemoveCell::Button);
    }

    #[test]
    fn non_admin_viewer_sees_labels_only() {
        let rows = build_rows(&roster(), &viewer("Bob", false));

        for row in &rows {
            assert!(matches!(row.admin, AdminCell::Badge { .. }));
            assert_eq!(row.remove, RemoveCell::Dash);
        }
        assert_eq!(rows[0].admin.label(), "Admin");
        assert_eq!(rows[1].admin.label(), "-");
    }

    #[test]
    fn toggle_labels_follow_the_target_state() {
        let rows = build_rows(&roster(), &viewer("Ana", true));

        assert_eq!(rows[0].admin.label(), "Admin (você)");
        assert_eq!(rows[1].admin.label(), "Tornar ADM");
        assert_eq!(rows[2].admin.label(), "Remover ADM");
    }

    #[test]
    fn averages_format_to_two_decimals() {
        let players = vec![
            player(1, "Ana", false, 4, Some(7.5)),
            player(2, "Bob", false, 1, Some(10.0)),
        ];
        let rows = build_rows(&players, &viewer("Ana", false));

        assert_eq!(rows[0].average, "7.50");
        assert_eq!(rows[1].average, "10.00");
    }

    #[test]
    fn unvoted_players_show_the_placeholder() {
        let players = vec![
            player(1, "Ana", false, 0, None),
            // Inconsistent combinations from the server still render safely.
            player(2, "Bob", false, 0, Some(5.0)),
            player(3, "Cid", false, 3, None),
        ];
        let rows = build_rows(&players, &viewer("Dan", false));

        assert_eq!(rows[0].average, "-");
        assert_eq!(rows[0].votes, 0);
        assert_eq!(rows[1].average, "-");
        assert_eq!(rows[2].average, "-");
    }

    #[test]
    fn rows_keep_server_order_and_rebuild_identically() {
        let players = roster();
        let state = viewer("Ana", true);

        let first = build_rows(&players, &state);
        let second = build_rows(&players, &state);

        assert_eq!(first, second);
        let names: Vec<&str> = first.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bob", "Cid"]);
    }
}
