//! NFL data handlers.
//!
//! `nfl_games` and `team_schedule` open a pagination session on their result
//! and render its first game with navigation controls. Later pages are served
//! by the commander from control activations.

use log::debug;

use crate::{
    commands::{
        CommandContext, CommandResult, NflCalendar,
        embed_response::{
            format_game_page, format_gateway_error, format_nfl_weeks, format_no_games,
            format_no_games_in_week, format_no_schedule,
        },
    },
    gateway::Gateway,
    pagination::{PageView, SessionStore},
};

/// Lists the NFL weeks known to the API.
pub async fn handle_nfl_weeks<G: Gateway>(
    gateway: &G,
    calendar: &NflCalendar,
    context: &CommandContext,
) -> CommandResult {
    debug!("handling nfl_weeks command");

    let embed = match gateway.get_nfl_weeks().await {
        Ok(weeks) => format_nfl_weeks(&weeks, calendar.current_week(context.now), context),
        Err(error) => format_gateway_error(
            "Failed to Retrieve NFL Weeks",
            "An error occurred while retrieving NFL weeks. Please try again.",
            &error,
        ),
    };

    CommandResult::embed(embed)
}

/// Opens a browsing session on the games of `week`.
///
/// The API may return games outside the requested week, so only games whose
/// kick-off falls in it are kept.
pub async fn handle_nfl_games<G: Gateway>(
    gateway: &G,
    sessions: &SessionStore,
    calendar: &NflCalendar,
    week: i64,
    context: &CommandContext,
) -> CommandResult {
    debug!("handling nfl_games command for week {}", week);

    let games = match gateway.get_nfl_games_by_week(week).await {
        Ok(games) => games,
        Err(error) => {
            return CommandResult::embed(format_gateway_error(
                "Failed to Retrieve NFL Games",
                "An error occurred while retrieving NFL games. Please try again.",
                &error,
            ));
        }
    };

    if games.is_empty() {
        return CommandResult::embed(format_no_games(week, context));
    }

    let week_games: Vec<_> = games
        .into_iter()
        .filter(|game| calendar.week_of(game.commence_time) == week)
        .collect();

    let embed = match sessions.open(week_games, PageView::Week(week)) {
        Some(page) => format_game_page(&page, calendar),
        None => format_no_games_in_week(week),
    };

    CommandResult::embed(embed)
}

/// Opens a browsing session on the schedule of `team`.
pub async fn handle_team_schedule<G: Gateway>(
    gateway: &G,
    sessions: &SessionStore,
    calendar: &NflCalendar,
    team: &str,
    context: &CommandContext,
) -> CommandResult {
    debug!("handling team_schedule command for {}", team);

    let embed = match gateway.get_team_schedule(team).await {
        Ok(schedule) => match sessions.open(schedule, PageView::Team(team.to_string())) {
            Some(page) => format_game_page(&page, calendar),
            None => format_no_schedule(team, context),
        },
        Err(error) => format_gateway_error(
            "Failed to Retrieve Team Schedule",
            &format!(
                "An error occurred while retrieving the schedule for {}. Please try again.",
                team
            ),
            &error,
        ),
    };

    CommandResult::embed(embed)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        commands::{actions::test_support::create_test_context, embed::Category},
        gateway::{Game, GatewayError, MockGateway},
        pagination::{ControlId, Direction},
    };

    const NOW: &str = "2024-09-10T12:00:00Z";

    fn create_calendar() -> NflCalendar {
        NflCalendar::new(NaiveDate::from_ymd_opt(2024, 9, 5).unwrap(), 18)
    }

    fn create_store() -> SessionStore {
        SessionStore::new(Duration::from_secs(60), 10)
    }

    fn create_game(id: i64, commence_time: &str) -> Game {
        Game {
            id,
            home_team: format!("Home {}", id),
            away_team: format!("Away {}", id),
            commence_time: Some(commence_time.parse().unwrap()),
            home_odds: 1.5,
            away_odds: 2.5,
        }
    }

    #[tokio::test]
    async fn test_nfl_weeks() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_get_nfl_weeks()
            .times(1)
            .returning(|| Ok((1..=18).collect()));
        let context = create_test_context(NOW);

        let result = handle_nfl_weeks(&gateway, &create_calendar(), &context).await;

        let embed = result.as_embed().unwrap();
        assert_eq!(embed.title, "Available NFL Weeks");
        assert_eq!(embed.field_value("Weeks"), Some("Weeks 1-18"));
        assert_eq!(embed.field_value("Current Week"), Some("Current Week: 1"));
    }

    #[tokio::test]
    async fn test_nfl_games_filters_week_and_opens_session() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_get_nfl_games_by_week()
            .with(eq(1))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    create_game(1, "2024-09-06T00:20:00Z"),
                    create_game(2, "2024-09-08T17:00:00Z"),
                    // Week 2
                    create_game(3, "2024-09-15T17:00:00Z"),
                ])
            });
        let store = create_store();
        let context = create_test_context(NOW);

        let result = handle_nfl_games(&gateway, &store, &create_calendar(), 1, &context).await;

        let embed = result.as_embed().unwrap();
        assert_eq!(embed.title, "Week 1 - Game 1 of 2");
        assert_eq!(embed.field_value("Game ID"), Some("1"));
        assert_eq!(embed.controls.len(), 2);
        assert!(embed.controls[0].disabled);
        assert!(!embed.controls[1].disabled);

        let control = ControlId::parse(&embed.controls[1].id).unwrap();
        assert_eq!(control.direction, Direction::Next);
        let page = store.advance(&control.token, Direction::Next).unwrap();
        assert_eq!(page.game.id, 2);
    }

    #[tokio::test]
    async fn test_nfl_games_empty() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_get_nfl_games_by_week()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let context = create_test_context(NOW);

        let result =
            handle_nfl_games(&gateway, &create_store(), &create_calendar(), 3, &context).await;

        let embed = result.as_embed().unwrap();
        assert_eq!(embed.title, "No NFL Games Available");
        assert_eq!(embed.category, Category::Warning);
    }

    #[tokio::test]
    async fn test_nfl_games_none_in_week() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_get_nfl_games_by_week()
            .times(1)
            .returning(|_| Ok(vec![create_game(3, "2024-09-15T17:00:00Z")]));
        let context = create_test_context(NOW);

        let result =
            handle_nfl_games(&gateway, &create_store(), &create_calendar(), 1, &context).await;

        let embed = result.as_embed().unwrap();
        assert_eq!(embed.title, "Error: No Games Found");
        assert_eq!(embed.fields[0].value, "No games found for Week 1.");
    }

    #[tokio::test]
    async fn test_team_schedule() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_get_team_schedule()
            .with(eq("San Francisco 49ers"))
            .times(1)
            .returning(|_| Ok(vec![create_game(7, "2024-09-10T00:15:00Z")]));
        let context = create_test_context(NOW);

        let result = handle_team_schedule(
            &gateway,
            &create_store(),
            &create_calendar(),
            "San Francisco 49ers",
            &context,
        )
        .await;

        let embed = result.as_embed().unwrap();
        assert_eq!(embed.title, "San Francisco 49ers Schedule - Game 1 of 1");
        assert_eq!(embed.field_value("Week"), Some("1"));
        assert!(embed.controls.iter().all(|control| control.disabled));
    }

    #[tokio::test]
    async fn test_team_schedule_empty_and_failure() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_get_team_schedule()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let context = create_test_context(NOW);

        let result =
            handle_team_schedule(&gateway, &create_store(), &create_calendar(), "Jets", &context)
                .await;
        assert_eq!(result.as_embed().unwrap().title, "No Schedule Available");

        let mut gateway = MockGateway::new();
        gateway
            .expect_get_team_schedule()
            .times(1)
            .returning(|_| Err(GatewayError::Unreachable("timeout".to_string())));

        let result =
            handle_team_schedule(&gateway, &create_store(), &create_calendar(), "Jets", &context)
                .await;
        let embed = result.as_embed().unwrap();
        assert_eq!(embed.title, "Error: Failed to Retrieve Team Schedule");
        assert_eq!(
            embed.fields[0].value,
            "An error occurred while retrieving the schedule for Jets. Please try again."
        );
    }
}
