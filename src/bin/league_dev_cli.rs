// src/bin/league_dev_cli.rs

use league_engine::api::{
    Command, CommandResponse, LeagueCommand, MatchCommand, MatchViewDto, Query, QueryResponse,
    StandingRowDto, TeamCommand,
};
use league_engine::domain::league::{LeagueConfig, ResultPolicy};
use league_engine::domain::team::TeamDraft;
use league_engine::domain::{LeagueId, UserId};
use league_engine::infra::InMemoryLeagueStore;
use league_engine::league::LeagueService;

const OWNER: UserId = 1;

fn main() {
    println!("league_dev_cli: стартуем dev-CLI лиги…");

    let runtime = match tokio::runtime::Builder::new_current_thread().build() {
        Ok(rt) => rt,
        Err(e) => {
            println!("[CLI] не удалось поднять tokio runtime: {e}");
            return;
        }
    };

    if let Err(e) = runtime.block_on(run()) {
        println!("[CLI] ОШИБКА: {e}");
    }

    println!("[CLI] Завершение работы dev-CLI.");
}

async fn run() -> Result<(), league_engine::api::ApiError> {
    let mut service = LeagueService::new(InMemoryLeagueStore::new());

    // 1. Лига: капитаны подтверждают счёт.
    let mut config = LeagueConfig::public("Sunday 5-a-side");
    config.result_policy = ResultPolicy::CaptainConfirmation;

    let league_id = match service
        .execute(OWNER, Command::League(LeagueCommand::Create { config, password: None }))
        .await?
    {
        CommandResponse::LeagueState(dto) => dto.league_id,
        other => {
            println!("[CLI] BUG: неожиданный ответ на создание лиги: {other:?}");
            return Ok(());
        }
    };
    println!("[CLI] Лига создана: id={league_id}");

    // 2. Пять команд, у каждой свой капитан (нечётное число -> bye).
    let names = ["Red Lions", "Blue Sharks", "Green Wolves", "Yellow Bees", "Black Cats"];
    let mut captains = Vec::new();

    for (idx, name) in names.iter().enumerate() {
        let draft = TeamDraft {
            name: name.to_string(),
            color: format!("#{:06x}", idx * 0x30_3030),
            max_players: None,
        };

        let team_id = match service
            .execute(OWNER, Command::Team(TeamCommand::Create { league_id, draft }))
            .await?
        {
            CommandResponse::TeamState(dto) => dto.team_id,
            other => {
                println!("[CLI] BUG: неожиданный ответ на создание команды: {other:?}");
                return Ok(());
            }
        };

        let captain: UserId = 100 + idx as UserId;
        service
            .execute(captain, Command::League(LeagueCommand::Join { league_id }))
            .await?;
        service
            .execute(captain, Command::Team(TeamCommand::Join { league_id, team_id }))
            .await?;
        captains.push((team_id, captain));
    }

    // 3. Расписание.
    let fixtures = match service
        .execute(
            OWNER,
            Command::Match(MatchCommand::GenerateSchedule { league_id, force: false }),
        )
        .await?
    {
        CommandResponse::ScheduleGenerated(list) => list,
        other => {
            println!("[CLI] BUG: неожиданный ответ на генерацию: {other:?}");
            return Ok(());
        }
    };
    print_fixtures(&fixtures);

    // 4. Первый тур: капитаны сходятся на счёте. Второй тур: владелец force.
    let captain_of = |team_id| {
        captains
            .iter()
            .find(|(id, _)| *id == team_id)
            .map(|(_, c)| *c)
            .unwrap_or(OWNER)
    };

    for (n, f) in fixtures.iter().filter(|f| f.round <= 2).enumerate() {
        let (home_score, away_score) = ((n as u32 * 3) % 4, (n as u32 + 1) % 3);

        if f.round == 1 {
            for captain in [captain_of(f.home_team_id), captain_of(f.away_team_id)] {
                service
                    .execute(
                        captain,
                        Command::Match(MatchCommand::ProposeScore {
                            match_id: f.match_id,
                            home_score,
                            away_score,
                        }),
                    )
                    .await?;
            }
        } else {
            service
                .execute(
                    OWNER,
                    Command::Match(MatchCommand::ForceScore {
                        league_id,
                        match_id: f.match_id,
                        home_score,
                        away_score,
                    }),
                )
                .await?;
        }
    }

    // 5. Матчи и таблица.
    if let QueryResponse::Matches(list) = service.query(Query::ListMatches { league_id }).await? {
        print_fixtures(&list);
    }
    print_standings(&service, league_id).await
}

fn print_fixtures(fixtures: &[MatchViewDto]) {
    println!();
    println!("================ FIXTURES =================");
    let mut current_round = 0;
    for f in fixtures {
        if f.round != current_round {
            current_round = f.round;
            println!("--- Round {current_round} ---");
        }
        let score = match (f.home_score, f.away_score) {
            (Some(h), Some(a)) => format!("{h}:{a}"),
            _ => "-:-".to_string(),
        };
        println!(
            "  #{:<3} {:>14} {:^5} {:<14} [{:?}]",
            f.match_id, f.home_team_name, score, f.away_team_name, f.status
        );
    }
}

async fn print_standings(
    service: &LeagueService<InMemoryLeagueStore>,
    league_id: LeagueId,
) -> Result<(), league_engine::api::ApiError> {
    let rows: Vec<StandingRowDto> = match service.query(Query::GetStandings { league_id }).await? {
        QueryResponse::Standings(rows) => rows,
        other => {
            println!("[CLI] BUG: неожиданный ответ на таблицу: {other:?}");
            return Ok(());
        }
    };

    println!();
    println!("================ STANDINGS =================");
    println!(" #  TEAM            P  W  D  L  GF GA  GD PTS");
    for r in rows {
        println!(
            "{:>2}  {:<14} {:>2} {:>2} {:>2} {:>2} {:>3} {:>2} {:>3} {:>3}",
            r.position,
            r.name,
            r.played,
            r.wins,
            r.draws,
            r.losses,
            r.goals_for,
            r.goals_against,
            r.goal_difference,
            r.points
        );
    }
    Ok(())
}
