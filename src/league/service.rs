// src/league/service.rs

use log::{debug, info, warn};

use crate::api::errors::ApiError;
use crate::domain::errors::LeagueError;
use crate::domain::fixture::{Match, MatchScore, Side};
use crate::domain::league::{League, LeagueConfig, Visibility};
use crate::domain::team::{Team, TeamDraft};
use crate::domain::{LeagueId, MatchId, Round, TeamId, UserId};
use crate::engine::schedule::generate_round_robin;
use crate::engine::scoring::{force_result, submit_proposal};
use crate::engine::standings::{compute_standings, StandingRow};
use crate::engine::RandomSource;
use crate::infra::ids::IdKind;
use crate::infra::password::{hash_password, verify_password};
use crate::infra::rng::DeterministicRng;
use crate::infra::store::{LeagueStore, Precondition, StoreError, WriteOp};
use crate::league::config::{GenerateOptions, ServiceConfig};

/// Перевести ошибку хранилища в ошибку API, с контекстом (лига + операция).
fn store_error(league_id: Option<LeagueId>, operation: &str, err: StoreError) -> ApiError {
    match err {
        StoreError::Unavailable(reason) => ApiError::StoreUnavailable {
            league_id,
            operation: operation.to_string(),
            reason,
        },
        StoreError::PreconditionFailed => ApiError::ConcurrentModification {
            league_id,
            operation: operation.to_string(),
        },
    }
}

fn require_owner(league: &League, user_id: UserId, action: &str) -> Result<(), ApiError> {
    if league.is_owner(user_id) {
        Ok(())
    } else {
        Err(ApiError::NotAuthorized {
            user_id,
            action: action.to_string(),
        })
    }
}

fn find_team(teams: &[Team], team_id: TeamId) -> Result<&Team, ApiError> {
    teams
        .iter()
        .find(|t| t.id == team_id)
        .ok_or(ApiError::TeamNotFound(team_id))
}

/// Сервисный слой лиги: связывает чистый движок с внешним хранилищем.
///
/// Хранилище передаётся снаружи (DI), движок о нём не знает.
/// Каждая операция возвращает явный `Result` и ничего не ретраит
/// при недоступности хранилища. Повторяются только проигранные
/// оптимистичные транзакции (до `ServiceConfig::transaction_retries` раз).
pub struct LeagueService<S: LeagueStore> {
    store: S,
    config: ServiceConfig,
}

impl<S: LeagueStore> LeagueService<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    pub fn with_config(store: S, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Стоит ли повторить транзакцию после этой ошибки.
    fn retry_after(&self, err: &StoreError, attempt: &mut u32, operation: &str) -> bool {
        if *err == StoreError::PreconditionFailed && *attempt < self.config.transaction_retries {
            *attempt += 1;
            warn!("{operation}: lost optimistic race, retry {attempt}");
            true
        } else {
            false
        }
    }

    // ---------------------------------------------------------------
    // Чтение
    // ---------------------------------------------------------------

    async fn load_league(&self, league_id: LeagueId, operation: &str) -> Result<League, ApiError> {
        self.store
            .get_league(league_id)
            .await
            .map_err(|e| store_error(Some(league_id), operation, e))?
            .ok_or(ApiError::LeagueNotFound(league_id))
    }

    async fn load_teams(&self, league_id: LeagueId, operation: &str) -> Result<Vec<Team>, ApiError> {
        self.store
            .list_teams(league_id)
            .await
            .map_err(|e| store_error(Some(league_id), operation, e))
    }

    async fn load_matches(
        &self,
        league_id: LeagueId,
        operation: &str,
    ) -> Result<Vec<Match>, ApiError> {
        self.store
            .list_matches(league_id)
            .await
            .map_err(|e| store_error(Some(league_id), operation, e))
    }

    async fn load_match(&self, match_id: MatchId, operation: &str) -> Result<Match, ApiError> {
        self.store
            .get_match(match_id)
            .await
            .map_err(|e| store_error(None, operation, e))?
            .ok_or(ApiError::MatchNotFound(match_id))
    }

    async fn allocate(
        &mut self,
        kind: IdKind,
        league_id: Option<LeagueId>,
        operation: &str,
    ) -> Result<u64, ApiError> {
        self.store
            .allocate_id(kind)
            .await
            .map_err(|e| store_error(league_id, operation, e))
    }

    pub async fn get_league(&self, league_id: LeagueId) -> Result<League, ApiError> {
        self.load_league(league_id, "get_league").await
    }

    pub async fn list_leagues(&self) -> Result<Vec<League>, ApiError> {
        self.store
            .list_leagues()
            .await
            .map_err(|e| store_error(None, "list_leagues", e))
    }

    pub async fn list_teams(&self, league_id: LeagueId) -> Result<Vec<Team>, ApiError> {
        self.load_league(league_id, "list_teams").await?;
        self.load_teams(league_id, "list_teams").await
    }

    pub async fn list_matches(&self, league_id: LeagueId) -> Result<Vec<Match>, ApiError> {
        self.load_league(league_id, "list_matches").await?;
        self.load_matches(league_id, "list_matches").await
    }

    /// Турнирная таблица. Только чтение, каждый раз пересчёт с нуля.
    pub async fn get_standings(&self, league_id: LeagueId) -> Result<Vec<StandingRow>, ApiError> {
        Ok(self.standings_with_teams(league_id).await?.0)
    }

    /// Таблица вместе с тем снимком команд, по которому она посчитана.
    pub(crate) async fn standings_with_teams(
        &self,
        league_id: LeagueId,
    ) -> Result<(Vec<StandingRow>, Vec<Team>), ApiError> {
        self.load_league(league_id, "get_standings").await?;
        let teams = self.load_teams(league_id, "get_standings").await?;
        let matches = self.load_matches(league_id, "get_standings").await?;

        let rows = compute_standings(&teams, &matches);
        Ok((rows, teams))
    }

    /// Пускать ли пользователя в лигу.
    ///
    /// Публичная лига и владелец – всегда. Приватная без пароля – всегда.
    /// Иначе пароль сверяется с сохранённым хэшем.
    pub async fn check_access(
        &self,
        league_id: LeagueId,
        user_id: UserId,
        password: Option<&str>,
    ) -> Result<bool, ApiError> {
        let league = self.load_league(league_id, "check_access").await?;

        if !league.is_private() || league.is_owner(user_id) {
            return Ok(true);
        }

        Ok(match (&league.config.password_hash, password) {
            (None, _) => true,
            (Some(hash), Some(password)) => verify_password(league.id, password, hash),
            (Some(_), None) => false,
        })
    }

    // ---------------------------------------------------------------
    // Лига
    // ---------------------------------------------------------------

    /// Создать лигу. Автор – владелец и первый участник.
    pub async fn create_league(
        &mut self,
        owner_id: UserId,
        mut config: LeagueConfig,
        password: Option<&str>,
    ) -> Result<League, ApiError> {
        config.validate()?;

        if password.is_some() && config.visibility != Visibility::Private {
            return Err(LeagueError::InvalidConfig(
                "LeagueConfig: password requires a private league".into(),
            )
            .into());
        }

        let league_id = self.allocate(IdKind::League, None, "create_league").await?;

        if let Some(password) = password {
            config.password_hash = Some(hash_password(league_id, password));
        }

        let league = League::new(league_id, owner_id, config)?;

        self.store
            .atomic_write_batch(vec![WriteOp::PutLeague(league.clone())])
            .await
            .map_err(|e| store_error(Some(league_id), "create_league", e))?;

        info!("league {league_id} created by {owner_id}");
        Ok(league)
    }

    pub async fn join_league(&mut self, league_id: LeagueId, user_id: UserId) -> Result<League, ApiError> {
        self.update_participants(league_id, "join_league", |league| {
            league.join(user_id);
            Ok(())
        })
        .await
    }

    pub async fn leave_league(&mut self, league_id: LeagueId, user_id: UserId) -> Result<League, ApiError> {
        self.update_participants(league_id, "leave_league", |league| league.leave(user_id))
            .await
    }

    async fn update_participants(
        &mut self,
        league_id: LeagueId,
        operation: &str,
        change: impl Fn(&mut League) -> Result<(), LeagueError>,
    ) -> Result<League, ApiError> {
        let mut attempt = 0;
        loop {
            let snapshot = self.load_league(league_id, operation).await?;
            let mut league = snapshot.clone();
            change(&mut league)?;

            if league == snapshot {
                return Ok(league);
            }

            let written = self
                .store
                .atomic_read_then_write(
                    vec![Precondition::LeagueIs(snapshot)],
                    vec![WriteOp::PutLeague(league.clone())],
                )
                .await;

            match written {
                Ok(()) => return Ok(league),
                Err(e) if self.retry_after(&e, &mut attempt, operation) => continue,
                Err(e) => return Err(store_error(Some(league_id), operation, e)),
            }
        }
    }

    /// Удалить лигу вместе с командами и матчами – одним атомарным батчем.
    pub async fn delete_league(&mut self, league_id: LeagueId, actor: UserId) -> Result<(), ApiError> {
        const OP: &str = "delete_league";

        let league = self.load_league(league_id, OP).await?;
        require_owner(&league, actor, OP)?;

        let teams = self.load_teams(league_id, OP).await?;
        let matches = self.load_matches(league_id, OP).await?;

        let mut writes: Vec<WriteOp> = matches.iter().map(|m| WriteOp::DeleteMatch(m.id)).collect();
        writes.extend(teams.iter().map(|t| WriteOp::DeleteTeam(t.id)));
        writes.push(WriteOp::DeleteLeague(league_id));

        let preconditions = vec![
            Precondition::TeamsAre { league_id, teams: teams.clone() },
            Precondition::MatchIdsAre {
                league_id,
                ids: matches.iter().map(|m| m.id).collect(),
            },
        ];

        self.store
            .atomic_read_then_write(preconditions, writes)
            .await
            .map_err(|e| store_error(Some(league_id), OP, e))?;

        info!(
            "league {league_id} deleted ({} teams, {} matches)",
            teams.len(),
            matches.len()
        );
        Ok(())
    }

    /// Удалить все матчи лиги. Возвращает, сколько удалено.
    pub async fn reset_matches(&mut self, league_id: LeagueId, actor: UserId) -> Result<usize, ApiError> {
        const OP: &str = "reset_matches";

        let league = self.load_league(league_id, OP).await?;
        require_owner(&league, actor, OP)?;

        let matches = self.load_matches(league_id, OP).await?;
        let ids: Vec<MatchId> = matches.iter().map(|m| m.id).collect();

        self.store
            .atomic_read_then_write(
                vec![Precondition::MatchIdsAre { league_id, ids: ids.clone() }],
                ids.iter().map(|id| WriteOp::DeleteMatch(*id)).collect(),
            )
            .await
            .map_err(|e| store_error(Some(league_id), OP, e))?;

        info!("league {league_id}: {} matches removed", ids.len());
        Ok(ids.len())
    }

    /// Удалить все команды лиги. Их матчи уходят вместе с ними.
    pub async fn reset_teams(&mut self, league_id: LeagueId, actor: UserId) -> Result<usize, ApiError> {
        const OP: &str = "reset_teams";

        let league = self.load_league(league_id, OP).await?;
        require_owner(&league, actor, OP)?;

        let teams = self.load_teams(league_id, OP).await?;
        let matches = self.load_matches(league_id, OP).await?;

        let mut writes: Vec<WriteOp> = matches.iter().map(|m| WriteOp::DeleteMatch(m.id)).collect();
        writes.extend(teams.iter().map(|t| WriteOp::DeleteTeam(t.id)));

        let preconditions = vec![
            Precondition::TeamsAre { league_id, teams: teams.clone() },
            Precondition::MatchIdsAre {
                league_id,
                ids: matches.iter().map(|m| m.id).collect(),
            },
        ];

        self.store
            .atomic_read_then_write(preconditions, writes)
            .await
            .map_err(|e| store_error(Some(league_id), OP, e))?;

        info!("league {league_id}: {} teams removed", teams.len());
        Ok(teams.len())
    }

    // ---------------------------------------------------------------
    // Команды
    // ---------------------------------------------------------------

    /// Создать команду (только владелец лиги).
    pub async fn create_team(
        &mut self,
        league_id: LeagueId,
        actor: UserId,
        draft: TeamDraft,
    ) -> Result<Team, ApiError> {
        const OP: &str = "create_team";

        let league = self.load_league(league_id, OP).await?;
        require_owner(&league, actor, OP)?;

        let team_id = self.allocate(IdKind::Team, Some(league_id), OP).await?;
        let team = Team::new(team_id, league_id, draft, league.config.default_team_capacity)?;

        self.store
            .atomic_read_then_write(
                vec![Precondition::LeagueIs(league)],
                vec![WriteOp::PutTeam(team.clone())],
            )
            .await
            .map_err(|e| store_error(Some(league_id), OP, e))?;

        debug!("league {league_id}: team {team_id} '{}' created", team.name);
        Ok(team)
    }

    /// Изменить одну команду лиги транзакционно: снимок всех команд лиги
    /// проверяется в момент записи.
    async fn update_team(
        &mut self,
        league_id: LeagueId,
        team_id: TeamId,
        operation: &str,
        change: impl Fn(&[Team], &mut Team) -> Result<(), ApiError>,
    ) -> Result<Team, ApiError> {
        self.load_league(league_id, operation).await?;

        let mut attempt = 0;
        loop {
            let teams = self.load_teams(league_id, operation).await?;
            let mut team = find_team(&teams, team_id)?.clone();
            change(&teams, &mut team)?;

            if teams.iter().any(|t| *t == team) {
                return Ok(team);
            }

            let written = self
                .store
                .atomic_read_then_write(
                    vec![Precondition::TeamsAre { league_id, teams }],
                    vec![WriteOp::PutTeam(team.clone())],
                )
                .await;

            match written {
                Ok(()) => return Ok(team),
                Err(e) if self.retry_after(&e, &mut attempt, operation) => continue,
                Err(e) => return Err(store_error(Some(league_id), operation, e)),
            }
        }
    }

    /// Вступить в команду.
    ///
    /// Нельзя: в полную команду, и если уже состоишь в другой команде лиги.
    /// Первый вступивший – капитан.
    pub async fn join_team(
        &mut self,
        league_id: LeagueId,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<Team, ApiError> {
        self.update_team(league_id, team_id, "join_team", |teams, team| {
            if let Some(other) = teams
                .iter()
                .find(|t| t.id != team_id && t.is_member(user_id))
            {
                return Err(LeagueError::AlreadyInAnotherTeam {
                    user_id,
                    team_id: other.id,
                }
                .into());
            }
            team.add_member(user_id)?;
            Ok(())
        })
        .await
    }

    pub async fn leave_team(
        &mut self,
        league_id: LeagueId,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<Team, ApiError> {
        self.update_team(league_id, team_id, "leave_team", |_, team| {
            team.remove_member(user_id)?;
            Ok(())
        })
        .await
    }

    /// Исключить игрока (только владелец лиги).
    pub async fn kick_player(
        &mut self,
        league_id: LeagueId,
        team_id: TeamId,
        actor: UserId,
        user_id: UserId,
    ) -> Result<Team, ApiError> {
        let league = self.load_league(league_id, "kick_player").await?;
        require_owner(&league, actor, "kick_player")?;

        self.update_team(league_id, team_id, "kick_player", |_, team| {
            team.remove_member(user_id)?;
            Ok(())
        })
        .await
    }

    /// Назначить капитана (только владелец лиги). Капитан должен быть в составе.
    pub async fn set_captain(
        &mut self,
        league_id: LeagueId,
        team_id: TeamId,
        actor: UserId,
        user_id: UserId,
    ) -> Result<Team, ApiError> {
        let league = self.load_league(league_id, "set_captain").await?;
        require_owner(&league, actor, "set_captain")?;

        self.update_team(league_id, team_id, "set_captain", |_, team| {
            team.set_captain(user_id)?;
            Ok(())
        })
        .await
    }

    /// Удалить команду и все её матчи.
    pub async fn delete_team(
        &mut self,
        league_id: LeagueId,
        team_id: TeamId,
        actor: UserId,
    ) -> Result<(), ApiError> {
        const OP: &str = "delete_team";

        let league = self.load_league(league_id, OP).await?;
        require_owner(&league, actor, OP)?;

        let teams = self.load_teams(league_id, OP).await?;
        find_team(&teams, team_id)?;
        let matches = self.load_matches(league_id, OP).await?;

        let mut writes: Vec<WriteOp> = matches
            .iter()
            .filter(|m| m.involves(team_id))
            .map(|m| WriteOp::DeleteMatch(m.id))
            .collect();
        let removed_matches = writes.len();
        writes.push(WriteOp::DeleteTeam(team_id));

        let preconditions = vec![
            Precondition::TeamsAre { league_id, teams },
            Precondition::MatchIdsAre {
                league_id,
                ids: matches.iter().map(|m| m.id).collect(),
            },
        ];

        self.store
            .atomic_read_then_write(preconditions, writes)
            .await
            .map_err(|e| store_error(Some(league_id), OP, e))?;

        info!("league {league_id}: team {team_id} deleted with {removed_matches} matches");
        Ok(())
    }

    // ---------------------------------------------------------------
    // Расписание и результаты
    // ---------------------------------------------------------------

    /// Сгенерировать круговое расписание.
    ///
    /// Шаги:
    ///   1. только владелец;
    ///   2. минимум две команды;
    ///   3. если матчи уже есть и `force` не задан – `ScheduleAlreadyExists`;
    ///   4. генерация (порядок команд: по id, либо перемешан seed'ом лиги);
    ///   5. удаление старых матчей (при `force`) и вставка новых – ОДНОЙ
    ///      транзакцией, условие которой – "лига, её команды и набор матчей
    ///      не менялись с момента чтения". Промежуточного состояния
    ///      (пусто / смесь) никто не видит.
    pub async fn generate_schedule(
        &mut self,
        league_id: LeagueId,
        actor: UserId,
        options: GenerateOptions,
    ) -> Result<Vec<Match>, ApiError> {
        Ok(self.generate_with_teams(league_id, actor, options).await?.0)
    }

    /// То же, плюс снимок команд, под которым расписание записано.
    pub(crate) async fn generate_with_teams(
        &mut self,
        league_id: LeagueId,
        actor: UserId,
        options: GenerateOptions,
    ) -> Result<(Vec<Match>, Vec<Team>), ApiError> {
        const OP: &str = "generate_schedule";

        let league = self.load_league(league_id, OP).await?;
        require_owner(&league, actor, OP)?;

        let teams = self.load_teams(league_id, OP).await?;
        if teams.len() < 2 {
            return Err(ApiError::InsufficientTeams {
                league_id,
                found: teams.len(),
            });
        }

        let existing = self.load_matches(league_id, OP).await?;
        if !existing.is_empty() && !options.force {
            return Err(ApiError::ScheduleAlreadyExists {
                league_id,
                existing: existing.len(),
            });
        }

        let mut team_ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
        team_ids.sort_unstable();
        if let Some(seed) = league.config.schedule.shuffle_seed {
            DeterministicRng::from_seed(seed).shuffle(&mut team_ids);
        }

        let schedule = generate_round_robin(&team_ids, league.config.schedule.double_round_robin);

        let mut fixtures = Vec::with_capacity(schedule.fixture_count());
        for f in schedule.fixtures() {
            let match_id = self.allocate(IdKind::Match, Some(league_id), OP).await?;
            fixtures.push(Match::scheduled(match_id, league_id, f.round, f.home, f.away));
        }

        let existing_ids: Vec<MatchId> = existing.iter().map(|m| m.id).collect();
        let mut writes: Vec<WriteOp> = existing_ids.iter().map(|id| WriteOp::DeleteMatch(*id)).collect();
        writes.extend(fixtures.iter().cloned().map(WriteOp::PutMatch));

        let preconditions = vec![
            Precondition::LeagueIs(league),
            Precondition::TeamsAre { league_id, teams: teams.clone() },
            Precondition::MatchIdsAre {
                league_id,
                ids: existing_ids,
            },
        ];

        self.store
            .atomic_read_then_write(preconditions, writes)
            .await
            .map_err(|e| store_error(Some(league_id), OP, e))?;

        if !existing.is_empty() {
            warn!(
                "league {league_id}: schedule regenerated, {} old matches discarded",
                existing.len()
            );
        }
        info!(
            "league {league_id}: schedule generated, {} rounds, {} matches",
            schedule.round_count(),
            fixtures.len()
        );

        Ok((fixtures, teams))
    }

    /// Создать матч вручную (только владелец лиги).
    pub async fn create_match(
        &mut self,
        league_id: LeagueId,
        actor: UserId,
        home_team_id: TeamId,
        away_team_id: TeamId,
        round: Round,
        date: Option<String>,
    ) -> Result<Match, ApiError> {
        let (m, _) = self
            .create_match_with_teams(league_id, actor, home_team_id, away_team_id, round, date)
            .await?;
        Ok(m)
    }

    pub(crate) async fn create_match_with_teams(
        &mut self,
        league_id: LeagueId,
        actor: UserId,
        home_team_id: TeamId,
        away_team_id: TeamId,
        round: Round,
        date: Option<String>,
    ) -> Result<(Match, Vec<Team>), ApiError> {
        const OP: &str = "create_match";

        let league = self.load_league(league_id, OP).await?;
        require_owner(&league, actor, OP)?;

        if home_team_id == away_team_id {
            return Err(LeagueError::SameTeam.into());
        }
        if round == 0 {
            return Err(ApiError::InvalidCommand("round numbers start at 1".into()));
        }

        let teams = self.load_teams(league_id, OP).await?;
        find_team(&teams, home_team_id)?;
        find_team(&teams, away_team_id)?;

        let match_id = self.allocate(IdKind::Match, Some(league_id), OP).await?;
        let mut m = Match::scheduled(match_id, league_id, round, home_team_id, away_team_id);
        m.date = date;

        self.store
            .atomic_read_then_write(
                vec![Precondition::TeamsAre { league_id, teams: teams.clone() }],
                vec![WriteOp::PutMatch(m.clone())],
            )
            .await
            .map_err(|e| store_error(Some(league_id), OP, e))?;

        Ok((m, teams))
    }

    /// Удалить один матч (только владелец лиги).
    pub async fn delete_match(
        &mut self,
        league_id: LeagueId,
        match_id: MatchId,
        actor: UserId,
    ) -> Result<(), ApiError> {
        const OP: &str = "delete_match";

        let league = self.load_league(league_id, OP).await?;
        require_owner(&league, actor, OP)?;

        let m = self.load_match(match_id, OP).await?;
        if m.league_id != league_id {
            return Err(ApiError::MatchNotFound(match_id));
        }

        self.store
            .atomic_read_then_write(
                vec![Precondition::MatchIs(m)],
                vec![WriteOp::DeleteMatch(match_id)],
            )
            .await
            .map_err(|e| store_error(Some(league_id), OP, e))?;

        info!("league {league_id}: match {match_id} deleted");
        Ok(())
    }

    /// Капитан одной из сторон предлагает счёт.
    ///
    /// Два совпавших предложения (дом + гости) подтверждают матч.
    /// Параллельные предложения двух капитанов сливаются: проигравший
    /// транзакцию перечитывает матч и добавляет своё предложение к чужому.
    pub async fn propose_score(
        &mut self,
        match_id: MatchId,
        actor: UserId,
        home_score: u32,
        away_score: u32,
    ) -> Result<Match, ApiError> {
        let (m, _) = self
            .propose_with_teams(match_id, actor, home_score, away_score)
            .await?;
        Ok(m)
    }

    pub(crate) async fn propose_with_teams(
        &mut self,
        match_id: MatchId,
        actor: UserId,
        home_score: u32,
        away_score: u32,
    ) -> Result<(Match, Vec<Team>), ApiError> {
        const OP: &str = "propose_score";
        let score = MatchScore::new(home_score, away_score);

        let mut attempt = 0;
        loop {
            let snapshot = self.load_match(match_id, OP).await?;
            let league_id = snapshot.league_id;
            let league = self.load_league(league_id, OP).await?;
            let teams = self.load_teams(league_id, OP).await?;

            let side = if find_team(&teams, snapshot.home_team_id)?.is_captain(actor) {
                Side::Home
            } else if find_team(&teams, snapshot.away_team_id)?.is_captain(actor) {
                Side::Away
            } else {
                return Err(ApiError::NotAuthorized {
                    user_id: actor,
                    action: OP.to_string(),
                });
            };

            let mut updated = snapshot.clone();
            let status = submit_proposal(&mut updated, league.config.result_policy, actor, side, score)?;

            let written = self
                .store
                .atomic_read_then_write(
                    vec![Precondition::MatchIs(snapshot)],
                    vec![WriteOp::PutMatch(updated.clone())],
                )
                .await;

            match written {
                Ok(()) => {
                    debug!("match {match_id}: {side:?} captain {actor} proposed {home_score}-{away_score}, now {status:?}");
                    if updated.is_played() {
                        info!("match {match_id} confirmed {home_score}-{away_score} by both captains");
                    }
                    return Ok((updated, teams));
                }
                Err(e) if self.retry_after(&e, &mut attempt, OP) => continue,
                Err(e) => return Err(store_error(Some(league_id), OP, e)),
            }
        }
    }

    /// Владелец фиксирует счёт принудительно (из Scheduled или AwaitingConfirmation).
    pub async fn force_score(
        &mut self,
        league_id: LeagueId,
        match_id: MatchId,
        actor: UserId,
        home_score: u32,
        away_score: u32,
    ) -> Result<Match, ApiError> {
        let (m, _) = self
            .force_with_teams(league_id, match_id, actor, home_score, away_score)
            .await?;
        Ok(m)
    }

    /// Команды читаются до записи: после коммита хранилище больше не трогаем.
    pub(crate) async fn force_with_teams(
        &mut self,
        league_id: LeagueId,
        match_id: MatchId,
        actor: UserId,
        home_score: u32,
        away_score: u32,
    ) -> Result<(Match, Vec<Team>), ApiError> {
        const OP: &str = "force_score";

        let league = self.load_league(league_id, OP).await?;
        require_owner(&league, actor, OP)?;

        let mut attempt = 0;
        loop {
            let snapshot = self.load_match(match_id, OP).await?;
            if snapshot.league_id != league_id {
                return Err(ApiError::MatchNotFound(match_id));
            }

            let mut updated = snapshot.clone();
            force_result(&mut updated, MatchScore::new(home_score, away_score))?;
            let teams = self.load_teams(league_id, OP).await?;

            let written = self
                .store
                .atomic_read_then_write(
                    vec![Precondition::MatchIs(snapshot)],
                    vec![WriteOp::PutMatch(updated.clone())],
                )
                .await;

            match written {
                Ok(()) => {
                    info!("match {match_id} forced to {home_score}-{away_score} by owner {actor}");
                    return Ok((updated, teams));
                }
                Err(e) if self.retry_after(&e, &mut attempt, OP) => continue,
                Err(e) => return Err(store_error(Some(league_id), OP, e)),
            }
        }
    }
}
