// src/engine/scoring.rs
//
// Переходы состояния матча:
//   Scheduled -> (предложение) -> AwaitingConfirmation -> (совпадение | force) -> Confirmed
//   Scheduled -> (force) -> Confirmed
// Confirmed – терминальное.

use crate::domain::fixture::{Match, MatchScore, MatchStatus, ScoreProposal, Side};
use crate::domain::league::ResultPolicy;
use crate::domain::UserId;
use crate::engine::errors::EngineError;

/// Записать предложение счёта от капитана стороны `side`.
///
/// Предложение хранится по автору: повторное предложение того же капитана
/// заменяет его прежнее, чужие не трогает. После записи сравниваются самые
/// свежие предложения двух сторон; если совпали – матч подтверждён.
/// Итог не зависит от того, чьё предложение пришло первым.
///
/// При `ResultPolicy::OwnerOnly` предложения не принимаются.
pub fn submit_proposal(
    m: &mut Match,
    policy: ResultPolicy,
    user_id: UserId,
    side: Side,
    score: MatchScore,
) -> Result<MatchStatus, EngineError> {
    if policy == ResultPolicy::OwnerOnly {
        return Err(EngineError::ProposalsDisabled);
    }
    if m.is_played() {
        return Err(EngineError::MatchAlreadyConfirmed(m.id));
    }

    m.proposal_seq += 1;
    m.proposals.insert(
        user_id,
        ScoreProposal {
            side,
            score,
            seq: m.proposal_seq,
        },
    );

    let home = m.latest_proposal(Side::Home).map(|p| p.score);
    let away = m.latest_proposal(Side::Away).map(|p| p.score);

    if let (Some(h), Some(a)) = (home, away) {
        if h == a {
            m.result = Some(h);
        }
    }

    Ok(m.status())
}

/// Принудительно зафиксировать счёт (владелец лиги).
///
/// Допустимо из Scheduled и AwaitingConfirmation. Предложения остаются
/// в записи как история.
pub fn force_result(m: &mut Match, score: MatchScore) -> Result<(), EngineError> {
    if m.is_played() {
        return Err(EngineError::MatchAlreadyConfirmed(m.id));
    }

    m.result = Some(score);
    Ok(())
}
