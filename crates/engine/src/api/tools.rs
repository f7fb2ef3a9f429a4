//! Tool dispatch.
//!
//! One match arm per `EncounterRequest` variant. Domain conditions come back
//! as `ResponseResult::Error`; only store failures escape as `Err`.

use std::str::FromStr;

use serde::Serialize;
use taleforge_domain::{
    CharacterId, DomainError, EncounterId, EncounterType, LocationId, WorldId,
};
use taleforge_shared::{EncounterRequest, ErrorCode, ResponseResult};

use crate::infrastructure::ports::RepoError;
use crate::use_cases::encounter::{EncounterError, EncounterUseCases, StartEncounterInput};

pub struct ToolDispatcher<'a> {
    encounter: &'a EncounterUseCases,
}

impl<'a> ToolDispatcher<'a> {
    pub fn new(encounter: &'a EncounterUseCases) -> Self {
        Self { encounter }
    }

    pub async fn dispatch(&self, request: EncounterRequest) -> Result<ResponseResult, RepoError> {
        let tool = request.tool_name();
        match self.run(request).await {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::debug!(tool, error = %e, "Tool reported an error");
                into_result(e)
            }
        }
    }

    async fn run(&self, request: EncounterRequest) -> Result<ResponseResult, EncounterError> {
        let uc = self.encounter;
        match request {
            EncounterRequest::StartEncounter {
                world_id,
                name,
                location_id,
                encounter_type,
                combatant_ids,
                tags,
            } => {
                let input = StartEncounterInput {
                    world_id: parse(&world_id)?,
                    name,
                    location_id: location_id
                        .as_deref()
                        .filter(|s| !s.trim().is_empty())
                        .map(parse::<LocationId>)
                        .transpose()?,
                    encounter_type: encounter_type
                        .as_deref()
                        .map(EncounterType::from_str)
                        .transpose()?
                        .unwrap_or_default(),
                    combatant_ids: combatant_ids
                        .iter()
                        .map(|id| parse::<CharacterId>(id))
                        .collect::<Result<Vec<_>, _>>()?,
                    tags,
                };
                success(uc.start.execute(input).await?)
            }
            EncounterRequest::GetEncounter { encounter_id } => {
                success(uc.get.execute(parse(&encounter_id)?).await?)
            }
            EncounterRequest::GetActiveEncounter { world_id } => {
                success(uc.get_active.execute(parse::<WorldId>(&world_id)?).await?)
            }
            EncounterRequest::AddCombatant {
                encounter_id,
                character_id,
                initiative,
                notes,
            } => success(
                uc.add_combatant
                    .execute(parse(&encounter_id)?, parse(&character_id)?, initiative, notes)
                    .await?,
            ),
            EncounterRequest::SetInitiative {
                encounter_id,
                character_id,
                initiative,
            } => success(
                uc.set_initiative
                    .execute(parse(&encounter_id)?, parse(&character_id)?, initiative)
                    .await?,
            ),
            EncounterRequest::RemoveCombatant {
                encounter_id,
                character_id,
                reason,
            } => success(
                uc.remove_combatant
                    .execute(parse(&encounter_id)?, parse(&character_id)?, reason)
                    .await?,
            ),
            EncounterRequest::NextTurn { encounter_id } => {
                success(uc.next_turn.execute(parse(&encounter_id)?).await?)
            }
            EncounterRequest::EndEncounter {
                encounter_id,
                summary,
                outcome,
            } => success(
                uc.end
                    .execute(parse::<EncounterId>(&encounter_id)?, summary, outcome)
                    .await?,
            ),
            EncounterRequest::PauseEncounter { encounter_id } => {
                success(uc.pause.execute(parse(&encounter_id)?).await?)
            }
            EncounterRequest::ResumeEncounter { encounter_id } => {
                success(uc.resume.execute(parse(&encounter_id)?).await?)
            }
        }
    }
}

fn parse<T: FromStr<Err = DomainError>>(raw: &str) -> Result<T, EncounterError> {
    raw.trim().parse::<T>().map_err(EncounterError::from)
}

/// A payload that cannot be rendered as JSON fails the request like a store error.
fn success<T: Serialize>(payload: T) -> Result<ResponseResult, EncounterError> {
    ResponseResult::success(payload)
        .map_err(|e| EncounterError::Repo(RepoError::serialization(e)))
}

/// Reportable errors become error results; store failures propagate.
fn into_result(error: EncounterError) -> Result<ResponseResult, RepoError> {
    let message = error.to_string();
    let code = match error {
        EncounterError::NotFound { .. } => ErrorCode::NotFound,
        EncounterError::Conflict(_) => ErrorCode::Conflict,
        EncounterError::InvalidState(_) => ErrorCode::InvalidState,
        EncounterError::InvalidInput(_) => ErrorCode::BadRequest,
        EncounterError::Repo(e) => return Err(e),
    };
    Ok(ResponseResult::error(code, message))
}
