//! Encounter aggregate - a turn-based scene (combat, chase, social challenge)
//!
//! # Invariants
//!
//! - Turn order is always derived from `combatants`, never stored.
//! - `current_turn` is a position in the derived order, not a combatant identity.
//!   It may go stale when combatants are deactivated; reads wrap it modulo the
//!   current order length instead of failing.
//! - `round_number` starts at 1 and increments when an advance wraps to index 0.
//! - Combatants are never removed from the list, only deactivated.
//! - `Ended` is terminal.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::narrative_time::NarrativeTime;
use crate::value_objects::{derive_turn_order, Combatant};
use crate::{CharacterId, EncounterId, LocationId, WorldId};

// =============================================================================
// Status / Type
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterStatus {
    #[default]
    Active,
    Paused,
    Ended,
}

impl EncounterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EncounterStatus::Active => "active",
            EncounterStatus::Paused => "paused",
            EncounterStatus::Ended => "ended",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, EncounterStatus::Ended)
    }
}

impl fmt::Display for EncounterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncounterStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(EncounterStatus::Active),
            "paused" => Ok(EncounterStatus::Paused),
            "ended" => Ok(EncounterStatus::Ended),
            other => Err(DomainError::parse(format!(
                "Unknown encounter status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterType {
    #[default]
    Combat,
    Chase,
    Social,
    Custom,
}

impl EncounterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EncounterType::Combat => "combat",
            EncounterType::Chase => "chase",
            EncounterType::Social => "social",
            EncounterType::Custom => "custom",
        }
    }
}

impl fmt::Display for EncounterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncounterType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "combat" => Ok(EncounterType::Combat),
            "chase" => Ok(EncounterType::Chase),
            "social" => Ok(EncounterType::Social),
            "custom" => Ok(EncounterType::Custom),
            other => Err(DomainError::parse(format!(
                "Unknown encounter type: {} (expected combat, chase, social or custom)",
                other
            ))),
        }
    }
}

// =============================================================================
// Mutation results
// =============================================================================

/// How `add_combatant` placed the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatantAdded {
    /// A new combatant record was appended.
    Appended,
    /// An inactive record for the same character was brought back.
    Reactivated,
}

/// Outcome of advancing the turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnAdvance {
    pub round_number: u32,
    /// Position of the new current combatant in `turn_order`.
    pub turn_index: usize,
    /// True when the advance wrapped to the top of the order and started a new round.
    pub wrapped: bool,
    pub current: Combatant,
    pub turn_order: Vec<Combatant>,
}

// =============================================================================
// Encounter
// =============================================================================

/// A turn-based encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    id: EncounterId,
    world_id: WorldId,
    name: String,
    #[serde(default)]
    location_id: Option<LocationId>,
    #[serde(default)]
    encounter_type: EncounterType,

    // Turn tracking
    #[serde(default)]
    combatants: Vec<Combatant>,
    #[serde(default)]
    current_turn: i64,
    round_number: u32,

    // State
    status: EncounterStatus,
    started_at: NarrativeTime,
    #[serde(default)]
    ended_at: Option<NarrativeTime>,

    #[serde(default)]
    summary: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    metadata: BTreeMap<String, serde_json::Value>,

    /// Optimistic concurrency token, bumped by the store on every write.
    #[serde(default)]
    version: u64,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Encounter {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Start a new encounter: active, round 1, turn 0, no combatants.
    pub fn new(
        world_id: WorldId,
        name: impl Into<String>,
        encounter_type: EncounterType,
        started_at: NarrativeTime,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EncounterId::new(),
            world_id,
            name: name.into(),
            location_id: None,
            encounter_type,
            combatants: Vec::new(),
            current_turn: 0,
            round_number: 1,
            status: EncounterStatus::Active,
            started_at,
            ended_at: None,
            summary: String::new(),
            tags: Vec::new(),
            metadata: BTreeMap::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    pub fn with_id(mut self, id: EncounterId) -> Self {
        self.id = id;
        self
    }

    pub fn with_location(mut self, location_id: Option<LocationId>) -> Self {
        self.location_id = location_id;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Seed the initial combatant list. Each enters at initiative 0.
    pub fn with_combatants(mut self, character_ids: impl IntoIterator<Item = CharacterId>) -> Self {
        self.combatants
            .extend(character_ids.into_iter().map(Combatant::new));
        self
    }

    /// Set the stored version (used when loading from storage).
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> EncounterId {
        self.id
    }

    #[inline]
    pub fn world_id(&self) -> WorldId {
        self.world_id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn location_id(&self) -> Option<LocationId> {
        self.location_id
    }

    #[inline]
    pub fn encounter_type(&self) -> EncounterType {
        self.encounter_type
    }

    /// Raw combatant list in insertion order (not turn order).
    #[inline]
    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    #[inline]
    pub fn current_turn(&self) -> i64 {
        self.current_turn
    }

    #[inline]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    #[inline]
    pub fn status(&self) -> EncounterStatus {
        self.status
    }

    #[inline]
    pub fn started_at(&self) -> NarrativeTime {
        self.started_at
    }

    #[inline]
    pub fn ended_at(&self) -> Option<NarrativeTime> {
        self.ended_at
    }

    #[inline]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[inline]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[inline]
    pub fn metadata(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.metadata
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_active(&self) -> bool {
        self.status == EncounterStatus::Active
    }

    // =========================================================================
    // Turn order
    // =========================================================================

    /// Active combatants, highest initiative first. Recomputed on every call.
    pub fn turn_order(&self) -> Vec<Combatant> {
        derive_turn_order(&self.combatants)
    }

    /// Position of the current combatant in a turn order of length `len`.
    ///
    /// Wraps `current_turn` modulo `len`, so a stale or negative index still
    /// lands inside the order.
    pub fn current_index(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let len = i64::try_from(len).ok()?;
        usize::try_from(self.current_turn.rem_euclid(len)).ok()
    }

    /// The combatant whose turn it is, if anyone is still in the fight.
    pub fn current_combatant(&self) -> Option<Combatant> {
        let order = self.turn_order();
        let idx = self.current_index(order.len())?;
        order.into_iter().nth(idx)
    }

    pub fn active_count(&self) -> usize {
        self.combatants.iter().filter(|c| c.is_active).count()
    }

    // =========================================================================
    // Combatant mutations
    // =========================================================================

    /// Add a character to the fight.
    ///
    /// A character appears at most once: an active duplicate is rejected and
    /// an inactive record is reactivated in place. `current_turn` is untouched.
    pub fn add_combatant(
        &mut self,
        character_id: CharacterId,
        initiative: f64,
        notes: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<CombatantAdded, DomainError> {
        self.ensure_not_ended()?;

        if self
            .combatants
            .iter()
            .any(|c| c.character_id == character_id && c.is_active)
        {
            return Err(DomainError::constraint(format!(
                "Character {} is already a combatant in this encounter",
                character_id
            )));
        }

        let notes = notes.into();
        let added = match self
            .combatants
            .iter_mut()
            .find(|c| c.character_id == character_id)
        {
            Some(existing) => {
                existing.is_active = true;
                existing.initiative = initiative;
                existing.notes = notes;
                CombatantAdded::Reactivated
            }
            None => {
                self.combatants.push(
                    Combatant::new(character_id)
                        .with_initiative(initiative)
                        .with_notes(notes),
                );
                CombatantAdded::Appended
            }
        };

        self.updated_at = now;
        Ok(added)
    }

    /// Update the initiative of the first combatant with this character id.
    ///
    /// `current_turn` is a position, so the acting combatant can change when
    /// the order shifts.
    pub fn set_initiative(
        &mut self,
        character_id: CharacterId,
        initiative: f64,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.ensure_not_ended()?;

        let combatant = self
            .combatants
            .iter_mut()
            .find(|c| c.character_id == character_id)
            .ok_or_else(|| DomainError::not_found("Combatant", character_id.to_string()))?;
        combatant.initiative = initiative;

        self.updated_at = now;
        Ok(())
    }

    /// Take the first active combatant with this character id out of the fight.
    ///
    /// The record stays in `combatants` with `is_active = false` and the reason
    /// in `notes`. `current_turn` is left as-is.
    pub fn deactivate_combatant(
        &mut self,
        character_id: CharacterId,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Combatant, DomainError> {
        self.ensure_not_ended()?;

        let combatant = self
            .combatants
            .iter_mut()
            .find(|c| c.character_id == character_id && c.is_active)
            .ok_or_else(|| DomainError::not_found("Combatant", character_id.to_string()))?;
        combatant.is_active = false;
        combatant.notes = reason.into();
        let removed = combatant.clone();

        self.updated_at = now;
        Ok(removed)
    }

    // =========================================================================
    // Turn progression
    // =========================================================================

    /// Move to the next combatant.
    ///
    /// The wrap is evaluated against the current order length, so the round
    /// increments whenever the new index is 0, even if combatants left mid-round.
    pub fn advance_turn(&mut self, now: DateTime<Utc>) -> Result<TurnAdvance, DomainError> {
        if self.status != EncounterStatus::Active {
            return Err(DomainError::invalid_state_transition(format!(
                "Encounter is not active (status: {})",
                self.status
            )));
        }

        let turn_order = self.turn_order();
        if turn_order.is_empty() {
            return Err(DomainError::invalid_state_transition(
                "No active combatants",
            ));
        }

        let len = i64::try_from(turn_order.len())
            .map_err(|_| DomainError::validation("Turn order too long"))?;
        let new_turn = (self.current_turn.rem_euclid(len) + 1).rem_euclid(len);
        let wrapped = new_turn == 0;
        if wrapped {
            self.round_number = self.round_number.saturating_add(1);
        }
        self.current_turn = new_turn;
        self.updated_at = now;

        let turn_index = usize::try_from(new_turn)
            .map_err(|_| DomainError::validation("Negative turn index"))?;
        let current = turn_order[turn_index].clone();

        Ok(TurnAdvance {
            round_number: self.round_number,
            turn_index,
            wrapped,
            current,
            turn_order,
        })
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        match self.status {
            EncounterStatus::Active => {
                self.status = EncounterStatus::Paused;
                self.updated_at = now;
                Ok(())
            }
            other => Err(DomainError::invalid_state_transition(format!(
                "Only an active encounter can be paused (status: {})",
                other
            ))),
        }
    }

    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        match self.status {
            EncounterStatus::Paused => {
                self.status = EncounterStatus::Active;
                self.updated_at = now;
                Ok(())
            }
            other => Err(DomainError::invalid_state_transition(format!(
                "Only a paused encounter can be resumed (status: {})",
                other
            ))),
        }
    }

    /// End the encounter and derive `ended_at` as `started_at` plus one
    /// fixed-length round per elapsed round.
    pub fn end(
        &mut self,
        summary: impl Into<String>,
        outcome: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<NarrativeTime, DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::invalid_state_transition(
                "Encounter has already ended",
            ));
        }

        let ended_at = self.started_at.after_rounds(self.round_number);
        self.status = EncounterStatus::Ended;
        self.ended_at = Some(ended_at);
        self.summary = summary.into();

        let outcome = outcome.into();
        if !outcome.is_empty() {
            self.metadata
                .insert("outcome".to_string(), serde_json::Value::String(outcome));
        }

        self.updated_at = now;
        Ok(ended_at)
    }

    /// Outcome recorded when the encounter ended, if any.
    pub fn outcome(&self) -> Option<&str> {
        self.metadata.get("outcome").and_then(|v| v.as_str())
    }

    fn ensure_not_ended(&self) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::invalid_state_transition(
                "Encounter has ended",
            ));
        }
        Ok(())
    }
}
