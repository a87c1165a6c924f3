//! The game service: snapshot → rules → guarded atomic commit.
//!
//! Each operation fetches the room snapshot, lets the rules layer
//! validate it and emit patches, then commits the patches through the
//! store. Per-player writes (join, leave, answers, ballots) are single
//! patches keyed by player identity, so concurrent players never
//! overwrite each other. Phase transitions commit under a phase guard:
//! if the room moved on while the transition was in flight, the commit
//! fails as a wrong-phase rejection instead of applying twice.
//!
//! There is no ambient "current room" or "current player" — every call
//! names the room and the acting player explicitly.

use std::time::{SystemTime, UNIX_EPOCH};

use nameit_protocol::{AnswerSheet, Ballot, GamePhase, Patch, PlayerName, Room, RoomCode};
use nameit_rules::{GameConfig, RuleError, answers, lifecycle, voting};
use nameit_store::{RoomStore, RoomWatcher, StoreError};

use crate::GameError;

/// How many random codes to try before giving up on room creation.
const CODE_ATTEMPTS: u32 = 16;

/// The orchestrator: composes the letter pool, lifecycle rules, answer
/// collection, voting, and scoring over a [`RoomStore`] backend.
pub struct GameService<S> {
    store: S,
    config: GameConfig,
}

impl<S: RoomStore> GameService<S> {
    /// Creates a service with the default game rules.
    pub fn new(store: S) -> Self {
        Self::with_config(store, GameConfig::default())
    }

    /// Creates a service with custom game rules.
    pub fn with_config(store: S, config: GameConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // -- membership -------------------------------------------------------

    /// Creates a room with `host_name` as host and sole player.
    ///
    /// The room code is drawn at random; on the (vanishingly rare)
    /// collision the draw is retried.
    pub async fn create_room(&self, host_name: &str) -> Result<Room, GameError> {
        let host_name = host_name.trim();
        lifecycle::validate_name(host_name)?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let room = lifecycle::create(lifecycle::generate_code(), host_name)?;
            match self.store.create(room).await {
                Ok(room) => {
                    tracing::info!(code = %room.code, host = host_name, "room created");
                    return Ok(room);
                }
                Err(StoreError::AlreadyExists(code)) if attempt < CODE_ATTEMPTS => {
                    tracing::debug!(%code, "room code collision, redrawing");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Adds a player to a waiting room.
    pub async fn join_room(&self, code: &RoomCode, name: &str) -> Result<Room, GameError> {
        let name = name.trim();
        lifecycle::validate_code(code.as_str())?;

        let room = self.store.get(code).await?;
        let patches = lifecycle::join(&room, name, &self.config)?;
        let room = self.commit(code, Some(GamePhase::Waiting), patches).await?;

        tracing::info!(%code, player = name, players = room.player_count(), "player joined");
        Ok(room)
    }

    /// Removes a player from a room. Idempotent: leaving a room you are
    /// not in returns the room unchanged.
    pub async fn leave_room(&self, code: &RoomCode, name: &str) -> Result<Room, GameError> {
        let player = PlayerName::from(name.trim());

        let room = self.store.get(code).await?;
        let patches = lifecycle::leave(&room, &player);
        if patches.is_empty() {
            return Ok(room);
        }

        let room = self.commit(code, None, patches).await?;
        if room.players.is_empty() {
            tracing::info!(%code, "last player left, room abandoned");
        } else {
            tracing::info!(%code, player = %player, host = %room.host, "player left");
        }
        Ok(room)
    }

    // -- rounds -----------------------------------------------------------

    /// Starts a round: the host draws a letter and play begins.
    pub async fn start_round(&self, code: &RoomCode, acting: &str) -> Result<Room, GameError> {
        let acting = PlayerName::from(acting.trim());

        let room = self.store.get(code).await?;
        let patches = lifecycle::start_round(&room, &acting, &self.config, now_ms())?;
        let room = self.commit(code, Some(GamePhase::Waiting), patches).await?;

        tracing::info!(
            %code,
            round = room.current_round,
            letter = ?room.current_letter,
            "round started"
        );
        Ok(room)
    }

    /// Records one player's answers for the live round. Re-submission
    /// replaces the previous sheet.
    pub async fn submit_answers(
        &self,
        code: &RoomCode,
        player: &str,
        sheet: &AnswerSheet,
    ) -> Result<Room, GameError> {
        let player = PlayerName::from(player.trim());

        let room = self.store.get(code).await?;
        let patches = answers::submit(&room, &player, sheet)?;
        let room = self.commit(code, Some(GamePhase::Playing), patches).await?;

        tracing::debug!(%code, player = %player, "answers submitted");
        Ok(room)
    }

    /// Records one voter's ballot for the round under review.
    /// Re-submission replaces the previous ballot.
    pub async fn submit_votes(
        &self,
        code: &RoomCode,
        voter: &str,
        ballot: &Ballot,
    ) -> Result<Room, GameError> {
        let voter = PlayerName::from(voter.trim());

        let room = self.store.get(code).await?;
        let patches = voting::submit(&room, &voter, ballot)?;
        let room = self.commit(code, Some(GamePhase::Review), patches).await?;

        tracing::debug!(%code, voter = %voter, "ballot submitted");
        Ok(room)
    }

    /// Advances the room out of its current phase: `Playing` → `Review`
    /// (answers freeze, voting opens) or `Review` → `Results` (scores
    /// fold in). The caller decides *when* — every player submitted, or
    /// the round timer expired.
    pub async fn advance_phase(&self, code: &RoomCode) -> Result<Room, GameError> {
        let room = self.store.get(code).await?;
        match room.phase {
            GamePhase::Playing => self.advance_to_review(code).await,
            GamePhase::Review => self.advance_to_results(code).await,
            actual => Err(RuleError::WrongPhase {
                expected: GamePhase::Playing,
                actual,
            }
            .into()),
        }
    }

    /// Freezes answers and opens voting.
    pub async fn advance_to_review(&self, code: &RoomCode) -> Result<Room, GameError> {
        let room = self.store.get(code).await?;
        let patches = lifecycle::advance_to_review(&room)?;
        let room = self.commit(code, Some(GamePhase::Playing), patches).await?;

        tracing::info!(%code, round = room.current_round, "review opened");
        Ok(room)
    }

    /// Resolves verdicts, folds round scores into the totals, and shows
    /// results. The phase guard makes this single-shot per round: a
    /// repeated or raced call finds the room already in `Results` and
    /// is rejected without touching the scores.
    pub async fn advance_to_results(&self, code: &RoomCode) -> Result<Room, GameError> {
        let room = self.store.get(code).await?;
        let outcome = lifecycle::advance_to_results(&room, &self.config)?;
        let room = self
            .commit(code, Some(GamePhase::Review), outcome.patches)
            .await?;

        tracing::info!(
            %code,
            round = room.current_round,
            scores = ?outcome.round_scores,
            "round scored"
        );
        Ok(room)
    }

    /// Leaves the results screen: back to the lobby, or `Finished` when
    /// the configured round cap is reached. Host only.
    pub async fn next_round(&self, code: &RoomCode, acting: &str) -> Result<Room, GameError> {
        let acting = PlayerName::from(acting.trim());

        let room = self.store.get(code).await?;
        let patches = lifecycle::next_round(&room, &acting, &self.config)?;
        let room = self.commit(code, Some(GamePhase::Results), patches).await?;

        match room.phase {
            GamePhase::Finished => tracing::info!(%code, "game finished"),
            _ => tracing::info!(%code, round = room.current_round, "lobby open for next round"),
        }
        Ok(room)
    }

    // -- queries ----------------------------------------------------------

    /// The current room snapshot.
    pub async fn room(&self, code: &RoomCode) -> Result<Room, GameError> {
        Ok(self.store.get(code).await?)
    }

    /// Subscribes to the room's committed changes. The watcher starts
    /// from the current snapshot; dropping it unregisters.
    pub async fn watch(&self, code: &RoomCode) -> Result<RoomWatcher, GameError> {
        Ok(self.store.subscribe(code).await?)
    }

    // -- internals --------------------------------------------------------

    /// Commits patches, translating a failed phase guard into the
    /// wrong-phase rejection the caller expects: a submission or
    /// transition that lost the race is refused, never half-applied.
    async fn commit(
        &self,
        code: &RoomCode,
        guard: Option<GamePhase>,
        patches: Vec<Patch>,
    ) -> Result<Room, GameError> {
        self.store
            .atomic_update(code, guard, patches)
            .await
            .map_err(|err| match err {
                StoreError::PhaseConflict { expected, actual } => {
                    GameError::Rule(RuleError::WrongPhase { expected, actual })
                }
                other => GameError::Store(other),
            })
    }
}

/// Wall-clock unix millis for the round start stamp.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
