//! Command execution against the calendar and the persisted bracket.

use crate::{
    commands::{Command, ScheduleCommand, TournamentCommand},
    config::CliConfig,
    http_provider::HttpEventProvider,
};
use anyhow::{Context, Result};
use beach_club::{
    bags::{EntrantCount, Match, TournamentEngine, TournamentSnapshots, TournamentState},
    config::AggregatorConfig,
    events::{
        ApiEventProvider, BuiltinSchedule, Event, NewTournamentEntry, NoApi,
        StaticScheduleProvider, UnifiedEventAggregator,
    },
    store::{JsonFileStore, KeyValueStore},
};
use log::info;
use std::{io::Write, sync::Arc};

/// Everything a single `bc` invocation needs
pub struct App {
    aggregator: UnifiedEventAggregator,
    snapshots: TournamentSnapshots,
    engine: TournamentEngine,
}

impl App {
    /// Wire the app from configuration
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built
    pub fn from_config(config: &CliConfig) -> Result<Self> {
        let api: Arc<dyn ApiEventProvider> = match &config.api_base_url {
            Some(url) => {
                info!("Using events API at {}", url);
                Arc::new(
                    HttpEventProvider::new(url.as_str(), config.http_timeout_secs)
                        .context("Failed to build HTTP client")?,
                )
            }
            None => Arc::new(NoApi),
        };
        let store = Arc::new(JsonFileStore::new(config.store_path.clone()));

        Ok(Self::new(
            api,
            Arc::new(BuiltinSchedule),
            store,
            config.aggregator.clone(),
        ))
    }

    pub fn new(
        api: Arc<dyn ApiEventProvider>,
        schedule: Arc<dyn StaticScheduleProvider>,
        store: Arc<dyn KeyValueStore>,
        config: AggregatorConfig,
    ) -> Self {
        Self {
            aggregator: UnifiedEventAggregator::new(api, schedule, store.clone(), config),
            snapshots: TournamentSnapshots::new(store),
            engine: TournamentEngine::new(),
        }
    }

    /// Run one command, writing human-readable output to `out`
    pub async fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Upcoming { limit } => {
                let events = self.aggregator.get_upcoming(limit).await;
                if events.is_empty() {
                    writeln!(out, "No upcoming events")?;
                }
                for event in &events {
                    write_event(out, event)?;
                }
            }
            Command::Events => {
                for event in self.aggregator.get_all().await.iter() {
                    write_event(out, event)?;
                }
            }
            Command::Refresh => {
                let events = self.aggregator.load_all(true).await;
                writeln!(out, "Loaded {} events", events.len())?;
            }
            Command::Tournament(command) => self.tournament(command, out)?,
            Command::Schedule(command) => self.schedule(command, out).await?,
        }
        Ok(())
    }

    fn tournament(&mut self, command: TournamentCommand, out: &mut impl Write) -> Result<()> {
        let state = self.load_state()?;

        let next = match command {
            TournamentCommand::New { size } => {
                let next = self.engine.create_roster(size)?;
                writeln!(out, "New {size}-player tournament, add players to begin")?;
                next
            }
            TournamentCommand::Add { name } => {
                let next = self.engine.add_player(&state, &name)?;
                writeln!(
                    out,
                    "Added {} ({}/{})",
                    name.trim(),
                    next.roster.len(),
                    next.entrant_count
                )?;
                next
            }
            TournamentCommand::Start => {
                let next = self.engine.start_tournament(&state)?;
                write_state(out, &next)?;
                next
            }
            TournamentCommand::Score {
                match_id,
                side,
                delta,
            } => {
                let scored = self.engine.record_score(&state, &match_id, side, delta)?;
                let next = self.engine.try_advance_round(&scored);
                write_state(out, &next)?;
                next
            }
            TournamentCommand::Advance => {
                let next = self.engine.try_advance_round(&state);
                if next == state {
                    writeln!(out, "Current round is not finished")?;
                } else {
                    write_state(out, &next)?;
                }
                next
            }
            TournamentCommand::Show => {
                write_state(out, &state)?;
                return Ok(());
            }
            TournamentCommand::Reset { size } => {
                let size = size.unwrap_or_else(|| u8::from(state.entrant_count));
                let next = self.engine.reset(size)?;
                writeln!(out, "Tournament reset ({size} players)")?;
                next
            }
        };

        self.snapshots
            .save(&next)
            .context("Failed to save tournament")?;
        Ok(())
    }

    async fn schedule(&self, command: ScheduleCommand, out: &mut impl Write) -> Result<()> {
        match command {
            ScheduleCommand::Add {
                name,
                date,
                time,
                size,
                description,
            } => {
                let stored = self
                    .aggregator
                    .add_tournament_entry(NewTournamentEntry {
                        name,
                        size,
                        date,
                        time,
                        description,
                        created_by: None,
                    })
                    .await?;
                writeln!(
                    out,
                    "Scheduled {} on {} (id tournament-{})",
                    stored.name,
                    date,
                    stored.id
                )?;
            }
            ScheduleCommand::Remove { id } => {
                self.aggregator.remove_tournament_entry(&id).await?;
                writeln!(out, "Removed {id}")?;
            }
        }
        Ok(())
    }

    fn load_state(&self) -> Result<TournamentState> {
        let state = self
            .snapshots
            .load()
            .context("Failed to load tournament")?;
        Ok(state.unwrap_or_else(|| TournamentState::new(EntrantCount::Four)))
    }
}

fn write_event(out: &mut impl Write, event: &Event) -> std::io::Result<()> {
    write!(
        out,
        "{}  {:>8}  {} [{}]",
        event.event_date, event.event_time, event.title, event.event_type
    )?;
    if !event.location.is_empty() {
        write!(out, " @ {}", event.location)?;
    }
    writeln!(out)
}

fn write_match(out: &mut impl Write, game: &Match) -> std::io::Result<()> {
    write!(
        out,
        "  {:<6} {} {:>2} - {:<2} {}",
        game.id,
        game.player1.name,
        game.score.player1,
        game.score.player2,
        game.player2.name
    )?;
    if let Some(winner) = game.winning_player() {
        write!(out, "  (winner: {})", winner.name)?;
    }
    writeln!(out)
}

fn write_state(out: &mut impl Write, state: &TournamentState) -> std::io::Result<()> {
    let status = if state.is_finished() {
        "finished".to_string()
    } else if state.active {
        format!(
            "round {} of {}",
            state.current_round + 1,
            state.entrant_count.rounds()
        )
    } else {
        "not started".to_string()
    };
    writeln!(
        out,
        "Bags tournament ({} players), {}",
        state.entrant_count, status
    )?;

    let names: Vec<&str> = state.roster.iter().map(|p| p.name.as_str()).collect();
    writeln!(out, "Roster: {}", names.join(", "))?;

    for round in 0..state.round_count() {
        writeln!(out, "Round {}:", round + 1)?;
        for game in state.round(round) {
            write_match(out, game)?;
        }
    }

    if let Some(champion) = &state.champion {
        writeln!(out, "Champion: {}", champion.name)?;
    }
    Ok(())
}
