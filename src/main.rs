//! Grimoire Engine - demo runner
//!
//! Deals a Trouble Brewing game, walks one full day (dawn, nominations, a
//! vote, dusk) with scripted answers, and prints the town feed. The real
//! surface of the crate is the library; this binary exists to show the
//! phases wired together end to end.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grimoire_engine::application::ports::outbound::GameStorePort;
use grimoire_engine::application::services::{
    DayService, NominationService, SeatingService, SetupService, VoteService,
};
use grimoire_engine::domain::value_objects::Script;
use grimoire_engine::infrastructure::{
    AppConfig, MemoryGameStore, RecordingAnnouncer, RoleRegistry, ScriptedInput, TimedInput,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grimoire_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Grimoire Engine demo");

    let config = AppConfig::from_env()?;
    let script = Script::from_name(&config.default_script)
        .ok_or_else(|| anyhow::anyhow!("unknown script '{}'", config.default_script))?;

    // Every voter raises a hand; prompts are capped by the config timeout.
    let input = Arc::new(TimedInput::new(
        Arc::new(ScriptedInput::with_answers(vec![Some(true); 10])),
        config.prompt_timeout,
    ));
    let announcer = Arc::new(RecordingAnnouncer::new());
    let store = MemoryGameStore::new();

    let setup = SetupService::new(Arc::new(RoleRegistry::new()));
    let days = DayService::new(input.clone(), announcer.clone());
    let nominations = NominationService::new(input.clone(), announcer.clone());
    let votes = VoteService::new(input.clone(), announcer.clone());
    let seating = SeatingService::new();

    let players: Vec<String> = ["Ana", "Ben", "Cleo", "Dara", "Edd", "Finn", "Gwen"]
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut game = setup.create_game(script, &players, &["Storyteller".to_string()])?;
    game.whisper_mode = config.whisper_mode;

    days.start_day(&mut game).await?;
    days.open_nominations(&mut game).await?;

    let nominator = game.seating[0].id;
    let nominee = game.seating[3].id;
    nominations
        .nominate(&mut game, Some(nominator), Some(nominee))
        .await?;
    if game
        .current_day()
        .map(|day| day.has_open_vote())
        .unwrap_or(false)
    {
        votes.run(&mut game).await?;
    }
    days.end_day(&mut game).await?;

    store.save("demo", &game).await?;

    println!("Seating after day one:");
    for row in seating.display(&game) {
        println!("  {}", row.line);
    }
    println!();
    println!("Town feed:");
    for line in announcer.town_feed() {
        println!("  {}", line);
    }

    Ok(())
}
