//! A scripted two-player match against the in-memory store.
//!
//! Run with `cargo run --example two_player`. Set `RUST_LOG=debug` to
//! watch every commit.

use nameit::{
    AnswerSheet, Ballot, Category, GameConfig, GameService, MemoryStore, PlayerName,
};

#[tokio::main]
async fn main() -> Result<(), nameit::GameError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = GameConfig {
        max_rounds: Some(2),
        ..GameConfig::default()
    };
    let service = GameService::with_config(MemoryStore::new(), config);

    let room = service.create_room("Ana").await?;
    let code = room.code.clone();
    println!("room {code} is open — share the code!");

    service.join_room(&code, "Ben").await?;

    for _ in 0..2 {
        let room = service.start_round(&code, "Ana").await?;
        let letter = room.current_letter.expect("round just started");
        println!("round {}: name things starting with {letter}", room.current_round);

        // Neither player is very imaginative.
        let mut ana = AnswerSheet::new();
        ana.set(Category::Person, format!("{letter}anna"));
        ana.set(Category::Place, format!("{letter}ew York"));
        service.submit_answers(&code, "Ana", &ana).await?;

        let mut ben = AnswerSheet::new();
        ben.set(Category::Animal, format!("{letter}at"));
        service.submit_answers(&code, "Ben", &ben).await?;

        service.advance_phase(&code).await?; // everyone submitted

        // Ben doubts Ana's geography; everything else sails through.
        let mut ballot = Ballot::new();
        ballot.judge(PlayerName::from("Ana"), Category::Person, true);
        ballot.judge(PlayerName::from("Ana"), Category::Place, false);
        service.submit_votes(&code, "Ben", &ballot).await?;

        let mut ballot = Ballot::new();
        ballot.judge(PlayerName::from("Ben"), Category::Animal, true);
        service.submit_votes(&code, "Ana", &ballot).await?;

        let room = service.advance_phase(&code).await?; // resolve + score
        println!("standings after round {}:", room.current_round);
        for (player, score) in &room.scores {
            println!("  {player}: {score}");
        }

        service.next_round(&code, "Ana").await?;
    }

    let room = service.room(&code).await?;
    println!("game over in phase {:?} — thanks for playing!", room.phase);
    Ok(())
}
