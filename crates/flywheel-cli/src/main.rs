//! Flywheel - command-line access to the chess engine.
//!
//! Loads a position from FEN, optionally plays a move history on it, and
//! reports legal moves, game state, perft counts or endgame table hits.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use flywheel_core::FenParser;
use flywheel_endgame::EndgameRegistry;
use flywheel_engine::{generate_moves_rated, perft, perft_divide, Position};
use tracing_subscriber::EnvFilter;

/// Flywheel chess engine.
#[derive(Parser)]
#[command(name = "flywheel")]
#[command(about = "Chess position engine and endgame table lookup")]
struct Args {
    /// Starting position in FEN
    #[arg(long, global = true, default_value = FenParser::STARTPOS)]
    fen: String,

    /// Moves to play first, in SAN or long algebraic, space separated
    #[arg(long, global = true, default_value = "")]
    history: String,

    /// Recompute the hash after every move and panic on divergence
    #[arg(long, global = true)]
    debug_hash: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the position, game state and move history
    Show,
    /// List legal moves
    Moves {
        /// Print moves in SAN instead of long algebraic notation
        #[arg(long)]
        san: bool,
        /// Sort by the opponent's reply count, fewest first
        #[arg(long)]
        rated: bool,
    },
    /// Count leaf nodes of the move tree
    Perft {
        #[arg(long, default_value = "4")]
        depth: u32,
        /// Print the count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// Look up the position in endgame tables
    Probe {
        /// Registry config listing the tables
        #[arg(long, default_value = "endgame.toml")]
        tables: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let mut position = Position::from_fen(&args.fen).context("invalid FEN")?;
    position.set_debug_mode(args.debug_hash);
    position
        .push_history(&args.history)
        .context("invalid move history")?;
    tracing::debug!(fen = %position.to_fen(), "position ready");

    match args.command {
        Command::Show => show(&mut position)?,
        Command::Moves { san, rated } => {
            let moves = if rated {
                // Fewer replies for the opponent rate higher.
                generate_moves_rated(&mut position, |reply, _| {
                    -(reply.legal_moves().len() as i32)
                })
            } else {
                position.legal_moves()
            };
            for m in moves {
                let text = if san {
                    position.san(m)?
                } else {
                    m.to_algebraic()
                };
                if rated {
                    println!("{text} {}", m.score());
                } else {
                    println!("{text}");
                }
            }
        }
        Command::Perft { depth, divide } => {
            if divide {
                let mut total = 0;
                for (mv, nodes) in perft_divide(&mut position, depth) {
                    println!("{mv}: {nodes}");
                    total += nodes;
                }
                println!("\nNodes searched: {total}");
            } else {
                println!("{}", perft(&mut position, depth));
            }
        }
        Command::Probe { tables } => {
            let registry = EndgameRegistry::load(&tables)
                .with_context(|| format!("loading endgame tables from {}", tables.display()))?;
            match registry.probe(&position)? {
                Some((name, hit)) => {
                    let san = position.san(hit.mv)?;
                    println!("{name}: {san} ({hit})");
                }
                None => println!("no table entry"),
            }
        }
    }

    Ok(())
}

fn show(position: &mut Position) -> anyhow::Result<()> {
    println!("fen:     {}", position.to_fen());
    println!("hash:    {}", position.hash_hex());
    println!("to move: {}", position.side_to_move());
    println!("check:   {}", position.is_in_check());
    println!("result:  {}", position.game_result());
    if position.ply_count() > 0 {
        println!("moves:   {}", position.alg_history());
        println!("pgn:     {}", position.pgn_history()?);
    }
    Ok(())
}
