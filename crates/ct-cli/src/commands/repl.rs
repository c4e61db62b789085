use std::io::{self, BufRead, IsTerminal, Write};

use colored::Colorize;
use tracing::info;

use ct_bot::Bot;

pub fn run(room: &str, seed: Option<u64>, prefix: char) -> Result<(), String> {
    let bot = Bot::new(super::bot_config(seed, prefix));
    let mut room = room.to_string();
    let interactive = io::stdin().is_terminal();

    if interactive {
        println!("  {} Combat Tracker in {room}", "Starting".bold());
        println!("  Type '{prefix}help' for commands, ':room <name>' to switch rooms, ':quit' to exit.\n");
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        if interactive {
            print!("{room}> ");
            io::stdout().flush().map_err(|e| e.to_string())?;
        }

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == ":quit" || input == ":q" {
            break;
        }
        if let Some(next) = input.strip_prefix(":room") {
            let next = next.trim();
            if next.is_empty() {
                println!("{}", format!("usage: :room <name> (current room: {room})").yellow());
            } else {
                room = next.to_string();
                info!(room = %room, "switched room");
                println!("Room: {room}");
            }
            continue;
        }

        match bot.process(&room, input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}");
                }
            }
            Err(e) => {
                println!("{}", e.to_string().yellow());
            }
        }
    }

    Ok(())
}
