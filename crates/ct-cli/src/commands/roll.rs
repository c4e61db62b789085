use ct_bot::Bot;

pub fn run(expression: &str, seed: Option<u64>) -> Result<(), String> {
    let config = super::bot_config(seed, '.');
    let bot = Bot::new(config);
    let reply = bot
        .process("roll", &format!(".roll {expression}"))
        .map_err(|e| e.to_string())?;
    println!("{reply}");
    Ok(())
}
