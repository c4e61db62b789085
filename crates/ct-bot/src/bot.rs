//! Command dispatch for chat lines.
//!
//! Every line starting with the configured prefix is a command. The first
//! word picks the command and the rest are its arguments. Scene commands
//! act on the scene registered under the room the line came from.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use ct_dice::{DiceError, choose, parse_storyteller, roll_expression};
use ct_tracker::{Actor, SceneRegistry, TrackerError};

use crate::config::BotConfig;
use crate::error::{BotError, BotResult};

/// How an `.init` argument changes an actor's initiative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InitChange {
    Set(i32),
    Shift(i32),
}

/// Chat front end over a scene registry and a dice roller.
///
/// `Bot` is `Sync`: lines from different rooms may be processed from
/// different threads.
#[derive(Debug)]
pub struct Bot {
    registry: SceneRegistry,
    config: BotConfig,
    rng: Mutex<StdRng>,
}

impl Bot {
    /// Create a bot with an empty registry.
    pub fn new(config: BotConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            registry: SceneRegistry::new(),
            config,
            rng: Mutex::new(rng),
        }
    }

    /// Get the scene registry.
    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    /// Get the configuration.
    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Process one chat line from `room` and return the reply.
    ///
    /// Lines without the command prefix get an empty reply.
    pub fn process(&self, room: &str, line: &str) -> BotResult<String> {
        let Some(body) = line.trim().strip_prefix(self.config.prefix) else {
            return Ok(String::new());
        };
        let (cmd, rest) = match body.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (body, ""),
        };
        if cmd.is_empty() {
            return Ok(String::new());
        }
        let cmd = cmd.to_lowercase();

        let reply = self.dispatch(room, &cmd, rest);
        match &reply {
            Ok(_) => debug!(room, command = %cmd, "command handled"),
            Err(e) => warn!(room, command = %cmd, error = %e, "command rejected"),
        }
        reply
    }

    fn dispatch(&self, room: &str, cmd: &str, rest: &str) -> BotResult<String> {
        match cmd {
            "startscene" => self.do_start_scene(room),
            "endscene" => self.do_end_scene(room),
            "addactor" => self.do_add_actor(room, rest),
            "removeactor" => self.do_remove_actor(room, rest),
            "init" => self.do_init(room, rest),
            "steal" => self.do_steal(room, rest),
            "newround" => self.do_new_round(room),
            "next" => self.do_next(room),
            "act" => self.do_act(room, rest),
            "overrides" => self.do_overrides(room),
            "showinit" => self.do_show_init(room, rest),
            "status" => self.do_status(room, rest),
            "roll" | "dice" | "d" => self.do_roll(rest),
            "ex" => self.do_storyteller(rest),
            "choose" | "choice" | "ch" => self.do_choose(rest),
            "help" => Ok(self.help()),
            other => Err(BotError::UnknownCommand(other.to_string())),
        }
    }

    fn do_start_scene(&self, room: &str) -> BotResult<String> {
        self.registry.start_session(room)?;
        Ok(format!("Started Scene: {room}"))
    }

    fn do_end_scene(&self, room: &str) -> BotResult<String> {
        self.registry.end_session(room)?;
        Ok(format!("Ended Scene: {room}"))
    }

    fn do_add_actor(&self, room: &str, rest: &str) -> BotResult<String> {
        let mut words = rest.split_whitespace();
        let name = words.next().ok_or_else(|| self.usage("addactor <name> [init] [notes]"))?;
        let initiative = match words.next() {
            Some(text) => parse_number(text)?,
            None => 0,
        };
        let notes = words.collect::<Vec<_>>().join(" ");

        let mut actor = Actor::new(name, initiative);
        if !notes.is_empty() {
            actor = actor.with_notes(notes);
        }
        self.registry.with_scene(room, |scene| scene.add_actor(actor))?;
        Ok(format!("{name} added to {room} Scene at {initiative} Initiative"))
    }

    fn do_remove_actor(&self, room: &str, rest: &str) -> BotResult<String> {
        let name = single_word(rest).ok_or_else(|| self.usage("removeactor <name>"))?;
        self.registry.with_scene(room, |scene| scene.remove_actor(name))?;
        Ok(format!("{name} removed from {room} Scene"))
    }

    fn do_init(&self, room: &str, rest: &str) -> BotResult<String> {
        let words: Vec<&str> = rest.split_whitespace().collect();
        let [name, value] = words[..] else {
            return Err(self.usage("init <name> <value|+n|-n>"));
        };
        let change = parse_change(value)?;

        let (initiative, queued) = self.registry.with_scene(room, |scene| {
            let was_pending = scene.is_pending(name);
            let initiative = match change {
                InitChange::Set(value) => scene.set_initiative(name, value)?.initiative(),
                InitChange::Shift(delta) => scene.add_initiative(name, delta)?.initiative(),
            };
            Ok((initiative, !was_pending && scene.is_pending(name)))
        })?;

        let mut reply = format!("{name} init set to {initiative}");
        if queued {
            reply.push_str(" - queued to act next");
        }
        Ok(reply)
    }

    fn do_steal(&self, room: &str, rest: &str) -> BotResult<String> {
        let words: Vec<&str> = rest.split_whitespace().collect();
        let [from, to, amount] = words[..] else {
            return Err(self.usage("steal <from> <to> <amount>"));
        };
        let amount = parse_number(amount)?;
        let (gainer, loser) = self
            .registry
            .with_scene(room, |scene| scene.steal_initiative(from, to, amount))?;
        Ok(format!(
            "{from} stole {amount} initiative from {to}: {}, {}",
            gainer.init_line(),
            loser.init_line()
        ))
    }

    fn do_new_round(&self, room: &str) -> BotResult<String> {
        let (round, tick) = self.registry.with_scene(room, |scene| {
            let round = scene.advance_round()?;
            Ok((round, scene.tick()))
        })?;
        Ok(format!("Round {round} begins at Tick {tick}"))
    }

    fn do_next(&self, room: &str) -> BotResult<String> {
        let (round, next) = self.registry.with_scene(room, |scene| {
            let next = scene.advance_tick()?;
            Ok((scene.round(), next))
        })?;
        Ok(match next {
            Some(tick) => format!("Tick {tick}"),
            None => format!("Round {round} complete"),
        })
    }

    fn do_act(&self, room: &str, rest: &str) -> BotResult<String> {
        let name = single_word(rest).ok_or_else(|| self.usage("act <name>"))?;
        self.registry.with_scene(room, |scene| {
            scene.mark_acted(name)?;
            Ok(())
        })?;
        Ok(format!("{name} has acted"))
    }

    fn do_overrides(&self, room: &str) -> BotResult<String> {
        let resolved = self
            .registry
            .with_scene(room, |scene| scene.resolve_overrides())?;
        if resolved.is_empty() {
            Ok("No overriding actions are queued".to_string())
        } else {
            Ok(format!("Overriding actions resolved: {}", resolved.join(", ")))
        }
    }

    fn do_show_init(&self, room: &str, rest: &str) -> BotResult<String> {
        let active_only = match rest {
            "" => false,
            arg if arg.eq_ignore_ascii_case("active") => true,
            _ => return Err(self.usage("showinit [active]")),
        };
        let table = self
            .registry
            .with_scene(room, |scene| Ok(scene.render_initiative_table(active_only)))?;
        Ok(table)
    }

    fn do_status(&self, room: &str, rest: &str) -> BotResult<String> {
        let status = self.registry.with_scene(room, |scene| match rest {
            "" => Ok(scene.render_all_status()),
            name => scene.render_actor_status(name),
        })?;
        Ok(status)
    }

    fn do_roll(&self, rest: &str) -> BotResult<String> {
        if rest.is_empty() {
            return Err(DiceError::NoDice.into());
        }
        let roll = roll_expression(rest, &mut self.rng())?;
        Ok(format!("You roll {rest}: {roll}"))
    }

    fn do_storyteller(&self, rest: &str) -> BotResult<String> {
        let (count, check) = parse_storyteller(rest)?;
        let pouch = check.roll(count, &mut self.rng())?;
        let outcome = check.resolve(&pouch);
        Ok(format!("{rest}: {outcome}"))
    }

    fn do_choose(&self, rest: &str) -> BotResult<String> {
        let choice = choose(rest, &mut self.rng())?;
        Ok(choice.to_string())
    }

    fn help(&self) -> String {
        let p = self.config.prefix;
        format!(
            "\
Scene Commands:
  {p}startscene                     Start a scene in this room
  {p}endscene                       End this room's scene
  {p}addactor <name> [init] [notes] Add an actor (initiative defaults to 0)
  {p}removeactor <name>             Remove an actor
  {p}init <name> <value|+n|-n>      Set or shift an actor's initiative
  {p}steal <from> <to> <n>          Move n initiative from <to> to <from>
  {p}newround                       Start the next round
  {p}next                           Finish the current tick
  {p}act <name>                     Mark an actor as having acted
  {p}overrides                      Resolve queued overriding actions
  {p}showinit [active]              Show the initiative table
  {p}status [name]                  Show actor status

Dice Commands:
  {p}roll <expr>                    Roll dice, e.g. 3d6v1+2 (aliases: {p}dice, {p}d)
  {p}ex <n> [tN] [dN] [rN] [eN] [+N] [-N]
                                    Count storyteller successes on n d10s
  {p}choose a, b, c                 Pick one option (aliases: {p}choice, {p}ch)"
        )
    }

    fn usage(&self, form: &str) -> BotError {
        BotError::Usage(format!("{}{form}", self.config.prefix))
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn single_word(rest: &str) -> Option<&str> {
    let mut words = rest.split_whitespace();
    match (words.next(), words.next()) {
        (Some(word), None) => Some(word),
        _ => None,
    }
}

fn parse_number(text: &str) -> Result<i32, TrackerError> {
    text.parse()
        .map_err(|_| TrackerError::InvalidInitiative(text.to_string()))
}

/// `+n` and `-n` shift, `n` and `=n` set.
fn parse_change(text: &str) -> Result<InitChange, TrackerError> {
    if text.starts_with(['+', '-']) {
        parse_number(text).map(InitChange::Shift)
    } else {
        parse_number(text.strip_prefix('=').unwrap_or(text)).map(InitChange::Set)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use ct_tracker::ErrorKind;

    fn test_bot() -> Bot {
        Bot::new(BotConfig::default().with_seed(7))
    }

    fn run(bot: &Bot, lines: &[&str]) {
        for line in lines {
            bot.process("#dnd", line).unwrap();
        }
    }

    fn tracker_kind(err: BotError) -> ErrorKind {
        match err {
            BotError::Tracker(e) => e.kind(),
            other => panic!("expected tracker error, got {other:?}"),
        }
    }

    #[test]
    fn ignores_plain_chat() {
        let bot = test_bot();
        assert_eq!(bot.process("#dnd", "hello there").unwrap(), "");
        assert_eq!(bot.process("#dnd", "   ").unwrap(), "");
        assert_eq!(bot.process("#dnd", ".").unwrap(), "");
    }

    #[test]
    fn scene_lifecycle() {
        let bot = test_bot();
        assert_eq!(
            bot.process("#dnd", ".startscene").unwrap(),
            "Started Scene: #dnd"
        );
        assert!(bot.registry().contains("#dnd"));
        assert_eq!(bot.process("#dnd", ".endscene").unwrap(), "Ended Scene: #dnd");
        assert!(bot.registry().is_empty());

        let err = bot.process("#dnd", ".endscene").unwrap_err();
        assert_eq!(tracker_kind(err), ErrorKind::NoSession);
    }

    #[test]
    fn start_twice_fails() {
        let bot = test_bot();
        run(&bot, &[".startscene"]);
        let err = bot.process("#dnd", ".startscene").unwrap_err();
        assert_eq!(err.to_string(), "a scene is already running in #dnd");
    }

    #[test]
    fn commands_are_case_insensitive() {
        let bot = test_bot();
        assert_eq!(
            bot.process("#dnd", ".StartScene").unwrap(),
            "Started Scene: #dnd"
        );
    }

    #[test]
    fn add_and_show_actors() {
        let bot = test_bot();
        run(&bot, &[".startscene"]);
        assert_eq!(
            bot.process("#dnd", ".addactor Lee 3").unwrap(),
            "Lee added to #dnd Scene at 3 Initiative"
        );
        assert_eq!(
            bot.process("#dnd", ".addactor Bob 6 Singer of songs").unwrap(),
            "Bob added to #dnd Scene at 6 Initiative"
        );
        assert_eq!(
            bot.process("#dnd", ".addactor Vol").unwrap(),
            "Vol added to #dnd Scene at 0 Initiative"
        );
        assert_eq!(
            bot.process("#dnd", ".showinit").unwrap(),
            "[Round: 0 - Tick: 0]\nBob: 6\nLee: 3\nVol: 0"
        );
        assert_eq!(
            bot.process("#dnd", ".status Bob").unwrap(),
            "Bob status - Init: 6 - Acted: no - Notes: Singer of songs"
        );
    }

    #[test]
    fn add_rejects_bad_input() {
        let bot = test_bot();
        run(&bot, &[".startscene", ".addactor Lee 3"]);

        let err = bot.process("#dnd", ".addactor Lee 5").unwrap_err();
        assert_eq!(tracker_kind(err), ErrorKind::DuplicateActor);

        let err = bot.process("#dnd", ".addactor Bob fast").unwrap_err();
        assert_eq!(err.to_string(), "invalid initiative value: fast");

        let err = bot.process("#dnd", ".addactor").unwrap_err();
        assert!(matches!(err, BotError::Usage(_)));
        assert_eq!(bot.registry().with_scene("#dnd", |s| Ok(s.actor_count())).unwrap(), 1);
    }

    #[test]
    fn scene_commands_need_a_scene() {
        let bot = test_bot();
        let err = bot.process("#dnd", ".addactor Lee 3").unwrap_err();
        assert_eq!(err.to_string(), "no scene is running in #dnd");
    }

    #[test]
    fn set_and_shift_initiative() {
        let bot = test_bot();
        run(&bot, &[".startscene", ".addactor Lee 3", ".addactor Bob 6"]);

        assert_eq!(bot.process("#dnd", ".init Lee 9").unwrap(), "Lee init set to 9");
        assert_eq!(
            bot.process("#dnd", ".showinit").unwrap(),
            "[Round: 0 - Tick: 0]\nLee: 9\nBob: 6"
        );

        assert_eq!(bot.process("#dnd", ".init Bob -7").unwrap(), "Bob init set to -1");
        assert_eq!(bot.process("#dnd", ".init Bob +2").unwrap(), "Bob init set to 1");
        assert_eq!(bot.process("#dnd", ".init Bob =-4").unwrap(), "Bob init set to -4");
        assert_eq!(
            bot.process("#dnd", ".showinit").unwrap(),
            "[Round: 0 - Tick: 0]\nLee: 9\nBob: -4"
        );
    }

    #[test]
    fn init_errors() {
        let bot = test_bot();
        run(&bot, &[".startscene", ".addactor Lee 3"]);

        let err = bot.process("#dnd", ".init Zed 4").unwrap_err();
        assert_eq!(tracker_kind(err), ErrorKind::UnknownActor);

        let err = bot.process("#dnd", ".init Lee soon").unwrap_err();
        assert_eq!(tracker_kind(err), ErrorKind::InvalidInitiative);

        let err = bot.process("#dnd", ".init Lee +2147483647").unwrap_err();
        assert_eq!(tracker_kind(err), ErrorKind::InvalidInitiative);

        let err = bot.process("#dnd", ".init Lee").unwrap_err();
        assert!(matches!(err, BotError::Usage(_)));
    }

    #[test]
    fn round_flow() {
        let bot = test_bot();
        run(&bot, &[".startscene", ".addactor Lee 3", ".addactor Bob 6"]);

        assert_eq!(
            bot.process("#dnd", ".newround").unwrap(),
            "Round 1 begins at Tick 6"
        );
        assert_eq!(
            bot.process("#dnd", ".showinit active").unwrap(),
            "[Round: 1 - Tick: 6]\nBob: 6 [Active]"
        );
        assert_eq!(bot.process("#dnd", ".next").unwrap(), "Tick 3");
        assert_eq!(bot.process("#dnd", ".next").unwrap(), "Round 1 complete");
        assert_eq!(
            bot.process("#dnd", ".newround").unwrap(),
            "Round 2 begins at Tick 6"
        );
    }

    #[test]
    fn new_round_needs_actors() {
        let bot = test_bot();
        run(&bot, &[".startscene"]);
        let err = bot.process("#dnd", ".newround").unwrap_err();
        assert_eq!(err.to_string(), "the scene has no actors");
    }

    #[test]
    fn overriding_action_blocks_new_round() {
        let bot = test_bot();
        run(
            &bot,
            &[".startscene", ".addactor Lee 3", ".addactor Bob 6", ".newround"],
        );

        assert_eq!(
            bot.process("#dnd", ".init Lee 9").unwrap(),
            "Lee init set to 9 - queued to act next"
        );
        // Already queued, so no second notice.
        assert_eq!(bot.process("#dnd", ".init Lee 10").unwrap(), "Lee init set to 10");

        let err = bot.process("#dnd", ".newround").unwrap_err();
        assert_eq!(
            err.to_string(),
            "overriding actions must resolve first: Lee"
        );

        assert_eq!(
            bot.process("#dnd", ".overrides").unwrap(),
            "Overriding actions resolved: Lee"
        );
        assert_eq!(
            bot.process("#dnd", ".overrides").unwrap(),
            "No overriding actions are queued"
        );
        assert_eq!(
            bot.process("#dnd", ".newround").unwrap(),
            "Round 2 begins at Tick 10"
        );
    }

    #[test]
    fn overriding_action_blocks_next_tick() {
        let bot = test_bot();
        run(
            &bot,
            &[
                ".startscene",
                ".addactor Lee 3",
                ".addactor Bob 6",
                ".newround",
                ".init Lee 7",
            ],
        );
        let err = bot.process("#dnd", ".next").unwrap_err();
        assert_eq!(err.to_string(), "overriding actions must resolve first: Lee");
        bot.process("#dnd", ".overrides").unwrap();
        assert_eq!(bot.process("#dnd", ".next").unwrap(), "Round 1 complete");
    }

    #[test]
    fn acting_resolves_an_override() {
        let bot = test_bot();
        run(
            &bot,
            &[
                ".startscene",
                ".addactor Lee 3",
                ".addactor Bob 6",
                ".newround",
                ".init Lee 9",
            ],
        );
        assert_eq!(bot.process("#dnd", ".act Lee").unwrap(), "Lee has acted");
        assert_eq!(
            bot.process("#dnd", ".status Lee").unwrap(),
            "Lee status - Init: 9 - Acted: yes"
        );
        assert!(bot.process("#dnd", ".newround").is_ok());
    }

    #[test]
    fn act_before_first_round_fails() {
        let bot = test_bot();
        run(&bot, &[".startscene", ".addactor Lee 3"]);
        let err = bot.process("#dnd", ".act Lee").unwrap_err();
        assert_eq!(tracker_kind(err), ErrorKind::RoundNotStarted);
    }

    #[test]
    fn steal_moves_initiative() {
        let bot = test_bot();
        run(&bot, &[".startscene", ".addactor Lee 3", ".addactor Bob 6"]);
        assert_eq!(
            bot.process("#dnd", ".steal Lee Bob 2").unwrap(),
            "Lee stole 2 initiative from Bob: Lee: 5, Bob: 4"
        );

        let err = bot.process("#dnd", ".steal Lee Lee 2").unwrap_err();
        assert_eq!(tracker_kind(err), ErrorKind::SameActor);

        let err = bot.process("#dnd", ".steal Lee Bob").unwrap_err();
        assert!(matches!(err, BotError::Usage(_)));
    }

    #[test]
    fn remove_actor() {
        let bot = test_bot();
        run(&bot, &[".startscene", ".addactor Lee 3", ".addactor Bob 6"]);
        assert_eq!(
            bot.process("#dnd", ".removeactor Lee").unwrap(),
            "Lee removed from #dnd Scene"
        );
        assert_eq!(
            bot.process("#dnd", ".showinit").unwrap(),
            "[Round: 0 - Tick: 0]\nBob: 6"
        );
        let err = bot.process("#dnd", ".removeactor Lee").unwrap_err();
        assert_eq!(tracker_kind(err), ErrorKind::UnknownActor);
    }

    #[test]
    fn rooms_are_independent() {
        let bot = test_bot();
        bot.process("#a", ".startscene").unwrap();
        bot.process("#b", ".startscene").unwrap();
        bot.process("#a", ".addactor Lee 3").unwrap();
        assert_eq!(
            bot.process("#b", ".showinit").unwrap(),
            "[Round: 0 - Tick: 0]"
        );
        assert_eq!(bot.registry().keys(), ["#a", "#b"]);
    }

    #[test]
    fn rooms_from_many_threads() {
        let bot = test_bot();
        thread::scope(|scope| {
            for i in 0..8 {
                let bot = &bot;
                scope.spawn(move || {
                    let room = format!("#room{i}");
                    bot.process(&room, ".startscene").unwrap();
                    bot.process(&room, ".addactor Lee 3").unwrap();
                    bot.process(&room, ".roll 2d6").unwrap();
                });
            }
        });
        assert_eq!(bot.registry().len(), 8);
    }

    #[test]
    fn roll_dice() {
        let bot = test_bot();
        assert_eq!(
            bot.process("#dnd", ".roll 3d1+1").unwrap(),
            "You roll 3d1+1: (1+1+1)+1 = 4"
        );
        assert_eq!(
            bot.process("#dnd", ".d 3d1v2+1").unwrap(),
            "You roll 3d1v2+1: (1[+1+1])+1 = 2"
        );
        assert!(bot.process("#dnd", ".dice 2d6").unwrap().starts_with("You roll 2d6: ("));
    }

    #[test]
    fn roll_errors() {
        let bot = test_bot();
        let err = bot.process("#dnd", ".roll 1001d1").unwrap_err();
        assert_eq!(err.to_string(), "I only have 1000 dice. =(");

        let err = bot.process("#dnd", ".roll").unwrap_err();
        assert!(matches!(err, BotError::Dice(DiceError::NoDice)));
    }

    #[test]
    fn deeply_nested_roll_is_rejected() {
        let bot = test_bot();
        run(&bot, &[".startscene", ".addactor Lee 3"]);
        let line = format!(".roll {}1{}", "(".repeat(100_000), ")".repeat(100_000));
        let err = bot.process("#dnd", &line).unwrap_err();
        assert!(matches!(err, BotError::Dice(DiceError::Syntax { .. })));
        // The scene is still there.
        assert_eq!(
            bot.process("#dnd", ".showinit").unwrap(),
            "[Round: 0 - Tick: 0]\nLee: 3"
        );
    }

    #[test]
    fn storyteller_explosion_over_limit() {
        let bot = test_bot();
        let err = bot.process("#dnd", ".ex 1000 e1").unwrap_err();
        assert_eq!(err.to_string(), "I only have 1000 dice. =(");
    }

    #[test]
    fn seeded_rolls_repeat() {
        let a = test_bot().process("#dnd", ".roll 4d20").unwrap();
        let b = test_bot().process("#dnd", ".roll 4d20").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn storyteller_pool() {
        let bot = test_bot();
        let reply = bot.process("#dnd", ".ex 5 t6").unwrap();
        assert!(reply.starts_with("5 t6: ["));
        assert!(
            reply.ends_with("Success") || reply.ends_with("Successes") || reply.ends_with("BOTCH")
        );
    }

    #[test]
    fn choose_option() {
        let bot = test_bot();
        assert_eq!(
            bot.process("#dnd", ".choose only").unwrap(),
            "Your options: only. My choice: only"
        );
        let reply = bot.process("#dnd", ".ch left|right").unwrap();
        assert!(reply.starts_with("Your options: left, right. My choice: "));

        let err = bot.process("#dnd", ".choice").unwrap_err();
        assert!(matches!(err, BotError::Dice(DiceError::NoChoices)));
    }

    #[test]
    fn custom_prefix() {
        let bot = Bot::new(BotConfig::default().with_prefix('!').with_seed(1));
        assert_eq!(bot.process("#dnd", ".startscene").unwrap(), "");
        assert_eq!(
            bot.process("#dnd", "!startscene").unwrap(),
            "Started Scene: #dnd"
        );
        assert!(bot.process("#dnd", "!help").unwrap().contains("!roll <expr>"));
    }

    #[test]
    fn unknown_command() {
        let bot = test_bot();
        let err = bot.process("#dnd", ".dance").unwrap_err();
        assert_eq!(err.to_string(), "unknown command: dance");
    }

    #[test]
    fn help_lists_commands() {
        let bot = test_bot();
        let help = bot.process("#dnd", ".help").unwrap();
        for cmd in [".startscene", ".addactor", ".steal", ".newround", ".showinit", ".roll"] {
            assert!(help.contains(cmd), "help is missing {cmd}");
        }
    }
}
