//! Scripted sessions against the animated puzzle.
//!
//! A script has one command per line. Blank lines and text after `#` are
//! ignored.
//!
//! | command | effect |
//! |---|---|
//! | `move <moves...>` | do each move as a user move, waiting for each to finish |
//! | `undo` | undo the last user move and wait for it to finish |
//! | `shuffle [seed]` | shuffle the puzzle and wait for the shuffle to finish |
//! | `reset` | reset the puzzle |
//! | `mode view` / `mode fixed` | set the interaction mode |
//! | `drag <x> <y> <dx> <dy>` | press at pixel `(x, y)`, move by `(dx, dy)`, release, and wait |
//! | `wait <ms>` | advance the clock, one frame at a time |
//! | `expect solved` / `expect unsolved` | fail unless the puzzle is in that state |
//!
//! The screen is 800x800 pixels, viewed through the default camera.

use std::str::FromStr;

use cgmath::Vector2;
use eyre::{Result, bail, ensure, eyre};
use itertools::Itertools;
use neoncube_core::prelude::*;
use neoncube_prefs::{Preferences, PuzzleMode};
use neoncube_view::{CameraHost, PuzzleView, ScreenRect};
use web_time::{Duration, Instant};

/// Time between frames.
const FRAME: Duration = Duration::from_micros(16_667);
/// Maximum number of frames to wait for the puzzle to settle.
const MAX_SETTLE_FRAMES: usize = 100_000;
/// Size of the virtual screen in pixels.
const SCREEN_SIZE: Float = 800.0;

/// Command in a script.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScriptCommand {
    Moves(Vec<Move>),
    Undo,
    Shuffle(Option<String>),
    Reset,
    Mode(PuzzleMode),
    Drag {
        start: Vector2<Float>,
        delta: Vector2<Float>,
    },
    Wait(Duration),
    Expect(bool),
}
impl FromStr for ScriptCommand {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        let mut words = s.split_whitespace();
        let command = words.next().ok_or_else(|| eyre!("empty command"))?;
        let args = words.collect_vec();
        let no_args = |cmd: ScriptCommand| -> Result<ScriptCommand> {
            ensure!(args.is_empty(), "`{command}` takes no arguments");
            Ok(cmd)
        };
        let parse_floats = || -> Result<Vec<Float>> {
            args.iter()
                .map(|arg| arg.parse().map_err(|_| eyre!("expected number, got {arg:?}")))
                .collect()
        };

        match command {
            "move" => {
                ensure!(!args.is_empty(), "`move` needs at least one move");
                Ok(Self::Moves(Move::parse_sequence(&args.join(" "))?))
            }
            "undo" => no_args(Self::Undo),
            "reset" => no_args(Self::Reset),
            "shuffle" => match args.as_slice() {
                [] => Ok(Self::Shuffle(None)),
                [seed] => Ok(Self::Shuffle(Some(seed.to_string()))),
                _ => bail!("`shuffle` takes at most one seed"),
            },
            "mode" => match args.as_slice() {
                ["view"] => Ok(Self::Mode(PuzzleMode::View)),
                ["fixed"] => Ok(Self::Mode(PuzzleMode::Fixed)),
                _ => bail!("expected `mode view` or `mode fixed`"),
            },
            "drag" => match parse_floats()?.as_slice() {
                &[x, y, dx, dy] => Ok(Self::Drag {
                    start: Vector2::new(x, y),
                    delta: Vector2::new(dx, dy),
                }),
                _ => bail!("`drag` takes four numbers: x, y, dx, dy"),
            },
            "wait" => match args.as_slice() {
                [ms] => Ok(Self::Wait(Duration::from_millis(ms.parse()?))),
                _ => bail!("`wait` takes a number of milliseconds"),
            },
            "expect" => match args.as_slice() {
                ["solved"] => Ok(Self::Expect(true)),
                ["unsolved"] => Ok(Self::Expect(false)),
                _ => bail!("expected `expect solved` or `expect unsolved`"),
            },
            _ => bail!("unknown command {command:?}"),
        }
    }
}

/// Parses a script, returning each command with its 1-indexed line number.
pub(crate) fn parse_script(script: &str) -> Result<Vec<(usize, ScriptCommand)>> {
    script
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.split('#').next().unwrap_or("").trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_number, line)| -> Result<(usize, ScriptCommand)> {
            let command = line
                .parse::<ScriptCommand>()
                .map_err(|e| e.wrap_err(format!("error on line {line_number}")))?;
            Ok((line_number, command))
        })
        .collect()
}

/// Final state of a scripted session.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Summary {
    pub net: String,
    pub history: Vec<Move>,
    pub status: SolveStatus,
    pub celebrations: usize,
}

/// Runs script commands against a [`PuzzleView`] with a virtual clock.
pub(crate) struct ScriptRunner {
    view: PuzzleView,
    host: CameraHost,
    rect: ScreenRect,
    now: Instant,
}
impl ScriptRunner {
    pub fn new(mut prefs: Preferences) -> Self {
        // The script decides when to shuffle.
        prefs.shuffle.on_start = false;

        let mut host = CameraHost::default();
        let now = Instant::now();
        let view = PuzzleView::new(prefs, &mut host, now);
        Self {
            view,
            host,
            rect: ScreenRect::new(SCREEN_SIZE, SCREEN_SIZE),
            now,
        }
    }

    pub fn run(&mut self, command: &ScriptCommand) -> Result<()> {
        log::debug!("running {command:?}");
        match command {
            ScriptCommand::Moves(moves) => {
                for &m in moves {
                    ensure!(self.view.do_move(m, self.now), "move {m} was refused");
                    self.settle()?;
                }
            }
            ScriptCommand::Undo => {
                if !self.view.undo(self.now) {
                    log::warn!("nothing to undo");
                }
                self.settle()?;
            }
            ScriptCommand::Shuffle(seed) => {
                let mut params = ScrambleParams::new(self.view.prefs.shuffle.length);
                if let Some(seed) = seed {
                    params.seed = seed.clone();
                }
                ensure!(
                    self.view.shuffle_with_params(params, self.now),
                    "shuffle was refused"
                );
                self.settle()?;
            }
            ScriptCommand::Reset => {
                ensure!(self.view.reset(), "reset was refused");
            }
            ScriptCommand::Mode(mode) => self.view.set_mode(*mode, &mut self.host),
            ScriptCommand::Drag { start, delta } => {
                self.view.pointer_down(&self.rect, *start, &mut self.host);
                let m = self
                    .view
                    .pointer_move(*start + *delta, &mut self.host, self.now);
                self.view.pointer_up(&mut self.host);
                match m {
                    Some(m) => log::info!("drag turned {m}"),
                    None => log::info!("drag did not turn a layer"),
                }
                self.settle()?;
            }
            ScriptCommand::Wait(duration) => {
                let end = self.now + *duration;
                while self.now < end {
                    self.frame();
                }
            }
            &ScriptCommand::Expect(solved) => {
                let status = self.view.sim.lattice().solve_status();
                ensure!(
                    status.is_solved() == solved,
                    "expected {}, but puzzle is {status:?}",
                    if solved { "solved" } else { "unsolved" }
                );
            }
        }
        Ok(())
    }

    /// Advances the clock by one frame.
    fn frame(&mut self) {
        self.now += FRAME;
        self.view.tick(self.now, &mut self.host);
    }
    /// Advances the clock until no layer is rotating and no shuffle is in
    /// progress.
    fn settle(&mut self) -> Result<()> {
        for _ in 0..MAX_SETTLE_FRAMES {
            if !self.view.sim.is_animating() && !self.view.sim.is_shuffling() {
                return Ok(());
            }
            self.frame();
        }
        bail!("puzzle never stopped moving")
    }

    pub fn summary(&self) -> Summary {
        let lattice = self.view.sim.lattice();
        Summary {
            net: lattice.net_string(),
            history: self.view.sim.history().iter().collect(),
            status: lattice.solve_status(),
            celebrations: self.host.celebrations,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run_script(script: &str) -> Result<Summary> {
        let mut runner = ScriptRunner::new(Preferences::default());
        for (_, command) in parse_script(script)? {
            runner.run(&command)?;
        }
        Ok(runner.summary())
    }

    #[test]
    fn test_parse_script() {
        let script = "
            # comment
            move x1 y0'   # trailing comment
            wait 250
            mode fixed
            drag 400 400 25 -3.5
            expect unsolved
        ";
        let commands = parse_script(script).unwrap();
        assert_eq!(
            commands,
            vec![
                (3, ScriptCommand::Moves(Move::parse_sequence("x1 y0'").unwrap())),
                (4, ScriptCommand::Wait(Duration::from_millis(250))),
                (5, ScriptCommand::Mode(PuzzleMode::Fixed)),
                (
                    6,
                    ScriptCommand::Drag {
                        start: Vector2::new(400.0, 400.0),
                        delta: Vector2::new(25.0, -3.5),
                    },
                ),
                (7, ScriptCommand::Expect(false)),
            ],
        );

        assert!(parse_script("undo now").is_err());
        assert!(parse_script("move x5").is_err());
        assert!(parse_script("drag 1 2 3").is_err());
        assert!(parse_script("twist x1").is_err());
    }

    #[test]
    fn test_move_and_undo() {
        let summary = run_script(
            "
            move x1
            expect unsolved
            undo
            expect solved
            ",
        )
        .unwrap();
        assert_eq!(summary.status, SolveStatus::Solved);
        assert_eq!(summary.history, vec![]);
        assert_eq!(summary.celebrations, 1);
        assert_eq!(summary.net, Lattice::new_solved().net_string());
    }

    #[test]
    fn test_inverse_sequence() {
        let summary = run_script(
            "
            move x1' y1' x1 y1
            move x1' y1' x1 y1
            move x1' y1' x1 y1
            move x1' y1' x1 y1
            move x1' y1' x1 y1
            expect unsolved
            move x1' y1' x1 y1
            expect solved
            ",
        )
        .unwrap();
        assert_eq!(summary.history.len(), 24);
        assert_eq!(summary.celebrations, 1);
    }

    #[test]
    fn test_shuffle() {
        let summary = run_script("move x0\nshuffle abc").unwrap();
        assert!(summary.history.is_empty());
        assert_eq!(summary.celebrations, 0);
        assert!(run_script("shuffle\nundo\nreset\nexpect solved").is_ok());
    }

    #[test]
    fn test_drag_in_view_mode_does_nothing() {
        let summary = run_script("drag 400 400 40 0\nexpect solved").unwrap();
        assert_eq!(summary.history, vec![]);
    }

    #[test]
    fn test_failed_expectation() {
        assert!(run_script("move z0\nexpect solved").is_err());
    }
}
