/// State transitions the core reports to its observers
///
/// The session never touches presentation or audio directly; the front end
/// drains these after each frame (or input call) and forwards them to the
/// sound engine, HUD and metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A run began; ambient audio should start
    Started,
    /// A pickup was consumed; carries the new score
    Ate { score: u32 },
    /// The run ended; carries the final score
    Crashed { final_score: u32 },
    /// Dash engaged (one-shot cue)
    DashStarted,
    /// Dash ended, voluntarily or by depletion
    DashEnded,
    /// A background-track step is due
    MusicStep { step: u32, dashing: bool },
}
